use std::collections::HashMap;

pub type TermId = u32;
pub type DocId = u32;

#[derive(Debug, Clone)]
pub struct DocMeta {
    /// Caller-supplied identifier.
    pub external_id: String,
    /// Token count after tokenization.
    pub length: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub tf: u32, // raw occurrence count, always >= 1
}

/// In-memory inverted index. Built once by [`crate::indexer::IndexBuilder`] and read-only afterwards.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    pub(crate) dictionary: HashMap<String, TermId>,
    pub(crate) df: Vec<u32>,
    pub(crate) postings: Vec<Vec<Posting>>, // indexed by term id, each sorted by doc_id
    pub(crate) docs: Vec<DocMeta>,          // indexed by doc id
    pub(crate) doc_ids: HashMap<String, DocId>,
    pub(crate) num_docs: u32,
}

impl InvertedIndex {
    /// Index an in-memory corpus of `(id, text)` pairs.
    pub fn from_documents<I, S, T>(documents: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: AsRef<str>,
    {
        let mut builder = crate::indexer::IndexBuilder::new();
        for (id, text) in documents {
            builder.add_document(id, text.as_ref());
        }
        builder.finish()
    }

    pub fn num_docs(&self) -> u32 { self.num_docs }

    pub fn num_terms(&self) -> usize { self.dictionary.len() }

    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    /// Postings for `term`, sorted by doc id. Empty when the term is not in the vocabulary.
    pub fn postings(&self, term: &str) -> &[Posting] {
        match self.term_id(term) {
            Some(tid) => &self.postings[tid as usize],
            None => &[],
        }
    }

    /// Document frequency; 0 for terms outside the vocabulary.
    pub fn df(&self, term: &str) -> u32 {
        self.term_id(term).map_or(0, |tid| self.df[tid as usize])
    }

    pub fn term_frequency(&self, term: &str, doc_id: DocId) -> u32 {
        let plist = self.postings(term);
        plist
            .binary_search_by_key(&doc_id, |p| p.doc_id)
            .map_or(0, |i| plist[i].tf)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.dictionary.keys().map(String::as_str)
    }

    pub fn doc(&self, doc_id: DocId) -> Option<&DocMeta> { self.docs.get(doc_id as usize) }

    pub fn doc_length(&self, doc_id: DocId) -> Option<u32> { self.doc(doc_id).map(|d| d.length) }

    pub fn doc_id(&self, external_id: &str) -> Option<DocId> { self.doc_ids.get(external_id).copied() }

    pub fn external_id(&self, doc_id: DocId) -> Option<&str> {
        self.doc(doc_id).map(|d| d.external_id.as_str())
    }

    pub fn is_empty(&self) -> bool { self.num_docs == 0 }
}
