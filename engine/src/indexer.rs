use crate::error::{Error, Result};
use crate::index::{DocId, DocMeta, InvertedIndex, Posting, TermId};
use crate::tokenizer::tokenize;
use std::collections::HashMap;

/// Accumulates documents into an [`InvertedIndex`]. Consumed by [`IndexBuilder::finish`], so the
/// finished index cannot be appended to.
///
/// Counts are stored as `u32`: a corpus holds at most `u32::MAX` documents, and a document longer
/// than `u32::MAX` tokens records a saturated length.
#[derive(Default)]
pub struct IndexBuilder {
    next_doc_id: DocId,
    dictionary: HashMap<String, TermId>,
    postings: Vec<Vec<Posting>>,
    docs: Vec<DocMeta>,
    doc_ids: HashMap<String, DocId>,
}

impl IndexBuilder {
    pub fn new() -> Self { Self::default() }

    /// Tokenize `text` and record one posting per distinct term. Ids are expected to be unique.
    pub fn add_document(&mut self, id: impl Into<String>, text: &str) -> DocId {
        let doc_id = self.next_doc_id;
        self.next_doc_id += 1;
        let external_id = id.into();

        let tokens = tokenize(text);
        let length = count_u32(tokens.len());

        // Tally in first-seen order so term ids are assigned deterministically.
        let mut tf_counts: Vec<(TermId, u32)> = Vec::new();
        let mut slot: HashMap<TermId, usize> = HashMap::new();
        for term in tokens {
            let next_term_id = self.postings.len() as TermId;
            let tid = *self.dictionary.entry(term).or_insert(next_term_id);
            if tid == next_term_id {
                self.postings.push(Vec::new());
            }
            match slot.get(&tid) {
                Some(&i) => tf_counts[i].1 = tf_counts[i].1.saturating_add(1),
                None => {
                    slot.insert(tid, tf_counts.len());
                    tf_counts.push((tid, 1));
                }
            }
        }

        // doc ids only grow, so every postings list stays sorted by doc_id
        for (tid, tf) in tf_counts {
            self.postings[tid as usize].push(Posting { doc_id, tf });
        }

        tracing::trace!(doc_id, external_id = %external_id, length, "indexed document");
        self.doc_ids.insert(external_id.clone(), doc_id);
        self.docs.push(DocMeta { external_id, length });
        doc_id
    }

    pub fn num_docs(&self) -> u32 { self.next_doc_id }

    /// Record N and per-term DF and hand back the read-only index.
    pub fn finish(self) -> InvertedIndex {
        // A postings list holds one entry per document, so it never exceeds the u32 doc id space.
        let df: Vec<u32> = self.postings.iter().map(|plist| count_u32(plist.len())).collect();
        let num_docs = self.next_doc_id;
        tracing::debug!(num_docs, num_terms = self.dictionary.len(), "index build complete");
        InvertedIndex {
            dictionary: self.dictionary,
            df,
            postings: self.postings,
            docs: self.docs,
            doc_ids: self.doc_ids,
            num_docs,
        }
    }
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Build an index from a fallible document source. The first error aborts the build.
pub fn build_index<I, S, T, E>(documents: I) -> Result<InvertedIndex>
where
    I: IntoIterator<Item = std::result::Result<(S, T), E>>,
    S: Into<String>,
    T: AsRef<str>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let mut builder = IndexBuilder::new();
    for doc in documents {
        let (id, text) = doc.map_err(|e| Error::Construction { source: e.into() })?;
        builder.add_document(id, text.as_ref());
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn counts_term_frequency_per_document() {
        let mut b = IndexBuilder::new();
        let d0 = b.add_document("a", "the cat sat on the mat the end");
        let d1 = b.add_document("b", "another cat");
        assert_eq!(b.num_docs(), 2);
        let idx = b.finish();

        assert_eq!(idx.term_frequency("the", d0), 3);
        assert_eq!(idx.term_frequency("cat", d0), 1);
        assert_eq!(idx.term_frequency("cat", d1), 1);
        assert_eq!(idx.doc_length(d0), Some(8));
        assert_eq!(idx.doc_length(d1), Some(2));
    }

    #[test]
    fn df_matches_postings_length() {
        let idx = InvertedIndex::from_documents([
            ("1", "red green"),
            ("2", "green blue green"),
            ("3", "blue"),
            ("4", ""),
        ]);
        assert_eq!(idx.num_docs(), 4);
        for term in idx.terms() {
            let plist = idx.postings(term);
            assert!(idx.df(term) >= 1);
            assert_eq!(idx.df(term) as usize, plist.len());
            assert!(plist.windows(2).all(|w| w[0].doc_id < w[1].doc_id));
            assert!(plist.iter().all(|p| p.tf >= 1));
        }
        assert_eq!(idx.df("green"), 2);
        assert_eq!(idx.doc_length(3), Some(0));
    }

    #[test]
    fn counts_saturate_instead_of_wrapping() {
        assert_eq!(count_u32(0), 0);
        assert_eq!(count_u32(7), 7);
        assert_eq!(count_u32(u32::MAX as usize), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        {
            assert_eq!(count_u32(u32::MAX as usize + 1), u32::MAX);
            assert_eq!(count_u32(usize::MAX), u32::MAX);
        }
    }

    #[test]
    fn source_error_aborts_build() {
        let docs: Vec<std::result::Result<(&str, &str), io::Error>> = vec![
            Ok(("1", "fine")),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "unreadable")),
            Ok(("3", "never reached")),
        ];
        let err = build_index(docs).unwrap_err();
        assert!(matches!(err, Error::Construction { .. }));
        assert!(err.to_string().contains("unreadable"));
    }

    #[test]
    fn empty_source_builds_empty_index() {
        let docs: Vec<std::result::Result<(String, String), io::Error>> = Vec::new();
        let idx = build_index(docs).unwrap();
        assert_eq!(idx.num_docs(), 0);
    }
}
