//! Boolean and TF-IDF evaluation over a built [`InvertedIndex`].
//!
//! Boolean queries are a chain `TERM (AND|OR TERM)*` folded strictly left to right, so
//! `a OR b AND c` means `(a OR b) AND c`. Matches come back in insertion order.
//!
//! TF-IDF queries accept any text. A document's score is the sum over query terms of
//! `tf(t, d) * ln(N / df(t))`; ties are broken by external id ascending.

use crate::error::{Error, Result};
use crate::index::{DocId, InvertedIndex};
use crate::tokenizer::{normalize_word, tokenize};
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Boolean,
    Tfidf,
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "boolean" => Ok(Strategy::Boolean),
            "tfidf" => Ok(Strategy::Tfidf),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Boolean => "boolean",
            Strategy::Tfidf => "tfidf",
        })
    }
}

/// Run `text` against `index` with the chosen strategy, returning at most `max_results` ids.
pub fn query<'a>(index: &'a InvertedIndex, strategy: Strategy, text: &str, max_results: usize) -> Result<Vec<&'a str>> {
    match strategy {
        Strategy::Boolean => boolean_query(index, text, max_results),
        Strategy::Tfidf => Ok(tfidf_query(index, text, max_results)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    And,
    Or,
}

/// Parse `TERM (OP TERM)*` into the first operand and the trailing `(op, operand)` pairs.
fn parse_boolean(text: &str) -> Result<(&str, Vec<(Op, &str)>)> {
    let mut words = text.split_whitespace();
    let first = words
        .next()
        .ok_or_else(|| Error::InvalidQuery("empty query".into()))?;
    let mut chain = Vec::new();
    while let Some(op_word) = words.next() {
        let op = match op_word.to_lowercase().as_str() {
            "and" => Op::And,
            "or" => Op::Or,
            _ => return Err(Error::InvalidQuery(format!("expected AND or OR, found `{op_word}`"))),
        };
        let operand = words
            .next()
            .ok_or_else(|| Error::InvalidQuery(format!("missing operand after `{op_word}`")))?;
        chain.push((op, operand));
    }
    Ok((first, chain))
}

/// Doc ids of a query word. Words that are not a single term match nothing.
fn matching_docs(index: &InvertedIndex, word: &str) -> Vec<DocId> {
    match normalize_word(word) {
        Some(term) => index.postings(&term).iter().map(|p| p.doc_id).collect(),
        None => Vec::new(),
    }
}

fn intersect_sorted(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }
    out
}

fn union_sorted(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Evaluate a boolean chain and return up to `max_results` matching ids in insertion order.
pub fn boolean_query<'a>(index: &'a InvertedIndex, text: &str, max_results: usize) -> Result<Vec<&'a str>> {
    let (first, chain) = parse_boolean(text)?;
    let mut result = matching_docs(index, first);
    for (op, word) in chain {
        let docs = matching_docs(index, word);
        result = match op {
            Op::And => intersect_sorted(&result, &docs),
            Op::Or => union_sorted(&result, &docs),
        };
    }
    tracing::trace!(query = text, matched = result.len(), "boolean query");
    Ok(result
        .into_iter()
        .take(max_results)
        .filter_map(|d| index.external_id(d))
        .collect())
}

/// A scored candidate. Orders better-ranked hits as greater: higher score, then smaller id.
#[derive(Debug, Clone, Copy)]
struct Hit<'a> {
    score: f64,
    id: &'a str,
}

impl PartialEq for Hit<'_> {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for Hit<'_> {}

impl PartialOrd for Hit<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Hit<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.id.cmp(self.id))
    }
}

/// Inverse document frequency, `ln(N / df)`. `None` for terms outside the vocabulary.
pub fn idf(index: &InvertedIndex, term: &str) -> Option<f64> {
    match index.df(term) {
        0 => None,
        df => Some((index.num_docs() as f64 / df as f64).ln()),
    }
}

/// Rank documents containing at least one query term, best first, keeping the top `max_results`.
pub fn tfidf_scores<'a>(index: &'a InvertedIndex, text: &str, max_results: usize) -> Vec<(&'a str, f64)> {
    if max_results == 0 {
        return Vec::new();
    }

    // Accumulate per-document contributions, one pass per query token.
    let mut scores: HashMap<DocId, f64> = HashMap::new();
    for term in tokenize(text) {
        let Some(term_idf) = idf(index, &term) else { continue };
        for p in index.postings(&term) {
            *scores.entry(p.doc_id).or_insert(0.0) += p.tf as f64 * term_idf;
        }
    }

    // Min-heap of size k: the root is the weakest hit kept so far.
    let mut heap: BinaryHeap<Reverse<Hit<'a>>> = BinaryHeap::with_capacity(max_results.min(scores.len()) + 1);
    for (doc_id, score) in scores {
        let Some(id) = index.external_id(doc_id) else { continue };
        heap.push(Reverse(Hit { score, id }));
        if heap.len() > max_results {
            heap.pop();
        }
    }

    // Ascending order of Reverse<Hit> is best-first.
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(hit)| (hit.id, hit.score))
        .collect()
}

/// Like [`tfidf_scores`] without the scores.
pub fn tfidf_query<'a>(index: &'a InvertedIndex, text: &str, max_results: usize) -> Vec<&'a str> {
    tfidf_scores(index, text, max_results)
        .into_iter()
        .map(|(id, _)| id)
        .collect()
}
