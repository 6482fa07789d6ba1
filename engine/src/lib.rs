//! In-memory inverted index with boolean and TF-IDF retrieval.
//!
//! ```
//! use engine::{query, InvertedIndex, Strategy};
//!
//! let index = InvertedIndex::from_documents([("doc1", "cats and dogs"), ("doc2", "dogs and birds")]);
//! assert_eq!(query(&index, Strategy::Boolean, "dogs AND cats", 10).unwrap(), vec!["doc1"]);
//! assert_eq!(query(&index, Strategy::Tfidf, "birds", 10).unwrap(), vec!["doc2"]);
//! ```

pub mod corpus;
pub mod error;
pub mod index;
pub mod indexer;
pub mod query;
pub mod tokenizer;

pub use error::{Error, Result};
pub use index::{DocId, DocMeta, InvertedIndex, Posting, TermId};
pub use indexer::{build_index, IndexBuilder};
pub use query::{boolean_query, query, tfidf_query, tfidf_scores, Strategy};
