//! Error types for index construction and querying.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The document source failed while being consumed; no index was built.
    #[error("failed to read document source: {source}")]
    Construction {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A boolean query did not match `TERM (AND|OR TERM)*`.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("unrecognised strategy: {0}")]
    UnknownStrategy(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn construction_keeps_its_source() {
        let err = Error::Construction { source: Box::new(io::Error::new(io::ErrorKind::NotFound, "gone")) };
        assert!(err.to_string().contains("gone"));
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_query_display() {
        let err = Error::InvalidQuery("missing operand after `and`".into());
        assert_eq!(err.to_string(), "invalid query: missing operand after `and`");
    }
}
