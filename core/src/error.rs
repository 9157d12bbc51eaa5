use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a content source could not produce a document's text.
#[derive(Error, Debug)]
pub enum Unavailable {
    #[error("not found")]
    NotFound,

    #[error("is a directory")]
    IsDirectory,

    #[error("permission denied")]
    PermissionDenied,

    #[error("I/O error: {0}")]
    Other(#[source] io::Error),
}

impl Unavailable {
    /// Classify an I/O error. Directories are told apart by the caller, since
    /// not every platform reports them with a dedicated error kind.
    pub fn from_io(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Unavailable::NotFound,
            io::ErrorKind::PermissionDenied => Unavailable::PermissionDenied,
            _ => Unavailable::Other(err),
        }
    }
}

/// Ingestion failures. None of them leave a trace in the index.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("document {0:?} is already in the index")]
    DuplicateDocument(String),

    #[error("content of {name:?} is unavailable: {reason}")]
    ContentUnavailable { name: String, reason: Unavailable },

    #[error("invalid document reference {0:?}")]
    InvalidDocumentReference(String),
}

/// Structural reasons a query was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    #[error("character {ch:?} at offset {offset} is not allowed in a query")]
    ForbiddenCharacter { ch: char, offset: usize },

    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },

    #[error("unexpected {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("query ended where an operand was expected")]
    UnexpectedEnd,

    #[error("unbalanced parenthesis at offset {offset}")]
    UnbalancedParenthesis { offset: usize },

    #[error("empty group at offset {offset}")]
    EmptyGroup { offset: usize },

    #[error("query nests deeper than {limit} levels at offset {offset}")]
    TooDeep { limit: usize, offset: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("malformed query: {0}")]
    MalformedQuery(#[from] Malformed),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no stopword list for {language} at {}", path.display())]
    MissingStopwords { language: String, path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_map_to_reasons() {
        let nf = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(matches!(Unavailable::from_io(nf), Unavailable::NotFound));

        let pd = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(Unavailable::from_io(pd), Unavailable::PermissionDenied));

        let other = io::Error::new(io::ErrorKind::InvalidData, "bad utf-8");
        assert!(matches!(Unavailable::from_io(other), Unavailable::Other(_)));
    }

    #[test]
    fn error_display() {
        let err = IngestError::ContentUnavailable {
            name: "doc1".into(),
            reason: Unavailable::IsDirectory,
        };
        assert_eq!(err.to_string(), "content of \"doc1\" is unavailable: is a directory");

        let err = QueryError::from(Malformed::ForbiddenCharacter { ch: '.', offset: 4 });
        assert_eq!(
            err.to_string(),
            "malformed query: character '.' at offset 4 is not allowed in a query"
        );
    }
}
