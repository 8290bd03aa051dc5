//! Error types for evlog operations.

use crate::parser::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse log file: {source} (line {line}, column {column})")]
    Parse {
        #[source]
        source: ParseError,
        line: usize,
        column: usize,
    },

    #[error("Invalid {name} format: {value:?} ({source})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        #[source]
        source: ParseError,
    },
}

impl Error {
    /// Wrap a parse failure, locating it within the text that was parsed.
    pub fn parse(source: ParseError, text: &str) -> Self {
        let (line, column) = source.locate(text);
        Error::Parse {
            source,
            line,
            column,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
