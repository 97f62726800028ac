use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or extracting a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// The byte stream is not well-formed XML, the carrier envelope has no
    /// embedded content, or the embedded text failed to re-parse.
    #[error("format error: {0}")]
    Format(String),

    /// A required business field is absent or fails pattern validation.
    #[error("data error: {0}")]
    Data(String),

    /// Reading the source file failed.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Row-constants configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the factus library.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// A recoverable per-line problem: the item was kept with partial or default
/// data and document processing continued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemWarning {
    /// Zero-based index of the line item within its document.
    pub line: usize,
    /// Human-readable description of what was missing or unparsable.
    pub message: String,
}

impl std::fmt::Display for ItemWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line + 1, self.message)
    }
}

impl ItemWarning {
    /// Create a warning for the given line index.
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}
