//! Source loading error types.

use thiserror::Error;

/// Errors that can occur when fetching or decoding one source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The asset does not exist.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// The asset exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The asset body is not valid for its format.
    #[error("failed to parse {path} as {format}: {message}")]
    Parse {
        path: String,
        format: &'static str,
        message: String,
    },
}

impl SourceError {
    /// Returns `true` if the asset is simply absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }

    pub(crate) fn parse(path: &str, format: &'static str, message: impl ToString) -> Self {
        SourceError::Parse {
            path: path.to_string(),
            format,
            message: message.to_string(),
        }
    }
}
