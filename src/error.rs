//! Crate-level error types.

use std::fmt;

/// Errors produced by the scrollstage crate.
#[derive(Debug)]
pub enum ViewerError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// Browser host failure (missing window, canvas, listener setup).
    Web(String),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Web(msg) => write!(f, "web host error: {msg}"),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
