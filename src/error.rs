use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can stop a view from being built. None of these are
/// recovered from: the binary reports them and exits non-zero.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data in {} at line {line}: {reason}", path.display())]
    MalformedData {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

impl PlotError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlotError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, line: u64, reason: impl Into<String>) -> Self {
        PlotError::MalformedData {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
