use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error during generation
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Creating, writing or flushing the output failed
    #[error("IO error: {source} ({})", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to a caller-supplied stream failed
    #[error("IO error: {0}")]
    Write(#[source] io::Error),

    /// A name (or alias target) has no accumulated zone record
    #[error("no zone record for {name}")]
    UnknownZone { name: String },

    /// Reading an input document failed
    #[error("cannot read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid input document: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenerateError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }

    /// Output I/O failures, which are reported as they happen
    pub fn is_io(&self) -> bool {
        matches!(self, GenerateError::Io { .. } | GenerateError::Write(_))
    }

    /// Process status for this failure
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Channel for fatal diagnostics
pub trait Reporter {
    fn fatal(&self, message: &str);
}

/// Reports fatal diagnostics as `tracing` errors
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn fatal(&self, message: &str) {
        tracing::error!("{message}");
    }
}

impl<F: Fn(&str)> Reporter for F {
    fn fatal(&self, message: &str) {
        self(message)
    }
}
