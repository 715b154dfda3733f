//! Error taxonomy shared by the parser, the filter engine, the view and the
//! CLI front end.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A file name without a valid `YYYYMMDDTHHMMSS` identifier reached the
    /// entry builder. Reported per row, never for the whole batch.
    #[error("Malformed note file name {name:?}: {reason}")]
    MalformedFilename { name: String, reason: String },

    /// The filter regex did not compile; the view is left untouched.
    #[error("Invalid filter pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to list notes directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No notes are displayed")]
    NoRows,

    #[error("Row {index} is out of range (showing {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("External command failed: {cmd} (exit code: {code:?})")]
    Command { cmd: String, code: Option<i32> },

    #[error("{0}")]
    Usage(String),
}

impl Error {
    pub(crate) fn malformed(name: &str, reason: impl Into<String>) -> Self {
        Error::MalformedFilename {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Error::Usage(msg.into())
    }
}
