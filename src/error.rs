use std::error::Error as _;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid JSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not write {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not serialize payload: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Console I/O error: {0}")]
    Console(#[from] std::io::Error),

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(#[source] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Parse,
    Io,
}

impl InspectError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InspectError::Transport { .. }
            | InspectError::Status { .. }
            | InspectError::ClientSetup(_) => ErrorKind::Transport,
            InspectError::Parse { .. } | InspectError::Serialize(_) => ErrorKind::Parse,
            InspectError::Persist { .. } | InspectError::Console(_) => ErrorKind::Io,
        }
    }

    /// The error message followed by every underlying cause, one per line.
    pub fn diagnostic(&self) -> String {
        let mut text = self.to_string();
        let mut cause = self.source();
        while let Some(err) = cause {
            text.push_str(&format!("\n  caused by: {err}"));
            cause = err.source();
        }
        text
    }
}

pub type InspectResult<T> = Result<T, InspectError>;
