//! Error types for track-id
//!
//! Error strategy:
//! - Per-frame errors (text decoding): recoverable, the frame is dropped
//! - File errors (`info`) and remote errors (`search`): fatal for the invocation

use std::path::PathBuf;
use thiserror::Error;

/// A single frame whose value could not be decoded.
#[derive(Debug, Clone, Error)]
#[error("frame {id}: {reason}")]
pub struct FrameDecodeError {
    pub id: String,
    pub reason: String,
}

/// Failures of the `info` command.
#[derive(Debug, Error)]
pub enum InfoError {
    #[error("Cannot open '{path}': {source}\n  Tip: Check the path exists and is readable")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No ID3 tag found in '{path}': {reason}")]
    TagContainerAbsent { path: PathBuf, reason: String },
}

/// Failures of the `search` command.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Request to {service} failed: {reason}")]
    Transport {
        service: &'static str,
        reason: String,
    },

    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Unexpected response from {service}: {reason}")]
    Body {
        service: &'static str,
        reason: String,
    },
}

impl SearchError {
    pub(crate) fn body(service: &'static str, reason: impl Into<String>) -> Self {
        SearchError::Body {
            service,
            reason: reason.into(),
        }
    }
}
