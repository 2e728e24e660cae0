//! Error types for the synthesis pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the synthesis stages and the WAV writer
#[derive(Debug, Error)]
pub enum SynthError {
    /// A parameter was rejected before any samples were computed
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Attack, decay and release together need more samples than the note has
    #[error(
        "envelope overflow: attack/decay/release need {required} samples \
         but the signal has {available}"
    )]
    EnvelopeOverflow {
        required: usize,
        available: usize,
    },

    /// The output file could not be created, written or closed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SynthError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SynthError::InvalidParameter(message.into())
    }
}

/// Result alias for the synthesis pipeline
pub type Result<T> = std::result::Result<T, SynthError>;
