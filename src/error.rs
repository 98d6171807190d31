//! Error types shared by the loaders, detectors and the point store.
//!
//! Every variant is fatal for the single epoch (or point file) it was raised
//! for; the batch drivers in [`crate::batch`] log it and move on.
use std::path::PathBuf;
use thiserror::Error;

/// Library error.
#[derive(Debug, Error)]
pub enum Error {
    /// An epoch, point or filter-kernel file could not be read at all.
    #[error("missing data at {}: {reason}", path.display())]
    MissingData {
        /// File that failed to resolve.
        path: PathBuf,
        /// Underlying reason (usually the I/O error text).
        reason: String,
    },

    /// A record was readable but its fields or shapes are inconsistent.
    #[error("malformed record {id}: {reason}")]
    MalformedRecord {
        /// Record identifier (file name or caller-supplied id).
        id: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A channel is shorter than the quadrature kernel it is filtered with.
    #[error("channel of {channel_len} samples is shorter than the {kernel_len}-tap kernel")]
    FilterMismatch {
        /// Samples in the offending channel.
        channel_len: usize,
        /// Taps in the kernel.
        kernel_len: usize,
    },

    /// A stored point carried a class tag other than `i`, `e` or `l`.
    #[error("unrecognised point class tag {tag:?}")]
    UnknownClass {
        /// The tag as found on disk.
        tag: String,
    },

    /// Filesystem failure outside record parsing (writing, listing).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A config file or written header could not be (de)serialised.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedRecord { id: id.into(), reason: reason.into() }
    }

    pub(crate) fn missing(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::MissingData { path: path.into(), reason: reason.to_string() }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
