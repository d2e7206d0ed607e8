//! Error types for document splitting operations.
//!
//! This module provides the error hierarchy using `thiserror` for all
//! splitter operations including line reading, tree construction and the
//! size-bounded merge engine.

use thiserror::Error;

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for document splitting.
#[derive(Error, Debug)]
pub enum Error {
    /// Capacity errors raised by the size-bounded merge engine.
    #[error("splitter error: {0}")]
    Splitter(#[from] SplitterError),

    /// I/O errors from the underlying line source.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Invalid caller-supplied configuration (window size, level depth,
    /// size bounds). These are programming errors and are never retried.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Internal invariant violations, such as split locations applied out
    /// of order or a split index outside the structure depth.
    #[error("invalid state: {message}")]
    InvalidState {
        /// Description of the invalid state.
        message: String,
    },
}

/// Capacity errors: the requested size limits cannot be satisfied for the
/// document content. Callers should treat these as configuration problems
/// and not retry automatically.
#[derive(Error, Debug)]
pub enum SplitterError {
    /// An indivisible fragment exceeds the size calculator's read limit.
    #[error(
        "the smallest fragment, with a size of {size} bytes, did not fit \
         into the read limit of {limit} bytes"
    )]
    FragmentTooLargeForRead {
        /// Byte span of the fragment.
        size: usize,
        /// Maximum readable block size in bytes.
        limit: usize,
    },

    /// An indivisible fragment exceeds the requested maximum block size.
    #[error(
        "the smallest text fragment, with a size of {size} units, is too \
         large to fit into the maximum of {maximum} units"
    )]
    FragmentTooLargeForBlock {
        /// Size of the fragment in the calculator's units.
        size: usize,
        /// Requested maximum block size in the calculator's units.
        maximum: usize,
    },
}

/// I/O errors for the line source.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to open the document.
    #[error("failed to open file: {path}: {reason}")]
    OpenFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// The document stream does not support seeking.
    #[error("not a seekable stream: {path}")]
    NotSeekable {
        /// Path to the file.
        path: String,
    },

    /// Failed to read from the document.
    #[error("failed to read: {reason}")]
    ReadFailed {
        /// Reason for failure.
        reason: String,
    },

    /// Failed to write an output file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::ReadFailed {
            reason: err.to_string(),
        })
    }
}

impl Error {
    /// Creates a configuration error from a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid-state error from a message.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }
}
