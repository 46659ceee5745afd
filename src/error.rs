//! Error types for rpcwire.

use thiserror::Error;

use crate::compress::CompressType;

/// Main error type for all framing and compression operations.
#[derive(Debug, Error)]
pub enum WireError {
    /// Fatal I/O error reported by the underlying stream.
    ///
    /// The original error is carried unmodified.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stream ended cleanly before the first byte of a frame.
    #[error("Connection closed")]
    ConnectionClosed,

    /// Stream ended inside the length prefix.
    #[error("Incomplete frame: stream ended inside the length prefix")]
    IncompletePrefix,

    /// Stream ended before the declared body length was satisfied.
    #[error("Incomplete frame: expected {expected} body bytes, received {received}")]
    IncompleteFrame {
        /// Declared body length.
        expected: u64,
        /// Body bytes actually read before end of stream.
        received: u64,
    },

    /// Length prefix does not fit in a `u64`.
    #[error("Length prefix overflows a 64-bit integer")]
    VarintOverflow,

    /// Frame or payload length above the configured limit.
    #[error("Frame size {size} exceeds maximum {max}")]
    FrameTooLarge {
        /// Declared, outgoing or decompressed length. Decompression stops
        /// early, so there it is the first length seen past the limit.
        size: u64,
        /// Configured maximum.
        max: u64,
    },

    /// Compression failed.
    #[error("{algorithm} compress error: {source}")]
    Compress {
        /// Algorithm that failed.
        algorithm: CompressType,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// Input is not a valid stream for the selected algorithm.
    #[error("{algorithm} decompress error: {source}")]
    Decompress {
        /// Algorithm that failed.
        algorithm: CompressType,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// Compression tag outside the known set.
    #[error("Unknown compress type: {0}")]
    UnknownCompressType(u8),
}

/// Result type alias using WireError.
pub type Result<T> = std::result::Result<T, WireError>;
