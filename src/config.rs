//! Codec configuration.
//!
//! ```
//! use rpcwire::{CodecConfig, CompressType};
//!
//! let config = CodecConfig::new()
//!     .compress_type(CompressType::Lz4)
//!     .max_frame_size(16 * 1024 * 1024);
//! assert_eq!(config.compress_type, CompressType::Lz4);
//! ```

use serde::{Deserialize, Serialize};

use crate::compress::CompressType;
use crate::protocol::DEFAULT_MAX_FRAME_SIZE;

/// Configuration for a [`FrameCodec`](crate::FrameCodec).
///
/// Deserializes from any serde format; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Compression applied to payloads by `send_payload` / `recv_payload`.
    pub compress_type: CompressType,
    /// Largest frame body accepted or produced, before and after compression.
    pub max_frame_size: u64,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            compress_type: CompressType::Raw,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

impl CodecConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the payload compression.
    #[must_use]
    pub fn compress_type(mut self, compress_type: CompressType) -> Self {
        self.compress_type = compress_type;
        self
    }

    /// Set the maximum frame body size.
    #[must_use]
    pub fn max_frame_size(mut self, max_frame_size: u64) -> Self {
        self.max_frame_size = max_frame_size;
        self
    }
}
