//! Raw compressor - identity transform.
//!
//! Used when compression is disabled or the payload is too small to benefit.
//!
//! # Example
//!
//! ```
//! use rpcwire::compress::{Compressor, RawCompressor};
//!
//! let data = b"binary payload";
//! let packed = RawCompressor.compress(data).unwrap();
//! assert_eq!(&packed[..], data);
//! ```

use crate::error::{Result, WireError};

use super::Compressor;

/// Compressor that passes bytes through without transformation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCompressor;

impl Compressor for RawCompressor {
    #[inline]
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(data.to_vec())
    }

    #[inline]
    fn decompress_bounded(&self, data: &[u8], max_len: u64) -> Result<Vec<u8>> {
        let size = data.len() as u64;
        if size > max_len {
            return Err(WireError::FrameTooLarge { size, max: max_len });
        }
        Ok(data.to_vec())
    }
}
