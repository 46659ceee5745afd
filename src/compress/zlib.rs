//! Zlib compressor using `miniz_oxide`.
//!
//! One-shot DEFLATE with a zlib header and Adler-32 trailer. The one-shot
//! decoder refuses input that ends before the final block, so a truncated
//! stream is reported instead of decoded partially.

use std::io;

use miniz_oxide::deflate::compress_to_vec_zlib;
use miniz_oxide::inflate::{decompress_to_vec_zlib_with_limit, TINFLStatus};

use crate::error::{Result, WireError};

use super::{CompressType, Compressor};

/// DEFLATE compression level (0-10, higher = better ratio, slower).
const COMPRESSION_LEVEL: u8 = 6;

/// DEFLATE in a zlib container.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZlibCompressor;

impl Compressor for ZlibCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(compress_to_vec_zlib(data, COMPRESSION_LEVEL))
    }

    fn decompress_bounded(&self, data: &[u8], max_len: u64) -> Result<Vec<u8>> {
        let limit = usize::try_from(max_len).unwrap_or(usize::MAX);
        decompress_to_vec_zlib_with_limit(data, limit).map_err(|e| match e.status {
            // Output buffer reached the limit with input left to inflate
            TINFLStatus::HasMoreOutput => WireError::FrameTooLarge {
                size: max_len.saturating_add(1),
                max: max_len,
            },
            status => WireError::Decompress {
                algorithm: CompressType::Zlib,
                source: io::Error::new(io::ErrorKind::InvalidData, format!("{status:?}")),
            },
        })
    }
}
