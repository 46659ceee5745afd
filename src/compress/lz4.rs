//! LZ4 compressor using `lz4_flex`.
//!
//! Uses the LZ4 frame format rather than a bare block: the frame carries a
//! magic number and an end mark, so garbage and truncated input are rejected
//! without trusting an embedded size field for allocation.

use std::io::{self, Write};

use lz4_flex::frame::{FrameDecoder, FrameEncoder};

use crate::error::{Result, WireError};

use super::{read_bounded, CompressType, Compressor};

/// LZ4 frame compression, throughput over ratio.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4Compressor;

impl Compressor for Lz4Compressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = FrameEncoder::new(Vec::with_capacity(data.len() + 32));
        encoder
            .write_all(data)
            .map_err(|source| WireError::Compress {
                algorithm: CompressType::Lz4,
                source,
            })?;
        encoder.finish().map_err(|e| WireError::Compress {
            algorithm: CompressType::Lz4,
            source: io::Error::other(e),
        })
    }

    fn decompress_bounded(&self, data: &[u8], max_len: u64) -> Result<Vec<u8>> {
        read_bounded(
            FrameDecoder::new(data),
            max_len,
            CompressType::Lz4,
            data.len().saturating_mul(2),
        )
    }
}
