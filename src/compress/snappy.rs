//! Snappy compressor using `snap`.
//!
//! Uses the Snappy framing format: a stream identifier chunk followed by
//! CRC-checked data chunks. This is the stream that buffered Snappy writers
//! produce in other implementations, so tag 2 payloads interoperate with
//! peers that frame their bodies the same way.

use std::io::{self, Write};

use snap::read::FrameDecoder;
use snap::write::FrameEncoder;

use crate::error::{Result, WireError};

use super::{read_bounded, CompressType, Compressor};

/// Snappy framed compression, throughput over ratio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnappyCompressor;

impl Compressor for SnappyCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let to_error = |source| WireError::Compress {
            algorithm: CompressType::Snappy,
            source,
        };

        let mut encoder = FrameEncoder::new(Vec::with_capacity(data.len() + 32));
        encoder.write_all(data).map_err(to_error)?;
        encoder.flush().map_err(to_error)?;
        encoder
            .into_inner()
            .map_err(|e| to_error(io::Error::new(e.error().kind(), "snappy encoder flush failed")))
    }

    fn decompress_bounded(&self, data: &[u8], max_len: u64) -> Result<Vec<u8>> {
        read_bounded(
            FrameDecoder::new(data),
            max_len,
            CompressType::Snappy,
            data.len().saturating_mul(2),
        )
    }
}
