//! Gzip compressor using `flate2`.
//!
//! The encoder is always finished before the buffer is returned, so the
//! output carries the complete DEFLATE stream plus the CRC32/size trailer.
//! A missing trailer on decode surfaces as an error rather than a short
//! payload. Decoding covers exactly one gzip member; bytes left over after
//! it are rejected.

use std::io::{self, Write};

use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{Result, WireError};

use super::{read_bounded, CompressType, Compressor};

/// DEFLATE in a gzip container, default compression level.
#[derive(Debug, Clone, Copy, Default)]
pub struct GzipCompressor;

impl Compressor for GzipCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let to_error = |source| WireError::Compress {
            algorithm: CompressType::Gzip,
            source,
        };

        let mut encoder = GzEncoder::new(
            Vec::with_capacity(data.len() / 2 + 32),
            Compression::default(),
        );
        encoder.write_all(data).map_err(to_error)?;
        encoder.finish().map_err(to_error)
    }

    fn decompress_bounded(&self, data: &[u8], max_len: u64) -> Result<Vec<u8>> {
        let mut decoder = GzDecoder::new(data);
        let out = read_bounded(
            &mut decoder,
            max_len,
            CompressType::Gzip,
            data.len().saturating_mul(2),
        )?;

        let rest = decoder.into_inner();
        if !rest.is_empty() {
            return Err(WireError::Decompress {
                algorithm: CompressType::Gzip,
                source: io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{} trailing bytes after gzip stream", rest.len()),
                ),
            });
        }
        Ok(out)
    }
}
