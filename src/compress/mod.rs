//! Compress module - interchangeable payload transforms.
//!
//! This module provides the compression strategies a frame body can be
//! passed through before sending and after receiving:
//!
//! - [`RawCompressor`] - Identity, bytes pass through unchanged
//! - [`GzipCompressor`] - DEFLATE in a gzip container (`flate2`)
//! - [`SnappyCompressor`] - Snappy framing format, throughput over ratio (`snap`)
//! - [`ZlibCompressor`] - DEFLATE in a zlib container (`miniz_oxide`)
//! - [`Lz4Compressor`] - LZ4 frame format, throughput over ratio (`lz4_flex`)
//!
//! # Design
//!
//! The set of algorithms is fixed. [`CompressType`] is the selection tag the
//! caller carries out of band (usually in a header field), and dispatch is a
//! `match` on it. The marker structs also implement [`Compressor`] for code
//! that wants to hold a strategy as a value.
//!
//! Decompression output is bounded: [`Compressor::decompress_bounded`] stops
//! once the restored payload would exceed the caller's limit and reports
//! [`WireError::FrameTooLarge`], so a small frame cannot inflate into an
//! unbounded allocation.
//!
//! # Example
//!
//! ```
//! use rpcwire::compress::CompressType;
//!
//! let payload = b"hello hello hello hello".to_vec();
//! let packed = CompressType::Gzip.compress(&payload).unwrap();
//! let unpacked = CompressType::Gzip.decompress(&packed).unwrap();
//! assert_eq!(unpacked, payload);
//! ```

mod gzip;
mod lz4;
mod raw;
mod snappy;
mod zlib;

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WireError};

pub use gzip::GzipCompressor;
pub use lz4::Lz4Compressor;
pub use raw::RawCompressor;
pub use snappy::SnappyCompressor;
pub use zlib::ZlibCompressor;

/// A reversible byte transform.
///
/// Implementations are stateless and safe to share across threads.
pub trait Compressor: Send + Sync {
    /// Compress `data` into a newly allocated buffer.
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Restore the original bytes, producing at most `max_len` bytes.
    ///
    /// # Errors
    ///
    /// - [`WireError::Decompress`] if the input is corrupt or truncated
    /// - [`WireError::FrameTooLarge`] if the restored payload is longer than
    ///   `max_len`
    fn decompress_bounded(&self, data: &[u8], max_len: u64) -> Result<Vec<u8>>;

    /// Restore the original bytes from a buffer produced by `compress`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Decompress`] if the input is corrupt or truncated.
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.decompress_bounded(data, u64::MAX)
    }
}

/// Compression selection tag.
///
/// The numeric values are part of the wire contract between peers and must
/// not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum CompressType {
    /// No compression.
    #[default]
    Raw = 0,
    /// DEFLATE, gzip container.
    Gzip = 1,
    /// Snappy framing format.
    Snappy = 2,
    /// DEFLATE, zlib container.
    Zlib = 3,
    /// LZ4 frame format.
    Lz4 = 4,
}

impl CompressType {
    /// All known variants, in tag order.
    pub const ALL: [CompressType; 5] = [
        CompressType::Raw,
        CompressType::Gzip,
        CompressType::Snappy,
        CompressType::Zlib,
        CompressType::Lz4,
    ];

    /// The strategy for this tag.
    pub fn compressor(self) -> &'static dyn Compressor {
        match self {
            CompressType::Raw => &RawCompressor,
            CompressType::Gzip => &GzipCompressor,
            CompressType::Snappy => &SnappyCompressor,
            CompressType::Zlib => &ZlibCompressor,
            CompressType::Lz4 => &Lz4Compressor,
        }
    }

    /// Compress `data` with the selected algorithm.
    #[inline]
    pub fn compress(self, data: &[u8]) -> Result<Vec<u8>> {
        self.compressor().compress(data)
    }

    /// Decompress `data` with the selected algorithm.
    #[inline]
    pub fn decompress(self, data: &[u8]) -> Result<Vec<u8>> {
        self.compressor().decompress(data)
    }

    /// Decompress `data`, refusing output longer than `max_len` bytes.
    #[inline]
    pub fn decompress_bounded(self, data: &[u8], max_len: u64) -> Result<Vec<u8>> {
        self.compressor().decompress_bounded(data, max_len)
    }

    /// Lowercase algorithm name.
    pub fn as_str(self) -> &'static str {
        match self {
            CompressType::Raw => "raw",
            CompressType::Gzip => "gzip",
            CompressType::Snappy => "snappy",
            CompressType::Zlib => "zlib",
            CompressType::Lz4 => "lz4",
        }
    }
}

impl TryFrom<u8> for CompressType {
    type Error = WireError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(CompressType::Raw),
            1 => Ok(CompressType::Gzip),
            2 => Ok(CompressType::Snappy),
            3 => Ok(CompressType::Zlib),
            4 => Ok(CompressType::Lz4),
            other => Err(WireError::UnknownCompressType(other)),
        }
    }
}

impl From<CompressType> for u8 {
    fn from(kind: CompressType) -> u8 {
        kind as u8
    }
}

impl FromStr for CompressType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        CompressType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown compress type: {s}"))
    }
}

impl fmt::Display for CompressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drain a streaming decoder, stopping one byte past `max_len`.
pub(crate) fn read_bounded<R: Read>(
    decoder: R,
    max_len: u64,
    algorithm: CompressType,
    capacity_hint: usize,
) -> Result<Vec<u8>> {
    let capacity = capacity_hint.min(usize::try_from(max_len).unwrap_or(usize::MAX));
    let mut out = Vec::with_capacity(capacity);
    decoder
        .take(max_len.saturating_add(1))
        .read_to_end(&mut out)
        .map_err(|source| WireError::Decompress { algorithm, source })?;

    let size = out.len() as u64;
    if size > max_len {
        return Err(WireError::FrameTooLarge { size, max: max_len });
    }
    Ok(out)
}
