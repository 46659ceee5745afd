//! Buffer-level framing.
//!
//! Appends frames to, and extracts frames from, an in-memory `BytesMut`.
//! Useful when a caller batches several frames into one write, or parses
//! from a buffer it fills itself.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use rpcwire::protocol::{decode_frame, encode_frame, DEFAULT_MAX_FRAME_SIZE};
//!
//! let mut buf = BytesMut::new();
//! encode_frame(b"hello", &mut buf);
//! encode_frame(b"", &mut buf);
//!
//! let first = decode_frame(&mut buf, DEFAULT_MAX_FRAME_SIZE).unwrap().unwrap();
//! let second = decode_frame(&mut buf, DEFAULT_MAX_FRAME_SIZE).unwrap().unwrap();
//! assert_eq!(&first[..], b"hello");
//! assert!(second.is_empty());
//! assert!(buf.is_empty());
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::varint::{decode_uvarint, encode_uvarint, uvarint_len, MAX_VARINT_LEN};
use crate::error::{Result, WireError};

/// Default maximum frame body size (1 GB).
pub const DEFAULT_MAX_FRAME_SIZE: u64 = 1_073_741_824;

/// Total encoded size of a frame carrying `body_len` bytes.
#[inline]
pub fn frame_len(body_len: usize) -> usize {
    uvarint_len(body_len as u64) + body_len
}

/// Append one frame (`<uvarint len><body>`) to `dst`.
pub fn encode_frame(data: &[u8], dst: &mut BytesMut) {
    let mut prefix = [0u8; MAX_VARINT_LEN];
    let n = encode_uvarint(data.len() as u64, &mut prefix);

    dst.reserve(n + data.len());
    dst.put_slice(&prefix[..n]);
    dst.put_slice(data);
}

/// Build a complete frame as a single byte vector.
pub fn build_frame(data: &[u8]) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(frame_len(data.len()));
    encode_frame(data, &mut buf);
    buf.to_vec()
}

/// Try to extract one frame body from the front of `src`.
///
/// Returns:
/// - `Ok(Some(body))` if a complete frame was consumed from `src`
/// - `Ok(None)` if more data is needed (`src` is left untouched)
/// - `Err(...)` if the prefix is malformed or exceeds `max_frame_size`
pub fn decode_frame(src: &mut BytesMut, max_frame_size: u64) -> Result<Option<Bytes>> {
    let Some((size, prefix_len)) = decode_uvarint(src)? else {
        return Ok(None);
    };

    if size > max_frame_size {
        return Err(WireError::FrameTooLarge {
            size,
            max: max_frame_size,
        });
    }

    let body_len = usize::try_from(size).map_err(|_| WireError::FrameTooLarge {
        size,
        max: max_frame_size,
    })?;
    let total = prefix_len + body_len;
    if src.len() < total {
        src.reserve(total - src.len());
        return Ok(None);
    }

    src.advance(prefix_len);
    Ok(Some(src.split_to(body_len).freeze()))
}
