//! Unsigned LEB128 length prefix.
//!
//! ```text
//! value 300 = 0b10_0101100
//!
//! ┌───────────┬───────────┐
//! │ 1_0101100 │ 0_0000010 │
//! │   0xAC    │   0x02    │
//! └───────────┴───────────┘
//! ```
//!
//! Seven data bits per byte, least-significant group first, high bit set on
//! every byte except the last. Same encoding as protobuf varints, so peers
//! written in other languages can read and write frames.

use crate::error::{Result, WireError};

/// Maximum encoded length of a 64-bit value.
pub const MAX_VARINT_LEN: usize = 10;

/// Encode `value` into `buf`, returning the number of bytes used.
///
/// # Example
///
/// ```
/// use rpcwire::protocol::{encode_uvarint, MAX_VARINT_LEN};
///
/// let mut buf = [0u8; MAX_VARINT_LEN];
/// let n = encode_uvarint(300, &mut buf);
/// assert_eq!(&buf[..n], &[0xAC, 0x02]);
/// ```
#[inline]
pub fn encode_uvarint(mut value: u64, buf: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut i = 0;
    while value >= 0x80 {
        buf[i] = (value as u8) | 0x80;
        value >>= 7;
        i += 1;
    }
    buf[i] = value as u8;
    i + 1
}

/// Number of bytes `encode_uvarint` would write for `value`.
#[inline]
pub fn uvarint_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Decode a uvarint from the start of `buf`.
///
/// Returns `Ok(Some((value, consumed)))` when a complete prefix is present,
/// `Ok(None)` when `buf` ends before the terminating byte.
///
/// # Errors
///
/// Returns [`WireError::VarintOverflow`] if the encoding does not fit a `u64`.
pub fn decode_uvarint(buf: &[u8]) -> Result<Option<(u64, usize)>> {
    let mut acc = UvarintAccumulator::new();
    for (i, &byte) in buf.iter().enumerate() {
        if let Some(value) = acc.push(byte)? {
            return Ok(Some((value, i + 1)));
        }
    }
    Ok(None)
}

/// Incremental uvarint decoder for byte-at-a-time stream reads.
#[derive(Debug, Default)]
pub(crate) struct UvarintAccumulator {
    value: u64,
    shift: u32,
}

impl UvarintAccumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// True if no byte has been pushed yet.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.shift == 0
    }

    /// Feed one byte. Returns the value once the final byte arrives.
    #[inline]
    pub(crate) fn push(&mut self, byte: u8) -> Result<Option<u64>> {
        // The tenth byte may only contribute the single remaining bit.
        if self.shift == 63 && byte > 1 {
            return Err(WireError::VarintOverflow);
        }
        self.value |= u64::from(byte & 0x7F) << self.shift;
        if byte < 0x80 {
            return Ok(Some(self.value));
        }
        self.shift += 7;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: u64) -> Vec<u8> {
        let mut buf = [0u8; MAX_VARINT_LEN];
        let n = encode_uvarint(value, &mut buf);
        buf[..n].to_vec()
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode(0), [0x00]);
        assert_eq!(encode(1), [0x01]);
        assert_eq!(encode(127), [0x7F]);
        assert_eq!(encode(128), [0x80, 0x01]);
        assert_eq!(encode(300), [0xAC, 0x02]);
        assert_eq!(encode(16_384), [0x80, 0x80, 0x01]);
        assert_eq!(
            encode(u64::MAX),
            [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]
        );
    }

    #[test]
    fn test_uvarint_len_matches_encoding() {
        for value in [0, 1, 127, 128, 16_383, 16_384, u32::MAX as u64, u64::MAX] {
            assert_eq!(uvarint_len(value), encode(value).len(), "value {value}");
        }
    }

    #[test]
    fn test_decode_boundaries() {
        for value in [0, 127, 128, 300, 1 << 35, u64::MAX] {
            let bytes = encode(value);
            assert_eq!(decode_uvarint(&bytes).unwrap(), Some((value, bytes.len())));
        }
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        assert_eq!(decode_uvarint(&[0x05, 0xFF, 0xFF]).unwrap(), Some((5, 1)));
    }

    #[test]
    fn test_decode_incomplete() {
        assert_eq!(decode_uvarint(&[]).unwrap(), None);
        assert_eq!(decode_uvarint(&[0x80]).unwrap(), None);
        assert_eq!(decode_uvarint(&[0xFF, 0xFF]).unwrap(), None);
    }

    #[test]
    fn test_decode_overflow() {
        // Tenth byte carries more than one bit
        let too_big = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x02];
        assert!(matches!(
            decode_uvarint(&too_big),
            Err(WireError::VarintOverflow)
        ));

        // Eleven bytes
        let too_long = [0x80; 11];
        assert!(matches!(
            decode_uvarint(&too_long),
            Err(WireError::VarintOverflow)
        ));
    }

    #[test]
    fn test_accumulator_tracks_start() {
        let mut acc = UvarintAccumulator::new();
        assert!(acc.is_empty());
        assert_eq!(acc.push(0x80).unwrap(), None);
        assert!(!acc.is_empty());
        assert_eq!(acc.push(0x01).unwrap(), Some(128));
    }
}
