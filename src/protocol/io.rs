//! Blocking frame I/O over `std::io` streams.
//!
//! A stream may satisfy only part of a request per call. Both directions
//! therefore run an offset loop that resubmits the remaining slice until the
//! frame is complete or the stream reports a fatal error.
//!
//! Errors are classified by [`is_transient`]:
//! - `Interrupted`, `WouldBlock` - retried in place, never surfaced
//! - anything else - returned immediately as [`WireError::Io`]
//!
//! `recv_frame` reads the prefix one byte at a time. Wrap raw sockets in a
//! `std::io::BufReader` so this does not cost a syscall per byte.
//!
//! The body buffer grows as bytes arrive, starting at [`READ_CHUNK`] and
//! doubling, so a declared length costs memory only once the peer sends it.

use std::io::{self, ErrorKind, Read, Write};

use tracing::trace;

use super::frame::DEFAULT_MAX_FRAME_SIZE;
use super::varint::{encode_uvarint, UvarintAccumulator, MAX_VARINT_LEN};
use crate::error::{Result, WireError};

/// Initial body allocation, before any body byte has arrived.
pub(crate) const READ_CHUNK: usize = 64 * 1024;

/// Whether an I/O error is a recoverable partial-progress signal.
///
/// Timeouts are not transient: a deadline set on the channel must end the
/// call.
#[inline]
pub fn is_transient(err: &io::Error) -> bool {
    matches!(err.kind(), ErrorKind::Interrupted | ErrorKind::WouldBlock)
}

/// Write one frame: the uvarint length of `data`, then `data` itself.
///
/// An empty `data` writes only the single `0x00` prefix byte. The sink is
/// not flushed.
///
/// # Errors
///
/// Returns [`WireError::Io`] on a fatal write error and
/// [`WireError::FrameTooLarge`] if `data` exceeds the default limit.
pub fn send_frame<W: Write + ?Sized>(sink: &mut W, data: &[u8]) -> Result<()> {
    write_frame(sink, data, DEFAULT_MAX_FRAME_SIZE)
}

/// Read one frame body.
///
/// Returns an empty vector for a zero-length frame.
///
/// # Errors
///
/// - [`WireError::ConnectionClosed`] if the stream ends before the prefix
/// - [`WireError::IncompletePrefix`] / [`WireError::IncompleteFrame`] if it
///   ends inside the frame
/// - [`WireError::FrameTooLarge`] if the declared length exceeds the default
///   limit
/// - [`WireError::Io`] on a fatal read error
pub fn recv_frame<R: Read + ?Sized>(source: &mut R) -> Result<Vec<u8>> {
    read_frame(source, DEFAULT_MAX_FRAME_SIZE)
}

pub(crate) fn write_frame<W: Write + ?Sized>(
    sink: &mut W,
    data: &[u8],
    max_frame_size: u64,
) -> Result<()> {
    let size = data.len() as u64;
    if size > max_frame_size {
        return Err(WireError::FrameTooLarge {
            size,
            max: max_frame_size,
        });
    }

    let mut prefix = [0u8; MAX_VARINT_LEN];
    let n = encode_uvarint(size, &mut prefix);
    write_fully(sink, &prefix[..n])?;

    if !data.is_empty() {
        write_fully(sink, data)?;
    }

    trace!(size, "frame sent");
    Ok(())
}

pub(crate) fn read_frame<R: Read + ?Sized>(source: &mut R, max_frame_size: u64) -> Result<Vec<u8>> {
    let size = read_prefix(source)?;
    if size > max_frame_size {
        return Err(WireError::FrameTooLarge {
            size,
            max: max_frame_size,
        });
    }
    if size == 0 {
        return Ok(Vec::new());
    }

    let len = usize::try_from(size).map_err(|_| WireError::FrameTooLarge {
        size,
        max: max_frame_size,
    })?;
    let mut data = Vec::with_capacity(len.min(READ_CHUNK));
    while data.len() < len {
        let start = data.len();
        let end = next_chunk_end(start, len);
        data.resize(end, 0);
        let n = read_fully(source, &mut data[start..])?;
        if start + n < end {
            return Err(WireError::IncompleteFrame {
                expected: size,
                received: (start + n) as u64,
            });
        }
    }

    trace!(size, "frame received");
    Ok(data)
}

/// End of the next body segment to fill: doubles the filled length, capped
/// at the declared length.
#[inline]
pub(crate) fn next_chunk_end(filled: usize, len: usize) -> usize {
    len.min(filled.saturating_add(filled.max(READ_CHUNK)))
}

/// Write all of `data`, resubmitting the unwritten remainder.
fn write_fully<W: Write + ?Sized>(sink: &mut W, data: &[u8]) -> io::Result<()> {
    let mut offset = 0;
    while offset < data.len() {
        match sink.write(&data[offset..]) {
            Ok(0) => {
                return Err(io::Error::new(ErrorKind::WriteZero, "write returned 0"));
            }
            Ok(n) => offset += n,
            Err(e) if is_transient(&e) => {
                trace!(offset, kind = ?e.kind(), "transient write error, retrying");
                if e.kind() == ErrorKind::WouldBlock {
                    std::thread::yield_now();
                }
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Fill `buf` from `source`, keeping partial progress across calls.
///
/// Returns the number of bytes read; less than `buf.len()` means the stream
/// ended.
fn read_fully<R: Read + ?Sized>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut offset = 0;
    while offset < buf.len() {
        match source.read(&mut buf[offset..]) {
            Ok(0) => break,
            Ok(n) => offset += n,
            Err(e) if is_transient(&e) => {
                trace!(offset, kind = ?e.kind(), "transient read error, retrying");
                if e.kind() == ErrorKind::WouldBlock {
                    std::thread::yield_now();
                }
            }
            Err(e) => return Err(e),
        }
    }
    Ok(offset)
}

fn read_prefix<R: Read + ?Sized>(source: &mut R) -> Result<u64> {
    let mut acc = UvarintAccumulator::new();
    loop {
        let mut byte = [0u8; 1];
        if read_fully(source, &mut byte)? == 0 {
            return Err(if acc.is_empty() {
                WireError::ConnectionClosed
            } else {
                WireError::IncompletePrefix
            });
        }
        if let Some(size) = acc.push(byte[0])? {
            return Ok(size);
        }
    }
}
