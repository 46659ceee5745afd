//! Frame I/O over tokio `AsyncRead` / `AsyncWrite`.
//!
//! Same wire format, limits and end-of-stream policy as the blocking
//! functions in [`super::io`].

use std::io::{self, ErrorKind};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

use super::frame::DEFAULT_MAX_FRAME_SIZE;
use super::io::{is_transient, next_chunk_end, READ_CHUNK};
use super::varint::{encode_uvarint, UvarintAccumulator, MAX_VARINT_LEN};
use crate::error::{Result, WireError};

/// Write one frame to an async sink. The sink is not flushed.
pub async fn send_frame_async<W>(sink: &mut W, data: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    write_frame_async(sink, data, DEFAULT_MAX_FRAME_SIZE).await
}

/// Read one frame body from an async source.
pub async fn recv_frame_async<R>(source: &mut R) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    read_frame_async(source, DEFAULT_MAX_FRAME_SIZE).await
}

pub(crate) async fn write_frame_async<W>(sink: &mut W, data: &[u8], max_frame_size: u64) -> Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let size = data.len() as u64;
    if size > max_frame_size {
        return Err(WireError::FrameTooLarge {
            size,
            max: max_frame_size,
        });
    }

    let mut prefix = [0u8; MAX_VARINT_LEN];
    let n = encode_uvarint(size, &mut prefix);
    write_fully(sink, &prefix[..n]).await?;

    if !data.is_empty() {
        write_fully(sink, data).await?;
    }

    trace!(size, "frame sent");
    Ok(())
}

pub(crate) async fn read_frame_async<R>(source: &mut R, max_frame_size: u64) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let size = read_prefix(source).await?;
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
        let n = read_fully(source, &mut data[start..]).await?;
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

async fn write_fully<W>(sink: &mut W, data: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut offset = 0;
    while offset < data.len() {
        match sink.write(&data[offset..]).await {
            Ok(0) => {
                return Err(io::Error::new(ErrorKind::WriteZero, "write returned 0"));
            }
            Ok(n) => offset += n,
            Err(e) if is_transient(&e) => {
                trace!(offset, kind = ?e.kind(), "transient write error, retrying");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

async fn read_fully<R>(source: &mut R, buf: &mut [u8]) -> io::Result<usize>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut offset = 0;
    while offset < buf.len() {
        match source.read(&mut buf[offset..]).await {
            Ok(0) => break,
            Ok(n) => offset += n,
            Err(e) if is_transient(&e) => {
                trace!(offset, kind = ?e.kind(), "transient read error, retrying");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(offset)
}

async fn read_prefix<R>(source: &mut R) -> Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut acc = UvarintAccumulator::new();
    loop {
        let mut byte = [0u8; 1];
        if read_fully(source, &mut byte).await? == 0 {
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
