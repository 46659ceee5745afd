//! Configured frame codec.
//!
//! [`FrameCodec`] carries a [`CodecConfig`] so callers do not repeat the
//! frame limit and compression choice on every call. The limit applies to
//! the frame body on the wire and to the payload on either side of
//! compression.
//!
//! # Example
//!
//! ```
//! use rpcwire::{CodecConfig, CompressType, FrameCodec};
//! use std::io::Cursor;
//!
//! let codec = FrameCodec::with_config(CodecConfig::new().compress_type(CompressType::Zlib));
//!
//! let mut wire = Vec::new();
//! codec.send_payload(&mut wire, b"compress me compress me compress me").unwrap();
//!
//! let body = codec.recv_payload(&mut Cursor::new(wire)).unwrap();
//! assert_eq!(body, b"compress me compress me compress me");
//! ```

use std::io::{Read, Write};

use tokio::io::{AsyncRead, AsyncWrite};

use super::async_io::{read_frame_async, write_frame_async};
use super::io::{read_frame, write_frame};
use crate::compress::CompressType;
use crate::config::CodecConfig;
use crate::error::{Result, WireError};

/// Length-prefixed frame codec with an optional payload transform.
///
/// Stateless apart from its configuration; one instance can serve any
/// number of streams concurrently.
#[derive(Debug, Clone, Default)]
pub struct FrameCodec {
    config: CodecConfig,
}

impl FrameCodec {
    /// Create a codec with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec from a configuration.
    #[inline]
    #[must_use]
    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[inline]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Get the maximum frame size.
    #[inline]
    pub fn max_frame_size(&self) -> u64 {
        self.config.max_frame_size
    }

    /// Get the configured compression.
    #[inline]
    pub fn compress_type(&self) -> CompressType {
        self.config.compress_type
    }

    /// Write `data` as one frame, verbatim.
    pub fn send<W: Write + ?Sized>(&self, sink: &mut W, data: &[u8]) -> Result<()> {
        write_frame(sink, data, self.config.max_frame_size)
    }

    /// Read one frame body, verbatim.
    pub fn recv<R: Read + ?Sized>(&self, source: &mut R) -> Result<Vec<u8>> {
        read_frame(source, self.config.max_frame_size)
    }

    /// Compress `data` with the configured algorithm and send it as one frame.
    pub fn send_payload<W: Write + ?Sized>(&self, sink: &mut W, data: &[u8]) -> Result<()> {
        let body = self.pack(data)?;
        self.send(sink, &body)
    }

    /// Receive one frame and decompress it with the configured algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::FrameTooLarge`] if the frame, or the payload it
    /// decompresses to, exceeds the configured limit.
    pub fn recv_payload<R: Read + ?Sized>(&self, source: &mut R) -> Result<Vec<u8>> {
        let body = self.recv(source)?;
        self.unpack(&body)
    }

    /// Async variant of [`send`](Self::send).
    pub async fn send_async<W>(&self, sink: &mut W, data: &[u8]) -> Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        write_frame_async(sink, data, self.config.max_frame_size).await
    }

    /// Async variant of [`recv`](Self::recv).
    pub async fn recv_async<R>(&self, source: &mut R) -> Result<Vec<u8>>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        read_frame_async(source, self.config.max_frame_size).await
    }

    /// Async variant of [`send_payload`](Self::send_payload).
    pub async fn send_payload_async<W>(&self, sink: &mut W, data: &[u8]) -> Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let body = self.pack(data)?;
        self.send_async(sink, &body).await
    }

    /// Async variant of [`recv_payload`](Self::recv_payload).
    pub async fn recv_payload_async<R>(&self, source: &mut R) -> Result<Vec<u8>>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let body = self.recv_async(source).await?;
        self.unpack(&body)
    }

    fn pack(&self, data: &[u8]) -> Result<Vec<u8>> {
        let size = data.len() as u64;
        if size > self.config.max_frame_size {
            return Err(WireError::FrameTooLarge {
                size,
                max: self.config.max_frame_size,
            });
        }
        self.config.compress_type.compress(data)
    }

    fn unpack(&self, body: &[u8]) -> Result<Vec<u8>> {
        self.config
            .compress_type
            .decompress_bounded(body, self.config.max_frame_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_codec_defaults() {
        let codec = FrameCodec::new();
        assert_eq!(codec.compress_type(), CompressType::Raw);
        assert_eq!(codec.max_frame_size(), crate::protocol::DEFAULT_MAX_FRAME_SIZE);
    }

    #[test]
    fn test_send_payload_compresses_body() {
        let input = b"repeat ".repeat(100);
        let codec = FrameCodec::with_config(CodecConfig::new().compress_type(CompressType::Gzip));

        let mut wire = Vec::new();
        codec.send_payload(&mut wire, &input).unwrap();
        assert!(wire.len() < input.len());

        // The frame body is the gzip stream itself
        let raw_body = FrameCodec::new().recv(&mut Cursor::new(wire.clone())).unwrap();
        assert_eq!(CompressType::Gzip.decompress(&raw_body).unwrap(), input);

        assert_eq!(codec.recv_payload(&mut Cursor::new(wire)).unwrap(), input);
    }

    #[test]
    fn test_payload_roundtrip_every_algorithm() {
        for kind in CompressType::ALL {
            let codec = FrameCodec::with_config(CodecConfig::new().compress_type(kind));
            let inputs: [&[u8]; 3] = [b"", b"x", b"some payload bytes"];
            for input in inputs {
                let mut wire = Vec::new();
                codec.send_payload(&mut wire, input).unwrap();
                assert_eq!(codec.recv_payload(&mut Cursor::new(wire)).unwrap(), input);
            }
        }
    }

    #[test]
    fn test_mismatched_algorithm_is_decode_error() {
        let sender = FrameCodec::with_config(CodecConfig::new().compress_type(CompressType::Lz4));
        let receiver = FrameCodec::with_config(CodecConfig::new().compress_type(CompressType::Zlib));

        let mut wire = Vec::new();
        sender.send_payload(&mut wire, b"payload").unwrap();

        assert!(matches!(
            receiver.recv_payload(&mut Cursor::new(wire)),
            Err(WireError::Decompress { .. })
        ));
    }

    #[test]
    fn test_configured_limit() {
        let codec = FrameCodec::with_config(CodecConfig::new().max_frame_size(4));
        let mut wire = Vec::new();
        assert!(matches!(
            codec.send(&mut wire, b"too long"),
            Err(WireError::FrameTooLarge { size: 8, max: 4 })
        ));

        let mut wire = Vec::new();
        FrameCodec::new().send(&mut wire, b"too long").unwrap();
        assert!(matches!(
            codec.recv(&mut Cursor::new(wire)),
            Err(WireError::FrameTooLarge { size: 8, max: 4 })
        ));
    }

    #[tokio::test]
    async fn test_async_payload_roundtrip() {
        let codec = FrameCodec::with_config(CodecConfig::new().compress_type(CompressType::Lz4));
        let (mut client, mut server) = tokio::io::duplex(1024);

        codec.send_payload_async(&mut client, b"async payload").await.unwrap();
        let body = codec.recv_payload_async(&mut server).await.unwrap();
        assert_eq!(body, b"async payload");
    }

    #[test]
    fn test_small_frame_cannot_inflate_past_limit() {
        let limit = 64 * 1024;
        let zeros = vec![0u8; 16 * 1024 * 1024];
        let codec = FrameCodec::with_config(
            CodecConfig::new()
                .compress_type(CompressType::Zlib)
                .max_frame_size(limit),
        );

        // Compressed body fits the limit, the payload behind it does not
        let mut wire = Vec::new();
        FrameCodec::new()
            .send(&mut wire, &CompressType::Zlib.compress(&zeros).unwrap())
            .unwrap();
        assert!((wire.len() as u64) < limit);

        assert!(matches!(
            codec.recv_payload(&mut Cursor::new(wire)),
            Err(WireError::FrameTooLarge { max, .. }) if max == limit
        ));
    }

    #[test]
    fn test_inflation_limit_every_algorithm() {
        let zeros = vec![0u8; 1024 * 1024];
        for kind in CompressType::ALL {
            let codec =
                FrameCodec::with_config(CodecConfig::new().compress_type(kind).max_frame_size(4096));

            let mut wire = Vec::new();
            FrameCodec::new()
                .send(&mut wire, &kind.compress(&zeros).unwrap())
                .unwrap();

            assert!(
                matches!(
                    codec.recv_payload(&mut Cursor::new(wire)),
                    Err(WireError::FrameTooLarge { max: 4096, .. })
                ),
                "{kind} payload exceeded the limit"
            );
        }
    }

    #[test]
    fn test_oversized_payload_not_sent() {
        let codec = FrameCodec::with_config(
            CodecConfig::new()
                .compress_type(CompressType::Gzip)
                .max_frame_size(1024),
        );
        let mut wire = Vec::new();
        assert!(matches!(
            codec.send_payload(&mut wire, &[0u8; 4096]),
            Err(WireError::FrameTooLarge { size: 4096, max: 1024 })
        ));
        assert!(wire.is_empty());
    }

    #[tokio::test]
    async fn test_async_inflation_limit() {
        let codec = FrameCodec::with_config(
            CodecConfig::new()
                .compress_type(CompressType::Snappy)
                .max_frame_size(1024),
        );
        let (mut client, mut server) = tokio::io::duplex(64 * 1024);

        let body = CompressType::Snappy.compress(&[0u8; 16 * 1024]).unwrap();
        FrameCodec::new().send_async(&mut client, &body).await.unwrap();

        assert!(matches!(
            codec.recv_payload_async(&mut server).await,
            Err(WireError::FrameTooLarge { max: 1024, .. })
        ));
    }
}
