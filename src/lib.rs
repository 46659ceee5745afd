//! # rpcwire
//!
//! Wire-framing and payload-transform layer for RPC transports.
//!
//! This crate turns arbitrary byte payloads into self-delimiting frames on
//! a streaming connection and back, optionally passing the payload through
//! a compression transform chosen by the caller.
//!
//! ## Architecture
//!
//! - **Framing** ([`protocol`]): `<uvarint length><body>` over blocking or
//!   async streams, tolerant of partial reads and writes
//! - **Compression** ([`compress`]): raw, gzip, snappy, zlib and LZ4 behind
//!   one [`CompressType`] tag
//! - **Header pools** ([`header`]): process-wide reuse of request and
//!   response headers
//!
//! Dispatch, correlation, flow control and connection management belong to
//! the layer above.
//!
//! ## Example
//!
//! ```
//! use rpcwire::{recv_frame, send_frame, CompressType};
//! use std::io::Cursor;
//!
//! let body = CompressType::Snappy.compress(b"hello, frame").unwrap();
//!
//! let mut wire = Vec::new();
//! send_frame(&mut wire, &body).unwrap();
//!
//! let received = recv_frame(&mut Cursor::new(wire)).unwrap();
//! let payload = CompressType::Snappy.decompress(&received).unwrap();
//! assert_eq!(payload, b"hello, frame");
//! ```

pub mod compress;
pub mod config;
pub mod error;
pub mod header;
pub mod protocol;

pub use compress::{CompressType, Compressor};
pub use config::CodecConfig;
pub use error::WireError;
pub use header::{RequestHeader, ResponseHeader};
pub use protocol::{recv_frame, recv_frame_async, send_frame, send_frame_async, FrameCodec};
