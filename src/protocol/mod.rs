//! Protocol module - length-prefixed framing.
//!
//! Wire format, repeated once per frame:
//!
//! ```text
//! ┌──────────────────┬──────────────────────┐
//! │ Length           │ Body                 │
//! │ uvarint, 1-10 B  │ exactly Length bytes │
//! └──────────────────┴──────────────────────┘
//! ```
//!
//! No magic bytes, checksum or type tag; those belong to the header and body
//! content layered on top. A zero length is a valid empty frame.
//!
//! - [`send_frame`] / [`recv_frame`] - blocking, over `std::io`
//! - [`send_frame_async`] / [`recv_frame_async`] - over tokio I/O traits
//! - [`encode_frame`] / [`decode_frame`] - over an in-memory `BytesMut`
//! - [`FrameCodec`] - the above with a configured limit and compression

mod async_io;
mod codec;
mod frame;
mod io;
mod varint;

pub use async_io::{recv_frame_async, send_frame_async};
pub use codec::FrameCodec;
pub use frame::{build_frame, decode_frame, encode_frame, frame_len, DEFAULT_MAX_FRAME_SIZE};
pub use io::{is_transient, recv_frame, send_frame};
pub use varint::{decode_uvarint, encode_uvarint, uvarint_len, MAX_VARINT_LEN};
