//! Property tests for framing and compression round trips.

use std::io::{self, Cursor, Write};

use proptest::prelude::*;
use rpcwire::protocol::{decode_uvarint, encode_uvarint, MAX_VARINT_LEN};
use rpcwire::{recv_frame, send_frame, CompressType};

/// Sink that accepts a bounded number of bytes per call.
struct Trickle {
    out: Vec<u8>,
    step: usize,
}

impl Write for Trickle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len().min(self.step);
        self.out.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn any_compress_type() -> impl Strategy<Value = CompressType> {
    prop::sample::select(CompressType::ALL.to_vec())
}

proptest! {
    #[test]
    fn frame_roundtrip(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let mut wire = Vec::new();
        send_frame(&mut wire, &data).unwrap();
        let body = recv_frame(&mut Cursor::new(wire)).unwrap();
        prop_assert_eq!(body, data);
    }

    #[test]
    fn compress_roundtrip(
        kind in any_compress_type(),
        data in prop::collection::vec(any::<u8>(), 0..4096),
    ) {
        let packed = kind.compress(&data).unwrap();
        prop_assert_eq!(kind.decompress(&packed).unwrap(), data);
    }

    #[test]
    fn constrained_sink_produces_identical_wire(
        data in prop::collection::vec(any::<u8>(), 0..512),
        step in 1usize..8,
    ) {
        let mut free = Vec::new();
        send_frame(&mut free, &data).unwrap();

        let mut trickle = Trickle { out: Vec::new(), step };
        send_frame(&mut trickle, &data).unwrap();

        prop_assert_eq!(trickle.out, free);
    }

    #[test]
    fn short_body_never_decodes(
        data in prop::collection::vec(any::<u8>(), 1..1024),
        cut in 1usize..1024,
    ) {
        let mut wire = Vec::new();
        send_frame(&mut wire, &data).unwrap();
        let cut = cut.min(data.len());
        wire.truncate(wire.len() - cut);

        prop_assert!(recv_frame(&mut Cursor::new(wire)).is_err());
    }

    #[test]
    fn uvarint_roundtrip(value in any::<u64>()) {
        let mut buf = [0u8; MAX_VARINT_LEN];
        let n = encode_uvarint(value, &mut buf);
        prop_assert_eq!(decode_uvarint(&buf[..n]).unwrap(), Some((value, n)));
    }
}
