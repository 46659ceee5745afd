//! Header module - per-call header types and their reuse pools.
//!
//! The RPC layer creates one request header and one response header per
//! call. Both are recycled through process-wide pools instead of being
//! allocated fresh each time. How headers are serialized is up to the layer
//! above; this module only owns their storage.

mod pool;

use crate::compress::CompressType;

pub use pool::{
    acquire_request_header, acquire_response_header, release_request_header,
    release_response_header, request_pool, response_pool, HeaderPool, DEFAULT_POOL_CAPACITY,
};

/// Metadata sent ahead of a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeader {
    /// Compression applied to the request body.
    pub compress_type: CompressType,
    /// Fully qualified method name, e.g. `"ArithService.Add"`.
    pub method: String,
    /// Call identifier chosen by the client.
    pub id: u64,
    /// Body length in bytes.
    pub request_len: u32,
    /// Body checksum.
    pub checksum: u32,
}

impl RequestHeader {
    /// Restore the zero value, keeping the `method` allocation.
    pub fn reset(&mut self) {
        self.compress_type = CompressType::Raw;
        self.method.clear();
        self.id = 0;
        self.request_len = 0;
        self.checksum = 0;
    }
}

/// Metadata sent ahead of a response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeader {
    /// Compression applied to the response body.
    pub compress_type: CompressType,
    /// Identifier of the call being answered.
    pub id: u64,
    /// Error message, empty on success.
    pub error: String,
    /// Body length in bytes.
    pub response_len: u32,
    /// Body checksum.
    pub checksum: u32,
}

impl ResponseHeader {
    /// Restore the zero value, keeping the `error` allocation.
    pub fn reset(&mut self) {
        self.compress_type = CompressType::Raw;
        self.id = 0;
        self.error.clear();
        self.response_len = 0;
        self.checksum = 0;
    }

    /// True if the response carries an error.
    #[inline]
    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_reset() {
        let mut header = RequestHeader {
            compress_type: CompressType::Gzip,
            method: "ArithService.Add".to_string(),
            id: 7,
            request_len: 12,
            checksum: 0xDEAD_BEEF,
        };
        let capacity = header.method.capacity();

        header.reset();
        assert_eq!(header, RequestHeader::default());
        assert_eq!(header.method.capacity(), capacity);
    }

    #[test]
    fn test_response_reset() {
        let mut header = ResponseHeader {
            compress_type: CompressType::Lz4,
            id: 7,
            error: "divided is zero".to_string(),
            response_len: 0,
            checksum: 1,
        };
        assert!(header.is_error());

        header.reset();
        assert_eq!(header, ResponseHeader::default());
        assert!(!header.is_error());
    }
}
