//! Header pool for allocation-free header reuse.
//!
//! Hands out boxed headers and takes them back after use, so the hot path
//! does not allocate a header (and its string buffers) per call.
//!
//! # Design
//!
//! - Two process-wide pools, one per header kind, created at compile time
//! - A short `parking_lot::Mutex` critical section around a `Vec` of idle
//!   boxes; callers never lock anything themselves
//! - At most `capacity` idle headers are retained; extra releases are dropped
//! - Headers are NOT cleared on acquire or release, call `reset()` or
//!   overwrite every field before use
//!
//! # Usage
//!
//! ```
//! use rpcwire::header::{acquire_request_header, release_request_header};
//!
//! let mut header = acquire_request_header();
//! header.reset();
//! header.method.push_str("ArithService.Add");
//! header.id = 1;
//! // serialize and send...
//! release_request_header(header);
//! ```

use parking_lot::Mutex;

use super::{RequestHeader, ResponseHeader};

/// Idle headers retained per pool.
pub const DEFAULT_POOL_CAPACITY: usize = 1024;

static REQUEST_POOL: HeaderPool<RequestHeader> = HeaderPool::new(DEFAULT_POOL_CAPACITY);
static RESPONSE_POOL: HeaderPool<ResponseHeader> = HeaderPool::new(DEFAULT_POOL_CAPACITY);

/// A bounded pool of reusable boxed values.
///
/// Safe to share between threads; `acquire` and `release` take `&self`.
pub struct HeaderPool<T> {
    /// Idle instances ready for reuse.
    idle: Mutex<Vec<Box<T>>>,
    /// Maximum idle instances retained.
    capacity: usize,
}

impl<T: Default> HeaderPool<T> {
    /// Create an empty pool retaining at most `capacity` idle instances.
    #[inline]
    pub const fn new(capacity: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// Take an instance from the pool, or allocate a zero-valued one.
    ///
    /// The content of a recycled instance is whatever its last user left.
    #[inline]
    pub fn acquire(&self) -> Box<T> {
        self.idle.lock().pop().unwrap_or_default()
    }

    /// Return an instance for reuse.
    ///
    /// Dropped instead if the pool already holds `capacity` idle instances.
    #[inline]
    pub fn release(&self, item: Box<T>) {
        let mut idle = self.idle.lock();
        if idle.len() < self.capacity {
            idle.push(item);
        }
    }

    /// Number of idle instances currently held (for diagnostics).
    #[inline]
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    /// Maximum idle instances retained.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all idle instances.
    pub fn clear(&self) {
        self.idle.lock().clear();
    }
}

impl<T> std::fmt::Debug for HeaderPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderPool")
            .field("idle", &self.idle.lock().len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// The process-wide request header pool.
#[inline]
pub fn request_pool() -> &'static HeaderPool<RequestHeader> {
    &REQUEST_POOL
}

/// The process-wide response header pool.
#[inline]
pub fn response_pool() -> &'static HeaderPool<ResponseHeader> {
    &RESPONSE_POOL
}

/// Acquire a request header from the process-wide pool.
#[inline]
pub fn acquire_request_header() -> Box<RequestHeader> {
    REQUEST_POOL.acquire()
}

/// Return a request header to the process-wide pool.
#[inline]
pub fn release_request_header(header: Box<RequestHeader>) {
    REQUEST_POOL.release(header);
}

/// Acquire a response header from the process-wide pool.
#[inline]
pub fn acquire_response_header() -> Box<ResponseHeader> {
    RESPONSE_POOL.acquire()
}

/// Return a response header to the process-wide pool.
#[inline]
pub fn release_response_header(header: Box<ResponseHeader>) {
    RESPONSE_POOL.release(header);
}
