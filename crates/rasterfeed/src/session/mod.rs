//! # Scan session abstraction
//!
//! A [`ScanSession`] is one scan job in progress on a device. The hardware
//! decides how many bytes each chunk carries and when pages and the feed
//! end; the session only reports what the driver tells it.
//!
//! The crate ships two implementations: [`memory::MemorySession`] for
//! scripted in-memory feeds and [`file::FileSession`], which replays
//! recorded page streams from disk.

use displaydoc::Display;
use thiserror::Error;

pub mod file;
pub mod memory;

/// Largest chunk requested from the driver in a single pull (1 MiB)
pub const DEFAULT_CHUNK_LEN: usize = 1024 * 1024;

/// scan session failed: {message}
///
/// An error reported by the scanner driver. The message is the driver's own
/// description of the failure and is passed through verbatim.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[ignore_extra_doc_attributes]
pub struct SessionError {
    /// Human-readable message from the driver layer
    pub message: String,
}

impl SessionError {
    /// Wrap a driver message
    pub fn new(message: impl Into<String>) -> Self {
        SessionError {
            message: message.into(),
        }
    }
}

/// One scan job in progress
///
/// A feed consists of one or more pages; a page consists of chunks. Callers
/// are expected to check [`end_of_feed`](Self::end_of_feed) between pages
/// and [`end_of_page`](Self::end_of_page) between chunks. Observing the end
/// of a page arms the next one, so the following
/// [`read_chunk`](Self::read_chunk) starts delivering its bytes.
pub trait ScanSession {
    /// Pull the next chunk of up to `max_len` bytes from the current page
    ///
    /// The returned buffer is owned by the caller and may be shorter than
    /// `max_len`. An empty buffer does not by itself mean the page is over;
    /// [`end_of_page`](Self::end_of_page) is the authoritative signal.
    fn read_chunk(&mut self, max_len: usize) -> Result<Vec<u8>, SessionError>;

    /// True when the current page has no more bytes
    fn end_of_page(&mut self) -> bool;

    /// True when the whole feed is finished
    fn end_of_feed(&mut self) -> bool;

    /// Abort the scan job
    ///
    /// After cancelling, further reads fail with a [`SessionError`].
    fn cancel(&mut self);
}
