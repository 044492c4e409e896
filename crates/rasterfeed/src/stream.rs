//! # Chunked byte stream adapter
//!
//! The driver decides how many bytes each chunk carries; the decoder wants
//! exact counts for header fields and one big pull for pixel data. A
//! [`PageStream`] sits between the two, carrying over partially consumed
//! chunks so neither side has to know about the other's sizes.

use std::io::{self, Read};

use log::trace;

use crate::session::{ScanSession, SessionError, DEFAULT_CHUNK_LEN};

/// Buffers are pre-sized from declared sizes, which are hints only
const MAX_PREALLOC: usize = 64 * 1024 * 1024;

/// Outcome of a single [`PageStream::fill`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStatus {
    /// This many bytes were copied into the target buffer
    Filled(usize),
    /// The current page has no more bytes; nothing was copied
    EndOfPage,
}

/// Sequential byte access to one page of a chunked scan session
///
/// Holds the most recent chunk pulled from the session and the offset up to
/// which it has been handed out. One stream reads exactly one page; the end
/// of the page is a normal status, not an error.
pub struct PageStream<'a, S: ScanSession> {
    session: &'a mut S,
    chunk: Vec<u8>,
    consumed: usize,
    chunk_len: usize,
}

impl<'a, S: ScanSession> PageStream<'a, S> {
    /// Stream the session's current page with the default chunk cap
    pub fn new(session: &'a mut S) -> Self {
        Self::with_chunk_len(session, DEFAULT_CHUNK_LEN)
    }

    /// Stream the session's current page, pulling at most `chunk_len` bytes
    /// per driver call
    pub fn with_chunk_len(session: &'a mut S, chunk_len: usize) -> Self {
        PageStream {
            session,
            chunk: Vec::new(),
            consumed: 0,
            chunk_len,
        }
    }

    /// Copy up to `buf.len()` bytes from the page into `buf`
    ///
    /// A zero-capacity buffer is a no-op returning `Filled(0)`. Empty chunks
    /// from the driver are skipped by polling again; the call blocks until
    /// at least one byte arrives or the page ends.
    pub fn fill(&mut self, buf: &mut [u8]) -> Result<FillStatus, SessionError> {
        if buf.is_empty() {
            return Ok(FillStatus::Filled(0));
        }
        loop {
            let rest = self.chunk.len() - self.consumed;
            if rest > 0 {
                let len = rest.min(buf.len());
                buf[..len].copy_from_slice(&self.chunk[self.consumed..self.consumed + len]);
                self.consumed += len;
                return Ok(FillStatus::Filled(len));
            }
            if self.session.end_of_page() {
                return Ok(FillStatus::EndOfPage);
            }
            self.chunk = self.session.read_chunk(self.chunk_len)?;
            self.consumed = 0;
            trace!("pulled a {} byte chunk", self.chunk.len());
        }
    }

    /// Fill `buf` completely unless the page ends first
    ///
    /// Returns the number of bytes actually copied; anything short of
    /// `buf.len()` means the page ended.
    pub fn fill_all(&mut self, buf: &mut [u8]) -> Result<usize, SessionError> {
        let mut done = 0;
        while done < buf.len() {
            match self.fill(&mut buf[done..])? {
                FillStatus::Filled(len) => done += len,
                FillStatus::EndOfPage => break,
            }
        }
        Ok(done)
    }

    /// Read everything left on the page
    ///
    /// `size_hint` pre-sizes the buffer; it does not bound how much is read.
    pub fn read_remaining(&mut self, size_hint: usize) -> Result<Vec<u8>, SessionError> {
        let mut out = Vec::with_capacity(size_hint.min(MAX_PREALLOC));
        loop {
            if self.consumed < self.chunk.len() {
                out.extend_from_slice(&self.chunk[self.consumed..]);
                self.consumed = self.chunk.len();
            } else if self.session.end_of_page() {
                return Ok(out);
            } else {
                self.chunk = self.session.read_chunk(self.chunk_len)?;
                self.consumed = 0;
            }
        }
    }
}

impl<S: ScanSession> Read for PageStream<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.fill(buf) {
            Ok(FillStatus::Filled(len)) => Ok(len),
            Ok(FillStatus::EndOfPage) => Ok(0),
            Err(err) => Err(io::Error::new(io::ErrorKind::Other, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::{FillStatus, PageStream};
    use crate::session::memory::MemorySession;

    #[test]
    fn carries_over_partial_chunks() {
        let mut session =
            MemorySession::with_chunk_sizes(vec![vec![1, 2, 3, 4, 5]], vec![3]);
        let mut stream = PageStream::new(&mut session);
        let mut buf = [0u8; 2];
        assert_eq!(FillStatus::Filled(2), stream.fill(&mut buf).unwrap());
        assert_eq!([1, 2], buf);
        // one byte of the first chunk is still pending
        assert_eq!(FillStatus::Filled(1), stream.fill(&mut buf).unwrap());
        assert_eq!(3, buf[0]);
        assert_eq!(FillStatus::Filled(2), stream.fill(&mut buf).unwrap());
        assert_eq!([4, 5], buf);
        assert_eq!(FillStatus::EndOfPage, stream.fill(&mut buf).unwrap());
    }

    #[test]
    fn zero_capacity_is_a_noop() {
        let mut session = MemorySession::new(vec![vec![1]]);
        let mut stream = PageStream::new(&mut session);
        assert_eq!(FillStatus::Filled(0), stream.fill(&mut []).unwrap());
        let mut buf = [0u8; 1];
        assert_eq!(FillStatus::Filled(1), stream.fill(&mut buf).unwrap());
    }

    #[test]
    fn fill_all_reports_short_pages() {
        let mut session = MemorySession::new(vec![vec![9; 10]]);
        let mut stream = PageStream::new(&mut session);
        let mut buf = [0u8; 54];
        assert_eq!(10, stream.fill_all(&mut buf).unwrap());
    }

    #[test]
    fn read_remaining_is_chunking_independent() {
        let page: Vec<u8> = (0..=99).collect();
        let mut whole = MemorySession::new(vec![page.clone()]);
        let all = PageStream::new(&mut whole).read_remaining(0).unwrap();
        let mut single = MemorySession::with_chunk_sizes(vec![page.clone()], vec![1]);
        let bytewise = PageStream::new(&mut single).read_remaining(0).unwrap();
        assert_eq!(page, all);
        assert_eq!(page, bytewise);
    }

    #[test]
    fn io_read_reaches_eof_at_page_end() {
        let mut session = MemorySession::with_chunk_sizes(vec![vec![7; 13]], vec![5]);
        let mut stream = PageStream::new(&mut session);
        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();
        assert_eq!(vec![7; 13], out);
    }
}
