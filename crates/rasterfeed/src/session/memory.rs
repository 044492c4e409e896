//! # In-memory scan sessions

use std::collections::VecDeque;

use super::{ScanSession, SessionError};

struct Page {
    data: Vec<u8>,
    pos: usize,
}

/// A scripted in-memory session, one byte buffer per page
///
/// Chunk sizes can be scripted to simulate arbitrary fragmentation of the
/// same byte sequence by the driver.
pub struct MemorySession {
    queue: VecDeque<Vec<u8>>,
    current: Option<Page>,
    chunk_script: Vec<usize>,
    next_chunk: usize,
    cancelled: bool,
}

impl MemorySession {
    /// A session that delivers each buffer as one page
    pub fn new(pages: Vec<Vec<u8>>) -> Self {
        MemorySession {
            queue: pages.into_iter().collect(),
            current: None,
            chunk_script: Vec::new(),
            next_chunk: 0,
            cancelled: false,
        }
    }

    /// A session whose chunk sizes cycle through `sizes`
    ///
    /// Each pull hands out at most the next scripted size, so `vec![1]`
    /// fragments every page into single bytes.
    pub fn with_chunk_sizes(pages: Vec<Vec<u8>>, sizes: Vec<usize>) -> Self {
        let mut session = Self::new(pages);
        session.chunk_script = sizes;
        session
    }

    fn scripted_len(&mut self, max_len: usize) -> usize {
        if self.chunk_script.is_empty() {
            return max_len;
        }
        let len = self.chunk_script[self.next_chunk % self.chunk_script.len()];
        self.next_chunk += 1;
        max_len.min(len)
    }
}

impl ScanSession for MemorySession {
    fn read_chunk(&mut self, max_len: usize) -> Result<Vec<u8>, SessionError> {
        if self.cancelled {
            return Err(SessionError::new("scan session cancelled"));
        }
        if self.current.is_none() {
            self.current = self.queue.pop_front().map(|data| Page { data, pos: 0 });
        }
        let scripted = self.scripted_len(max_len);
        let page = match self.current.as_mut() {
            Some(page) => page,
            None => return Ok(Vec::new()),
        };
        let rest = page.data.len() - page.pos;
        let len = scripted.min(rest);
        let chunk = page.data[page.pos..page.pos + len].to_vec();
        page.pos += len;
        Ok(chunk)
    }

    fn end_of_page(&mut self) -> bool {
        match &self.current {
            Some(page) if page.pos < page.data.len() => false,
            // page boundary: report it once and arm the next page
            Some(_) => {
                self.current = None;
                true
            }
            None => self.queue.is_empty(),
        }
    }

    fn end_of_feed(&mut self) -> bool {
        if self.cancelled {
            return true;
        }
        self.queue.is_empty()
            && self
                .current
                .as_ref()
                .map_or(true, |page| page.pos == page.data.len())
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }
}
