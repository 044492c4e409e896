//! # File-backed scan sessions
//!
//! Replays recorded page streams from disk, one file per page, reading in
//! driver-sized chunks. This is the stand-in for a hardware backend and is
//! what the command line tool scans from.

use std::collections::VecDeque;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use log::debug;

use super::{ScanSession, SessionError};

struct PageFile {
    file: File,
    remaining: u64,
}

/// A session that serves each input file as one page of the feed
pub struct FileSession {
    queue: VecDeque<PathBuf>,
    current: Option<PageFile>,
    cancelled: bool,
}

impl FileSession {
    /// A feed over the given page files, in order
    pub fn new(paths: Vec<PathBuf>) -> Self {
        FileSession {
            queue: paths.into_iter().collect(),
            current: None,
            cancelled: false,
        }
    }

    fn open_next(&mut self) -> Result<(), SessionError> {
        let path = match self.queue.pop_front() {
            Some(path) => path,
            None => return Ok(()),
        };
        let file = File::open(&path)
            .map_err(|err| SessionError::new(format!("{}: {}", path.display(), err)))?;
        let remaining = file
            .metadata()
            .map_err(|err| SessionError::new(format!("{}: {}", path.display(), err)))?
            .len();
        debug!("page stream '{}' opened, {} bytes", path.display(), remaining);
        self.current = Some(PageFile { file, remaining });
        Ok(())
    }
}

impl ScanSession for FileSession {
    fn read_chunk(&mut self, max_len: usize) -> Result<Vec<u8>, SessionError> {
        if self.cancelled {
            return Err(SessionError::new("scan session cancelled"));
        }
        if self.current.is_none() {
            self.open_next()?;
        }
        let page = match self.current.as_mut() {
            Some(page) => page,
            None => return Ok(Vec::new()),
        };
        let len = (page.remaining as usize).min(max_len);
        let mut chunk = vec![0; len];
        let mut done = 0;
        while done < len {
            let n = page
                .file
                .read(&mut chunk[done..])
                .map_err(|err| SessionError::new(err.to_string()))?;
            if n == 0 {
                break;
            }
            done += n;
        }
        chunk.truncate(done);
        page.remaining -= done as u64;
        Ok(chunk)
    }

    fn end_of_page(&mut self) -> bool {
        match &self.current {
            Some(page) if page.remaining > 0 => false,
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
                .map_or(true, |page| page.remaining == 0)
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }
}
