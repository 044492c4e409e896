#![warn(missing_docs)]
//! # Scanner page-feed decoding
//!
//! This crate turns the raw byte chunks a scanner driver delivers during a
//! scan job into addressable pixel images, one page at a time, without
//! buffering a whole page before the header can be examined.
//!
//! The driver side is abstracted by [`session::ScanSession`], which hands out
//! chunks whose size the hardware chooses. [`stream::PageStream`] reconciles
//! that with the exact byte counts the decoder needs. Each page arrives as an
//! uncompressed Windows bitmap; 1-bit and 8-bit pages are decoded natively
//! into lazy pixel views, everything else is re-presented to the generic
//! decoder from the `image` crate.
//!
//! Attempting to decode a page from a finished feed reports a truncated
//! header rather than a panic:
//!
//! ```
//! use rasterfeed::{decode_page, DecodeError, DecodeOptions};
//! use rasterfeed::session::memory::MemorySession;
//!
//! let mut session = MemorySession::new(vec![]);
//! let err = decode_page(&mut session, &DecodeOptions::default()).unwrap_err();
//! assert!(matches!(err, DecodeError::TruncatedHeader));
//! ```

pub mod bmp;
pub mod decode;
pub mod encode;
pub mod raster;
pub mod session;
pub mod stream;

pub use decode::{decode_page, DecodeError, DecodeOptions};
pub use raster::{PageImage, PixelAccess};
pub use session::{ScanSession, SessionError};
pub use stream::{FillStatus, PageStream};
