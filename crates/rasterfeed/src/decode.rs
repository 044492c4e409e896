//! # Page decoding
//!
//! Pulls one page off a scan session and turns it into an addressable
//! image. Uncompressed 1-bit and 8-bit pages take the native path and end
//! up as lazy [`raster`](crate::raster) views; everything else is handed,
//! header included, to the generic bitmap decoder of the `image` crate.

use std::io::Cursor;

use displaydoc::Display;
use image::ImageError;
use log::debug;
use thiserror::Error;

use crate::bmp::{self, BmpHeader, COMPRESSION_NONE, HEADER_PREFIX_LEN, INFO_HEADER_V3};
use crate::raster::{GrayView, MonoView, PageImage};
use crate::session::{ScanSession, SessionError, DEFAULT_CHUNK_LEN};
use crate::stream::PageStream;

/// Decoder configuration, passed explicitly into each decode call
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Upper bound for a single driver chunk pull
    pub chunk_len: usize,
    /// Fail pages whose magic bytes are not `BM`
    ///
    /// Off by default: drivers are trusted, and the generic decoder
    /// performs its own validation on the fallback path.
    pub strict_magic: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            chunk_len: DEFAULT_CHUNK_LEN,
            strict_magic: false,
        }
    }
}

/// Why a page could not be decoded
#[derive(Debug, Display, Error)]
pub enum DecodeError {
    /// page ended before the 54-byte bitmap header was complete
    TruncatedHeader,
    /// malformed bitmap header: {0}
    MalformedHeader(String),
    /// scanner read failed: {0}
    Hardware(#[from] SessionError),
    /// generic bitmap decoder rejected the page: {0}
    Fallback(#[source] ImageError),
}

/// Read and decode the header prefix plus any palette bytes
///
/// Returns the header together with the raw bytes exactly as read, palette
/// included, because the fallback decoder needs them re-presented verbatim.
/// A page that ends inside the prefix or the palette is truncated.
pub fn read_header<S: ScanSession>(
    stream: &mut PageStream<'_, S>,
) -> Result<(BmpHeader, Vec<u8>), DecodeError> {
    let mut raw = vec![0; HEADER_PREFIX_LEN];
    if stream.fill_all(&mut raw)? < HEADER_PREFIX_LEN {
        return Err(DecodeError::TruncatedHeader);
    }
    let (_, header) =
        bmp::parse_header(&raw).map_err(|err| DecodeError::MalformedHeader(err.to_string()))?;
    debug!("header read: {:?}", header);
    if header.header_size == INFO_HEADER_V3 {
        let palette_len = header.palette_len().ok_or_else(|| {
            DecodeError::MalformedHeader(format!(
                "pixel data offset {} lies inside the header prefix",
                header.offset_to_data
            ))
        })?;
        if palette_len > 0 {
            debug!("palette detected, {} bytes", palette_len);
            let start = raw.len();
            raw.resize(start + palette_len, 0);
            if stream.fill_all(&mut raw[start..])? < palette_len {
                return Err(DecodeError::TruncatedHeader);
            }
        }
    }
    Ok((header, raw))
}

/// Decode the session's current page into an addressable image
///
/// An unsupported depth or compression never fails here; such pages go
/// through the generic decoder, so errors only originate from the stream
/// or from that decoder.
pub fn decode_page<S: ScanSession>(
    session: &mut S,
    options: &DecodeOptions,
) -> Result<PageImage, DecodeError> {
    let mut stream = PageStream::with_chunk_len(session, options.chunk_len);
    let (header, raw) = read_header(&mut stream)?;
    if options.strict_magic && !header.is_bmp() {
        return Err(DecodeError::MalformedHeader(format!(
            "magic is 0x{:04X}, not `BM`",
            header.magic
        )));
    }

    let native = header.header_size == INFO_HEADER_V3
        && matches!(header.bits_per_pixel, 1 | 8)
        && header.compression == COMPRESSION_NONE;
    if native {
        debug!("reading pixel data");
        // the declared size is only an allocation hint
        let data = stream.read_remaining(header.pixel_data_size as usize)?;
        debug!("pixel data read, {} bytes", data.len());
        let palette = &raw[HEADER_PREFIX_LEN..];
        return Ok(if header.bits_per_pixel == 1 {
            PageImage::Monochrome(MonoView::new(header, data, palette))
        } else {
            PageImage::Gray(GrayView::new(header, data))
        });
    }

    // Reassemble the prefix with the rest of the page and let the generic
    // decoder deal with compression and other bit depths.
    debug!("handing the page to the generic bitmap decoder");
    let mut full = raw;
    let rest = stream.read_remaining(header.pixel_data_size as usize)?;
    full.extend_from_slice(&rest);
    let image =
        image::load(Cursor::new(full), image::ImageFormat::Bmp).map_err(DecodeError::Fallback)?;
    Ok(PageImage::Decoded(image))
}
