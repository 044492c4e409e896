//! # The scanner bitmap stream format
//!
//! Scanners deliver each page as a Windows bitmap: a 14-byte file header,
//! a 40-byte version-3 info header, an optional palette, then the pixel
//! data in padded scan lines. All multi-byte fields are little-endian.

use nom::number::complete::{le_i32, le_u16, le_u32};
use nom::IResult;

/// Length of the version-2 file header
pub const FILE_HEADER_LEN: usize = 14;
/// Length of the version-3 info header
pub const INFO_HEADER_LEN: usize = 40;
/// Fixed prefix before any palette or pixel data
pub const HEADER_PREFIX_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;
/// The `header_size` value identifying a version-3 info header
pub const INFO_HEADER_V3: u32 = INFO_HEADER_LEN as u32;
/// The `BM` signature as a little-endian word
pub const BMP_MAGIC: u16 = u16::from_le_bytes(*b"BM");
/// `compression` value for uncompressed pixel data
pub const COMPRESSION_NONE: u32 = 0;

/// The header of one bitmap page, decoded once per page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmpHeader {
    /// 2-byte signature, `BM` for a well-formed stream
    pub magic: u16,
    /// Declared size of the whole stream in bytes
    pub file_size: u32,
    /// Reserved bytes, unused
    pub reserved: u32,
    /// Offset from the start of the stream to the pixel data
    pub offset_to_data: u32,
    /// Info header length; discriminates the header version
    pub header_size: u32,
    /// Width in pixels, excluding any scan-line padding
    pub width: u32,
    /// Height in pixels
    ///
    /// Positive means rows are stored bottom-up, with the origin in the
    /// lower-left corner; negative means top-down.
    pub height: i32,
    /// Number of color planes, always 1
    pub color_planes: u16,
    /// Bits per pixel
    pub bits_per_pixel: u16,
    /// Compression scheme, 0 for uncompressed
    pub compression: u32,
    /// Declared pixel data size in bytes; a hint, not guaranteed accurate
    pub pixel_data_size: u32,
    /// Horizontal resolution in pixels per meter
    pub horizontal_resolution: u32,
    /// Vertical resolution in pixels per meter
    pub vertical_resolution: u32,
    /// Number of palette entries
    pub colors_in_palette: u32,
    /// Number of important palette entries
    pub important_colors: u32,
}

impl BmpHeader {
    /// Whether the magic bytes spell `BM`
    ///
    /// Decoding does not require this by default; callers wanting strict
    /// validation check it (see `DecodeOptions::strict_magic`).
    pub fn is_bmp(&self) -> bool {
        self.magic == BMP_MAGIC
    }

    /// Number of palette bytes between the header prefix and the pixel data
    ///
    /// `None` when `offset_to_data` points inside the fixed prefix, which a
    /// version-3 stream must not do.
    pub fn palette_len(&self) -> Option<usize> {
        (self.offset_to_data as usize).checked_sub(HEADER_PREFIX_LEN)
    }

    /// Height as a row count, independent of storage order
    pub fn rows(&self) -> u32 {
        self.height.unsigned_abs()
    }
}

/// Decode the fixed 54-byte header prefix
pub fn parse_header(input: &[u8]) -> IResult<&[u8], BmpHeader> {
    let (input, magic) = le_u16(input)?;
    let (input, file_size) = le_u32(input)?;
    let (input, reserved) = le_u32(input)?;
    let (input, offset_to_data) = le_u32(input)?;
    let (input, header_size) = le_u32(input)?;
    let (input, width) = le_u32(input)?;
    let (input, height) = le_i32(input)?;
    let (input, color_planes) = le_u16(input)?;
    let (input, bits_per_pixel) = le_u16(input)?;
    let (input, compression) = le_u32(input)?;
    let (input, pixel_data_size) = le_u32(input)?;
    let (input, horizontal_resolution) = le_u32(input)?;
    let (input, vertical_resolution) = le_u32(input)?;
    let (input, colors_in_palette) = le_u32(input)?;
    let (input, important_colors) = le_u32(input)?;
    let header = BmpHeader {
        magic,
        file_size,
        reserved,
        offset_to_data,
        header_size,
        width,
        height,
        color_planes,
        bits_per_pixel,
        compression,
        pixel_data_size,
        horizontal_resolution,
        vertical_resolution,
        colors_in_palette,
        important_colors,
    };
    Ok((input, header))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix() -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_PREFIX_LEN);
        buf.extend_from_slice(b"BM");
        buf.extend_from_slice(&70u32.to_le_bytes()); // file size
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&62u32.to_le_bytes()); // data offset
        buf.extend_from_slice(&40u32.to_le_bytes()); // info header size
        buf.extend_from_slice(&4u32.to_le_bytes()); // width
        buf.extend_from_slice(&(-2i32).to_le_bytes()); // height, top-down
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // bits per pixel
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&8u32.to_le_bytes()); // pixel data size
        buf.extend_from_slice(&2835u32.to_le_bytes());
        buf.extend_from_slice(&2835u32.to_le_bytes());
        buf.extend_from_slice(&2u32.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf
    }

    #[test]
    fn parses_all_fields() {
        let buf = prefix();
        let (rest, header) = parse_header(&buf).unwrap();
        assert!(rest.is_empty());
        assert!(header.is_bmp());
        assert_eq!(INFO_HEADER_V3, header.header_size);
        assert_eq!(4, header.width);
        assert_eq!(-2, header.height);
        assert_eq!(2, header.rows());
        assert_eq!(1, header.bits_per_pixel);
        assert_eq!(Some(8), header.palette_len());
    }

    #[test]
    fn data_offset_inside_prefix_has_no_palette_len() {
        let mut buf = prefix();
        buf[10..14].copy_from_slice(&40u32.to_le_bytes());
        let (_, header) = parse_header(&buf).unwrap();
        assert_eq!(None, header.palette_len());
    }
}
