//! # Packed monochrome pages

use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};
use log::debug;

use crate::bmp::BmpHeader;

use super::{pad4, storage_row, PixelAccess};

/// Palette used when the stream carries none: index 0 is black, 1 is white
pub const BLACK_WHITE: [Rgba<u8>; 2] = [Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 255])];

/// A 1-bit-per-pixel page
///
/// Each scan line packs eight pixels per byte, most significant bit
/// leftmost, and is padded to a multiple of four bytes. Pixels are looked
/// up on demand; nothing is copied or expanded.
#[derive(Debug)]
pub struct MonoView {
    header: BmpHeader,
    data: Vec<u8>,
    scan_line: usize,
    palette: [Rgba<u8>; 2],
}

impl MonoView {
    /// Wrap raw pixel data in a view
    ///
    /// `palette` holds the BGRA quads that followed the header, possibly
    /// empty. Its first two entries become the pixel colors; scanners
    /// usually omit it or write black and white, which is also the
    /// fallback when fewer than two entries are present.
    pub fn new(header: BmpHeader, data: Vec<u8>, palette: &[u8]) -> Self {
        let scan_line = pad4((header.width + 7) / 8) as usize;
        debug!("monochrome page with {} byte scan lines", scan_line);
        MonoView {
            scan_line,
            palette: two_color_palette(palette).unwrap_or(BLACK_WHITE),
            header,
            data,
        }
    }

    /// The palette the view resolves pixels with
    pub fn palette(&self) -> &[Rgba<u8>; 2] {
        &self.palette
    }

    /// Bytes per stored scan line, padding included
    pub fn scan_line(&self) -> usize {
        self.scan_line
    }

    /// Palette index (0 or 1) of the pixel at `(x, y)`
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.header.width && y < self.header.rows());
        let offset = storage_row(self.header.height, y) * self.scan_line + (x / 8) as usize;
        let bit = 7 - (x % 8);
        (self.data[offset] >> bit) & 1
    }

    /// Expand into an owned `image` buffer
    ///
    /// Produces a grayscale buffer when both palette entries are gray,
    /// which they are for every scanner seen so far.
    pub fn to_image(&self) -> DynamicImage {
        let (width, height) = self.dimensions();
        let gray = self.palette.iter().all(|c| c.0[0] == c.0[1] && c.0[1] == c.0[2]);
        if gray {
            DynamicImage::ImageLuma8(GrayImage::from_fn(width, height, |x, y| {
                Luma([self.palette[self.index_at(x, y) as usize].0[0]])
            }))
        } else {
            DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
                self.color_at(x, y)
            }))
        }
    }
}

impl PixelAccess for MonoView {
    fn dimensions(&self) -> (u32, u32) {
        (self.header.width, self.header.rows())
    }

    fn color_at(&self, x: u32, y: u32) -> Rgba<u8> {
        self.palette[self.index_at(x, y) as usize]
    }
}

/// First two BGRA quads of a stream palette, if there are at least two
fn two_color_palette(raw: &[u8]) -> Option<[Rgba<u8>; 2]> {
    if raw.len() < 8 {
        return None;
    }
    let entry = |i: usize| Rgba([raw[i * 4 + 2], raw[i * 4 + 1], raw[i * 4], 255]);
    Some([entry(0), entry(1)])
}
