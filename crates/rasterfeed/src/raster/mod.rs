//! # Raster views over decoded pages
//!
//! The native decoders do not expand pixel data; they keep the raw scan
//! lines and compute pixel addresses on demand. [`PageImage`] is what a
//! decode produces, ready for the output encoder.

pub mod gray;
pub mod mono;

use image::{DynamicImage, GenericImageView, Rgba};

pub use gray::GrayView;
pub use mono::MonoView;

/// Round `n` up to the next multiple of four
///
/// Every scan line is padded so its byte length is a multiple of four.
pub(crate) fn pad4(n: u32) -> u32 {
    (n + 3) & !3
}

/// Map a visual row to its storage row
///
/// Positive heights store rows bottom-up, so visual row 0 is the last
/// storage row; negative heights store top-down.
pub(crate) fn storage_row(height: i32, y: u32) -> usize {
    if height > 0 {
        (height as u32 - 1 - y) as usize
    } else {
        y as usize
    }
}

/// Random access to the pixels of a decoded page
pub trait PixelAccess {
    /// Width and height in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Color of the pixel at `(x, y)`
    ///
    /// Only defined within [`dimensions`](Self::dimensions); out-of-bounds
    /// coordinates are a caller bug and panic.
    fn color_at(&self, x: u32, y: u32) -> Rgba<u8>;
}

/// One fully decoded page
#[derive(Debug)]
pub enum PageImage {
    /// 1 bit per pixel with a two-color palette
    Monochrome(MonoView),
    /// 8 bits per pixel grayscale
    Gray(GrayView),
    /// Any other depth or compression, handled by the generic decoder
    Decoded(DynamicImage),
}

impl PageImage {
    /// Convert into an owned `image` buffer for the output encoder
    pub fn to_dynamic(&self) -> DynamicImage {
        match self {
            PageImage::Monochrome(view) => view.to_image(),
            PageImage::Gray(view) => DynamicImage::ImageLuma8(view.to_image()),
            PageImage::Decoded(image) => image.clone(),
        }
    }
}

impl PixelAccess for PageImage {
    fn dimensions(&self) -> (u32, u32) {
        match self {
            PageImage::Monochrome(view) => view.dimensions(),
            PageImage::Gray(view) => view.dimensions(),
            PageImage::Decoded(image) => image.dimensions(),
        }
    }

    fn color_at(&self, x: u32, y: u32) -> Rgba<u8> {
        match self {
            PageImage::Monochrome(view) => view.color_at(x, y),
            PageImage::Gray(view) => view.color_at(x, y),
            PageImage::Decoded(image) => image.get_pixel(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pad4;

    #[test]
    fn scan_lines_align_to_four_bytes() {
        for n in 0..64 {
            let padded = pad4(n);
            assert_eq!(0, padded % 4);
            assert!(padded >= n);
            assert!(padded < n + 4);
        }
    }
}
