//! # Grayscale pages

use image::{GrayImage, Luma, Rgba};

use crate::bmp::BmpHeader;

use super::{pad4, storage_row, PixelAccess};

/// An 8-bit-per-pixel page
///
/// One byte per pixel, the byte is the intensity directly; there is no
/// palette indirection. Scan lines are padded to a multiple of four bytes.
#[derive(Debug)]
pub struct GrayView {
    header: BmpHeader,
    data: Vec<u8>,
    scan_line: usize,
}

impl GrayView {
    /// Wrap raw pixel data in a view
    pub fn new(header: BmpHeader, data: Vec<u8>) -> Self {
        GrayView {
            scan_line: pad4(header.width) as usize,
            header,
            data,
        }
    }

    /// Bytes per stored scan line, padding included
    pub fn scan_line(&self) -> usize {
        self.scan_line
    }

    /// Intensity of the pixel at `(x, y)`
    pub fn luma_at(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.header.width && y < self.header.rows());
        self.data[storage_row(self.header.height, y) * self.scan_line + x as usize]
    }

    /// Expand into an owned grayscale buffer
    pub fn to_image(&self) -> GrayImage {
        let (width, height) = self.dimensions();
        GrayImage::from_fn(width, height, |x, y| Luma([self.luma_at(x, y)]))
    }
}

impl PixelAccess for GrayView {
    fn dimensions(&self) -> (u32, u32) {
        (self.header.width, self.header.rows())
    }

    fn color_at(&self, x: u32, y: u32) -> Rgba<u8> {
        let luma = self.luma_at(x, y);
        Rgba([luma, luma, luma, 255])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: u32, height: i32) -> BmpHeader {
        BmpHeader {
            magic: crate::bmp::BMP_MAGIC,
            file_size: 0,
            reserved: 0,
            offset_to_data: 54,
            header_size: 40,
            width,
            height,
            color_planes: 1,
            bits_per_pixel: 8,
            compression: 0,
            pixel_data_size: 0,
            horizontal_resolution: 0,
            vertical_resolution: 0,
            colors_in_palette: 0,
            important_colors: 0,
        }
    }

    #[test]
    fn bytes_are_intensities() {
        // 3 pixels wide, padded to 4 bytes per scan line
        let data = vec![10, 20, 30, 0, 40, 50, 60, 0];
        let view = GrayView::new(header(3, -2), data);
        assert_eq!(4, view.scan_line());
        assert_eq!(10, view.luma_at(0, 0));
        assert_eq!(60, view.luma_at(2, 1));
        assert_eq!(Rgba([20, 20, 20, 255]), view.color_at(1, 0));
    }

    #[test]
    fn height_sign_mirrors_rows() {
        let data = vec![10, 20, 30, 0, 40, 50, 60, 0];
        let top_down = GrayView::new(header(3, -2), data.clone());
        let bottom_up = GrayView::new(header(3, 2), data);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(top_down.luma_at(x, y), bottom_up.luma_at(x, 1 - y));
            }
        }
    }
}
