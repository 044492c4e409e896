//! # Page output encoding
//!
//! The decode side of the crate stops at [`PageImage`]; this module writes
//! one out as a PNG or JPEG file.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;

use displaydoc::Display;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageError};
use log::info;
use thiserror::Error;

use crate::raster::PageImage;

/// JPEG quality for scanned pages
const JPEG_QUALITY: u8 = 50;

/// File format for an encoded page
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG at a quality suited to scanned documents
    Jpeg,
}

impl OutputFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

/// Failed to parse an output format name
#[derive(Debug, PartialEq, Eq)]
pub struct OutputFormatError;

impl fmt::Display for OutputFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "use one of `png`, `jpg`")
    }
}

impl std::error::Error for OutputFormatError {}

impl FromStr for OutputFormat {
    type Err = OutputFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            _ => Err(OutputFormatError),
        }
    }
}

/// Why a page could not be written out
#[derive(Debug, Display, Error)]
pub enum EncodeError {
    /// could not write the output file: {0}
    Io(#[from] std::io::Error),
    /// image encoding failed: {0}
    Image(#[from] ImageError),
}

/// Encode a decoded page into the file at `path`
pub fn write_page(page: &PageImage, path: &Path, format: OutputFormat) -> Result<(), EncodeError> {
    let image = page.to_dynamic();
    let writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Png => image.write_with_encoder(PngEncoder::new(writer))?,
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(writer, JPEG_QUALITY);
            // JPEG has no alpha channel
            match image {
                DynamicImage::ImageLuma8(gray) => gray.write_with_encoder(encoder)?,
                other => other.to_rgb8().write_with_encoder(encoder)?,
            }
        }
    }
    info!("saved page as '{}'", path.display());
    Ok(())
}
