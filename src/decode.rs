//! HEIC/HEIF decoding.
//!
//! The converter only needs "path in, pixel buffer out", so decoding sits
//! behind [`HeifDecoder`]. [`LibHeifDecoder`] is the production backend and
//! requires the `heif` feature (on by default), which links libheif.

use crate::error::{ConvertError, Result};
use image::DynamicImage;
use std::path::Path;

/// Decode capability used by the batch converter.
pub trait HeifDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<DynamicImage>;
}

/// Decodes the primary image of a HEIF container through libheif.
#[derive(Debug, Default, Clone, Copy)]
pub struct LibHeifDecoder;

impl LibHeifDecoder {
    pub fn new() -> Self {
        LibHeifDecoder
    }
}

#[cfg(feature = "heif")]
impl HeifDecoder for LibHeifDecoder {
    fn decode(&self, path: &Path) -> Result<DynamicImage> {
        use image::{RgbImage, RgbaImage};
        use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

        let data = std::fs::read(path)?;

        let lib_heif = LibHeif::new();
        let ctx = HeifContext::read_from_bytes(&data).map_err(|e| ConvertError::decode(path, e))?;
        let handle = ctx
            .primary_image_handle()
            .map_err(|e| ConvertError::decode(path, e))?;

        let has_alpha = handle.has_alpha_channel();
        let chroma = if has_alpha {
            RgbChroma::Rgba
        } else {
            RgbChroma::Rgb
        };
        let image = lib_heif
            .decode(&handle, ColorSpace::Rgb(chroma), None)
            .map_err(|e| ConvertError::decode(path, e))?;

        let planes = image.planes();
        let plane = planes
            .interleaved
            .ok_or_else(|| ConvertError::decode(path, "decoder returned no interleaved plane"))?;

        let (width, height) = (plane.width, plane.height);
        let channels = if has_alpha { 4 } else { 3 };
        let pixels = pack_rows(plane.data, plane.stride, width, height, channels)
            .ok_or_else(|| ConvertError::decode(path, "pixel plane shorter than its dimensions"))?;

        log::debug!(
            "Decoded {} ({}x{}, alpha: {})",
            path.display(),
            width,
            height,
            has_alpha
        );

        let img = if has_alpha {
            RgbaImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8)
        } else {
            RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8)
        };
        img.ok_or_else(|| ConvertError::decode(path, "pixel buffer does not match dimensions"))
    }
}

#[cfg(not(feature = "heif"))]
impl HeifDecoder for LibHeifDecoder {
    fn decode(&self, path: &Path) -> Result<DynamicImage> {
        Err(ConvertError::decode(
            path,
            "built without HEIF support (enable the `heif` feature)",
        ))
    }
}

/// Copies `height` rows of `width * channels` bytes out of a strided plane.
#[cfg_attr(not(feature = "heif"), allow(dead_code))]
fn pack_rows(data: &[u8], stride: usize, width: u32, height: u32, channels: usize) -> Option<Vec<u8>> {
    let row_len = width as usize * channels;
    let height = height as usize;
    if height == 0 {
        return Some(Vec::new());
    }
    if stride == 0 || stride < row_len || data.len() < stride * (height - 1) + row_len {
        return None;
    }

    let mut pixels = Vec::with_capacity(row_len * height);
    for row in data.chunks(stride).take(height) {
        pixels.extend_from_slice(&row[..row_len]);
    }
    Some(pixels)
}
