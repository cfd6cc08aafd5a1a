#![allow(dead_code)]

use heic_convert::{ConvertError, HeifDecoder, Result};
use image::{DynamicImage, ImageFormat, ImageReader, Rgba, RgbaImage};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Stand-in decoder: fixtures are PNG bytes saved under `.heic`/`.heif` names.
pub struct PngFixtureDecoder;

impl HeifDecoder for PngFixtureDecoder {
    fn decode(&self, path: &Path) -> Result<DynamicImage> {
        ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| ConvertError::decode(path, e))
    }
}

pub fn fixture_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 11) as u8, (y * 3) as u8, 90, 255])
    }))
}

pub fn write_fixture(dir: &Path, name: &str, img: &DynamicImage) -> PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, ImageFormat::Png).unwrap();
    path
}

pub fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path)
        .unwrap()
        .write_all(b"this is not a HEIF container")
        .unwrap();
    path
}

pub fn write_text(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).unwrap().write_all(b"not an image").unwrap();
    path
}

pub fn dir_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Encodes `img` as a real HEIF container, or `None` when the linked
/// libheif ships without an HEVC or AV1 encoder.
#[cfg(feature = "heif")]
pub fn encode_heif(img: &DynamicImage) -> Option<Vec<u8>> {
    use libheif_rs::{
        Channel, ColorSpace, CompressionFormat, EncoderQuality, HeifContext, Image, LibHeif,
        RgbChroma,
    };

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let row_len = width as usize * 3;

    let mut image = Image::new(width, height, ColorSpace::Rgb(RgbChroma::Rgb)).ok()?;
    image
        .create_plane(Channel::Interleaved, width, height, 8)
        .ok()?;
    {
        let planes = image.planes_mut();
        let mut plane = planes.interleaved?;
        for (y, row) in rgb.as_raw().chunks(row_len).enumerate() {
            let start = y * plane.stride;
            plane.data[start..start + row_len].copy_from_slice(row);
        }
    }

    let lib_heif = LibHeif::new();
    let mut encoder = lib_heif
        .encoder_for_format(CompressionFormat::Hevc)
        .or_else(|_| lib_heif.encoder_for_format(CompressionFormat::Av1))
        .ok()?;
    encoder.set_quality(EncoderQuality::Lossy(90)).ok()?;

    let mut context = HeifContext::new().ok()?;
    context.encode_image(&image, &mut encoder, None).ok()?;
    context.write_to_bytes().ok()
}

#[cfg(feature = "heif")]
pub fn write_heif(dir: &Path, name: &str, img: &DynamicImage) -> Option<PathBuf> {
    let bytes = encode_heif(img)?;
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    Some(path)
}
