use crate::config::ConvertOptions;
use crate::constants::OXIPNG_PRESET;
use crate::error::{ConvertError, Result};
use crate::formats::TargetFormat;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::DynamicImage;
use oxipng::Options;
use std::borrow::Cow;
use std::path::Path;

/// Encodes a decoded image into the bytes of the configured target format.
///
/// `source` is only used to attribute errors to the file being converted.
/// JPEG output is flattened to RGB since JPEG has no alpha channel; PNG
/// keeps alpha when the decoded image has it.
pub fn encode_image(img: &DynamicImage, options: &ConvertOptions, source: &Path) -> Result<Vec<u8>> {
    let keep_alpha = options.target.supports_transparency() && img.color().has_alpha();
    let pixels = to_rgb8_family(img, keep_alpha);

    let mut buffer = Vec::new();
    match options.target {
        TargetFormat::Jpeg | TargetFormat::Jpg => {
            let encoder = JpegEncoder::new_with_quality(&mut buffer, options.quality);
            pixels
                .write_with_encoder(encoder)
                .map_err(|e| ConvertError::encode(source, e))?;
        }
        TargetFormat::Png => {
            pixels
                .write_with_encoder(PngEncoder::new(&mut buffer))
                .map_err(|e| ConvertError::encode(source, e))?;

            if options.optimize_png {
                buffer = optimize_png(&buffer, source)?;
            }
        }
    }

    Ok(buffer)
}

/// Losslessly recompresses an encoded PNG.
pub fn optimize_png(png: &[u8], source: &Path) -> Result<Vec<u8>> {
    let oxipng_options = Options::from_preset(OXIPNG_PRESET);
    let optimized = oxipng::optimize_from_memory(png, &oxipng_options)
        .map_err(|e| ConvertError::encode(source, format!("PNG optimization failed: {}", e)))?;

    log::debug!(
        "oxipng: {} -> {} bytes for {}",
        png.len(),
        optimized.len(),
        source.display()
    );
    Ok(optimized)
}

fn to_rgb8_family(img: &DynamicImage, keep_alpha: bool) -> Cow<'_, DynamicImage> {
    match (img, keep_alpha) {
        (DynamicImage::ImageRgba8(_), true) | (DynamicImage::ImageRgb8(_), false) => {
            Cow::Borrowed(img)
        }
        (_, true) => Cow::Owned(DynamicImage::ImageRgba8(img.to_rgba8())),
        (_, false) => Cow::Owned(DynamicImage::ImageRgb8(img.to_rgb8())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, GenericImageView, ImageFormat, Rgba, RgbaImage};

    fn options(target: TargetFormat) -> ConvertOptions {
        ConvertOptions::new("src", target, None, None).unwrap()
    }

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7) as u8, (y * 13) as u8, ((x + y) * 3) as u8, 200])
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_png_keeps_alpha_and_pixels() {
        let img = gradient(16, 9);
        let bytes = encode_image(&img, &options(TargetFormat::Png), Path::new("a.heic")).unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgba8);
        assert_eq!(decoded.to_rgba8(), img.to_rgba8());
    }

    #[test]
    fn test_png_without_alpha_is_rgb() {
        let img = DynamicImage::new_rgb8(8, 4);
        let bytes = encode_image(&img, &options(TargetFormat::Png), Path::new("a.heic")).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgb8);
    }

    #[test]
    fn test_jpeg_drops_alpha() {
        let img = gradient(32, 24);
        for target in [TargetFormat::Jpeg, TargetFormat::Jpg] {
            let bytes = encode_image(&img, &options(target), Path::new("a.heic")).unwrap();
            assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);

            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!(decoded.dimensions(), (32, 24));
            assert!(!decoded.color().has_alpha());
        }
    }

    #[test]
    fn test_jpeg_quality_affects_size() {
        let img = gradient(64, 64);
        let low = ConvertOptions::new("src", TargetFormat::Jpg, None, Some(10)).unwrap();
        let high = ConvertOptions::new("src", TargetFormat::Jpg, None, Some(100)).unwrap();

        let low_bytes = encode_image(&img, &low, Path::new("a.heic")).unwrap();
        let high_bytes = encode_image(&img, &high, Path::new("a.heic")).unwrap();
        assert!(low_bytes.len() < high_bytes.len());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let img = gradient(20, 20);
        for target in TargetFormat::all_formats() {
            let opts = options(target);
            let first = encode_image(&img, &opts, Path::new("a.heic")).unwrap();
            let second = encode_image(&img, &opts, Path::new("a.heic")).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_optimized_png_is_lossless() {
        let img = gradient(24, 24);
        let opts = options(TargetFormat::Png).with_optimize_png(true);
        let bytes = encode_image(&img, &opts, Path::new("a.heic")).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.to_rgba8(), img.to_rgba8());
    }

    #[test]
    fn test_optimize_png_rejects_garbage() {
        let result = optimize_png(b"not a png", Path::new("a.heic"));
        assert!(matches!(result, Err(ConvertError::Encode { .. })));
    }
}
