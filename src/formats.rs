//! Target format handling and source-file recognition
//!
//! `jpeg` and `jpg` both encode JPEG but keep their own spelling as the
//! output extension, so `photo.heic` converted with `jpeg` becomes
//! `photo.jpeg`.
use crate::constants::SUPPORTED_SOURCE_EXTENSIONS;
use crate::error::{ConvertError, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Supported output image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    /// JPEG written with a `.jpeg` extension
    Jpeg,
    /// JPEG written with a `.jpg` extension
    Jpg,
    /// Lossless PNG
    Png,
}

impl TargetFormat {
    /// Returns the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::Jpg => "jpg",
            TargetFormat::Png => "png",
        }
    }

    /// JPEG has no alpha channel.
    pub fn supports_transparency(&self) -> bool {
        matches!(self, TargetFormat::Png)
    }

    pub fn all_formats() -> [TargetFormat; 3] {
        [TargetFormat::Jpeg, TargetFormat::Jpg, TargetFormat::Png]
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TargetFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jpeg" => Ok(TargetFormat::Jpeg),
            "jpg" => Ok(TargetFormat::Jpg),
            "png" => Ok(TargetFormat::Png),
            _ => Err(ConvertError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Check whether a path carries a HEIC/HEIF extension (case-insensitive)
pub fn is_heif_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_SOURCE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}
