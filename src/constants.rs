pub const DEFAULT_OUTPUT_DIR: &str = "./converted_images";

pub const DEFAULT_JPEG_QUALITY: u8 = 75;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Source extensions, compared lowercase.
pub const SUPPORTED_SOURCE_EXTENSIONS: &[&str] = &["heic", "heif"];

/// oxipng preset used by `--optimize`; 2 is oxipng's own default.
pub const OXIPNG_PRESET: u8 = 2;

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{prefix} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} images {msg}";
pub const PROGRESS_BAR_PREFIX: &str = "Progress:";

// Common output message prefixes
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️";
pub const ERROR_PREFIX: &str = "❌";
pub const INFO_PREFIX: &str = "📋";
