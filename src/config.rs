use crate::constants::{DEFAULT_JPEG_QUALITY, DEFAULT_OUTPUT_DIR, MAX_QUALITY, MIN_QUALITY};
use crate::error::{ConvertError, Result};
use crate::formats::TargetFormat;
use std::path::PathBuf;

/// Validated configuration for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub source: PathBuf,
    pub target: TargetFormat,
    pub output_dir: PathBuf,
    /// JPEG quality, ignored for PNG
    pub quality: u8,
    /// Run PNG output through oxipng
    pub optimize_png: bool,
    /// Worker threads; `None` uses one per CPU
    pub jobs: Option<usize>,
    pub show_progress: bool,
}

impl ConvertOptions {
    pub fn new(
        source: impl Into<PathBuf>,
        target: TargetFormat,
        output_dir: Option<PathBuf>,
        quality: Option<u8>,
    ) -> Result<Self> {
        let quality = quality.unwrap_or(DEFAULT_JPEG_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(ConvertError::InvalidQuality(quality));
        }

        Ok(Self {
            source: source.into(),
            target,
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            quality,
            optimize_png: false,
            jobs: None,
            show_progress: true,
        })
    }

    pub fn with_optimize_png(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    /// `Some(0)` is treated as "auto".
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs.filter(|&n| n > 0);
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Number of worker threads this run will use.
    pub fn worker_count(&self) -> usize {
        self.jobs.unwrap_or_else(num_cpus::get).max(1)
    }
}
