use crate::config::ConvertOptions;
use crate::constants::{INFO_PREFIX, SUCCESS_PREFIX, WARNING_PREFIX};
use crate::decode::HeifDecoder;
use crate::encode::encode_image;
use crate::error::{ConvertError, Result};
use crate::formats::{is_heif_file, TargetFormat};
use crate::utils::{create_progress_bar, display_name, format_file_size};
use crate::validation::{prepare_output_dir, validate_source_dir};
use crate::{failure, status};
use image::GenericImageView;
use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// One file that could not be converted.
#[derive(Debug)]
pub struct FileFailure {
    pub input: PathBuf,
    pub error: ConvertError,
}

/// Outcome of a batch run, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Paths of the files written to the output directory
    pub converted: Vec<PathBuf>,
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    pub fn converted_count(&self) -> usize {
        self.converted.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Every eligible file failed. An empty batch is not a failure.
    pub fn is_total_failure(&self) -> bool {
        self.converted.is_empty() && !self.failed.is_empty()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Converted {}, failed {}",
            self.converted_count(),
            self.failed_count()
        )
    }
}

/// Converts every HEIC/HEIF file directly inside `options.source`.
///
/// Fatal problems (missing source, unusable output directory, unreadable
/// listing) are returned as `Err` before any file is touched. Per-file
/// failures are collected in the report and never stop the other files.
pub fn convert_batch(options: &ConvertOptions, decoder: &dyn HeifDecoder) -> Result<BatchReport> {
    let source = validate_source_dir(&options.source)?;
    let output_dir = prepare_output_dir(&options.output_dir)?;

    let image_files = collect_heif_files(&source)?;
    let total_files = image_files.len();

    status!("Found {} images.", total_files);
    if total_files == 0 {
        status!("{}  No HEIC/HEIF files found in {}", WARNING_PREFIX, source.display());
        return Ok(BatchReport::default());
    }

    let workers = options.worker_count().min(total_files);
    log::debug!(
        "Converting {} files to {} with {} worker(s) into {}",
        total_files,
        options.target,
        workers,
        output_dir.display()
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| ConvertError::Io(std::io::Error::other(e)))?;

    let show_progress = options.show_progress && !crate::logger::is_quiet();
    let progress = create_progress_bar(total_files as u64, show_progress);
    let start_time = Instant::now();

    let claimed_by = find_output_collisions(&image_files, &output_dir, options.target);

    let results: Vec<Result<PathBuf>> = pool.install(|| {
        image_files
            .par_iter()
            .zip(claimed_by.par_iter())
            .map(|(input_path, first)| {
                let result = match first {
                    Some(first) => Err(ConvertError::OutputCollision {
                        path: input_path.clone(),
                        first: first.clone(),
                    }),
                    None => convert_file(input_path, &output_dir, options, decoder),
                };
                if let Err(e) = &result {
                    log::debug!("Skipping {}: {}", input_path.display(), e);
                }
                progress.inc(1);
                result
            })
            .collect()
    });

    progress.finish_and_clear();

    let mut report = BatchReport::default();
    for (input, result) in image_files.into_iter().zip(results) {
        match result {
            Ok(output) => report.converted.push(output),
            Err(error) => report.failed.push(FileFailure { input, error }),
        }
    }

    log::info!(
        "Batch finished in {:.2?}: {} converted, {} failed",
        start_time.elapsed(),
        report.converted_count(),
        report.failed_count()
    );

    Ok(report)
}

/// Lists the HEIC/HEIF files directly inside `source`, sorted by file name.
///
/// Subdirectories are not descended into. Dotfiles are eligible like any
/// other file.
pub fn collect_heif_files(source: &Path) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();

    let walker = WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_heif_file(path) {
            image_files.push(path.to_path_buf());
        }
    }

    Ok(image_files)
}

/// For each input, the earlier input that already maps to the same output
/// file, if any. Only the first input in listing order gets to write it.
fn find_output_collisions(
    image_files: &[PathBuf],
    output_dir: &Path,
    format: TargetFormat,
) -> Vec<Option<PathBuf>> {
    let mut owners: HashMap<PathBuf, &PathBuf> = HashMap::new();

    image_files
        .iter()
        .map(|input| {
            let output = generate_output_path(input, output_dir, format).ok()?;
            match owners.get(&output) {
                Some(first) => {
                    log::warn!(
                        "{} and {} both map to {}; skipping the second",
                        display_name(first),
                        display_name(input),
                        output.display()
                    );
                    Some((*first).clone())
                }
                None => {
                    owners.insert(output, input);
                    None
                }
            }
        })
        .collect()
}

/// `<output_dir>/<stem>.<ext>` for a source file
pub fn generate_output_path(
    input_path: &Path,
    output_dir: &Path,
    format: TargetFormat,
) -> Result<PathBuf> {
    let file_stem = input_path
        .file_stem()
        .ok_or_else(|| ConvertError::decode(input_path, "invalid file name"))?;

    let output_filename = format!("{}.{}", file_stem.to_string_lossy(), format.extension());
    Ok(output_dir.join(output_filename))
}

/// Decode, encode and write a single file.
pub fn convert_file(
    input_path: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
    decoder: &dyn HeifDecoder,
) -> Result<PathBuf> {
    let output_path = generate_output_path(input_path, output_dir, options.target)?;

    let img = decoder.decode(input_path)?;
    let (width, height) = img.dimensions();
    let bytes = encode_image(&img, options, input_path)?;
    drop(img);

    write_atomically(&output_path, &bytes)?;

    log::debug!(
        "{} -> {} ({}x{}, {})",
        display_name(input_path),
        output_path.display(),
        width,
        height,
        format_file_size(bytes.len() as u64)
    );

    Ok(output_path)
}

/// Writes through a temp file in the same directory, then renames over
/// `path`, so a failed write never leaves a truncated output behind.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Prints failures and the final summary.
pub fn print_report(report: &BatchReport, output_dir: &Path) {
    if !report.failed.is_empty() {
        eprintln!("\n{} Failed files:", WARNING_PREFIX);
        for failure in &report.failed {
            failure!("{}: {}", display_name(&failure.input), failure.error);
        }
    }

    if report.converted_count() > 0 {
        status!(
            "{} Converted images written to {}",
            SUCCESS_PREFIX,
            output_dir.display()
        );
    }
    println!("{} {}", INFO_PREFIX, report.summary_line());
}
