use crate::error::{ConvertError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Validate that the source path exists, is a directory and can be listed
pub fn validate_source_dir(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(ConvertError::InvalidSource(path.to_path_buf()));
    }

    fs::read_dir(path).map_err(|e| {
        log::debug!("Cannot list {}: {}", path.display(), e);
        ConvertError::InvalidSource(path.to_path_buf())
    })?;

    path.canonicalize()
        .map_err(|_| ConvertError::InvalidSource(path.to_path_buf()))
}

/// Create the output directory (and its parents) if it doesn't exist
pub fn prepare_output_dir(path: &Path) -> Result<PathBuf> {
    if path.exists() && !path.is_dir() {
        return Err(ConvertError::DirectoryCreationFailed(path.to_path_buf()));
    }

    fs::create_dir_all(path).map_err(|_| ConvertError::DirectoryCreationFailed(path.to_path_buf()))?;

    path.canonicalize()
        .map_err(|_| ConvertError::DirectoryCreationFailed(path.to_path_buf()))
}
