use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::error::SheetError;
use crate::infra::config::SUPPORTED_EXTENSIONS;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageScan {
    pub scanned_files: usize,
    pub files: Vec<PathBuf>,
}

/// Walks `source_dir` recursively and returns the supported images sorted by path.
pub fn find_image_files(source_dir: &Path) -> Result<ImageScan, SheetError> {
    if !source_dir.exists() {
        return Err(SheetError::NotFound(source_dir.display().to_string()));
    }
    if !source_dir.is_dir() {
        return Err(SheetError::NotADirectory(source_dir.display().to_string()));
    }

    let mut scan = ImageScan::default();

    for entry in WalkDir::new(source_dir).into_iter().filter_map(Result::ok) {
        // Follows file links; linked directories are not descended into.
        if !entry.path().is_file() {
            continue;
        }

        scan.scanned_files += 1;
        let file_path = entry.path();
        if !is_supported_image(file_path) {
            debug!("ignoring {}", file_path.display());
            continue;
        }

        scan.files.push(file_path.to_path_buf());
    }

    scan.files.sort();
    info!(
        "found {} image file(s) in '{}' ({} files scanned)",
        scan.files.len(),
        source_dir.display(),
        scan.scanned_files
    );
    Ok(scan)
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
