use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::SubtitleError;
use crate::infra::config::NormalizerConfig;

pub const SUBTITLE_EXTENSION: &str = ".srt";
const SEPARATOR: char = '_';
const CODE_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub code: String,
    pub size: u64,
}

impl Candidate {
    pub fn target_file_name(&self) -> String {
        format!("{}{SUBTITLE_EXTENSION}", self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// No file had the target name.
    Renamed,
    /// The existing target was smaller and got replaced.
    ReplacedTarget,
    /// The existing target was at least as large; the source was deleted.
    DiscardedSource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub renamed: usize,
    pub replaced: usize,
    pub discarded: usize,
}

impl NormalizeReport {
    fn record(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Renamed => self.renamed += 1,
            Resolution::ReplacedTarget => self.replaced += 1,
            Resolution::DiscardedSource => self.discarded += 1,
        }
    }
}

/// Two characters after the first underscore, lowercased. `None` for names
/// that are not subtitle candidates.
pub fn language_code(file_name: &str) -> Option<String> {
    if !file_name.ends_with(SUBTITLE_EXTENSION) {
        return None;
    }
    let (_, rest) = file_name.split_once(SEPARATOR)?;
    let code: String = rest.chars().take(CODE_LEN).collect();
    Some(code.to_lowercase())
}

pub fn target_name(file_name: &str) -> Option<String> {
    language_code(file_name).map(|code| format!("{code}{SUBTITLE_EXTENSION}"))
}

/// Ties keep the existing target.
pub fn resolve(source_size: u64, target_size: Option<u64>) -> Resolution {
    match target_size {
        None => Resolution::Renamed,
        Some(existing) if source_size > existing => Resolution::ReplacedTarget,
        Some(_) => Resolution::DiscardedSource,
    }
}

/// Snapshot of the candidate files in `dir`, sorted by file name.
pub fn scan_candidates(dir: &Path) -> Result<Vec<Candidate>, SubtitleError> {
    let read_dir_error = |source| SubtitleError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let file_type = entry
            .file_type()
            .map_err(|error| SubtitleError::fs("inspect", entry.path(), error))?;
        if !file_type.is_file() {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            debug!("ignoring non UTF-8 file name {:?}", file_name);
            continue;
        };
        let Some(code) = language_code(name) else {
            continue;
        };

        let size = entry
            .metadata()
            .map_err(|error| SubtitleError::fs("inspect", entry.path(), error))?
            .len();
        candidates.push(Candidate {
            path: entry.path(),
            code,
            size,
        });
    }

    candidates.sort_by(|left, right| left.path.file_name().cmp(&right.path.file_name()));
    Ok(candidates)
}

pub fn normalize_directory(config: &NormalizerConfig) -> Result<NormalizeReport, SubtitleError> {
    let candidates = scan_candidates(&config.directory)?;
    info!(
        "{} subtitle file(s) to normalize in '{}'",
        candidates.len(),
        config.directory.display()
    );

    let mut report = NormalizeReport::default();
    for candidate in candidates {
        let Some(source_size) = file_size(&candidate.path)? else {
            debug!(
                "{} was removed earlier in this run, skipping",
                candidate.path.display()
            );
            continue;
        };

        let target = config.directory.join(candidate.target_file_name());
        let resolution = resolve(source_size, file_size(&target)?);
        apply(&candidate.path, &target, resolution)?;
        report.record(resolution);
    }

    info!(
        "renamed {}, replaced {}, discarded {}",
        report.renamed, report.replaced, report.discarded
    );
    Ok(report)
}

fn apply(source: &Path, target: &Path, resolution: Resolution) -> Result<(), SubtitleError> {
    match resolution {
        Resolution::Renamed => {
            info!("{} -> {}", source.display(), target.display());
            rename(source, target)
        }
        Resolution::ReplacedTarget => {
            info!(
                "{} -> {} (replacing smaller file)",
                source.display(),
                target.display()
            );
            fs::remove_file(target).map_err(|error| SubtitleError::fs("remove", target, error))?;
            rename(source, target)
        }
        Resolution::DiscardedSource => {
            info!(
                "removing {} ({} is at least as large)",
                source.display(),
                target.display()
            );
            fs::remove_file(source).map_err(|error| SubtitleError::fs("remove", source, error))
        }
    }
}

fn rename(source: &Path, target: &Path) -> Result<(), SubtitleError> {
    fs::rename(source, target).map_err(|error| SubtitleError::fs("rename", source, error))
}

/// Size of a regular file, `None` when nothing regular is at `path`.
fn file_size(path: &Path) -> Result<Option<u64>, SubtitleError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Ok(Some(metadata.len())),
        Ok(_) => Ok(None),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
        Err(error) => Err(SubtitleError::fs("inspect", path, error)),
    }
}
