mod normalizer;

pub use normalizer::{
    language_code, normalize_directory, resolve, scan_candidates, target_name, Candidate,
    NormalizeReport, Resolution, SUBTITLE_EXTENSION,
};
