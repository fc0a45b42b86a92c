pub mod app;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod infra;
pub mod layout;
pub mod render;
pub mod subtitles;

pub use app::{GenerationReport, SheetController};
pub use error::{SheetError, SubtitleError};
pub use infra::config::{GenerateOptions, NormalizerConfig, SheetConfig};
