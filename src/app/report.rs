use log::{info, warn};

use crate::engine::SkippedCard;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub images_found: usize,
    pub pages_written: usize,
    pub cards_placed: usize,
    pub skipped: Vec<SkippedCard>,
}

impl GenerationReport {
    pub fn log_summary(&self) {
        info!(
            "{} card(s) placed out of {} image(s) on {} page(s)",
            self.cards_placed, self.images_found, self.pages_written
        );
        if !self.skipped.is_empty() {
            warn!("{} image(s) could not be placed", self.skipped.len());
        }
    }
}
