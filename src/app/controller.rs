use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::app::report::GenerationReport;
use crate::catalog::find_image_files;
use crate::engine::{normalize_card, CardOutcome, SkippedCard};
use crate::error::SheetError;
use crate::infra::config::{GenerateOptions, SheetConfig};
use crate::layout::{batches, page_count, slot_for_index, GridLayout};
use crate::render::{PdfSheetWriter, SheetWriter};

pub struct SheetController {
    config: SheetConfig,
    options: GenerateOptions,
}

impl SheetController {
    pub fn new(config: SheetConfig, options: GenerateOptions) -> Self {
        Self { config, options }
    }

    /// Discovers the images under `source_dir` and writes them as a PDF to `output`.
    pub fn run(&self, source_dir: &Path, output: &Path) -> Result<GenerationReport, SheetError> {
        match serde_json::to_string(&self.config) {
            Ok(json) => debug!("sheet config: {json}"),
            Err(error) => debug!("sheet config could not be serialized: {error}"),
        }

        let scan = find_image_files(source_dir)?;
        let mut writer = PdfSheetWriter::new(output, &self.config);
        let report = self.generate(&scan.files, &mut writer)?;

        if report.pages_written > 0 {
            info!(
                "PDF written to '{}' ({} page(s))",
                output.display(),
                writer.page_count()
            );
        }
        Ok(report)
    }

    pub fn generate(
        &self,
        images: &[PathBuf],
        writer: &mut dyn SheetWriter,
    ) -> Result<GenerationReport, SheetError> {
        let mut report = GenerationReport {
            images_found: images.len(),
            ..GenerationReport::default()
        };
        if images.is_empty() {
            warn!("no images to lay out");
            return Ok(report);
        }

        let layout = GridLayout::compute(&self.config)?;
        let capacity = layout.capacity();
        let total_pages = if self.options.preview {
            1
        } else {
            page_count(images.len(), capacity)
        };

        for (page_index, batch) in batches(images, capacity).enumerate() {
            if self.options.preview && page_index > 0 {
                break;
            }

            let page_number = page_index + 1;
            info!("generating page {page_number}/{total_pages}");
            writer.begin_page(page_number)?;

            for (index, path) in batch.iter().enumerate() {
                let (column, row) = slot_for_index(index, layout.columns);
                let placement = layout.slot_position(column, row);

                let card = match normalize_card(path, &self.config) {
                    CardOutcome::Ready(card) => card,
                    CardOutcome::Skipped(skipped) => {
                        report.skipped.push(skipped);
                        continue;
                    }
                };

                if let Err(draw_error) = writer.draw_card(&card, &placement) {
                    error!("failed to place {}: {draw_error}", path.display());
                    report.skipped.push(SkippedCard {
                        path: path.clone(),
                        reason: draw_error.to_string(),
                    });
                    continue;
                }

                if self.options.cut_marks {
                    if let Err(mark_error) = writer.draw_cut_marks(&placement) {
                        error!("failed to draw cut marks for {}: {mark_error}", path.display());
                    }
                }
                report.cards_placed += 1;
            }

            writer.finish_page()?;
            report.pages_written += 1;
        }

        writer.finish()?;
        report.log_summary();
        Ok(report)
    }
}
