use std::path::PathBuf;

use serde::Serialize;

pub const MM_PER_INCH: f64 = 25.4;
pub const POINTS_PER_MM: f64 = 72.0 / MM_PER_INCH;

pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

/// Physical description of a printed sheet. All lengths are millimetres.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetConfig {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_top_mm: f64,
    pub margin_bottom_mm: f64,
    pub margin_left_mm: f64,
    pub margin_right_mm: f64,
    pub card_width_mm: f64,
    pub card_height_mm: f64,
    pub spacing_x_mm: f64,
    pub spacing_y_mm: f64,
    pub dpi: u32,
    pub max_columns: usize,
    pub max_rows: usize,
    pub cut_mark_length_mm: f64,
    /// Stroke width in points.
    pub cut_mark_width_pt: f64,
    /// DeviceRGB components, 0.0..=1.0.
    pub cut_mark_color: [f64; 3],
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_top_mm: 5.0,
            margin_bottom_mm: 5.0,
            margin_left_mm: 5.0,
            margin_right_mm: 5.0,
            card_width_mm: 63.0,
            card_height_mm: 88.0,
            spacing_x_mm: 1.0,
            spacing_y_mm: 1.0,
            dpi: 300,
            max_columns: 3,
            max_rows: 3,
            cut_mark_length_mm: 3.0,
            cut_mark_width_pt: 0.5,
            cut_mark_color: [211.0 / 255.0, 211.0 / 255.0, 211.0 / 255.0],
        }
    }
}

impl SheetConfig {
    pub fn available_width_mm(&self) -> f64 {
        self.page_width_mm - self.margin_left_mm - self.margin_right_mm
    }

    pub fn available_height_mm(&self) -> f64 {
        self.page_height_mm - self.margin_top_mm - self.margin_bottom_mm
    }

    /// Raster size of one card, truncated to whole pixels.
    pub fn card_pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.card_width_mm * dpi / MM_PER_INCH) as u32,
            (self.card_height_mm * dpi / MM_PER_INCH) as u32,
        )
    }
}

/// Per-run switches of the sheet generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerateOptions {
    pub preview: bool,
    pub cut_marks: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            preview: false,
            cut_marks: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizerConfig {
    pub directory: PathBuf,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}
