use log::info;

use crate::error::SheetError;
use crate::infra::config::SheetConfig;

/// Card grid of one page, in millimetres from the bottom-left page corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    pub start_x_mm: f64,
    pub start_y_mm: f64,
    pub card_width_mm: f64,
    pub card_height_mm: f64,
    pub pitch_x_mm: f64,
    pub pitch_y_mm: f64,
}

/// Bottom-left corner and size of a card on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub column: usize,
    pub row: usize,
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl GridLayout {
    pub fn compute(config: &SheetConfig) -> Result<Self, SheetError> {
        let available_width = config.available_width_mm();
        let available_height = config.available_height_mm();
        let pitch_x = config.card_width_mm + config.spacing_x_mm;
        let pitch_y = config.card_height_mm + config.spacing_y_mm;

        if pitch_x <= 0.0 || pitch_y <= 0.0 {
            return Err(SheetError::InvalidInput(
                "card size plus spacing must be positive".to_string(),
            ));
        }

        let columns = fitting_count(available_width, config.spacing_x_mm, pitch_x)
            .min(config.max_columns);
        let rows =
            fitting_count(available_height, config.spacing_y_mm, pitch_y).min(config.max_rows);

        if columns == 0 || rows == 0 {
            return Err(SheetError::InvalidInput(format!(
                "a {}x{} mm card does not fit a {}x{} mm printable area",
                config.card_width_mm, config.card_height_mm, available_width, available_height
            )));
        }

        let total_width = extent(columns, config.card_width_mm, config.spacing_x_mm);
        let total_height = extent(rows, config.card_height_mm, config.spacing_y_mm);

        let layout = Self {
            columns,
            rows,
            start_x_mm: config.margin_left_mm + (available_width - total_width) / 2.0,
            start_y_mm: config.margin_bottom_mm + (available_height - total_height) / 2.0,
            card_width_mm: config.card_width_mm,
            card_height_mm: config.card_height_mm,
            pitch_x_mm: pitch_x,
            pitch_y_mm: pitch_y,
        };
        info!("layout: {}x{} cards per page", layout.columns, layout.rows);
        Ok(layout)
    }

    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    pub fn total_width_mm(&self) -> f64 {
        self.columns as f64 * self.pitch_x_mm - (self.pitch_x_mm - self.card_width_mm)
    }

    pub fn total_height_mm(&self) -> f64 {
        self.rows as f64 * self.pitch_y_mm - (self.pitch_y_mm - self.card_height_mm)
    }

    /// Row 0 is the top row; PDF coordinates grow upwards, so rows are flipped.
    pub fn slot_position(&self, column: usize, row: usize) -> Placement {
        let flipped_row = self.rows - 1 - row;
        Placement {
            column,
            row,
            x_mm: self.start_x_mm + column as f64 * self.pitch_x_mm,
            y_mm: self.start_y_mm + flipped_row as f64 * self.pitch_y_mm,
            width_mm: self.card_width_mm,
            height_mm: self.card_height_mm,
        }
    }
}

fn fitting_count(available: f64, spacing: f64, pitch: f64) -> usize {
    let count = ((available + spacing) / pitch).floor();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

fn extent(count: usize, card: f64, spacing: f64) -> f64 {
    count as f64 * card + count.saturating_sub(1) as f64 * spacing
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn default_sheet_fits_three_by_three_centered() {
        let layout = GridLayout::compute(&SheetConfig::default()).expect("layout");
        assert_eq!(layout.columns, 3);
        assert_eq!(layout.rows, 3);
        assert_eq!(layout.capacity(), 9);
        assert!((layout.start_x_mm - 9.5).abs() < EPSILON);
        assert!((layout.start_y_mm - 15.5).abs() < EPSILON);
        assert!((layout.total_width_mm() - 191.0).abs() < EPSILON);
        assert!((layout.total_height_mm() - 266.0).abs() < EPSILON);
    }

    #[test]
    fn grid_is_capped_at_three_by_three_on_large_pages() {
        let config = SheetConfig {
            page_width_mm: 1000.0,
            page_height_mm: 1000.0,
            ..SheetConfig::default()
        };
        let layout = GridLayout::compute(&config).expect("layout");
        assert_eq!((layout.columns, layout.rows), (3, 3));
    }

    #[test]
    fn grid_shrinks_to_what_fits() {
        let config = SheetConfig {
            page_width_mm: 148.0,
            page_height_mm: 210.0,
            ..SheetConfig::default()
        };
        let layout = GridLayout::compute(&config).expect("layout");
        assert_eq!((layout.columns, layout.rows), (2, 2));
    }

    #[test]
    fn occupied_area_stays_inside_margins_and_is_centered() {
        for (width, height) in [(210.0, 297.0), (216.0, 279.0), (148.0, 210.0), (400.0, 300.0)] {
            let config = SheetConfig {
                page_width_mm: width,
                page_height_mm: height,
                ..SheetConfig::default()
            };
            let layout = GridLayout::compute(&config).expect("layout");

            let left = layout.start_x_mm - config.margin_left_mm;
            let right =
                width - config.margin_right_mm - (layout.start_x_mm + layout.total_width_mm());
            let bottom = layout.start_y_mm - config.margin_bottom_mm;
            let top =
                height - config.margin_top_mm - (layout.start_y_mm + layout.total_height_mm());

            assert!(left >= -EPSILON && right >= -EPSILON);
            assert!(bottom >= -EPSILON && top >= -EPSILON);
            assert!((left - right).abs() < 1e-6);
            assert!((bottom - top).abs() < 1e-6);
        }
    }

    #[test]
    fn oversized_card_is_rejected() {
        let config = SheetConfig {
            card_width_mm: 250.0,
            ..SheetConfig::default()
        };
        assert!(matches!(
            GridLayout::compute(&config),
            Err(SheetError::InvalidInput(_))
        ));
    }

    #[test]
    fn first_row_is_drawn_at_the_top() {
        let layout = GridLayout::compute(&SheetConfig::default()).expect("layout");

        let top_left = layout.slot_position(0, 0);
        assert!((top_left.x_mm - 9.5).abs() < EPSILON);
        assert!((top_left.y_mm - (15.5 + 2.0 * 89.0)).abs() < EPSILON);

        let bottom_right = layout.slot_position(2, 2);
        assert!((bottom_right.x_mm - (9.5 + 2.0 * 64.0)).abs() < EPSILON);
        assert!((bottom_right.y_mm - 15.5).abs() < EPSILON);
        assert_eq!(bottom_right.width_mm, 63.0);
        assert_eq!(bottom_right.height_mm, 88.0);
    }
}
