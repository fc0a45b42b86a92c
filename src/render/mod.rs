mod marks;
mod pdf;

pub use marks::{cut_mark_segments, Segment};
pub use pdf::PdfSheetWriter;

use crate::engine::CardImage;
use crate::error::SheetError;
use crate::layout::Placement;

/// Destination of a paginated card sheet.
pub trait SheetWriter {
    fn begin_page(&mut self, page_number: usize) -> Result<(), SheetError>;

    fn draw_card(&mut self, card: &CardImage, placement: &Placement) -> Result<(), SheetError>;

    fn draw_cut_marks(&mut self, placement: &Placement) -> Result<(), SheetError>;

    fn finish_page(&mut self) -> Result<(), SheetError>;

    /// Flushes the whole document to storage. Called once, after the last page.
    fn finish(&mut self) -> Result<(), SheetError>;
}
