mod grid;
mod pagination;

pub use grid::{GridLayout, Placement};
pub use pagination::{batches, page_count, slot_for_index};
