use std::slice::Chunks;

pub fn page_count(images: usize, capacity: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    images.div_ceil(capacity)
}

/// Splits the sorted image list into page-sized batches; the last one may be short.
pub fn batches<T>(items: &[T], capacity: usize) -> Chunks<'_, T> {
    items.chunks(capacity.max(1))
}

/// Maps the index of an image inside its batch to `(column, row)`.
pub fn slot_for_index(index: usize, columns: usize) -> (usize, usize) {
    (index % columns, index / columns)
}
