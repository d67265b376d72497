use crate::{Align, GeometryIndex};

impl GeometryIndex {
    /// Computes the scroll offset that brings `index` into view with the given alignment.
    ///
    /// `index` is clamped to `[0, count - 1]`. The result is not clamped: it can be negative
    /// (e.g. `End` on the first item) or past `total_size - viewport_size`. Clamping is left to
    /// whoever executes the scroll.
    pub fn offset_for_index(
        &mut self,
        index: usize,
        align: Align,
        viewport_size: f64,
        current_offset: f64,
    ) -> f64 {
        let count = self.count();
        if count == 0 {
            return 0.0;
        }
        let entry = self.entry(index.min(count - 1));
        let start = entry.offset;
        let end = entry.offset + entry.size;

        match align {
            Align::Start => start,
            Align::End => end - viewport_size,
            Align::Center => start - (viewport_size - entry.size) / 2.0,
            Align::Auto => {
                if start >= current_offset && end <= current_offset + viewport_size {
                    current_offset
                } else if start < current_offset {
                    start
                } else {
                    end - viewport_size
                }
            }
        }
    }
}
