use alloc::collections::BTreeSet;

use crate::VisibleRange;

/// Emits rendered indexes while enforcing the renderer contract, without allocating.
///
/// Indexes past the item count or below the previous one are dropped (and debug-asserted);
/// repeats of the previous index are dropped silently.
pub struct IndexEmitter<'a> {
    count: usize,
    last: Option<usize>,
    emit: &'a mut dyn FnMut(usize),
}

impl<'a> IndexEmitter<'a> {
    pub fn new(count: usize, emit: &'a mut dyn FnMut(usize)) -> Self {
        Self {
            count,
            last: None,
            emit,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn emit(&mut self, index: usize) {
        let in_bounds = index < self.count;
        if !in_bounds {
            wwarn!(index, count = self.count, "IndexEmitter: index past item count");
        }
        debug_assert!(in_bounds, "IndexEmitter: index {index} past item count {}", self.count);

        let ascending = self.last.is_none_or(|prev| index >= prev);
        if !ascending {
            wwarn!(prev = ?self.last, next = index, "IndexEmitter: rendered indexes must ascend");
        }
        debug_assert!(
            ascending,
            "IndexEmitter: rendered indexes must ascend (prev={:?}, next={index})",
            self.last
        );

        if !in_bounds || !ascending || self.last == Some(index) {
            return;
        }
        self.last = Some(index);
        (self.emit)(index);
    }

    /// Emits `range`, clamped to the item count.
    pub fn emit_range(&mut self, range: VisibleRange) {
        if range.is_empty() || range.start >= self.count {
            return;
        }
        for i in range.start..=range.stop.min(self.count - 1) {
            self.emit(i);
        }
    }

    /// Emits `range` merged with `sticky`, ascending. Sticky indexes past the count are
    /// skipped.
    pub fn emit_window(&mut self, range: VisibleRange, sticky: &BTreeSet<usize>) {
        let mut sticky = sticky.range(..self.count).copied().peekable();
        if !range.is_empty() && range.start < self.count {
            for i in range.start..=range.stop.min(self.count - 1) {
                while let Some(s) = sticky.next_if(|&s| s <= i) {
                    self.emit(s);
                }
                self.emit(i);
            }
        }
        for s in sticky {
            self.emit(s);
        }
    }
}
