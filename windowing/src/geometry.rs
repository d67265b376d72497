use alloc::vec::Vec;

use crate::{GeometryEntry, IndexEmitter, VisibleRange, WindowConfig, WindowError};

/// Maps item indexes to offsets and sizes, and offsets back to index ranges.
///
/// Entries are materialized lazily, front to back, into a growable arena: the highest
/// materialized index is the *frontier*. Every materialized entry stays cached until it is
/// invalidated, so once the frontier has moved past the active viewport, queries are answered
/// by binary search over the cached prefix.
///
/// Beyond the frontier, sizes are extrapolated from `estimated_size`/`estimated_expand_size`
/// (or from the fixed size, when the rule is `Fixed`).
#[derive(Clone, Debug)]
pub struct GeometryIndex {
    config: WindowConfig,
    entries: Vec<GeometryEntry>,
    /// Expanded indexes below `count`.
    expanded_in_count: usize,
    /// Expanded indexes below the materialized length.
    expanded_materialized: usize,
}

impl GeometryIndex {
    pub fn new(config: WindowConfig) -> Result<Self, WindowError> {
        config.validate()?;
        wdebug!(count = config.count, "GeometryIndex::new");
        Ok(Self {
            expanded_in_count: config.expanded.range(..config.count).count(),
            expanded_materialized: 0,
            config,
            entries: Vec::new(),
        })
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn count(&self) -> usize {
        self.config.count
    }

    /// Number of materialized entries (`frontier + 1`).
    pub fn materialized_len(&self) -> usize {
        self.entries.len()
    }

    /// The highest materialized index, if any.
    pub fn frontier(&self) -> Option<usize> {
        self.entries.len().checked_sub(1)
    }

    /// Replaces the configuration.
    ///
    /// An invalid config is rejected and the current one stays in effect. When only the
    /// `expanded` set (or sticky indexes) changed, entries before the lowest toggled index are
    /// kept; any other change drops every cached entry.
    pub fn configure(&mut self, config: WindowConfig) -> Result<(), WindowError> {
        if let Err(err) = config.validate() {
            wwarn!(error = %err, "GeometryIndex::configure: rejected");
            return Err(err);
        }

        let invalidate_at = if self.config.same_layout_inputs(&config) {
            self.config.first_expanded_change(&config)
        } else {
            Some(0)
        };
        self.config = config;
        self.expanded_in_count = self.config.expanded.range(..self.config.count).count();
        if let Some(index) = invalidate_at {
            self.invalidate_from(index);
        }
        wdebug!(
            count = self.config.count,
            invalidated_from = ?invalidate_at,
            "GeometryIndex::configure"
        );
        Ok(())
    }

    /// Clones the current config, applies `f`, then delegates to [`Self::configure`].
    pub fn update_config(&mut self, f: impl FnOnce(&mut WindowConfig)) -> Result<(), WindowError> {
        let mut next = self.config.clone();
        f(&mut next);
        self.configure(next)
    }

    /// Sets the expanded flag of `index`, shifting only the entries after it.
    pub fn set_expanded(&mut self, index: usize, expanded: bool) {
        if self.config.is_expanded(index) == expanded {
            return;
        }
        if expanded {
            self.config.expanded.insert(index);
        } else {
            self.config.expanded.remove(&index);
        }
        if index < self.config.count {
            if expanded {
                self.expanded_in_count += 1;
            } else {
                self.expanded_in_count -= 1;
            }
        }
        self.invalidate_from(index);
    }

    /// Flips the expanded flag of `index`; returns the new state.
    pub fn toggle_expanded(&mut self, index: usize) -> bool {
        let expanded = !self.config.is_expanded(index);
        self.set_expanded(index, expanded);
        expanded
    }

    /// Drops every cached entry at or after `index`. Nothing is recomputed until queried.
    pub fn invalidate_from(&mut self, index: usize) {
        if index < self.entries.len() {
            wtrace!(index, frontier = ?self.frontier(), "invalidate_from");
            self.entries.truncate(index);
            self.expanded_materialized = self.config.expanded.range(..index).count();
        }
    }

    pub fn reset(&mut self) {
        self.invalidate_from(0);
    }

    /// Total layout size: the materialized prefix plus an estimate for the tail.
    ///
    /// Constant time: expanded indexes are counted as they are materialized, not on each call.
    pub fn total_size(&self) -> f64 {
        let count = self.config.count;
        let remaining = count.saturating_sub(self.entries.len());
        let expanded_remaining = self.expanded_in_count.saturating_sub(self.expanded_materialized);

        self.materialized_end()
            + remaining as f64 * self.config.tail_size()
            + expanded_remaining as f64 * self.config.tail_expand_size()
    }

    /// Returns the placement of `index`, materializing every entry up to it.
    pub fn size_and_position_for(&mut self, index: usize) -> Result<GeometryEntry, WindowError> {
        let count = self.config.count;
        if index >= count {
            return Err(WindowError::OutOfRange { index, count });
        }
        Ok(self.entry(index))
    }

    /// Returns a cached placement without materializing.
    pub fn cached_entry(&self, index: usize) -> Option<GeometryEntry> {
        self.entries.get(index).copied()
    }

    /// Index of the item covering `offset` (expand pane included).
    ///
    /// Offsets past the end of the content resolve to the last index.
    pub fn index_at_offset(&mut self, offset: f64) -> Option<usize> {
        if self.config.count == 0 {
            return None;
        }
        Some(self.first_ending_after(sanitize_offset(offset)))
    }

    /// Indexes intersecting `[scroll_offset, scroll_offset + viewport_size)`, widened by
    /// `overscan` on both sides and clamped to `[0, count - 1]`.
    ///
    /// An item counts as visible while any part of it is, expand pane included: the first
    /// index is the first whose `offset + size + expand_size` is past `scroll_offset`, so an
    /// item stays in the range while only its expand pane is on screen.
    pub fn visible_range(
        &mut self,
        viewport_size: f64,
        scroll_offset: f64,
        overscan: usize,
    ) -> VisibleRange {
        let count = self.config.count;
        // Written so that NaN falls into the empty case.
        if count == 0 || !(viewport_size > 0.0) {
            return VisibleRange::EMPTY;
        }

        let scroll_offset = sanitize_offset(scroll_offset);
        let start = self.first_ending_after(scroll_offset);
        let stop = self.last_starting_before(start, scroll_offset + viewport_size);

        let range = VisibleRange::new(
            start.saturating_sub(overscan),
            stop.saturating_add(overscan).min(count - 1),
        );
        wtrace!(
            viewport_size,
            scroll_offset,
            overscan,
            start = range.start,
            stop = range.stop,
            "visible_range"
        );
        range
    }

    /// Emits the indexes to render for `range`: the range itself merged with the sticky
    /// indexes, ascending and without duplicates.
    pub fn for_each_rendered_index(&self, range: VisibleRange, mut f: impl FnMut(usize)) {
        let mut emitter = IndexEmitter::new(self.config.count, &mut f);
        emitter.emit_window(range, &self.config.sticky_indices);
    }

    /// Same as [`Self::for_each_rendered_index`], with the placement of each index.
    pub fn for_each_rendered_placement(
        &mut self,
        range: VisibleRange,
        mut f: impl FnMut(usize, GeometryEntry),
    ) {
        let count = self.config.count;
        if count == 0 {
            return;
        }
        let last_sticky = self.config.sticky_indices.range(..count).next_back().copied();
        let last = match (range.is_empty(), last_sticky) {
            (true, None) => return,
            (true, Some(s)) => s,
            (false, None) => range.stop.min(count - 1),
            (false, Some(s)) => range.stop.min(count - 1).max(s),
        };
        self.materialize_through(last);

        let entries = &self.entries;
        let mut emit = |i: usize| f(i, entries[i]);
        let mut emitter = IndexEmitter::new(count, &mut emit);
        emitter.emit_window(range, &self.config.sticky_indices);
    }

    /// Collects the rendered indexes for `range` into `out` (clears `out` first).
    pub fn collect_rendered_indexes(&self, range: VisibleRange, out: &mut Vec<usize>) {
        out.clear();
        self.for_each_rendered_index(range, |i| out.push(i));
    }

    /// Materialized entry for an index known to be `< count`.
    pub(crate) fn entry(&mut self, index: usize) -> GeometryEntry {
        debug_assert!(index < self.config.count);
        self.materialize_through(index);
        self.entries[index]
    }

    fn materialized_end(&self) -> f64 {
        self.entries.last().map_or(0.0, GeometryEntry::end)
    }

    fn materialize_next(&mut self) -> GeometryEntry {
        let index = self.entries.len();
        let offset = self.materialized_end();
        let size = self.config.size_of(index);
        if self.config.is_expanded(index) {
            self.expanded_materialized += 1;
        }
        let entry = GeometryEntry {
            offset,
            size,
            expand_offset: offset + size,
            expand_size: self.config.expand_size_of(index),
        };
        self.entries.push(entry);
        entry
    }

    fn materialize_through(&mut self, index: usize) {
        let len = self.entries.len();
        let count = self.config.count;
        if index < len || len >= count {
            return;
        }
        let index = index.min(count - 1);
        self.entries.reserve(index + 1 - len);
        while self.entries.len() <= index {
            self.materialize_next();
        }
        wtrace!(from = len, to = index, "materialized");
    }

    /// First index whose end (expand pane included) is past `target`, or the last index when
    /// `target` is past the end of the content. Requires `count > 0`.
    fn first_ending_after(&mut self, target: f64) -> usize {
        let count = self.config.count;
        if self.materialized_end() > target {
            return self.entries.partition_point(|e| e.end() <= target);
        }
        while self.entries.len() < count {
            if self.materialize_next().end() > target {
                return self.entries.len() - 1;
            }
        }
        count - 1
    }

    /// Last index (not before `start`) whose offset is before `target`.
    fn last_starting_before(&mut self, start: usize, target: f64) -> usize {
        let count = self.config.count;
        while self.entries.len() < count && self.materialized_end() < target {
            self.materialize_next();
        }
        let first_at_or_after = self.entries.partition_point(|e| e.offset < target);
        first_at_or_after.saturating_sub(1).max(start)
    }
}

fn sanitize_offset(offset: f64) -> f64 {
    if offset.is_finite() { offset.max(0.0) } else { 0.0 }
}
