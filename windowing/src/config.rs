use alloc::collections::BTreeSet;

use crate::{ConfigError, SizingRule, WindowError};

/// Estimated size used when neither the config nor a `Fixed` rule provides one.
pub const DEFAULT_ESTIMATED_SIZE: f64 = 50.0;

/// Configuration for [`crate::GeometryIndex`].
///
/// This type is cheap to clone: computed sizing closures live behind `Arc`s, so a host can
/// patch one field and hand the result back to `configure` without reallocating closures.
#[derive(Clone)]
pub struct WindowConfig {
    pub count: usize,
    /// Primary size of each item.
    pub sizing: SizingRule,
    /// Size of the expand pane, materialized only for indexes in `expanded`.
    pub expand_sizing: SizingRule,
    pub expanded: BTreeSet<usize>,
    /// Size assumed for items past the materialized frontier (and for `PerIndex` gaps).
    /// Ignored for the tail of a `Fixed` rule, whose size is known.
    pub estimated_size: f64,
    /// Expand pane size assumed for expanded items past the materialized frontier, unless
    /// `expand_sizing` is `Fixed`.
    pub estimated_expand_size: f64,
    /// Indexes rendered regardless of the visible window (pinned headers and the like).
    pub sticky_indices: BTreeSet<usize>,
}

impl WindowConfig {
    /// Creates a config for `count` items.
    ///
    /// When `sizing` is `Fixed`, the estimate defaults to the fixed size so the estimated tail
    /// of [`crate::GeometryIndex::total_size`] is exact.
    pub fn new(count: usize, sizing: impl Into<SizingRule>) -> Self {
        let sizing = sizing.into();
        let estimated_size = sizing.fixed_size().unwrap_or(DEFAULT_ESTIMATED_SIZE);
        Self {
            count,
            sizing,
            expand_sizing: SizingRule::default(),
            expanded: BTreeSet::new(),
            estimated_size,
            estimated_expand_size: DEFAULT_ESTIMATED_SIZE,
            sticky_indices: BTreeSet::new(),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_sizing(mut self, sizing: impl Into<SizingRule>) -> Self {
        self.sizing = sizing.into();
        self
    }

    /// Sets the expand pane sizing; a `Fixed` rule also becomes the expand estimate.
    pub fn with_expand_sizing(mut self, expand_sizing: impl Into<SizingRule>) -> Self {
        self.expand_sizing = expand_sizing.into();
        if let Some(size) = self.expand_sizing.fixed_size() {
            self.estimated_expand_size = size;
        }
        self
    }

    pub fn with_expanded(mut self, expanded: impl IntoIterator<Item = usize>) -> Self {
        self.expanded = expanded.into_iter().collect();
        self
    }

    pub fn with_estimated_size(mut self, estimated_size: f64) -> Self {
        self.estimated_size = estimated_size;
        self
    }

    pub fn with_estimated_expand_size(mut self, estimated_expand_size: f64) -> Self {
        self.estimated_expand_size = estimated_expand_size;
        self
    }

    pub fn with_sticky_indices(mut self, sticky: impl IntoIterator<Item = usize>) -> Self {
        self.sticky_indices = sticky.into_iter().collect();
        self
    }

    /// Flips the expanded flag of `index`; returns the new state.
    pub fn toggle_expanded(&mut self, index: usize) -> bool {
        if self.expanded.remove(&index) {
            false
        } else {
            self.expanded.insert(index);
            true
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    pub fn validate(&self) -> Result<(), WindowError> {
        if !(self.estimated_size.is_finite() && self.estimated_size > 0.0) {
            return Err(ConfigError::EstimatedSize(self.estimated_size).into());
        }
        if !(self.estimated_expand_size.is_finite() && self.estimated_expand_size > 0.0) {
            return Err(ConfigError::EstimatedExpandSize(self.estimated_expand_size).into());
        }
        Ok(())
    }

    /// Whether `other` differs from `self` only in its `expanded` set (and sticky indexes,
    /// which do not affect geometry).
    pub(crate) fn same_layout_inputs(&self, other: &Self) -> bool {
        self.count == other.count
            && self.estimated_size.to_bits() == other.estimated_size.to_bits()
            && self.estimated_expand_size.to_bits() == other.estimated_expand_size.to_bits()
            && self.sizing.same_as(&other.sizing)
            && self.expand_sizing.same_as(&other.expand_sizing)
    }

    /// Lowest index whose expanded flag differs between the two configs.
    pub(crate) fn first_expanded_change(&self, other: &Self) -> Option<usize> {
        self.expanded.symmetric_difference(&other.expanded).min().copied()
    }

    /// Per-index size assumed past the frontier. Exact for `Fixed` rules.
    pub(crate) fn tail_size(&self) -> f64 {
        self.sizing.uniform_size().unwrap_or(self.estimated_size)
    }

    /// Per-index expand pane size assumed past the frontier. Exact for `Fixed` rules.
    pub(crate) fn tail_expand_size(&self) -> f64 {
        self.expand_sizing.uniform_size().unwrap_or(self.estimated_expand_size)
    }

    /// Size of item `index`, irregular values coerced to `0.0`.
    pub(crate) fn size_of(&self, index: usize) -> f64 {
        self.sizing.size_of(index, self.estimated_size)
    }

    /// Expand pane size of item `index`; `0.0` when it is not expanded.
    pub(crate) fn expand_size_of(&self, index: usize) -> f64 {
        if !self.is_expanded(index) {
            return 0.0;
        }
        self.expand_sizing.size_of(index, self.estimated_expand_size)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(0, SizingRule::Fixed(DEFAULT_ESTIMATED_SIZE))
    }
}

impl core::fmt::Debug for WindowConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowConfig")
            .field("count", &self.count)
            .field("sizing", &self.sizing)
            .field("expand_sizing", &self.expand_sizing)
            .field("expanded", &self.expanded.len())
            .field("estimated_size", &self.estimated_size)
            .field("estimated_expand_size", &self.estimated_expand_size)
            .field("sticky_indices", &self.sticky_indices)
            .finish()
    }
}
