use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

/// A per-index size provider.
pub type SizeFn = Arc<dyn Fn(usize) -> f64 + Send + Sync>;

/// How the size of an item (or of its expand pane) is determined.
#[derive(Clone)]
pub enum SizingRule {
    /// Every index has the same size.
    Fixed(f64),
    /// Explicit sizes; indexes past the end of the slice fall back to the estimate.
    PerIndex(Arc<[f64]>),
    /// Sizes computed on demand. Only called when an index is materialized.
    Computed(SizeFn),
}

impl SizingRule {
    pub fn per_index(sizes: impl Into<Vec<f64>>) -> Self {
        Self::PerIndex(Arc::from(sizes.into()))
    }

    pub fn computed(f: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }

    /// Returns the raw size for `index`, or `estimate` when the rule has no value for it.
    pub fn raw_size(&self, index: usize, estimate: f64) -> f64 {
        match self {
            Self::Fixed(size) => *size,
            Self::PerIndex(sizes) => sizes.get(index).copied().unwrap_or(estimate),
            Self::Computed(f) => f(index),
        }
    }

    /// Same as [`Self::raw_size`], with negative and non-finite sizes coerced to `0.0`.
    pub fn size_of(&self, index: usize, estimate: f64) -> f64 {
        let size = self.raw_size(index, estimate);
        if size.is_finite() && size >= 0.0 {
            return size;
        }
        wwarn!(index, size, "SizingRule: irregular size coerced to 0");
        0.0
    }

    /// The fixed value, if this rule is `Fixed` with a usable size.
    pub fn fixed_size(&self) -> Option<f64> {
        match self {
            Self::Fixed(size) if size.is_finite() && *size > 0.0 => Some(*size),
            _ => None,
        }
    }

    /// The size every index gets under a `Fixed` rule, irregular values coerced to `0.0`.
    pub(crate) fn uniform_size(&self) -> Option<f64> {
        match self {
            Self::Fixed(size) if size.is_finite() && *size >= 0.0 => Some(*size),
            Self::Fixed(_) => Some(0.0),
            _ => None,
        }
    }

    /// Whether two rules are known to produce the same sizes.
    ///
    /// Computed rules compare by closure identity, so re-wrapping an equivalent closure counts
    /// as a change.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a.to_bits() == b.to_bits(),
            (Self::PerIndex(a), Self::PerIndex(b)) => {
                Arc::ptr_eq(a, b)
                    || (a.len() == b.len()
                        && a.iter().zip(b.iter()).all(|(x, y)| x.to_bits() == y.to_bits()))
            }
            (Self::Computed(a), Self::Computed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Default for SizingRule {
    fn default() -> Self {
        Self::Fixed(0.0)
    }
}

impl From<f64> for SizingRule {
    fn from(size: f64) -> Self {
        Self::Fixed(size)
    }
}

impl From<Vec<f64>> for SizingRule {
    fn from(sizes: Vec<f64>) -> Self {
        Self::per_index(sizes)
    }
}

impl fmt::Debug for SizingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(size) => f.debug_tuple("Fixed").field(size).finish(),
            Self::PerIndex(sizes) => f.debug_tuple("PerIndex").field(&sizes.len()).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
