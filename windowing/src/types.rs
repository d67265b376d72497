use core::ops::RangeInclusive;

/// Where a target item should land inside the viewport when scrolling to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Align {
    /// Keep the current offset when the item is fully visible, otherwise move the least.
    #[default]
    Auto,
    Start,
    Center,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    /// Direction of travel for an offset delta, `None` for a zero delta.
    pub fn from_delta(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Forward)
        } else if delta < 0.0 {
            Some(Self::Backward)
        } else {
            None
        }
    }
}

/// Placement of a single item along the scroll axis.
///
/// `expand_offset` always equals `offset + size`. `expand_size` is `0.0` unless the index is
/// flagged expanded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryEntry {
    pub offset: f64,
    pub size: f64,
    pub expand_offset: f64,
    pub expand_size: f64,
}

impl GeometryEntry {
    /// Offset right after the item, including its expand pane.
    pub fn end(&self) -> f64 {
        self.expand_offset + self.expand_size
    }

    /// Size the item contributes to the total layout size.
    pub fn extent(&self) -> f64 {
        self.size + self.expand_size
    }
}

/// An inclusive range of item indexes selected for rendering.
///
/// The empty range is represented with `start > stop`, which keeps [`Self::indices`] usable
/// without special casing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub stop: usize, // inclusive
}

impl VisibleRange {
    pub const EMPTY: Self = Self { start: 1, stop: 0 };

    pub fn new(start: usize, stop: usize) -> Self {
        debug_assert!(start <= stop, "VisibleRange::new: start > stop ({start} > {stop})");
        Self { start, stop }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.stop
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.stop - self.start + 1
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.stop
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.stop
    }
}

impl Default for VisibleRange {
    fn default() -> Self {
        Self::EMPTY
    }
}
