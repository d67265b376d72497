use windowing::{ScrollDirection, VisibleRange};

/// Lifecycle of the scroll coordinator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinatorState {
    /// No scroll activity; the base overscan is in effect.
    #[default]
    Idle,
    /// A deferred apply is scheduled but has not run yet.
    Pending,
    /// The user is scrolling; the widened overscan is in effect.
    Active,
}

/// A raw scroll position reported by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSample {
    pub offset: f64,
    pub timestamp_ms: u64,
}

impl ScrollSample {
    /// Distance per millisecond since `prev`. Elapsed time is floored at 1 ms.
    pub fn velocity_since(&self, prev: &ScrollSample) -> f64 {
        let dt = self.timestamp_ms.saturating_sub(prev.timestamp_ms).max(1);
        abs(self.offset - prev.offset) / dt as f64
    }

    pub fn direction_since(&self, prev: &ScrollSample) -> Option<ScrollDirection> {
        ScrollDirection::from_delta(self.offset - prev.offset)
    }
}

/// What the coordinator did with a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleOutcome {
    /// Below the noise floor, or the coordinator is torn down.
    Ignored,
    /// Applied right away; a requery is scheduled for the next frame.
    Applied,
    /// Inside the debounce window; an apply is scheduled for when it closes.
    Deferred,
    /// A deferred apply was already scheduled; it will pick up this position.
    Coalesced,
}

/// Notifications emitted after each requery.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowEvent {
    VisibleRangeChanged { range: VisibleRange, total_size: f64 },
    OffsetSettled { offset: f64 },
}

/// A lightweight, serializable snapshot of the scroll state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub offset: f64,
    pub viewport_size: f64,
    pub overscan: usize,
    pub state: CoordinatorState,
}

pub(crate) fn abs(v: f64) -> f64 {
    if v < 0.0 { -v } else { v }
}
