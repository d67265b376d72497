use windowing::{GeometryIndex, ScrollDirection, VisibleRange};

use crate::state::abs;
use crate::{CoordinatorOptions, CoordinatorState, SampleOutcome, ScrollSample, ScrollState, WindowEvent};

/// Upper bound of the velocity multiplier applied to the base overscan. The widened overscan
/// is floored, so a fractional multiplier never rounds up past what the velocity earns.
const MAX_OVERSCAN_FACTOR: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrameRequest {
    overscan: usize,
}

/// Turns a noisy stream of scroll samples into at most one geometry requery per frame.
///
/// This type does not hold any UI objects or clocks. Hosts drive it by calling:
/// - `on_scroll_sample` / `on_resize` when UI events occur
/// - `tick(now_ms)` once `next_deadline()` has passed (debounce and end-of-scroll timers)
/// - `on_animation_frame` from their frame callback while `needs_frame()` is true
///
/// Each kind of pending work (deferred apply, end-of-scroll timer, frame requery) exists at
/// most once; scheduling it again replaces the previous one.
#[derive(Clone, Debug)]
pub struct ScrollCoordinator {
    options: CoordinatorOptions,
    state: CoordinatorState,
    viewport_size: f64,

    live_offset: f64,
    applied_offset: f64,
    last_sample: Option<ScrollSample>,
    last_applied_ms: Option<u64>,
    direction: Option<ScrollDirection>,
    velocity: f64,
    dynamic_overscan: usize,

    debounce_due_ms: Option<u64>,
    idle_due_ms: Option<u64>,
    frame: Option<FrameRequest>,
    torn_down: bool,

    last_range: VisibleRange,
}

impl ScrollCoordinator {
    pub fn new(options: CoordinatorOptions) -> Self {
        adebug!(
            overscan = options.overscan,
            debounce_ms = options.debounce_ms,
            idle_delay_ms = options.idle_delay_ms,
            "ScrollCoordinator::new"
        );
        Self {
            state: CoordinatorState::Idle,
            viewport_size: sanitize_viewport(options.initial_viewport_size),
            live_offset: 0.0,
            applied_offset: 0.0,
            last_sample: None,
            last_applied_ms: None,
            direction: None,
            velocity: 0.0,
            dynamic_overscan: options.overscan,
            debounce_due_ms: None,
            idle_due_ms: None,
            frame: None,
            torn_down: false,
            last_range: VisibleRange::EMPTY,
            options,
        }
    }

    pub fn options(&self) -> &CoordinatorOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: CoordinatorOptions) {
        self.options = options;
        if self.state == CoordinatorState::Idle {
            self.dynamic_overscan = options.overscan;
        }
        self.request_requery();
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn viewport_size(&self) -> f64 {
        self.viewport_size
    }

    /// The offset the current (or next) requery is computed for.
    pub fn applied_offset(&self) -> f64 {
        self.applied_offset
    }

    /// The most recent position reported by the host, applied or not.
    pub fn live_offset(&self) -> f64 {
        self.live_offset
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    /// Overscan used by the next requery.
    pub fn dynamic_overscan(&self) -> usize {
        self.dynamic_overscan
    }

    /// The range produced by the last requery.
    pub fn last_range(&self) -> VisibleRange {
        self.last_range
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.applied_offset,
            viewport_size: self.viewport_size,
            overscan: self.dynamic_overscan,
            state: self.state,
        }
    }

    /// The earliest pending timer deadline (deferred apply or end-of-scroll).
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.debounce_due_ms, self.idle_due_ms) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.frame.is_some()
    }

    /// Feeds a raw scroll position.
    pub fn on_scroll_sample(&mut self, offset: f64, now_ms: u64) -> SampleOutcome {
        if self.torn_down {
            return SampleOutcome::Ignored;
        }
        if !offset.is_finite() {
            awarn!(offset, "on_scroll_sample: non-finite offset ignored");
            return SampleOutcome::Ignored;
        }

        // The live position is tracked even for ignored samples: a deferred apply reads it.
        self.live_offset = offset;
        if abs(offset - self.applied_offset) < self.options.noise_floor {
            atrace!(offset, applied = self.applied_offset, "sample below noise floor");
            return SampleOutcome::Ignored;
        }

        let sample = ScrollSample {
            offset,
            timestamp_ms: now_ms,
        };
        let prev = self.last_sample.replace(sample);
        self.velocity = prev.map_or(0.0, |p| sample.velocity_since(&p));
        let direction = match prev {
            Some(p) => sample.direction_since(&p),
            None => ScrollDirection::from_delta(offset - self.applied_offset),
        };
        let reversed = matches!((self.direction, direction), (Some(a), Some(b)) if a != b);
        if direction.is_some() {
            self.direction = direction;
        }
        self.arm_idle(now_ms);

        if reversed {
            atrace!(offset, now_ms, "direction reversed; applying immediately");
            self.debounce_due_ms = None;
            self.apply(now_ms);
            return SampleOutcome::Applied;
        }

        if let Some(last) = self.last_applied_ms {
            if now_ms.saturating_sub(last) < self.options.debounce_ms {
                if self.debounce_due_ms.is_some() {
                    atrace!(offset, now_ms, "sample coalesced into pending apply");
                    return SampleOutcome::Coalesced;
                }
                self.debounce_due_ms = Some(last.saturating_add(self.options.debounce_ms));
                self.transition(CoordinatorState::Pending);
                atrace!(offset, now_ms, due = ?self.debounce_due_ms, "sample deferred");
                return SampleOutcome::Deferred;
            }
        }

        self.apply(now_ms);
        SampleOutcome::Applied
    }

    /// Records a new viewport size and forces a requery at the current offset.
    pub fn on_resize(&mut self, viewport_size: f64) {
        if self.torn_down {
            return;
        }
        self.viewport_size = sanitize_viewport(viewport_size);
        atrace!(viewport_size = self.viewport_size, "on_resize");
        self.request_requery();
    }

    /// Moves to `offset` without velocity widening (programmatic scrolls).
    pub fn jump_to(&mut self, offset: f64, now_ms: u64) {
        if self.torn_down || !offset.is_finite() {
            return;
        }
        self.debounce_due_ms = None;
        self.live_offset = offset;
        self.last_sample = Some(ScrollSample {
            offset,
            timestamp_ms: now_ms,
        });
        self.velocity = 0.0;
        self.direction = None;
        self.arm_idle(now_ms);
        self.apply(now_ms);
    }

    /// Schedules a requery with the overscan currently in effect.
    pub fn request_requery(&mut self) {
        if self.torn_down {
            return;
        }
        self.request_frame(self.dynamic_overscan);
    }

    /// Fires timers whose deadline has passed.
    pub fn tick(&mut self, now_ms: u64) {
        if self.torn_down {
            return;
        }
        if self.debounce_due_ms.is_some_and(|due| now_ms >= due) {
            self.debounce_due_ms = None;
            self.apply(now_ms);
        }
        if self.idle_due_ms.is_some_and(|due| now_ms >= due) {
            self.idle_due_ms = None;
            self.settle();
        }
    }

    /// Runs the pending requery, if any, and emits its results.
    ///
    /// Returns the new range, or `None` when no requery was pending.
    pub fn on_animation_frame(
        &mut self,
        geometry: &mut GeometryIndex,
        mut emit: impl FnMut(WindowEvent),
    ) -> Option<VisibleRange> {
        if self.torn_down {
            return None;
        }
        let request = self.frame.take()?;
        let range = geometry.visible_range(self.viewport_size, self.applied_offset, request.overscan);
        let total_size = geometry.total_size();
        atrace!(
            offset = self.applied_offset,
            overscan = request.overscan,
            start = range.start,
            stop = range.stop,
            "requery"
        );
        self.last_range = range;
        emit(WindowEvent::VisibleRangeChanged { range, total_size });
        emit(WindowEvent::OffsetSettled {
            offset: self.applied_offset,
        });
        Some(range)
    }

    /// Cancels every pending timer and frame; further input is ignored until `resume`.
    pub fn teardown(&mut self) {
        adebug!("ScrollCoordinator::teardown");
        self.debounce_due_ms = None;
        self.idle_due_ms = None;
        self.frame = None;
        self.torn_down = true;
        self.state = CoordinatorState::Idle;
    }

    pub fn resume(&mut self) {
        if !self.torn_down {
            return;
        }
        adebug!("ScrollCoordinator::resume");
        self.torn_down = false;
        self.dynamic_overscan = self.options.overscan;
        self.last_sample = None;
        self.last_applied_ms = None;
        self.direction = None;
        self.velocity = 0.0;
        self.request_requery();
    }

    /// Overscan for a given velocity: `floor(overscan * min(4, 1 + velocity / threshold))`,
    /// bounded by `[overscan, max_overscan]`.
    pub fn widened_overscan(&self, velocity: f64) -> usize {
        let base = self.options.overscan;
        let threshold = self.options.velocity_threshold;
        if !(threshold > 0.0) || !(velocity > 0.0) {
            return base;
        }
        let factor = (1.0 + velocity / threshold).min(MAX_OVERSCAN_FACTOR);
        let widened = (base as f64 * factor) as usize;
        widened.min(self.options.max_overscan).max(base)
    }

    fn apply(&mut self, now_ms: u64) {
        self.applied_offset = self.live_offset;
        self.last_applied_ms = Some(now_ms);
        self.dynamic_overscan = self.widened_overscan(self.velocity);
        self.transition(CoordinatorState::Active);
        self.arm_idle(now_ms);
        self.request_frame(self.dynamic_overscan);
    }

    fn settle(&mut self) {
        self.applied_offset = self.live_offset;
        self.velocity = 0.0;
        self.direction = None;
        self.dynamic_overscan = self.options.overscan;
        self.transition(CoordinatorState::Idle);
        self.request_frame(self.dynamic_overscan);
    }

    fn arm_idle(&mut self, now_ms: u64) {
        self.idle_due_ms = Some(now_ms.saturating_add(self.options.idle_delay_ms));
    }

    fn request_frame(&mut self, overscan: usize) {
        self.frame = Some(FrameRequest { overscan });
    }

    fn transition(&mut self, next: CoordinatorState) {
        if self.state != next {
            adebug!(from = ?self.state, to = ?next, "coordinator state");
            self.state = next;
        }
    }
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new(CoordinatorOptions::default())
    }
}

/// Detached or unmeasured viewports report as zero.
fn sanitize_viewport(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 { size } else { 0.0 }
}
