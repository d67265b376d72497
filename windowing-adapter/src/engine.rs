use alloc::sync::Arc;
use alloc::vec::Vec;

use windowing::{Align, GeometryEntry, GeometryIndex, VisibleRange, WindowConfig, WindowError};

use crate::{CoordinatorOptions, SampleOutcome, ScrollCoordinator, ScrollState, WindowEvent};

/// A callback fired for every [`WindowEvent`] emitted by a requery.
pub type EventCallback = Arc<dyn Fn(&WindowEvent) + Send + Sync>;

/// The host-facing windowing engine: a [`GeometryIndex`] driven by a [`ScrollCoordinator`].
///
/// The host owns every UI object and measurement. It feeds numeric inputs (scroll samples,
/// viewport sizes, config changes, timer and frame callbacks) and renders the ranges and
/// placements that come back.
#[derive(Clone)]
pub struct WindowEngine {
    geometry: GeometryIndex,
    coordinator: ScrollCoordinator,
    on_event: Option<EventCallback>,
}

impl WindowEngine {
    pub fn new(config: WindowConfig, options: CoordinatorOptions) -> Result<Self, WindowError> {
        let mut coordinator = ScrollCoordinator::new(options);
        coordinator.request_requery();
        Ok(Self {
            geometry: GeometryIndex::new(config)?,
            coordinator,
            on_event: None,
        })
    }

    pub fn with_on_event(mut self, on_event: impl Fn(&WindowEvent) + Send + Sync + 'static) -> Self {
        self.on_event = Some(Arc::new(on_event));
        self
    }

    pub fn set_on_event(&mut self, on_event: Option<impl Fn(&WindowEvent) + Send + Sync + 'static>) {
        self.on_event = on_event.map(|f| Arc::new(f) as _);
    }

    pub fn geometry(&self) -> &GeometryIndex {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut GeometryIndex {
        &mut self.geometry
    }

    pub fn coordinator(&self) -> &ScrollCoordinator {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut ScrollCoordinator {
        &mut self.coordinator
    }

    pub fn config(&self) -> &WindowConfig {
        self.geometry.config()
    }

    /// Replaces the config and schedules a requery. An invalid config is rejected and the
    /// previous one stays in effect.
    pub fn configure(&mut self, config: WindowConfig) -> Result<(), WindowError> {
        self.geometry.configure(config)?;
        self.coordinator.request_requery();
        Ok(())
    }

    /// Clones the current config, applies `f`, then delegates to [`Self::configure`].
    pub fn update_config(&mut self, f: impl FnOnce(&mut WindowConfig)) -> Result<(), WindowError> {
        self.geometry.update_config(f)?;
        self.coordinator.request_requery();
        Ok(())
    }

    pub fn set_expanded(&mut self, index: usize, expanded: bool) {
        self.geometry.set_expanded(index, expanded);
        self.coordinator.request_requery();
    }

    pub fn toggle_expanded(&mut self, index: usize) -> bool {
        let expanded = self.geometry.toggle_expanded(index);
        self.coordinator.request_requery();
        expanded
    }

    /// Drops cached geometry at or after `index` (e.g. after a single item was re-measured)
    /// and schedules a requery.
    pub fn invalidate_from(&mut self, index: usize) {
        self.geometry.invalidate_from(index);
        self.coordinator.request_requery();
    }

    pub fn total_size(&self) -> f64 {
        self.geometry.total_size()
    }

    pub fn visible_range(&mut self, viewport_size: f64, offset: f64, overscan: usize) -> VisibleRange {
        self.geometry.visible_range(viewport_size, offset, overscan)
    }

    pub fn placement_for(&mut self, index: usize) -> Result<GeometryEntry, WindowError> {
        self.geometry.size_and_position_for(index)
    }

    pub fn offset_for_index(
        &mut self,
        index: usize,
        align: Align,
        viewport_size: f64,
        current_offset: f64,
    ) -> f64 {
        self.geometry
            .offset_for_index(index, align, viewport_size, current_offset)
    }

    pub fn on_scroll_sample(&mut self, offset: f64, now_ms: u64) -> SampleOutcome {
        self.coordinator.on_scroll_sample(offset, now_ms)
    }

    pub fn on_resize(&mut self, viewport_size: f64) {
        self.coordinator.on_resize(viewport_size);
    }

    pub fn tick(&mut self, now_ms: u64) {
        self.coordinator.tick(now_ms);
    }

    /// Runs the pending requery (if any) and forwards its events to the callback.
    pub fn on_animation_frame(&mut self) -> Option<VisibleRange> {
        let on_event = self.on_event.clone();
        self.coordinator
            .on_animation_frame(&mut self.geometry, |event| {
                if let Some(cb) = &on_event {
                    cb(&event);
                }
            })
    }

    /// Same as [`Self::on_animation_frame`], additionally handing events to `emit`.
    pub fn on_animation_frame_with(
        &mut self,
        mut emit: impl FnMut(WindowEvent),
    ) -> Option<VisibleRange> {
        let on_event = self.on_event.clone();
        self.coordinator
            .on_animation_frame(&mut self.geometry, |event| {
                if let Some(cb) = &on_event {
                    cb(&event);
                }
                emit(event);
            })
    }

    /// Computes the offset for `index`, clamps it at 0 and jumps there.
    ///
    /// Only the lower bound is clamped; offsets past `total_size - viewport_size` are kept.
    /// Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align, now_ms: u64) -> f64 {
        let viewport_size = self.coordinator.viewport_size();
        let current = self.coordinator.applied_offset();
        let target = self
            .geometry
            .offset_for_index(index, align, viewport_size, current)
            .max(0.0);
        self.coordinator.jump_to(target, now_ms);
        target
    }

    /// The range produced by the last requery.
    pub fn current_range(&self) -> VisibleRange {
        self.coordinator.last_range()
    }

    /// Iterates over the indexes to render (last range plus sticky indexes) with their
    /// placements.
    pub fn for_each_rendered_placement(&mut self, f: impl FnMut(usize, GeometryEntry)) {
        let range = self.coordinator.last_range();
        self.geometry.for_each_rendered_placement(range, f);
    }

    /// Collects the rendered placements into `out` (clears `out` first).
    pub fn collect_rendered_placements(&mut self, out: &mut Vec<(usize, GeometryEntry)>) {
        out.clear();
        self.for_each_rendered_placement(|i, e| out.push((i, e)));
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.coordinator.scroll_state()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.coordinator.next_deadline()
    }

    pub fn needs_frame(&self) -> bool {
        self.coordinator.needs_frame()
    }

    /// Cancels all pending timers and frames. Call before the viewport goes away.
    pub fn teardown(&mut self) {
        self.coordinator.teardown();
    }

    pub fn resume(&mut self) {
        self.coordinator.resume();
    }
}

impl core::fmt::Debug for WindowEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowEngine")
            .field("geometry", &self.geometry)
            .field("coordinator", &self.coordinator)
            .finish_non_exhaustive()
    }
}
