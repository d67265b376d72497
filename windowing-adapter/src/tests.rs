use crate::*;

use std::sync::{Arc, Mutex};
use std::vec::Vec;

use windowing::{Align, GeometryIndex, ScrollDirection, VisibleRange, WindowConfig, WindowError};

fn geometry(count: usize, size: f64) -> GeometryIndex {
    GeometryIndex::new(WindowConfig::new(count, size)).unwrap()
}

fn coordinator(viewport_size: f64) -> ScrollCoordinator {
    ScrollCoordinator::new(CoordinatorOptions::new().with_initial_viewport_size(viewport_size))
}

fn engine(config: WindowConfig) -> WindowEngine {
    WindowEngine::new(
        config,
        CoordinatorOptions::new().with_initial_viewport_size(500.0),
    )
    .unwrap()
}

fn frame(c: &mut ScrollCoordinator, g: &mut GeometryIndex) -> (Option<VisibleRange>, Vec<WindowEvent>) {
    let mut events = Vec::new();
    let range = c.on_animation_frame(g, |e| events.push(e));
    (range, events)
}

#[test]
fn reversal_bypasses_debounce() {
    let mut c = ScrollCoordinator::default();
    assert_eq!(c.on_scroll_sample(100.0, 0), SampleOutcome::Applied);
    assert_eq!(c.direction(), Some(ScrollDirection::Forward));

    // 5 ms later, moving back up: applied at once despite the 16 ms window.
    assert_eq!(c.on_scroll_sample(80.0, 5), SampleOutcome::Applied);
    assert_eq!(c.applied_offset(), 80.0);
    assert_eq!(c.direction(), Some(ScrollDirection::Backward));
    assert_eq!(c.state(), CoordinatorState::Active);
}

#[test]
fn same_direction_within_debounce_is_deferred_and_reads_live_offset() {
    let mut c = ScrollCoordinator::default();
    assert_eq!(c.on_scroll_sample(100.0, 0), SampleOutcome::Applied);

    assert_eq!(c.on_scroll_sample(200.0, 5), SampleOutcome::Deferred);
    assert_eq!(c.state(), CoordinatorState::Pending);
    assert_eq!(c.applied_offset(), 100.0);
    assert_eq!(c.next_deadline(), Some(16));

    assert_eq!(c.on_scroll_sample(300.0, 10), SampleOutcome::Coalesced);

    c.tick(15);
    assert_eq!(c.applied_offset(), 100.0);

    // The deferred apply uses the latest position, not the one captured when scheduled.
    c.tick(16);
    assert_eq!(c.applied_offset(), 300.0);
    assert_eq!(c.state(), CoordinatorState::Active);
}

#[test]
fn reversal_cancels_pending_deferred_apply() {
    let mut c = ScrollCoordinator::default();
    c.on_scroll_sample(100.0, 0);
    assert_eq!(c.on_scroll_sample(200.0, 5), SampleOutcome::Deferred);
    assert_eq!(c.on_scroll_sample(150.0, 8), SampleOutcome::Applied);
    assert_eq!(c.applied_offset(), 150.0);

    // The cancelled deferred apply must not fire later.
    c.tick(16);
    assert_eq!(c.applied_offset(), 150.0);
}

#[test]
fn samples_below_noise_floor_are_ignored() {
    let mut c = ScrollCoordinator::default();
    c.on_scroll_sample(100.0, 0);
    assert_eq!(c.on_scroll_sample(100.5, 30), SampleOutcome::Ignored);
    assert_eq!(c.applied_offset(), 100.0);
    assert_eq!(c.live_offset(), 100.5);

    assert_eq!(c.on_scroll_sample(f64::NAN, 40), SampleOutcome::Ignored);
    assert_eq!(c.live_offset(), 100.5);
}

#[test]
fn one_requery_per_frame() {
    let mut g = geometry(1000, 50.0);
    let mut c = coordinator(500.0);
    c.on_scroll_sample(1000.0, 0);
    c.on_scroll_sample(2000.0, 20);
    assert!(c.needs_frame());

    let (range, events) = frame(&mut c, &mut g);
    // 50 units/ms is far above the threshold: overscan is 3 * 4.
    let expected = VisibleRange { start: 28, stop: 61 };
    assert_eq!(range, Some(expected));
    assert_eq!(
        events,
        [
            WindowEvent::VisibleRangeChanged {
                range: expected,
                total_size: 50_000.0,
            },
            WindowEvent::OffsetSettled { offset: 2000.0 },
        ]
    );

    let (range, events) = frame(&mut c, &mut g);
    assert!(range.is_none());
    assert!(events.is_empty());
    assert_eq!(c.last_range(), expected);
}

#[test]
fn velocity_widens_overscan() {
    let mut c = ScrollCoordinator::default();
    c.on_scroll_sample(10.0, 0);
    assert_eq!(c.dynamic_overscan(), 3);

    c.on_scroll_sample(410.0, 20);
    assert_eq!(c.velocity(), 20.0);
    assert_eq!(c.dynamic_overscan(), 12);

    // Slow scrolling stays at (almost) the base overscan.
    c.on_scroll_sample(412.0, 40);
    assert_eq!(c.dynamic_overscan(), 3);

    assert_eq!(c.widened_overscan(0.0), 3);
    assert_eq!(c.widened_overscan(2.0), 6);
    // 3 * 1.5 = 4.5 is floored.
    assert_eq!(c.widened_overscan(1.0), 4);
    assert_eq!(c.widened_overscan(1_000.0), 12);

    let capped = ScrollCoordinator::new(
        CoordinatorOptions::new()
            .with_overscan(40)
            .with_max_overscan(100),
    );
    assert_eq!(capped.widened_overscan(1_000.0), 100);

    let flat = ScrollCoordinator::new(CoordinatorOptions::new().with_velocity_threshold(0.0));
    assert_eq!(flat.widened_overscan(1_000.0), 3);
}

#[test]
fn idle_restores_base_overscan() {
    let mut g = geometry(1000, 50.0);
    let mut c = coordinator(500.0);
    c.on_scroll_sample(10.0, 0);
    c.on_scroll_sample(2010.0, 20);
    assert_eq!(c.dynamic_overscan(), 12);
    frame(&mut c, &mut g);

    c.tick(100);
    assert_eq!(c.state(), CoordinatorState::Active);
    assert!(!c.needs_frame());

    c.tick(170);
    assert_eq!(c.state(), CoordinatorState::Idle);
    assert_eq!(c.dynamic_overscan(), 3);
    assert_eq!(c.direction(), None);
    assert!(c.needs_frame());
    assert_eq!(c.next_deadline(), None);

    let (range, _) = frame(&mut c, &mut g);
    assert_eq!(range, Some(VisibleRange { start: 37, stop: 53 }));
}

#[test]
fn resize_forces_requery_at_same_offset() {
    let mut g = geometry(1000, 50.0);
    let mut c = coordinator(0.0);
    assert!(!c.needs_frame());

    c.on_resize(500.0);
    let (range, events) = frame(&mut c, &mut g);
    assert_eq!(range, Some(VisibleRange { start: 0, stop: 12 }));
    assert_eq!(events.len(), 2);

    // A detached viewport yields an empty window rather than an error.
    c.on_resize(0.0);
    let (range, _) = frame(&mut c, &mut g);
    assert_eq!(range, Some(VisibleRange::EMPTY));

    c.on_resize(f64::NAN);
    assert_eq!(c.viewport_size(), 0.0);
}

#[test]
fn teardown_cancels_pending_work() {
    let mut g = geometry(1000, 50.0);
    let mut c = coordinator(500.0);
    c.on_scroll_sample(100.0, 0);
    assert_eq!(c.on_scroll_sample(200.0, 5), SampleOutcome::Deferred);

    c.teardown();
    assert!(c.is_torn_down());
    assert!(!c.needs_frame());
    assert_eq!(c.next_deadline(), None);

    c.tick(1_000);
    assert_eq!(c.applied_offset(), 100.0);
    assert_eq!(c.on_scroll_sample(500.0, 1_001), SampleOutcome::Ignored);
    assert_eq!(frame(&mut c, &mut g).0, None);

    // Teardown twice is harmless.
    c.teardown();

    c.resume();
    assert!(c.needs_frame());
    assert_eq!(c.on_scroll_sample(600.0, 2_000), SampleOutcome::Applied);
}

#[test]
fn jump_does_not_widen_overscan() {
    let mut c = coordinator(500.0);
    c.jump_to(40_000.0, 0);
    assert_eq!(c.applied_offset(), 40_000.0);
    assert_eq!(c.dynamic_overscan(), 3);
    assert_eq!(c.state(), CoordinatorState::Active);
}

#[test]
fn engine_emits_initial_window_to_callback() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut e = engine(WindowConfig::new(1000, 50.0)).with_on_event({
        let seen = Arc::clone(&seen);
        move |ev: &WindowEvent| seen.lock().unwrap().push(*ev)
    });
    assert!(e.needs_frame());

    assert_eq!(e.on_animation_frame(), Some(VisibleRange { start: 0, stop: 12 }));
    assert_eq!(
        *seen.lock().unwrap(),
        [
            WindowEvent::VisibleRangeChanged {
                range: VisibleRange { start: 0, stop: 12 },
                total_size: 50_000.0,
            },
            WindowEvent::OffsetSettled { offset: 0.0 },
        ]
    );
}

#[test]
fn engine_host_boundary() {
    let mut e = engine(WindowConfig::new(1000, 50.0));
    assert_eq!(e.total_size(), 50_000.0);
    assert_eq!(e.visible_range(500.0, 0.0, 3), VisibleRange { start: 0, stop: 12 });
    assert_eq!(e.offset_for_index(999, Align::End, 500.0, 0.0), 49_500.0);
    assert_eq!(
        e.placement_for(1000),
        Err(WindowError::OutOfRange {
            index: 1000,
            count: 1000
        })
    );
    assert_eq!(e.placement_for(2).unwrap().offset, 100.0);
}

#[test]
fn scroll_to_index_clamps_only_the_lower_bound() {
    let mut e = engine(WindowConfig::new(1000, 50.0));
    assert_eq!(e.scroll_to_index(0, Align::End, 0), 0.0);

    assert_eq!(e.scroll_to_index(999, Align::End, 10), 49_500.0);
    assert_eq!(e.on_animation_frame(), Some(VisibleRange { start: 987, stop: 999 }));

    // Past `total_size - viewport_size` is kept as is.
    assert_eq!(e.scroll_to_index(999, Align::Start, 20), 49_950.0);
    assert_eq!(e.scroll_state().offset, 49_950.0);
}

#[test]
fn configure_rejects_invalid_and_keeps_previous() {
    let mut e = engine(WindowConfig::new(1000, 50.0));
    e.on_animation_frame();

    let err = e.configure(WindowConfig::new(10, 50.0).with_estimated_size(-1.0));
    assert!(matches!(err, Err(WindowError::InvalidConfig(_))));
    assert_eq!(e.config().count, 1000);
    assert!(!e.needs_frame());

    e.configure(WindowConfig::new(10, 50.0)).unwrap();
    assert!(e.needs_frame());
    assert_eq!(e.on_animation_frame(), Some(VisibleRange { start: 0, stop: 9 }));
}

#[test]
fn expand_toggle_requeries_with_new_total() {
    let mut e = engine(WindowConfig::new(1000, 50.0).with_expand_sizing(80.0));
    e.on_animation_frame();

    assert!(e.toggle_expanded(5));
    let mut events = Vec::new();
    e.on_animation_frame_with(|ev| events.push(ev));
    assert_eq!(
        events[0],
        WindowEvent::VisibleRangeChanged {
            range: VisibleRange { start: 0, stop: 11 },
            total_size: 50_080.0,
        }
    );

    e.set_expanded(5, false);
    e.invalidate_from(0);
    assert_eq!(e.total_size(), 50_000.0);
}

#[test]
fn rendered_placements_include_sticky_indexes() {
    let mut e = engine(WindowConfig::new(1000, 50.0).with_sticky_indices([0]));
    e.scroll_to_index(100, Align::Start, 0);
    assert_eq!(e.on_animation_frame(), Some(VisibleRange { start: 97, stop: 112 }));

    let mut out = Vec::new();
    e.collect_rendered_placements(&mut out);
    assert_eq!(out.len(), 17);
    assert_eq!(out[0].0, 0);
    assert_eq!(out[0].1.offset, 0.0);
    assert_eq!(out[1].0, 97);
    assert_eq!(out[1].1.offset, 4_850.0);
}

#[test]
fn scroll_state_snapshot() {
    let mut e = engine(WindowConfig::new(1000, 50.0));
    e.on_scroll_sample(250.0, 0);
    assert_eq!(
        e.scroll_state(),
        ScrollState {
            offset: 250.0,
            viewport_size: 500.0,
            overscan: 3,
            state: CoordinatorState::Active,
        }
    );
    assert_eq!(e.next_deadline(), Some(150));

    e.teardown();
    assert_eq!(e.next_deadline(), None);
    assert!(!e.needs_frame());
    e.resume();
    assert!(e.needs_frame());
}
