use windowing::{Align, WindowConfig};
use windowing_adapter::{CoordinatorOptions, WindowEngine, WindowEvent};

fn main() {
    // Example: a host loop feeding scroll samples, timers and frames to the engine without
    // holding any UI objects.
    //
    // A real host would:
    // - forward scroll/resize events as they arrive
    // - call tick(now_ms) once next_deadline() has passed
    // - call on_animation_frame() from its frame callback while needs_frame() is true
    // - render the rendered placements after each VisibleRangeChanged
    let options = CoordinatorOptions::new().with_initial_viewport_size(600.0);
    let Ok(engine) = WindowEngine::new(WindowConfig::new(100_000, 30.0), options) else {
        return;
    };
    let mut engine = engine.with_on_event(|event: &WindowEvent| {
        if let WindowEvent::VisibleRangeChanged { range, total_size } = event {
            println!("  range={range:?} total_size={total_size}");
        }
    });

    let mut now_ms = 0u64;
    let mut offset = 0.0;
    for step in 0..40u64 {
        now_ms += 4;
        // Accelerate, then flick back up for the last few samples.
        offset += if step < 32 { (step * 8) as f64 } else { -200.0 };
        let outcome = engine.on_scroll_sample(offset, now_ms);
        if step % 8 == 0 {
            println!("t={now_ms} offset={offset} outcome={outcome:?}");
        }
        engine.tick(now_ms);
        if now_ms % 16 == 0 && engine.needs_frame() {
            engine.on_animation_frame();
            println!("t={now_ms} state={:?}", engine.scroll_state());
        }
    }

    while let Some(deadline) = engine.next_deadline() {
        now_ms = deadline;
        engine.tick(now_ms);
        engine.on_animation_frame();
    }
    println!("settled: {:?}", engine.scroll_state());

    let target = engine.scroll_to_index(50_000, Align::Center, now_ms);
    engine.on_animation_frame();
    println!("scroll_to_index: offset={target} range={:?}", engine.current_range());

    engine.teardown();
}
