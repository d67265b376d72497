// Example: sizes computed on demand, then a single item re-measured.
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use windowing::{GeometryIndex, SizingRule, WindowConfig};

fn main() {
    let measured = Arc::new(AtomicU32::new(0));
    let sizing = SizingRule::computed({
        let measured = Arc::clone(&measured);
        move |i| 20.0 + (i % 3) as f64 * 10.0 + f64::from(measured.load(Ordering::Relaxed))
    });
    let config = WindowConfig::new(10_000, sizing).with_estimated_size(30.0);
    let Ok(mut index) = GeometryIndex::new(config) else {
        return;
    };

    let range = index.visible_range(300.0, 0.0, 2);
    println!("range={range:?} materialized={}", index.materialized_len());
    println!("estimated total_size={}", index.total_size());

    // Item heights grew by 5: everything from index 0 on must be recomputed.
    measured.store(5, Ordering::Relaxed);
    index.invalidate_from(0);
    let range = index.visible_range(300.0, 0.0, 2);
    println!("after re-measure: range={range:?} total_size={}", index.total_size());
}
