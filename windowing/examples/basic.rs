// Example: geometry queries over a large list with a few expanded rows.
use windowing::{Align, GeometryIndex, WindowConfig};

fn main() {
    let config = WindowConfig::new(1_000_000, 24.0)
        .with_expand_sizing(120.0)
        .with_expanded([3, 10])
        .with_sticky_indices([0]);
    let Ok(mut index) = GeometryIndex::new(config) else {
        eprintln!("invalid config");
        return;
    };

    let range = index.visible_range(480.0, 12_345.0, 3);
    println!("total_size={}", index.total_size());
    println!("visible_range={range:?}");
    println!("materialized={}", index.materialized_len());

    let mut rendered = Vec::new();
    index.for_each_rendered_placement(range, |i, e| rendered.push((i, e)));
    println!("first_rendered={:?}", rendered.first());

    let off = index.offset_for_index(999_999, Align::End, 480.0, 12_345.0).max(0.0);
    println!("after scroll_to_index: offset={off}");
    println!("total_size (fully materialized)={}", index.total_size());
}
