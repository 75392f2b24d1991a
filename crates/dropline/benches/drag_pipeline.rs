//! Benchmarks for the drag hot path.
//!
//! Measures:
//! - Insertion-index lookup over long lists
//! - One pointer sample across a board of lists
//! - A full press, sweep and release gesture

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dropline::locator::{insertion_at, insertion_after};
use dropline::{BeginEnd, ContainerId, ContainerOptions, DragManager, Orientation, RectLayout};
use dropline_core::geometry::LayoutRect;
use dropline_core::math::Vec2;

const SLOT: f32 = 40.0;
const COLUMN: f32 = 300.0;

fn extents(count: usize) -> Vec<BeginEnd> {
    (0..count)
        .map(|i| BeginEnd::new(i as f32 * SLOT, (i + 1) as f32 * SLOT))
        .collect()
}

/// `columns` side-by-side lists of `slots` items each, sharing one group.
fn board(columns: usize, slots: usize) -> (DragManager, Vec<ContainerId>) {
    let mut manager = DragManager::default().with_threshold(0.0);
    let sizes = vec![SLOT; slots];
    let ids = (0..columns)
        .map(|column| {
            let rect = LayoutRect::new(column as f32 * COLUMN, 0.0, COLUMN - 20.0, slots as f32 * SLOT + 100.0);
            manager
                .register(
                    RectLayout::stacked(Orientation::Vertical, rect, &sizes),
                    ContainerOptions::new().group_name("board"),
                )
                .expect("valid options")
        })
        .collect();
    (manager, ids)
}

fn bench_locator(c: &mut Criterion) {
    let mut group = c.benchmark_group("locator");

    for count in [10, 100, 1000, 10000] {
        let extents = extents(count);
        let pos = count as f32 * SLOT * 0.73;
        group.bench_with_input(BenchmarkId::new("insertion_at", count), &extents, |b, extents| {
            b.iter(|| insertion_at(black_box(extents), black_box(pos)));
        });
        group.bench_with_input(BenchmarkId::new("insertion_after", count), &extents, |b, extents| {
            b.iter(|| insertion_after(black_box(extents), black_box(pos)));
        });
    }

    group.finish();
}

fn bench_pointer_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag/sample");

    for (columns, slots) in [(2, 10), (4, 50), (8, 200)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{columns}x{slots}")),
            &(columns, slots),
            |b, &(columns, slots)| {
                let (mut manager, ids) = board(columns, slots);
                manager
                    .start_drag(ids[0], 0, Vec2::new(10.0, SLOT / 2.0))
                    .expect("start");
                let height = slots as f32 * SLOT;
                let mut step = 0usize;

                b.iter(|| {
                    // Walk the pointer across every column so each sample moves the placeholder.
                    step = step.wrapping_add(1);
                    let x = (step % columns) as f32 * COLUMN + 10.0;
                    let y = (step * 37 % slots) as f32 / slots as f32 * height;
                    manager.update(black_box(Vec2::new(x, y))).expect("active")
                });
            },
        );
    }

    group.finish();
}

fn bench_full_gesture(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag/gesture");

    for slots in [10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(slots), &slots, |b, &slots| {
            let (mut manager, ids) = board(2, slots);
            let height = slots as f32 * SLOT;

            b.iter(|| {
                manager
                    .start_drag(ids[0], 0, Vec2::new(10.0, SLOT / 2.0))
                    .expect("start");
                for i in 0..20 {
                    let y = i as f32 / 20.0 * height;
                    manager.update(Vec2::new(COLUMN + 10.0, y)).expect("active");
                }
                let results = manager.end_drag().expect("active");
                // Flush deferred animation resets before the next press.
                manager.tick(std::time::Duration::from_secs(1));
                black_box(results)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_locator,
    bench_pointer_sample,
    bench_full_gesture
);
criterion_main!(benches);
