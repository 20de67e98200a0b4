//! Grid layout benchmarks.

use common::{Axis, Breakpoint, Viewport};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use grid_layout::{
    generate_grid_layout, remap_for_breakpoint, GridLayoutOptions, RawGridItem, ResponsiveSize,
};

fn items(count: usize) -> Vec<RawGridItem<()>> {
    (0..count)
        .map(|i| {
            let width = 2 + (i % 4) as u32;
            let height = 1 + (i % 3) as u32;
            let item = RawGridItem::sized(width, height).with_id(i as i64);
            // Every tenth item asks for a fixed spot
            if i % 10 == 0 {
                item.at((i / 10) as u32 * 6, 0)
            } else {
                item
            }
        })
        .collect()
}

/// Benchmark packing along each axis.
fn bench_layout(c: &mut Criterion) {
    let viewport = Viewport::default();
    let mut group = c.benchmark_group("grid_layout");

    for size in [10, 100, 500].iter() {
        let input = items(*size);
        group.bench_with_input(BenchmarkId::new("axis_x", size), &input, |b, input| {
            let options = GridLayoutOptions::default().with_margins(1, 1);
            b.iter(|| black_box(generate_grid_layout(input.clone(), &options, viewport)))
        });
        group.bench_with_input(BenchmarkId::new("axis_y", size), &input, |b, input| {
            let options = GridLayoutOptions::default().with_axis(Axis::Y);
            b.iter(|| black_box(generate_grid_layout(input.clone(), &options, viewport)))
        });
    }

    group.finish();
}

/// Benchmark responsive remapping.
fn bench_remap(c: &mut Criterion) {
    let size = ResponsiveSize::new(9, 6).at(4, 2);

    c.bench_function("remap_mobile", |b| {
        b.iter(|| black_box(remap_for_breakpoint(black_box(size), Breakpoint::Mobile)))
    });
}

criterion_group!(benches, bench_layout, bench_remap);
criterion_main!(benches);
