use box_timeline::api::{TimelineConfig, TimelineEngine};
use box_timeline::core::{
    BoxSizeTable, BoxSlice, FrameSpec, PriceBox, Tick, TrendGeometry, Viewport, VisibilityFilter,
    Window, build_frames, collapse_frames, dedupe, default_box_sizes, order_boxes,
    project_entries,
};
use box_timeline::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_slices(len: usize) -> Vec<BoxSlice> {
    let sizes = default_box_sizes();
    (0..len)
        .map(|i| {
            let boxes = sizes
                .iter()
                .enumerate()
                .map(|(scale, size)| {
                    let value = if (i / (scale + 1)) % 2 == 0 { *size } else { -size };
                    PriceBox::new(100.0 + size, 100.0, value).expect("valid generated box")
                })
                .collect();
            BoxSlice::new(i.to_string(), boxes)
        })
        .collect()
}

fn bench_order_and_snap(c: &mut Criterion) {
    let table = BoxSizeTable::default();
    let boxes: Vec<PriceBox> = (0..32)
        .map(|i| {
            let value = (i as f64 * 37.5) - 600.0;
            PriceBox::new(10.0, 5.0, value).expect("valid generated box")
        })
        .collect();

    c.bench_function("order_boxes_32", |b| {
        b.iter(|| {
            let _ = order_boxes(black_box(&boxes), black_box(&table));
        })
    });
}

fn bench_dedupe_1k(c: &mut Criterion) {
    let table = BoxSizeTable::default();
    let slices = generated_slices(1_000);
    let spec = FrameSpec::new(
        Window::new(0, 8).expect("valid window"),
        VisibilityFilter::All,
        &table,
    );

    c.bench_function("dedupe_1k", |b| {
        b.iter(|| {
            let _ = dedupe(black_box(&slices), spec);
        })
    });
}

fn bench_trend_projection_1k(c: &mut Criterion) {
    let table = BoxSizeTable::default();
    let slices = generated_slices(1_000);
    let spec = FrameSpec::new(
        Window::new(2, 6).expect("valid window"),
        VisibilityFilter::All,
        &table,
    );
    let entries = collapse_frames(&build_frames(&slices, spec));
    let geometry = TrendGeometry::new(12.0, 600.0).expect("valid geometry");

    c.bench_function("trend_projection_1k", |b| {
        b.iter(|| {
            let _ = project_entries(black_box(&entries), black_box(geometry));
        })
    });
}

fn bench_engine_tail_tick_1k(c: &mut Criterion) {
    let config = TimelineConfig::new(Viewport::new(1600, 900));
    let mut engine = TimelineEngine::new(NullRenderer::default(), config).expect("engine init");
    let slices = generated_slices(1_000);
    engine
        .set_history("BTCUSD", slices.clone())
        .expect("set history");
    let _ = engine.timeline_entries("BTCUSD");
    let mut tail = slices.last().cloned().expect("tail slice");
    let mut timestamp = 0_i64;

    c.bench_function("engine_tail_tick_1k", |b| {
        b.iter(|| {
            timestamp += 1;
            tail.boxes[0] = tail.boxes[0].with_value(-tail.boxes[0].value);
            let tick = Tick::new("BTCUSD", 100.0, timestamp);
            engine.apply_tick(tick, Some(tail.clone()));
            let _ = engine.timeline_entries(black_box("BTCUSD"));
        })
    });
}

criterion_group!(
    benches,
    bench_order_and_snap,
    bench_dedupe_1k,
    bench_trend_projection_1k,
    bench_engine_tail_tick_1k
);
criterion_main!(benches);
