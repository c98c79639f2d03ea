// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use perch_geometry::{
    Axes, Dimensions, Direction, Document, ElementId, ElementNode, Placement, RectSnapshot,
    Viewport, compute_offset, is_clear,
};
use perch_placement::{Engine, EngineOptions, Offsets, PlacementRequest, Positioner};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

const VIEWPORT: RectSnapshot = RectSnapshot::new(0.0, 0.0, 1280.0, 720.0);

fn dims(width: f64, height: f64) -> Dimensions {
    Dimensions {
        element: RectSnapshot::new(0.0, 0.0, width, height),
        parent: VIEWPORT,
        viewport: VIEWPORT,
    }
}

fn gen_anchors(count: usize) -> Vec<RectSnapshot> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            RectSnapshot::new(
                rng.next_f64() * 1200.0,
                rng.next_f64() * 690.0,
                80.0,
                30.0,
            )
        })
        .collect()
}

fn request(anchor: RectSnapshot, placement: Placement) -> PlacementRequest {
    PlacementRequest {
        element: dims(240.0, 160.0),
        anchor,
        placement,
        offsets: Offsets::default(),
        boundary: None,
        direction: Direction::Ltr,
    }
}

fn bench_offsets(c: &mut Criterion) {
    let mut group = c.benchmark_group("offsets");
    let el = dims(240.0, 160.0);
    let anchor = RectSnapshot::new(500.0, 300.0, 80.0, 30.0);
    group.throughput(Throughput::Elements(Placement::ALL.len() as u64));
    for dir in [Direction::Ltr, Direction::Rtl] {
        group.bench_function(format!("compute_all_{dir:?}"), |b| {
            b.iter(|| {
                for p in Placement::ALL {
                    black_box(compute_offset(&el, &anchor, p, 4.0, 2.0, false, dir));
                }
            });
        });
    }
    group.bench_function("is_clear_all_axes", |b| {
        let moved = el.moved_to(compute_offset(
            &el,
            &anchor,
            Placement::Bottom,
            0.0,
            0.0,
            false,
            Direction::Ltr,
        ));
        b.iter(|| black_box(is_clear(black_box(&moved), None, Axes::All)));
    });
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let engine = Engine::new(EngineOptions::dropdown());
    let tooltip = Engine::new(EngineOptions::tooltip());

    let clear = request(RectSnapshot::new(200.0, 200.0, 80.0, 30.0), Placement::Bottom);
    group.bench_function("first_try", |b| {
        b.iter(|| black_box(engine.resolve(black_box(&clear))));
    });

    // Every candidate collides, so the full budget is spent before the fallback.
    let cramped = PlacementRequest {
        element: dims(1000.0, 160.0),
        ..request(RectSnapshot::new(0.0, 0.0, 1280.0, 30.0), Placement::Right)
    };
    group.bench_function("exhaust_budget", |b| {
        b.iter(|| black_box(engine.resolve(black_box(&cramped))));
    });

    let anchors = gen_anchors(1024);
    group.throughput(Throughput::Elements(anchors.len() as u64));
    for (name, engine) in [("random_dropdown", &engine), ("random_tooltip", &tooltip)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                for a in &anchors {
                    black_box(engine.resolve(&request(*a, Placement::Unset)));
                }
            });
        });
    }
    group.finish();
}

fn build_page(n: usize) -> (Document, Vec<(ElementId, ElementId)>) {
    let mut doc = Document::new(Viewport::new(1280.0, 720.0));
    let root = doc.root();
    let anchors = gen_anchors(n);
    let pairs = anchors
        .into_iter()
        .map(|a| {
            let anchor = doc.insert(Some(root), ElementNode::new(a.rect()));
            let panel = doc.insert(
                Some(root),
                ElementNode::new(Rect::new(0.0, 0.0, 240.0, 160.0)),
            );
            (panel, anchor)
        })
        .collect();
    (doc, pairs)
}

fn bench_positioner(c: &mut Criterion) {
    let mut group = c.benchmark_group("positioner");
    for &n in &[16usize, 128, 1024] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("open_position_close_n{n}"), |b| {
            b.iter_batched(
                || build_page(n),
                |(mut doc, pairs)| {
                    for (panel, anchor) in pairs {
                        let mut pos = Positioner::new(Placement::Unset, EngineOptions::dropdown());
                        pos.open();
                        let _ = black_box(pos.position(&mut doc, panel, anchor, None));
                        black_box(pos.close(&mut doc, panel));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_offsets, bench_resolve, bench_positioner);
criterion_main!(benches);
