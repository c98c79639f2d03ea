// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use perch_broadcast::{
    Broadcaster, Change, EventKind, ManualHost, MutationRecord, ViewportEvent,
};
use perch_geometry::{Document, ElementId, ElementNode, Viewport};

fn event(i: u32) -> ViewportEvent {
    ViewportEvent {
        width: 1280.0 - f64::from(i),
        height: 720.0,
        scroll_x: 0.0,
        scroll_y: 0.0,
    }
}

fn tagged(n: u32) -> (ManualHost<u32>, Broadcaster<u32>) {
    let mut host = ManualHost::new();
    let mut bc = Broadcaster::default();
    for el in 0..n {
        bc.register(&mut host, EventKind::Resize, el);
    }
    (host, bc)
}

fn bench_register(c: &mut Criterion) {
    let mut group = c.benchmark_group("register");
    for &n in &[32u32, 256, 1024] {
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_function(format!("register_unregister_n{n}"), |b| {
            b.iter_batched(
                || (ManualHost::<u32>::new(), Broadcaster::<u32>::default()),
                |(mut host, mut bc)| {
                    for el in 0..n {
                        bc.register(&mut host, EventKind::Resize, el);
                    }
                    for el in 0..n {
                        bc.unregister(&mut host, EventKind::Resize, el);
                    }
                    black_box(host.listener_count(EventKind::Resize));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("burst");
    for &n in &[32u32, 256, 1024] {
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_function(format!("debounced_burst_of_10_n{n}"), |b| {
            b.iter_batched(
                || tagged(n),
                |(mut host, mut bc)| {
                    for i in 0..10 {
                        bc.native_event(&mut host, EventKind::Resize, event(i));
                    }
                    for t in host.advance(10) {
                        black_box(bc.timer_fired(t));
                    }
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("degraded_burst_of_10_n{n}"), |b| {
            b.iter_batched(
                || {
                    let mut host = ManualHost::without_mutation_observer();
                    let mut bc = Broadcaster::default();
                    for el in 0..n {
                        bc.register(&mut host, EventKind::Resize, el);
                    }
                    (host, bc)
                },
                |(mut host, mut bc)| {
                    for i in 0..10 {
                        black_box(bc.native_event(&mut host, EventKind::Resize, event(i)));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn deep_chain(depth: usize) -> (Document, ElementId, ElementId) {
    let mut doc = Document::new(Viewport::new(1280.0, 720.0));
    let top = doc.insert(
        Some(doc.root()),
        ElementNode::new(Rect::new(0.0, 0.0, 200.0, 200.0)),
    );
    let mut leaf = top;
    for _ in 0..depth {
        leaf = doc.insert(Some(leaf), ElementNode::new(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }
    (doc, top, leaf)
}

fn bench_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation");
    for &depth in &[4usize, 32, 256] {
        let (doc, top, leaf) = deep_chain(depth);
        let mut host = ManualHost::new();
        let mut bc = Broadcaster::default();
        bc.register(&mut host, EventKind::Mutate, top);
        let record = MutationRecord {
            target: leaf,
            change: Change::ChildList,
        };
        group.bench_function(format!("closest_tagged_ancestor_depth{depth}"), |b| {
            b.iter(|| black_box(bc.mutation(black_box(record), &doc)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_register, bench_burst, bench_mutation);
criterion_main!(benches);
