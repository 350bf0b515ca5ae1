// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use tether_geometry::{ListMetrics, PlacementOrigin, PositionRequest, WidthMode, compute_position};

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

const VIEWPORT: Size = Size::new(1280.0, 800.0);

/// Anchors scattered over the viewport, so a good share of them sit near an
/// edge and flip.
fn gen_anchors(count: usize, seed: u64) -> Vec<Rect> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let x0 = rng.next_f64() * (VIEWPORT.width - 120.0);
            let y0 = rng.next_f64() * (VIEWPORT.height - 32.0);
            Rect::new(x0, y0, x0 + 120.0, y0 + 32.0)
        })
        .collect()
}

fn bench_dropdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_position_dropdown");
    let panel = Rect::new(0.0, 0.0, 240.0, 180.0);
    for &n in &[64usize, 1024] {
        let anchors = gen_anchors(n, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("n{}", n), |b| {
            b.iter(|| {
                let mut flipped = 0usize;
                for &anchor in &anchors {
                    let req = PositionRequest::new(
                        anchor,
                        panel,
                        PlacementOrigin::BottomLeft,
                        PlacementOrigin::TopLeft,
                        VIEWPORT,
                    );
                    if let Ok(p) = compute_position(black_box(&req)) {
                        flipped += usize::from(!p.flip.is_empty());
                    }
                }
                black_box(flipped);
            })
        });
    }
    group.finish();
}

fn bench_all_origins(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_position_all_origins");
    let anchors = gen_anchors(128, 0xBADC_F00D_1234_5678);
    let panel = Rect::new(0.0, 0.0, 320.0, 400.0);
    group.throughput(Throughput::Elements(
        (anchors.len() * PlacementOrigin::ALL.len() * PlacementOrigin::ALL.len()) as u64,
    ));
    group.bench_function("n128x81", |b| {
        b.iter(|| {
            for &anchor in &anchors {
                for a in PlacementOrigin::ALL {
                    for t in PlacementOrigin::ALL {
                        let mut req = PositionRequest::new(anchor, panel, a, t, VIEWPORT);
                        req.offset = 4.0;
                        req.width_mode = WidthMode::Adaptive;
                        req.list = Some(ListMetrics {
                            natural_height: 900.0,
                        });
                        black_box(compute_position(&req).ok());
                    }
                }
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_dropdown, bench_all_origins);
criterion_main!(benches);
