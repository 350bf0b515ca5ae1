// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use tether_overlay::config::OverlayConfig;
use tether_overlay::context::OverlayContext;
use tether_overlay::surface::{PanelStyle, Surface};
use tether_overlay::types::{AnchorId, PanelId, Registration};

/// Every anchor in a column, every panel the same size.
struct Column {
    styles: usize,
}

impl Surface for Column {
    fn anchor_rect(&self, anchor: AnchorId) -> Option<Rect> {
        let y = f64::from(anchor.0 % 64) * 12.0;
        Some(Rect::new(40.0, y, 160.0, y + 10.0))
    }

    fn panel_rect(&self, _panel: PanelId) -> Option<Rect> {
        Some(Rect::new(0.0, 0.0, 200.0, 240.0))
    }

    fn viewport(&self) -> Size {
        Size::new(1280.0, 800.0)
    }

    fn apply_style(&mut self, _panel: PanelId, _style: &PanelStyle) {
        self.styles += 1;
    }
}

fn populated(n: u32) -> OverlayContext<Column, ()> {
    let mut cx = OverlayContext::new(Column { styles: 0 }, OverlayConfig::default());
    cx.register_provider();
    for i in 0..n {
        let mut reg = Registration::new(PanelId(i), AnchorId(i), ());
        reg.open = true;
        cx.connect(AnchorId(i), PanelId(i));
        cx.register_or_update(Rc::new(reg));
    }
    cx
}

fn bench_reposition_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("reposition_all");
    for &n in &[16u32, 256] {
        let mut cx = populated(n);
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_function(format!("n{}", n), |b| {
            b.iter(|| black_box(cx.reposition_all().len()))
        });
    }
    group.finish();
}

fn bench_debounced_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("debounced_burst");
    group.bench_function("n64_events100", |b| {
        b.iter_batched(
            || populated(64),
            |mut cx| {
                let ms = std::time::Duration::from_millis;
                for t in 0..100 {
                    cx.viewport_event(ms(t));
                    cx.poll(ms(t));
                }
                cx.poll(ms(1000));
                black_box(cx.surface().styles);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_reposition_all, bench_debounced_burst);
criterion_main!(benches);
