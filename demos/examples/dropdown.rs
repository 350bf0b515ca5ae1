// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A dropdown driven through its whole lifecycle against a fake page.
//!
//! Opens the menu, scrolls the page in a burst, lets the debounced recompute
//! run, then closes with an exit animation.
//!
//! Run:
//! - `RUST_LOG=info,tether_overlay=trace cargo run -p tether_demos --example dropdown`

use std::time::Duration;

use kurbo::{Rect, Size, Vec2};
use tether_overlay::config::{AnimationConfig, OverlayConfig};
use tether_overlay::context::OverlayContext;
use tether_overlay::lifecycle::LifecycleController;
use tether_overlay::surface::{PanelStyle, Surface};
use tether_overlay::trigger::Trigger;
use tether_overlay::types::{AnchorId, PanelId, Registration};
use tracing_subscriber::EnvFilter;

struct Page {
    scroll: f64,
}

impl Surface for Page {
    fn anchor_rect(&self, _anchor: AnchorId) -> Option<Rect> {
        Some(Rect::new(40.0, 380.0, 200.0, 412.0) - Vec2::new(0.0, self.scroll))
    }

    fn panel_rect(&self, _panel: PanelId) -> Option<Rect> {
        Some(Rect::new(0.0, 0.0, 220.0, 260.0))
    }

    fn viewport(&self) -> Size {
        Size::new(800.0, 600.0)
    }

    fn apply_style(&mut self, panel: PanelId, style: &PanelStyle) {
        println!(
            "  style {:?}: top={} left={} side={} z={}",
            panel,
            style.top,
            style.left,
            style.side.name(),
            style.z_index
        );
    }

    fn bind_viewport_listeners(&mut self, debounce: Duration) {
        println!("  listeners bound ({debounce:?})");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let ms = Duration::from_millis;
    let mut cx = OverlayContext::new(Page { scroll: 0.0 }, OverlayConfig::default());
    let provider = cx.register_provider();

    let mut menu = Trigger::new(
        Registration::new(PanelId(1), AnchorId(1), "File menu").with_offset(4),
        LifecycleController::new(AnimationConfig::default()).with_close_on_outside(true),
    );

    tracing::info!("connect + open");
    menu.connect(&mut cx);
    menu.set_open(&mut cx, true, ms(0));

    tracing::info!("scroll burst");
    for (i, t) in [10u64, 14, 18, 22].into_iter().enumerate() {
        cx.surface_mut().scroll = 60.0 * (i as f64 + 1.0);
        cx.viewport_event(ms(t));
        cx.poll(ms(t));
    }
    if let Some(due) = cx.next_deadline() {
        println!("  recompute due at {due:?}");
        cx.poll(due);
    }

    tracing::info!("close");
    menu.set_open(&mut cx, false, ms(100));
    if let Some(deadline) = menu.lifecycle().next_deadline() {
        menu.tick(&mut cx, deadline);
    }

    if let Some(p) = cx.provider_mut(provider) {
        println!("render patches: {:?}", p.take_render_queue());
    }
    cx.dispose();
}
