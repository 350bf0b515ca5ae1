// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-click and Escape dismissal across two stacked panels.
//!
//! Run:
//! - `cargo run -p tether_demos --example dismissal`

use std::time::Duration;

use kurbo::{Point, Rect, Size};
use tether_overlay::config::{AnimationConfig, OverlayConfig};
use tether_overlay::context::OverlayContext;
use tether_overlay::lifecycle::LifecycleController;
use tether_overlay::surface::{PanelStyle, Surface};
use tether_overlay::trigger::Trigger;
use tether_overlay::types::{AnchorId, PanelId, Registration};

struct Page {
    panels: Vec<(PanelId, Rect)>,
}

impl Surface for Page {
    fn anchor_rect(&self, anchor: AnchorId) -> Option<Rect> {
        let x = f64::from(anchor.0) * 300.0;
        Some(Rect::new(x, 40.0, x + 120.0, 72.0))
    }

    fn panel_rect(&self, panel: PanelId) -> Option<Rect> {
        self.panels
            .iter()
            .find(|(p, _)| *p == panel)
            .map(|(_, r)| *r)
            .or(Some(Rect::new(0.0, 0.0, 180.0, 120.0)))
    }

    fn viewport(&self) -> Size {
        Size::new(1024.0, 768.0)
    }

    fn apply_style(&mut self, panel: PanelId, style: &PanelStyle) {
        let rect = Rect::new(style.left, style.top, style.left + 180.0, style.top + 120.0);
        self.panels.retain(|(p, _)| *p != panel);
        self.panels.push((panel, rect));
    }
}

fn main() {
    tracing_subscriber::fmt().init();

    let now = Duration::ZERO;
    let mut cx = OverlayContext::new(Page { panels: Vec::new() }, OverlayConfig::default());
    cx.register_provider();

    let mut triggers: Vec<_> = (1..=2)
        .map(|i| {
            Trigger::new(
                Registration::new(PanelId(i), AnchorId(i), "popover"),
                LifecycleController::new(AnimationConfig::DISABLED)
                    .with_close_on_outside(true)
                    .with_close_on_escape(true),
            )
        })
        .collect();
    for t in &mut triggers {
        t.connect(&mut cx);
        t.set_open(&mut cx, true, now);
    }

    if let Some(req) = cx.escape_pressed() {
        println!("escape -> {:?}", req.panel);
        for t in &mut triggers {
            t.handle_dismiss(&mut cx, &req, now);
        }
    }

    let click = Point::new(10.0, 700.0);
    for req in cx.pointer_down(click) {
        println!("click at {click:?} -> {:?} ({:?})", req.panel, req.reason);
        for t in &mut triggers {
            t.handle_dismiss(&mut cx, &req, now);
        }
    }

    let open: Vec<_> = triggers
        .iter()
        .filter(|t| t.lifecycle().is_visible())
        .map(Trigger::panel)
        .collect();
    println!("still open: {open:?}");
}
