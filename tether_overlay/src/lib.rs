// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tether Overlay: a deterministic, `no_std` host for anchored floating panels.
//!
//! ## Overview
//!
//! This crate keeps dropdowns, menus and popovers glued to their anchors. It
//! does not touch a real document. The host implements [`Surface`] (measure
//! rects, apply styles, request frames) and feeds in events and time; the
//! crate decides what to recompute, when, and with which placement from
//! [`tether_geometry`].
//!
//! ## Pieces
//!
//! - [`Registry`](crate::registry::Registry): which anchor each panel is
//!   measured against.
//! - [`LayoutScheduler`](crate::scheduler::LayoutScheduler): trailing-edge
//!   debounce for resize/scroll bursts and bounded per-frame retries for
//!   panels that are not mounted yet.
//! - [`Provider`](crate::provider::Provider): keyed slots holding each
//!   panel's live [`Registration`](crate::types::Registration), derived
//!   classes and attributes, and a render queue.
//! - [`LifecycleController`](crate::lifecycle::LifecycleController): the
//!   `Closed → Open → Closing → Closed` machine with exit animation.
//! - [`Trigger`](crate::trigger::Trigger): applies lifecycle effects for one
//!   panel.
//! - [`OverlayContext`](crate::context::OverlayContext): owns all of the
//!   above for one page. There are no globals.
//!
//! ## Time
//!
//! Time is a monotonic [`Duration`](core::time::Duration) supplied by the
//! host. Nothing here reads a clock, so every sequence of calls is
//! reproducible.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Rect, Size};
//! use tether_overlay::config::OverlayConfig;
//! use tether_overlay::context::OverlayContext;
//! use tether_overlay::surface::{PanelStyle, Surface};
//! use tether_overlay::trigger::Trigger;
//! use tether_overlay::types::{AnchorId, PanelId, Registration};
//!
//! #[derive(Default)]
//! struct Page {
//!     applied: Vec<PanelStyle>,
//! }
//!
//! impl Surface for Page {
//!     fn anchor_rect(&self, _: AnchorId) -> Option<Rect> {
//!         Some(Rect::new(20.0, 500.0, 120.0, 530.0))
//!     }
//!     fn panel_rect(&self, _: PanelId) -> Option<Rect> {
//!         Some(Rect::new(0.0, 0.0, 200.0, 150.0))
//!     }
//!     fn viewport(&self) -> Size {
//!         Size::new(1024.0, 600.0)
//!     }
//!     fn apply_style(&mut self, _: PanelId, style: &PanelStyle) {
//!         self.applied.push(*style);
//!     }
//! }
//!
//! let mut cx = OverlayContext::new(Page::default(), OverlayConfig::default());
//! cx.register_provider();
//!
//! let mut menu = Trigger::with_defaults(Registration::new(PanelId(1), AnchorId(1), "menu"));
//! menu.connect(&mut cx);
//! menu.set_open(&mut cx, true, Duration::ZERO);
//!
//! let style = cx.surface().applied.last().unwrap();
//! assert_eq!((style.top, style.left), (530.0, 20.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod context;
pub mod error;
pub mod lifecycle;
pub mod provider;
pub mod registry;
pub mod scheduler;
pub mod surface;
pub mod trigger;
pub mod types;

pub use context::{OverlayContext, PositionOutcome};
pub use error::MeasureError;
pub use surface::{PanelStyle, Surface};
pub use trigger::Trigger;
