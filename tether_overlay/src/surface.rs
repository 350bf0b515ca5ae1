// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host seam: measurement, style application, listeners and frames.
//!
//! The engine never talks to a real document. The host implements
//! [`Surface`] once and hands it to
//! [`OverlayContext::new`](crate::context::OverlayContext::new).

use core::time::Duration;

use kurbo::{Rect, Size};
use tether_geometry::{ListMetrics, Side};

use crate::types::{AnchorId, PanelId};

/// Imperative style written onto a positioned panel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanelStyle {
    /// `top` in viewport pixels.
    pub top: f64,
    /// `left` in viewport pixels.
    pub left: f64,
    /// `max-width`, from [`WidthMode::Relative`](tether_geometry::WidthMode::Relative).
    pub max_width: Option<f64>,
    /// `min-width`, from [`WidthMode::Adaptive`](tether_geometry::WidthMode::Adaptive).
    pub min_width: Option<f64>,
    /// `max-height` for the panel and its inner list, from list clamping.
    pub max_height: Option<f64>,
    /// Stacking value.
    pub z_index: i32,
    /// Value for the `side` attribute.
    pub side: Side,
}

/// Measurement and styling services provided by the host UI layer.
///
/// Rects are in viewport coordinates. Returning `None` means "not mounted";
/// the context retries on a later frame.
pub trait Surface {
    /// Bounding rect of an anchor element.
    fn anchor_rect(&self, anchor: AnchorId) -> Option<Rect>;

    /// Bounding rect of a panel element.
    fn panel_rect(&self, panel: PanelId) -> Option<Rect>;

    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Metrics of the panel's first content block when it is a scrollable list.
    fn list_metrics(&self, _panel: PanelId) -> Option<ListMetrics> {
        None
    }

    /// Write the computed style onto the panel.
    fn apply_style(&mut self, panel: PanelId, style: &PanelStyle);

    /// Ask for [`OverlayContext::on_frame`](crate::context::OverlayContext::on_frame)
    /// to be called on the next animation frame.
    fn request_frame(&mut self) {}

    /// Install the shared resize/scroll listener pair.
    fn bind_viewport_listeners(&mut self, _debounce: Duration) {}

    /// Remove the shared resize/scroll listener pair.
    fn unbind_viewport_listeners(&mut self) {}
}
