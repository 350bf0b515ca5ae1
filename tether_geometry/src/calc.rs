// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placement function: anchor point, panel offset, single-pass flip, clamps.
//!
//! ## Flip rule
//!
//! On each axis the transform origin decides which way the panel grows from
//! the anchor point: `Start` grows towards the far edge, `End` towards the
//! near edge, and `Center` never flips. The *preferred room* is the distance
//! from the anchor point to the viewport edge in the growth direction. The
//! *opposite room* is measured the same way from the mirrored anchor point in
//! the mirrored direction, i.e. the room the panel would have after a flip.
//!
//! The preferred side is cramped when its room is below
//! `min(extent + flip_margin, flip_threshold)`. A cramped axis flips only when
//! the opposite room is strictly larger. Because the opposite room is exactly
//! what the flipped placement sees as its preferred room, running the result
//! back through [`compute_position`] never flips again.
//!
//! Flipping is single-pass. A panel larger than the room on both sides stays
//! overflowing; it is neither re-flipped nor shrunk.

use kurbo::{Point, Rect, Size};

use crate::error::GeometryError;
use crate::types::{Align, Flip, ListMetrics, PlacementOrigin, Side, WidthConstraint, WidthMode};
use crate::util::{validate_rect, validate_viewport};

/// Tunables shared by every panel positioned through one context.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PositionOptions {
    /// Extra room the preferred side must offer beyond the panel's extent.
    pub flip_margin: f64,
    /// Room on the preferred side that is always considered enough, however large the panel.
    pub flip_threshold: f64,
    /// Distance kept from the viewport edge when clamping.
    pub overflow_padding: f64,
}

impl PositionOptions {
    /// Defaults: 8px margin, 50px threshold, 8px padding.
    pub const DEFAULT: Self = Self {
        flip_margin: 8.0,
        flip_threshold: 50.0,
        overflow_padding: 8.0,
    };
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything [`compute_position`] needs for one panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionRequest {
    /// Anchor rect in viewport coordinates.
    pub anchor: Rect,
    /// Panel rect as currently measured; only its size matters.
    pub panel: Rect,
    /// Point on the anchor to attach to.
    pub anchor_origin: PlacementOrigin,
    /// Point of the panel that lands on the anchor point.
    pub transform_origin: PlacementOrigin,
    /// Viewport size.
    pub viewport: Size,
    /// Gap between anchor point and panel along the growth axis.
    pub offset: f64,
    /// Width coupling to the anchor.
    pub width_mode: WidthMode,
    /// Present when list clamping is enabled and the first block is a scrollable list.
    pub list: Option<ListMetrics>,
    /// Shared tunables.
    pub options: PositionOptions,
}

impl PositionRequest {
    /// A request with no offset, no width coupling, no list clamp and default options.
    pub fn new(
        anchor: Rect,
        panel: Rect,
        anchor_origin: PlacementOrigin,
        transform_origin: PlacementOrigin,
        viewport: Size,
    ) -> Self {
        Self {
            anchor,
            panel,
            anchor_origin,
            transform_origin,
            viewport,
            offset: 0.0,
            width_mode: WidthMode::None,
            list: None,
            options: PositionOptions::DEFAULT,
        }
    }
}

/// Result of a successful recompute.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Final top-left corner of the panel.
    pub origin: Point,
    /// Axes that were mirrored.
    pub flip: Flip,
    /// Anchor origin after mirroring.
    pub anchor_origin: PlacementOrigin,
    /// Transform origin after mirroring.
    pub transform_origin: PlacementOrigin,
    /// Side of the anchor the panel sits on.
    pub side: Side,
    /// Width limits from the width mode.
    pub width: WidthConstraint,
    /// Max-height cap for the panel and its inner list, when list clamping applied.
    pub max_height: Option<f64>,
}

impl Placement {
    /// Final `top` in pixels.
    pub fn top(&self) -> f64 {
        self.origin.y
    }

    /// Final `left` in pixels.
    pub fn left(&self) -> f64 {
        self.origin.x
    }
}

/// Compute where a panel goes.
///
/// Returns an error, never a position, when the anchor rect, panel rect or
/// viewport is non-finite or degenerate.
pub fn compute_position(req: &PositionRequest) -> Result<Placement, GeometryError> {
    let anchor = validate_rect(req.anchor)?;
    let panel = validate_rect(req.panel)?.size();
    let viewport = validate_viewport(req.viewport)?;
    let opts = &req.options;

    let primary = primary_axis(req.transform_origin);
    let v_offset = if primary == Axis::Vertical { req.offset } else { 0.0 };
    let h_offset = if primary == Axis::Horizontal { req.offset } else { 0.0 };

    let mut flip = Flip::empty();
    if axis_flips(
        AxisSpan::vertical(anchor, viewport),
        req.anchor_origin.vertical(),
        req.transform_origin.vertical(),
        panel.height + v_offset,
        opts,
    ) {
        flip |= Flip::VERTICAL;
    }
    if axis_flips(
        AxisSpan::horizontal(anchor, viewport),
        req.anchor_origin.horizontal(),
        req.transform_origin.horizontal(),
        panel.width + h_offset,
        opts,
    ) {
        flip |= Flip::HORIZONTAL;
    }

    let anchor_origin = req.anchor_origin.mirrored(flip);
    let transform_origin = req.transform_origin.mirrored(flip);

    let point = anchor_origin.point_in(anchor) + transform_origin.offset_for(panel);
    let left = point.x + growth_sign(transform_origin.horizontal()) * h_offset;
    let top = point.y + growth_sign(transform_origin.vertical()) * v_offset;

    let left = clamp_edge(left, panel.width, viewport.width, opts.overflow_padding, true);
    let top = clamp_edge(top, panel.height, viewport.height, opts.overflow_padding, false);

    let max_height = req.list.map(|list| {
        let available = viewport.height - top - opts.overflow_padding;
        list.natural_height
            .min(available.max(3.0 * opts.overflow_padding))
    });

    Ok(Placement {
        origin: Point::new(left, top),
        flip,
        anchor_origin,
        transform_origin,
        side: Side::of(transform_origin),
        width: req.width_mode.constraint(anchor.width()),
        max_height,
    })
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    Vertical,
    Horizontal,
}

/// The axis the offset pushes along: vertical unless the transform origin is
/// vertically centered.
fn primary_axis(transform_origin: PlacementOrigin) -> Axis {
    if transform_origin.vertical() == Align::Center {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

/// Anchor extent and viewport length projected onto one axis.
#[derive(Copy, Clone, Debug)]
struct AxisSpan {
    anchor_start: f64,
    anchor_len: f64,
    viewport_len: f64,
}

impl AxisSpan {
    fn vertical(anchor: Rect, viewport: Size) -> Self {
        Self {
            anchor_start: anchor.y0,
            anchor_len: anchor.height(),
            viewport_len: viewport.height,
        }
    }

    fn horizontal(anchor: Rect, viewport: Size) -> Self {
        Self {
            anchor_start: anchor.x0,
            anchor_len: anchor.width(),
            viewport_len: viewport.width,
        }
    }

    fn point(&self, align: Align) -> f64 {
        self.anchor_start + self.anchor_len * align.fraction()
    }
}

/// `+1` when a panel aligned at `align` grows towards the far edge, `-1`
/// towards the near edge, `0` when centered.
fn growth_sign(align: Align) -> f64 {
    match align {
        Align::Start => 1.0,
        Align::Center => 0.0,
        Align::End => -1.0,
    }
}

fn axis_flips(
    span: AxisSpan,
    anchor_align: Align,
    transform_align: Align,
    extent: f64,
    opts: &PositionOptions,
) -> bool {
    let point = span.point(anchor_align);
    let mirrored = span.point(anchor_align.mirrored());
    let (room, opposite) = match transform_align {
        Align::Center => return false,
        Align::Start => (span.viewport_len - point, mirrored),
        Align::End => (point, span.viewport_len - mirrored),
    };
    let needed = (extent + opts.flip_margin).min(opts.flip_threshold);
    room < needed && opposite > room
}

/// Pull a slightly overflowing edge back inside; leave large overflows alone.
///
/// The far edge is only considered when `far_edge` is set; vertical overflow
/// past the bottom is left to list clamping and page scroll.
fn clamp_edge(pos: f64, extent: f64, viewport_len: f64, padding: f64, far_edge: bool) -> f64 {
    if pos < 0.0 && -pos < extent {
        return padding;
    }
    if far_edge {
        let overflow = pos + extent - viewport_len;
        if overflow > 0.0 && overflow < extent {
            return (viewport_len - extent - padding).max(padding);
        }
    }
    pos
}
