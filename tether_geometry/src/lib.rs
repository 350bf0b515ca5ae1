// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tether Geometry: Kurbo-native placement math for anchored overlays.
//!
//! Tether Geometry answers one question: given an anchor rect, a measured
//! panel and a viewport, where does the panel's top-left corner go?
//!
//! - Two independent [`PlacementOrigin`]s pick the attachment point on the
//!   anchor and the point of the panel that lands on it.
//! - Each axis may flip once when the preferred side is cramped and the other
//!   side is roomier ([`Flip`]).
//! - Slight edge overflow is clamped back inside; large intentional
//!   off-screen placements are left alone.
//! - Scrollable lists can be capped to the room left below the panel.
//! - [`WidthMode`] couples the panel width to the anchor width.
//!
//! ## Not a scheduler
//!
//! Everything here is a pure function of its inputs. Measuring elements,
//! retrying when they are not mounted yet, debouncing viewport events and
//! applying styles all live in `tether_overlay`.
//!
//! ## Validity
//!
//! A rect is *valid* when all four coordinates are finite and
//! *non-degenerate* when width and height are positive. Anything else yields a
//! [`GeometryError`] instead of a position, see [`validate_rect`].
//!
//! ## API overview
//!
//! - [`compute_position`]: the placement function.
//! - [`PositionRequest`] / [`PositionOptions`]: inputs and tunables.
//! - [`Placement`]: final origin, flips, effective origins, [`Side`], width
//!   constraint and optional max-height.
//! - [`rect_from_tlwh`]: build a rect from DOM-style `{top, left, width, height}`.
//!
//! ## Example
//!
//! ```
//! use kurbo::Size;
//! use tether_geometry::{
//!     Flip, PlacementOrigin, PositionRequest, compute_position, rect_from_tlwh,
//! };
//!
//! let viewport = Size::new(1024.0, 600.0);
//! let panel = rect_from_tlwh(0.0, 0.0, 200.0, 150.0);
//!
//! // Room below the anchor: stays below.
//! let req = PositionRequest::new(
//!     rect_from_tlwh(500.0, 20.0, 100.0, 30.0),
//!     panel,
//!     PlacementOrigin::BottomLeft,
//!     PlacementOrigin::TopLeft,
//!     viewport,
//! );
//! let placed = compute_position(&req).unwrap();
//! assert_eq!((placed.top(), placed.left()), (530.0, 20.0));
//! assert!(placed.flip.is_empty());
//!
//! // Anchor pushed towards the bottom edge: flips above.
//! let req = PositionRequest {
//!     anchor: rect_from_tlwh(560.0, 20.0, 100.0, 30.0),
//!     ..req
//! };
//! let placed = compute_position(&req).unwrap();
//! assert_eq!(placed.flip, Flip::VERTICAL);
//! assert_eq!(placed.transform_origin, PlacementOrigin::BottomLeft);
//! assert_eq!(placed.top(), 410.0);
//! ```
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

pub mod calc;
pub mod error;
pub mod types;
pub mod util;

pub use calc::{Placement, PositionOptions, PositionRequest, compute_position};
pub use error::{GeometryError, ParseOriginError};
pub use types::{
    Align, Flip, ListMetrics, PlacementOrigin, Side, WidthConstraint, WidthMode,
};
pub use util::{rect_from_tlwh, validate_rect};
