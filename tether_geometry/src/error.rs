// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for rect validation and origin parsing.

use kurbo::{Rect, Size};

/// Why a measurement cannot be positioned against.
///
/// Returned by [`validate_rect`](crate::validate_rect) and
/// [`compute_position`](crate::compute_position). Callers treat both cases as
/// "not mounted yet" and retry on a later frame.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// At least one coordinate is NaN or infinite.
    #[error("rect has a non-finite coordinate: {0:?}")]
    NonFinite(Rect),
    /// Width or height is zero or negative.
    #[error("rect is degenerate ({width}x{height})")]
    Degenerate {
        /// Measured width.
        width: f64,
        /// Measured height.
        height: f64,
    },
    /// The viewport has a non-finite or non-positive dimension.
    #[error("viewport size is unusable: {0:?}")]
    Viewport(Size),
}

/// The string is not one of the nine kebab-case origin names.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown placement origin")]
pub struct ParseOriginError;
