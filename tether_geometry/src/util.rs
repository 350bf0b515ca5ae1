// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rect construction and validation helpers.

use kurbo::{Rect, Size};

use crate::error::GeometryError;

/// Build a rect from DOM-style `{top, left, width, height}`.
pub fn rect_from_tlwh(top: f64, left: f64, width: f64, height: f64) -> Rect {
    Rect::new(left, top, left + width, top + height)
}

/// Check that `rect` is finite and non-degenerate.
///
/// Returns the rect unchanged on success so calls chain with `?`.
pub fn validate_rect(rect: Rect) -> Result<Rect, GeometryError> {
    let finite = rect.x0.is_finite()
        && rect.y0.is_finite()
        && rect.x1.is_finite()
        && rect.y1.is_finite();
    if !finite {
        return Err(GeometryError::NonFinite(rect));
    }
    let (width, height) = (rect.x1 - rect.x0, rect.y1 - rect.y0);
    // Also catches widths that overflow to infinity.
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return Err(GeometryError::Degenerate { width, height });
    }
    Ok(rect)
}

pub(crate) fn validate_viewport(size: Size) -> Result<Size, GeometryError> {
    let ok = size.width.is_finite()
        && size.height.is_finite()
        && size.width > 0.0
        && size.height > 0.0;
    if ok {
        Ok(size)
    } else {
        Err(GeometryError::Viewport(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tlwh_maps_to_corners() {
        let r = rect_from_tlwh(500.0, 20.0, 100.0, 30.0);
        assert_eq!(r, Rect::new(20.0, 500.0, 120.0, 530.0));
    }

    #[test]
    fn rejects_nan_and_zero_area() {
        assert!(matches!(
            validate_rect(rect_from_tlwh(f64::NAN, 0.0, 10.0, 10.0)),
            Err(GeometryError::NonFinite(_))
        ));
        assert!(matches!(
            validate_rect(rect_from_tlwh(0.0, 0.0, 0.0, 10.0)),
            Err(GeometryError::Degenerate { .. })
        ));
        assert!(matches!(
            validate_rect(rect_from_tlwh(0.0, 0.0, 10.0, -1.0)),
            Err(GeometryError::Degenerate { .. })
        ));
        assert!(validate_rect(rect_from_tlwh(0.0, 0.0, 1.0, 1.0)).is_ok());
    }
}
