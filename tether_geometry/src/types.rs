// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for placement: origins, alignment, flips, sides, and width coupling.

use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Rect, Size};

use crate::error::ParseOriginError;

/// Alignment along a single axis.
///
/// `Start` is top (vertical) or left (horizontal); `End` is bottom or right.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// Top or left edge.
    Start,
    /// Midpoint of the axis.
    Center,
    /// Bottom or right edge.
    End,
}

impl Align {
    /// Position along the axis as a fraction of the extent (0, 0.5 or 1).
    pub const fn fraction(self) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
        }
    }

    /// Swap `Start` and `End`; `Center` is unchanged.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::Center => Self::Center,
            Self::End => Self::Start,
        }
    }
}

/// One of the nine named corner/edge points of a box.
///
/// Used twice per panel: as the *anchor origin* (the point on the anchor the
/// panel attaches to) and as the *transform origin* (the point of the panel
/// that lands on the anchor point). The two are independent.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PlacementOrigin {
    /// Top edge, left edge.
    TopLeft,
    /// Top edge, horizontal center.
    TopCenter,
    /// Top edge, right edge.
    TopRight,
    /// Vertical center, left edge.
    CenterLeft,
    /// Center of the box.
    Center,
    /// Vertical center, right edge.
    CenterRight,
    /// Bottom edge, left edge.
    BottomLeft,
    /// Bottom edge, horizontal center.
    BottomCenter,
    /// Bottom edge, right edge.
    BottomRight,
}

impl PlacementOrigin {
    /// All nine origins, row by row from top-left.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Build an origin from its vertical and horizontal alignment.
    pub const fn from_aligns(vertical: Align, horizontal: Align) -> Self {
        match (vertical, horizontal) {
            (Align::Start, Align::Start) => Self::TopLeft,
            (Align::Start, Align::Center) => Self::TopCenter,
            (Align::Start, Align::End) => Self::TopRight,
            (Align::Center, Align::Start) => Self::CenterLeft,
            (Align::Center, Align::Center) => Self::Center,
            (Align::Center, Align::End) => Self::CenterRight,
            (Align::End, Align::Start) => Self::BottomLeft,
            (Align::End, Align::Center) => Self::BottomCenter,
            (Align::End, Align::End) => Self::BottomRight,
        }
    }

    /// Vertical component.
    pub const fn vertical(self) -> Align {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => Align::Start,
            Self::CenterLeft | Self::Center | Self::CenterRight => Align::Center,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => Align::End,
        }
    }

    /// Horizontal component.
    pub const fn horizontal(self) -> Align {
        match self {
            Self::TopLeft | Self::CenterLeft | Self::BottomLeft => Align::Start,
            Self::TopCenter | Self::Center | Self::BottomCenter => Align::Center,
            Self::TopRight | Self::CenterRight | Self::BottomRight => Align::End,
        }
    }

    /// Mirror the axes named in `flip`.
    #[must_use]
    pub fn mirrored(self, flip: Flip) -> Self {
        let mut v = self.vertical();
        let mut h = self.horizontal();
        if flip.contains(Flip::VERTICAL) {
            v = v.mirrored();
        }
        if flip.contains(Flip::HORIZONTAL) {
            h = h.mirrored();
        }
        Self::from_aligns(v, h)
    }

    /// The point this origin names on `rect`.
    pub fn point_in(self, rect: Rect) -> Point {
        Point::new(
            rect.x0 + rect.width() * self.horizontal().fraction(),
            rect.y0 + rect.height() * self.vertical().fraction(),
        )
    }

    /// Offset that moves a box of `size` so this origin of the box sits at (0, 0).
    pub fn offset_for(self, size: Size) -> kurbo::Vec2 {
        kurbo::Vec2::new(
            -size.width * self.horizontal().fraction(),
            -size.height * self.vertical().fraction(),
        )
    }

    /// Kebab-case name, e.g. `bottom-left`. Used for derived class names.
    pub const fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::CenterLeft => "center-left",
            Self::Center => "center",
            Self::CenterRight => "center-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for PlacementOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlacementOrigin {
    type Err = ParseOriginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|o| o.name() == s)
            .ok_or(ParseOriginError)
    }
}

bitflags::bitflags! {
    /// Axes on which a placement was mirrored during a recompute.
    ///
    /// Derived per call to [`compute_position`](crate::compute_position) and never stored.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flip: u8 {
        /// Mirrored top↔bottom.
        const VERTICAL   = 0b0000_0001;
        /// Mirrored left↔right.
        const HORIZONTAL = 0b0000_0010;
    }
}

/// Side of the anchor the panel ends up on. Exposed to styling as `side=...`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Panel sits above the anchor point.
    Top,
    /// Panel sits below the anchor point.
    Bottom,
    /// Panel sits left of the anchor point.
    Left,
    /// Panel sits right of the anchor point.
    Right,
}

impl Side {
    /// Derive the side from the transform origin actually used.
    ///
    /// The vertical axis wins when it is not centered; a fully centered panel
    /// reports `Bottom`.
    pub const fn of(transform_origin: PlacementOrigin) -> Self {
        match (transform_origin.vertical(), transform_origin.horizontal()) {
            (Align::Start, _) => Self::Bottom,
            (Align::End, _) => Self::Top,
            (Align::Center, Align::Start) => Self::Right,
            (Align::Center, Align::End) => Self::Left,
            (Align::Center, Align::Center) => Self::Bottom,
        }
    }

    /// Attribute value.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Policy for coupling the panel's width to the anchor's width.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WidthMode {
    /// No coupling.
    #[default]
    None,
    /// Cap the panel's max-width to the anchor width.
    Relative,
    /// Set the panel's min-width to the anchor width.
    Adaptive,
}

impl WidthMode {
    /// Class contributed to the panel, if any.
    pub const fn class_name(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Relative => Some("relative-width"),
            Self::Adaptive => Some("adaptive-width"),
        }
    }

    /// Width constraint implied by an anchor of `anchor_width`.
    pub const fn constraint(self, anchor_width: f64) -> WidthConstraint {
        match self {
            Self::None => WidthConstraint::NONE,
            Self::Relative => WidthConstraint {
                max_width: Some(anchor_width),
                min_width: None,
            },
            Self::Adaptive => WidthConstraint {
                max_width: None,
                min_width: Some(anchor_width),
            },
        }
    }
}

/// Width limits derived from a [`WidthMode`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WidthConstraint {
    /// Upper bound on panel width in pixels.
    pub max_width: Option<f64>,
    /// Lower bound on panel width in pixels.
    pub min_width: Option<f64>,
}

impl WidthConstraint {
    /// No constraint on either side.
    pub const NONE: Self = Self {
        max_width: None,
        min_width: None,
    };
}

/// Measurements of a scrollable list that is the panel's first content block.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ListMetrics {
    /// Height the list would take without any cap.
    pub natural_height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_round_trip_through_aligns() {
        for o in PlacementOrigin::ALL {
            assert_eq!(PlacementOrigin::from_aligns(o.vertical(), o.horizontal()), o);
        }
    }

    #[test]
    fn mirroring_keeps_center() {
        let o = PlacementOrigin::BottomCenter;
        assert_eq!(o.mirrored(Flip::VERTICAL), PlacementOrigin::TopCenter);
        assert_eq!(o.mirrored(Flip::HORIZONTAL), PlacementOrigin::BottomCenter);
        assert_eq!(
            PlacementOrigin::TopRight.mirrored(Flip::all()),
            PlacementOrigin::BottomLeft
        );
        assert_eq!(PlacementOrigin::Center.mirrored(Flip::all()), PlacementOrigin::Center);
    }

    #[test]
    fn point_in_names_edges() {
        let r = Rect::new(20.0, 500.0, 120.0, 530.0);
        assert_eq!(PlacementOrigin::BottomCenter.point_in(r), Point::new(70.0, 530.0));
        assert_eq!(PlacementOrigin::TopLeft.point_in(r), Point::new(20.0, 500.0));
        assert_eq!(PlacementOrigin::CenterRight.point_in(r), Point::new(120.0, 515.0));
    }

    #[test]
    fn offset_is_negated_corner() {
        let off = PlacementOrigin::BottomRight.offset_for(Size::new(200.0, 150.0));
        assert_eq!(off, kurbo::Vec2::new(-200.0, -150.0));
        assert_eq!(
            PlacementOrigin::TopLeft.offset_for(Size::new(200.0, 150.0)),
            kurbo::Vec2::ZERO
        );
    }

    #[test]
    fn names_parse_back() {
        for o in PlacementOrigin::ALL {
            assert_eq!(o.name().parse::<PlacementOrigin>(), Ok(o));
        }
        assert!("middle".parse::<PlacementOrigin>().is_err());
    }

    #[test]
    fn width_mode_constraints() {
        assert_eq!(
            WidthMode::Relative.constraint(100.0).max_width,
            Some(100.0)
        );
        assert_eq!(WidthMode::Relative.constraint(100.0).min_width, None);
        assert_eq!(
            WidthMode::Adaptive.constraint(100.0).min_width,
            Some(100.0)
        );
        assert_eq!(WidthMode::None.constraint(100.0), WidthConstraint::NONE);
        assert_eq!(WidthMode::None.class_name(), None);
    }

    #[test]
    fn side_follows_transform_origin() {
        assert_eq!(Side::of(PlacementOrigin::TopLeft), Side::Bottom);
        assert_eq!(Side::of(PlacementOrigin::BottomCenter), Side::Top);
        assert_eq!(Side::of(PlacementOrigin::CenterLeft), Side::Right);
        assert_eq!(Side::of(PlacementOrigin::CenterRight), Side::Left);
    }
}
