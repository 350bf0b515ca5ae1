// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the overlay host: identifiers, registrations, dismissal.
//!
//! ## Overview
//!
//! A [`Registration`] is what a trigger submits to the
//! [`Provider`](crate::provider::Provider): which panel, anchored where, with
//! what content and flags. Registrations are immutable once submitted; a
//! trigger builds a fresh one (a fresh `Rc`) for every change, which is what
//! lets the provider skip re-rendering on reference equality.

use alloc::string::String;
use alloc::vec::Vec;

use tether_geometry::{PlacementOrigin, WidthMode};

/// Identifier of a floating panel. Unique among registered panels.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PanelId(pub u32);

/// Identifier of an anchor (trigger) element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct AnchorId(pub u32);

/// Identifier of a provider, handed out by
/// [`OverlayContext::register_provider`](crate::context::OverlayContext::register_provider).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ProviderId(pub(crate) u32);

/// The live description of one panel, as submitted by its trigger.
///
/// `C` is the content reference: whatever handle the host uses to render the
/// panel body.
#[derive(Clone, Debug, PartialEq)]
pub struct Registration<C> {
    /// Panel being described.
    pub panel: PanelId,
    /// Anchor the panel is attached to.
    pub anchor: AnchorId,
    /// Content reference rendered into the panel.
    pub content: C,
    /// Open intent; drives the `visible` attribute and `state=open|closed`.
    pub open: bool,
    /// Whether the content subtree is rendered at all.
    pub render: bool,
    /// Point on the anchor to attach to.
    pub anchor_origin: PlacementOrigin,
    /// Point of the panel placed on the anchor point.
    pub transform_origin: PlacementOrigin,
    /// Width coupling to the anchor.
    pub width_mode: WidthMode,
    /// Cap the panel and its first scrollable list to the room below it.
    pub clamp_list: bool,
    /// Gap between anchor and panel, in pixels.
    pub offset_px: i32,
    /// Extra classes appended after the derived ones.
    pub classes: Vec<String>,
    /// Extra attributes appended after the derived ones.
    pub attributes: Vec<(String, String)>,
}

impl<C> Registration<C> {
    /// A closed dropdown-style registration: anchor bottom-left, panel top-left.
    pub fn new(panel: PanelId, anchor: AnchorId, content: C) -> Self {
        Self {
            panel,
            anchor,
            content,
            open: false,
            render: true,
            anchor_origin: PlacementOrigin::BottomLeft,
            transform_origin: PlacementOrigin::TopLeft,
            width_mode: WidthMode::None,
            clamp_list: false,
            offset_px: 0,
            classes: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Set both origins.
    #[must_use]
    pub fn with_origins(mut self, anchor: PlacementOrigin, transform: PlacementOrigin) -> Self {
        self.anchor_origin = anchor;
        self.transform_origin = transform;
        self
    }

    /// Set the width mode.
    #[must_use]
    pub fn with_width_mode(mut self, mode: WidthMode) -> Self {
        self.width_mode = mode;
        self
    }

    /// Enable or disable list clamping.
    #[must_use]
    pub fn with_clamp_list(mut self, clamp: bool) -> Self {
        self.clamp_list = clamp;
        self
    }

    /// Set the anchor/panel gap.
    #[must_use]
    pub fn with_offset(mut self, offset_px: i32) -> Self {
        self.offset_px = offset_px;
        self
    }

    /// Append an extra class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Append an extra attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

bitflags::bitflags! {
    /// Dismissal handlers attached for a panel.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DismissOn: u8 {
        /// Pointer-down outside both the panel and its anchor.
        const OUTSIDE_POINTER = 0b0000_0001;
        /// Escape key while the panel is the top-most one listening.
        const ESCAPE          = 0b0000_0010;
    }
}

/// Why a dismissal was requested.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DismissReason {
    /// Pointer-down landed outside the panel and its anchor.
    OutsidePointer,
    /// Escape was pressed.
    Escape,
}

/// A request for the owning trigger to set `open = false`.
///
/// Produced by
/// [`OverlayContext::pointer_down`](crate::context::OverlayContext::pointer_down) and
/// [`OverlayContext::escape_pressed`](crate::context::OverlayContext::escape_pressed).
/// The engine never closes a panel on its own.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DismissRequest {
    /// Panel to close.
    pub panel: PanelId,
    /// What triggered the request.
    pub reason: DismissReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let reg = Registration::new(PanelId(1), AnchorId(2), "menu")
            .with_origins(PlacementOrigin::TopCenter, PlacementOrigin::BottomCenter)
            .with_width_mode(WidthMode::Adaptive)
            .with_clamp_list(true)
            .with_offset(4)
            .with_class("menu")
            .with_attribute("role", "listbox");
        assert!(!reg.open);
        assert!(reg.render);
        assert_eq!(reg.anchor_origin, PlacementOrigin::TopCenter);
        assert_eq!(reg.transform_origin, PlacementOrigin::BottomCenter);
        assert_eq!(reg.width_mode, WidthMode::Adaptive);
        assert!(reg.clamp_list);
        assert_eq!(reg.offset_px, 4);
        assert_eq!(reg.classes, ["menu"]);
        assert_eq!(reg.attributes[0].0, "role");
    }
}
