// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Provider: the per-page host holding every panel's live registration.
//!
//! ## Overview
//!
//! Each panel lives in its own keyed slot. [`Provider::register_or_update`]
//! upserts by panel id and queues a render patch for that slot only; the rest
//! of the host is untouched. Submitting the same `Rc` again is a no-op, so
//! triggers can resubmit freely without causing re-renders.
//!
//! ## Derived view
//!
//! Every slot carries a [`PanelView`] derived from its registration:
//!
//! - classes `origin-<transform origin>` and `anchor-<anchor origin>`;
//! - at most one of `relative-width` / `adaptive-width`;
//! - attributes `state=open|closed` and `side=top|bottom|left|right`;
//! - the registration's own extra classes and attributes, after the derived ones;
//! - a boolean `visible` (open and rendered) that the context watches.
//!
//! Visibility flips are queued on a feed the
//! [`OverlayContext`](crate::context::OverlayContext) drains after each
//! update to run a panel-scoped recompute.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use tether_geometry::Side;

use crate::surface::PanelStyle;
use crate::types::{PanelId, ProviderId, Registration};

/// Result of [`Provider::register_or_update`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RenderOutcome {
    /// A new slot was created.
    Mounted,
    /// An existing slot got a new registration and will re-render.
    Patched,
    /// Same registration object as before; nothing re-renders.
    Unchanged,
    /// No provider was available; the call was ignored.
    NoProvider,
}

/// Render work queued for the host, one entry per touched slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RenderPatch {
    /// Create the panel subtree.
    Mount(PanelId),
    /// Re-render the panel subtree from its new registration.
    Patch(PanelId),
    /// Remove the panel subtree.
    Unmount(PanelId),
}

/// A panel's `visible` flag changed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VisibilityChange {
    /// Panel whose visibility changed.
    pub panel: PanelId,
    /// New value.
    pub visible: bool,
}

/// Classes, attributes and state derived for one panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelView {
    /// Derived classes followed by the registration's extras.
    pub classes: Vec<String>,
    /// Derived attributes followed by the registration's extras.
    pub attributes: Vec<(String, String)>,
    /// Open and rendered.
    pub visible: bool,
    /// Content subtree is rendered.
    pub rendered: bool,
    /// Side from the last placement, or from the transform origin before any.
    pub side: Side,
    /// Stacking value assigned when the panel last opened.
    pub z_index: i32,
    /// Last style applied through the surface.
    pub style: Option<PanelStyle>,
}

impl PanelView {
    fn derive<C>(reg: &Registration<C>, prev: Option<&Self>) -> Self {
        let visible = reg.open && reg.render;
        let side = prev.map_or_else(|| Side::of(reg.transform_origin), |p| p.side);

        let mut classes = Vec::with_capacity(3 + reg.classes.len());
        classes.push(format!("origin-{}", reg.transform_origin.name()));
        classes.push(format!("anchor-{}", reg.anchor_origin.name()));
        if let Some(c) = reg.width_mode.class_name() {
            classes.push(c.to_string());
        }
        classes.extend(reg.classes.iter().cloned());

        let mut attributes = Vec::with_capacity(2 + reg.attributes.len());
        let state = if reg.open { "open" } else { "closed" };
        attributes.push(("state".to_string(), state.to_string()));
        attributes.push(("side".to_string(), side.name().to_string()));
        attributes.extend(reg.attributes.iter().cloned());

        Self {
            classes,
            attributes,
            visible,
            rendered: reg.render,
            side,
            z_index: prev.map_or(0, |p| p.z_index),
            style: prev.and_then(|p| p.style),
        }
    }

    /// Whether `class` is present.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Value of attribute `name`, if set.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_side(&mut self, side: Side) {
        self.side = side;
        if let Some((_, v)) = self.attributes.iter_mut().find(|(n, _)| n == "side") {
            *v = side.name().to_string();
        }
    }
}

struct PanelSlot<C> {
    registration: Rc<Registration<C>>,
    view: PanelView,
    renders: u32,
}

/// Keyed host for panel subtrees.
pub struct Provider<C> {
    id: ProviderId,
    slots: Vec<PanelSlot<C>>,
    render_queue: Vec<RenderPatch>,
    visibility: Vec<VisibilityChange>,
}

impl<C> core::fmt::Debug for Provider<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Provider")
            .field("id", &self.id)
            .field("panels", &self.slots.len())
            .field("pending_patches", &self.render_queue.len())
            .finish_non_exhaustive()
    }
}

impl<C> Provider<C> {
    pub(crate) fn new(id: ProviderId) -> Self {
        Self {
            id,
            slots: Vec::new(),
            render_queue: Vec::new(),
            visibility: Vec::new(),
        }
    }

    /// This provider's id.
    pub fn id(&self) -> ProviderId {
        self.id
    }

    /// Insert or replace the registration for `registration.panel`.
    ///
    /// Only the panel's own slot is touched. Passing the `Rc` already stored
    /// returns [`RenderOutcome::Unchanged`] and queues nothing.
    pub fn register_or_update(&mut self, registration: Rc<Registration<C>>) -> RenderOutcome {
        let panel = registration.panel;
        if let Some(slot) = self.slots.iter_mut().find(|s| s.registration.panel == panel) {
            if Rc::ptr_eq(&slot.registration, &registration) {
                return RenderOutcome::Unchanged;
            }
            let view = PanelView::derive(&registration, Some(&slot.view));
            if view.visible != slot.view.visible {
                self.visibility.push(VisibilityChange {
                    panel,
                    visible: view.visible,
                });
            }
            slot.registration = registration;
            slot.view = view;
            slot.renders += 1;
            self.render_queue.push(RenderPatch::Patch(panel));
            return RenderOutcome::Patched;
        }

        let view = PanelView::derive(&registration, None);
        if view.visible {
            self.visibility.push(VisibilityChange {
                panel,
                visible: true,
            });
        }
        self.slots.push(PanelSlot {
            registration,
            view,
            renders: 1,
        });
        self.render_queue.push(RenderPatch::Mount(panel));
        RenderOutcome::Mounted
    }

    /// Remove `panel`'s slot. Returns false if it was not registered.
    pub fn unregister(&mut self, panel: PanelId) -> bool {
        let Some(i) = self.slot_index(panel) else {
            return false;
        };
        let slot = self.slots.remove(i);
        if slot.view.visible {
            self.visibility.push(VisibilityChange {
                panel,
                visible: false,
            });
        }
        self.render_queue.push(RenderPatch::Unmount(panel));
        true
    }

    /// The live registration for `panel`.
    pub fn registration(&self, panel: PanelId) -> Option<&Rc<Registration<C>>> {
        self.slot(panel).map(|s| &s.registration)
    }

    /// The derived view for `panel`.
    pub fn view(&self, panel: PanelId) -> Option<&PanelView> {
        self.slot(panel).map(|s| &s.view)
    }

    /// Whether `panel` is registered and visible.
    pub fn is_visible(&self, panel: PanelId) -> bool {
        self.view(panel).is_some_and(|v| v.visible)
    }

    /// How many times `panel`'s subtree has rendered, mount included.
    pub fn render_count(&self, panel: PanelId) -> Option<u32> {
        self.slot(panel).map(|s| s.renders)
    }

    /// Registered panels in registration order.
    pub fn panels(&self) -> impl Iterator<Item = PanelId> + '_ {
        self.slots.iter().map(|s| s.registration.panel)
    }

    /// Number of registered panels.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no panel is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drain queued render work.
    pub fn take_render_queue(&mut self) -> Vec<RenderPatch> {
        core::mem::take(&mut self.render_queue)
    }

    pub(crate) fn take_visibility_changes(&mut self) -> Vec<VisibilityChange> {
        core::mem::take(&mut self.visibility)
    }

    pub(crate) fn set_z_index(&mut self, panel: PanelId, z: i32) {
        if let Some(s) = self.slot_mut(panel) {
            s.view.z_index = z;
        }
    }

    /// Record a placement; style goes to the surface, so no re-render is queued.
    pub(crate) fn commit_style(&mut self, panel: PanelId, style: PanelStyle) {
        if let Some(s) = self.slot_mut(panel) {
            s.view.set_side(style.side);
            s.view.style = Some(style);
        }
    }

    fn slot_index(&self, panel: PanelId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.registration.panel == panel)
    }

    fn slot(&self, panel: PanelId) -> Option<&PanelSlot<C>> {
        self.slots.iter().find(|s| s.registration.panel == panel)
    }

    fn slot_mut(&mut self, panel: PanelId) -> Option<&mut PanelSlot<C>> {
        self.slots.iter_mut().find(|s| s.registration.panel == panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnchorId;
    use alloc::vec;
    use tether_geometry::{PlacementOrigin, WidthMode};

    fn reg(panel: u32) -> Registration<&'static str> {
        Registration::new(PanelId(panel), AnchorId(panel + 100), "body")
    }

    #[test]
    fn same_rc_skips_render() {
        let mut p = Provider::new(ProviderId(0));
        let r = Rc::new(reg(1));
        assert_eq!(p.register_or_update(r.clone()), RenderOutcome::Mounted);
        assert_eq!(p.register_or_update(r.clone()), RenderOutcome::Unchanged);
        assert_eq!(p.render_count(PanelId(1)), Some(1));
        assert_eq!(p.take_render_queue(), vec![RenderPatch::Mount(PanelId(1))]);
    }

    #[test]
    fn new_rc_patches_only_its_slot() {
        let mut p = Provider::new(ProviderId(0));
        p.register_or_update(Rc::new(reg(1)));
        p.register_or_update(Rc::new(reg(2)));
        p.take_render_queue();
        // Equal contents, different object: still a patch.
        assert_eq!(
            p.register_or_update(Rc::new(reg(2))),
            RenderOutcome::Patched
        );
        assert_eq!(p.take_render_queue(), vec![RenderPatch::Patch(PanelId(2))]);
        assert_eq!(p.render_count(PanelId(1)), Some(1));
        assert_eq!(p.render_count(PanelId(2)), Some(2));
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn derives_classes_and_attributes() {
        let mut p = Provider::new(ProviderId(0));
        let r = reg(1)
            .with_origins(PlacementOrigin::BottomCenter, PlacementOrigin::TopCenter)
            .with_width_mode(WidthMode::Relative)
            .with_class("menu")
            .with_attribute("role", "menu");
        p.register_or_update(Rc::new(r));
        let v = p.view(PanelId(1)).unwrap();
        assert_eq!(
            v.classes,
            ["origin-top-center", "anchor-bottom-center", "relative-width", "menu"]
        );
        assert_eq!(v.attribute("state"), Some("closed"));
        assert_eq!(v.attribute("side"), Some("bottom"));
        assert_eq!(v.attribute("role"), Some("menu"));
        assert!(!v.visible);
    }

    #[test]
    fn width_mode_contributes_at_most_one_class() {
        let mut p = Provider::new(ProviderId(0));
        p.register_or_update(Rc::new(reg(1).with_width_mode(WidthMode::Adaptive)));
        p.register_or_update(Rc::new(reg(2)));
        let a = p.view(PanelId(1)).unwrap();
        assert!(a.has_class("adaptive-width"));
        assert!(!a.has_class("relative-width"));
        let n = p.view(PanelId(2)).unwrap();
        assert!(!n.has_class("adaptive-width") && !n.has_class("relative-width"));
    }

    #[test]
    fn visibility_flips_are_reported() {
        let mut p = Provider::new(ProviderId(0));
        let mut r = reg(1);
        r.open = true;
        p.register_or_update(Rc::new(r.clone()));
        r.open = false;
        p.register_or_update(Rc::new(r.clone()));
        p.register_or_update(Rc::new(r));
        assert_eq!(
            p.take_visibility_changes(),
            vec![
                VisibilityChange {
                    panel: PanelId(1),
                    visible: true
                },
                VisibilityChange {
                    panel: PanelId(1),
                    visible: false
                },
            ]
        );
        assert_eq!(p.view(PanelId(1)).unwrap().attribute("state"), Some("closed"));
    }

    #[test]
    fn unregister_queues_unmount() {
        let mut p = Provider::new(ProviderId(0));
        p.register_or_update(Rc::new(reg(1)));
        p.take_render_queue();
        assert!(p.unregister(PanelId(1)));
        assert!(!p.unregister(PanelId(1)));
        assert_eq!(p.take_render_queue(), vec![RenderPatch::Unmount(PanelId(1))]);
        assert!(p.is_empty());
    }

    #[test]
    fn committed_side_survives_updates() {
        let mut p = Provider::new(ProviderId(0));
        p.register_or_update(Rc::new(reg(1)));
        p.commit_style(
            PanelId(1),
            PanelStyle {
                top: 0.0,
                left: 0.0,
                max_width: None,
                min_width: None,
                max_height: None,
                z_index: 1000,
                side: Side::Top,
            },
        );
        p.register_or_update(Rc::new(reg(1)));
        assert_eq!(p.view(PanelId(1)).unwrap().attribute("side"), Some("top"));
    }
}
