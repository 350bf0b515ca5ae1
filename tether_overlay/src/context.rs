// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay context: one per page, owning everything shared.
//!
//! ## Overview
//!
//! [`OverlayContext`] holds the injected [`Surface`], the config, the anchor
//! registry, the layout scheduler, the providers, the z-index counter and the
//! dismissal handler table. The host creates it once and tears it down with
//! [`OverlayContext::dispose`]; after that every operation is a no-op.
//!
//! ## Driving it
//!
//! - Registrations come in through [`OverlayContext::register_or_update`],
//!   usually via a [`Trigger`](crate::trigger::Trigger).
//! - Resize/scroll events go to [`OverlayContext::viewport_event`]; the host
//!   calls [`OverlayContext::poll`] when [`OverlayContext::next_deadline`]
//!   passes.
//! - Frame callbacks requested through [`Surface::request_frame`] go to
//!   [`OverlayContext::on_frame`].
//! - Pointer-down and Escape go to [`OverlayContext::pointer_down`] and
//!   [`OverlayContext::escape_pressed`], which return dismissal requests for
//!   the owning triggers to act on.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Point;
use tether_geometry::{Placement, PositionRequest, compute_position};

use crate::config::OverlayConfig;
use crate::error::MeasureError;
use crate::provider::{Provider, RenderOutcome};
use crate::registry::{Connection, Registry};
use crate::scheduler::{LayoutScheduler, RetryDecision};
use crate::surface::{PanelStyle, Surface};
use crate::types::{
    AnchorId, DismissOn, DismissReason, DismissRequest, PanelId, ProviderId, Registration,
};

/// Result of positioning one panel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PositionOutcome {
    /// Style was applied.
    Positioned(Placement),
    /// Measurement failed; a frame retry is pending or a later connect will
    /// position the panel.
    Deferred(MeasureError),
    /// Measurement failed and the retry budget is spent.
    Exhausted(MeasureError),
    /// Nothing to do: not registered, not visible, or the context is disposed.
    Skipped,
}

impl PositionOutcome {
    /// The placement, when positioned.
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            Self::Positioned(p) => Some(p),
            _ => None,
        }
    }
}

/// Shared state for every anchored panel on a page.
pub struct OverlayContext<S, C> {
    surface: S,
    config: OverlayConfig,
    registry: Registry,
    scheduler: LayoutScheduler,
    providers: Vec<Provider<C>>,
    next_provider: u32,
    next_z: i32,
    dismiss: Vec<(PanelId, DismissOn)>,
    disposed: bool,
}

impl<S: core::fmt::Debug, C> core::fmt::Debug for OverlayContext<S, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OverlayContext")
            .field("surface", &self.surface)
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("scheduler", &self.scheduler)
            .field("providers", &self.providers)
            .field("next_z", &self.next_z)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl<S: Surface, C> OverlayContext<S, C> {
    /// Create a context around `surface`.
    pub fn new(surface: S, config: OverlayConfig) -> Self {
        Self {
            surface,
            scheduler: LayoutScheduler::new(config.debounce, config.max_retries),
            next_z: config.base_z_index,
            config,
            registry: Registry::new(),
            providers: Vec::new(),
            next_provider: 0,
            dismiss: Vec::new(),
            disposed: false,
        }
    }

    /// The injected surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The injected surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Settings this context was created with; `debounce` tracks
    /// [`set_debounce`](Self::set_debounce).
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Anchor ledger.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Timing state.
    pub fn scheduler(&self) -> &LayoutScheduler {
        &self.scheduler
    }

    /// True after [`dispose`](Self::dispose).
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // --- providers ---

    /// Add a provider and make it current.
    pub fn register_provider(&mut self) -> ProviderId {
        let id = ProviderId(self.next_provider);
        self.next_provider = self.next_provider.wrapping_add(1);
        if let Some(prev) = self.current_provider() {
            tracing::debug!(?prev, next = ?id, "provider replaced as current");
        }
        self.providers.push(Provider::new(id));
        id
    }

    /// Tear down a provider. The most recently registered remaining one
    /// becomes current.
    pub fn remove_provider(&mut self, id: ProviderId) -> bool {
        let Some(i) = self.providers.iter().position(|p| p.id() == id) else {
            return false;
        };
        let removed = self.providers.remove(i);
        for panel in removed.panels() {
            self.scheduler.clear_retry(panel);
            self.dismiss.retain(|(p, _)| *p != panel);
        }
        tracing::debug!(?id, current = ?self.current_provider(), "provider removed");
        true
    }

    /// The provider new registrations go to.
    pub fn current_provider(&self) -> Option<ProviderId> {
        self.providers.last().map(Provider::id)
    }

    /// Look up a provider.
    pub fn provider(&self, id: ProviderId) -> Option<&Provider<C>> {
        self.providers.iter().find(|p| p.id() == id)
    }

    /// Look up a provider mutably, e.g. to drain its render queue.
    pub fn provider_mut(&mut self, id: ProviderId) -> Option<&mut Provider<C>> {
        self.providers.iter_mut().find(|p| p.id() == id)
    }

    // --- registrations ---

    /// Submit a registration to the current provider.
    ///
    /// A panel that becomes visible gets a fresh z-index and is positioned
    /// immediately; a visible panel whose registration changed is
    /// repositioned.
    pub fn register_or_update(&mut self, registration: Rc<Registration<C>>) -> RenderOutcome {
        if self.disposed {
            return RenderOutcome::NoProvider;
        }
        let panel = registration.panel;
        let visible = registration.open && registration.render;
        let Some(provider) = self.providers.last_mut() else {
            tracing::debug!(?panel, "no provider; registration ignored");
            return RenderOutcome::NoProvider;
        };
        let outcome = provider.register_or_update(registration);
        let changes = provider.take_visibility_changes();
        tracing::debug!(?panel, ?outcome, "registration submitted");

        let mut positioned = false;
        for change in changes.into_iter().filter(|c| c.visible) {
            self.raise(change.panel);
            self.reposition_panel(change.panel);
            positioned |= change.panel == panel;
        }
        if outcome == RenderOutcome::Patched && visible && !positioned {
            self.reposition_panel(panel);
        }
        outcome
    }

    /// Remove `panel` from provider `id`. Cancels its retries and dismissal
    /// handlers.
    pub fn unregister(&mut self, id: ProviderId, panel: PanelId) -> bool {
        let Some(provider) = self.providers.iter_mut().find(|p| p.id() == id) else {
            tracing::debug!(?id, ?panel, "unregister from unknown provider");
            return false;
        };
        let removed = provider.unregister(panel);
        provider.take_visibility_changes();
        self.scheduler.clear_retry(panel);
        self.dismiss.retain(|(p, _)| *p != panel);
        removed
    }

    // --- registry ---

    /// Record `panel → anchor`. Binds the shared listeners on first use and
    /// positions the panel if it is visible.
    pub fn connect(&mut self, anchor: AnchorId, panel: PanelId) -> Connection {
        if self.disposed {
            return Connection::Unchanged;
        }
        if !self.scheduler.listeners_bound() {
            self.surface.bind_viewport_listeners(self.scheduler.debounce());
            self.scheduler.set_listeners_bound(true);
        }
        let c = self.registry.connect(anchor, panel);
        tracing::debug!(?anchor, ?panel, connection = ?c, "connect");
        self.reposition_panel(panel);
        c
    }

    /// Forget `panel`'s anchor and cancel its retries. No positioning.
    pub fn disconnect(&mut self, panel: PanelId) -> Option<AnchorId> {
        self.scheduler.clear_retry(panel);
        self.registry.disconnect(panel)
    }

    /// Clear every mapping and release the shared listeners. Later calls are
    /// no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if self.scheduler.listeners_bound() {
            self.surface.unbind_viewport_listeners();
            self.scheduler.set_listeners_bound(false);
        }
        let n = self.registry.dispose();
        self.scheduler.cancel_all();
        self.dismiss.clear();
        self.disposed = true;
        tracing::debug!(connections = n, "context disposed");
    }

    // --- scheduling ---

    /// Change the debounce window, rebinding the listeners if they are bound.
    pub fn set_debounce(&mut self, window: Duration) {
        self.scheduler.set_debounce(window);
        self.config.debounce = window;
        if self.scheduler.listeners_bound() && !self.disposed {
            self.surface.unbind_viewport_listeners();
            self.surface.bind_viewport_listeners(window);
        }
    }

    /// A resize or scroll happened at `now`.
    pub fn viewport_event(&mut self, now: Duration) {
        if !self.disposed {
            self.scheduler.viewport_event(now);
        }
    }

    /// When [`poll`](Self::poll) next has work.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Run the debounced recompute if it is due. Returns whether it ran.
    pub fn poll(&mut self, now: Duration) -> bool {
        if self.disposed || !self.scheduler.poll(now) {
            return false;
        }
        self.reposition_all();
        true
    }

    /// Recompute every visible connected panel in registry order.
    pub fn reposition_all(&mut self) -> Vec<(PanelId, PositionOutcome)> {
        if self.disposed {
            return Vec::new();
        }
        let panels: Vec<PanelId> = self.registry.panels().collect();
        panels
            .into_iter()
            .map(|p| (p, self.reposition_panel(p)))
            .filter(|(_, o)| *o != PositionOutcome::Skipped)
            .collect()
    }

    /// Recompute one panel now, with a fresh retry budget.
    pub fn reposition_panel(&mut self, panel: PanelId) -> PositionOutcome {
        if self.disposed {
            return PositionOutcome::Skipped;
        }
        self.scheduler.clear_retry(panel);
        self.position(panel)
    }

    /// Frame callback: retry panels whose last measurement failed.
    pub fn on_frame(&mut self) -> Vec<(PanelId, PositionOutcome)> {
        if self.disposed {
            return Vec::new();
        }
        self.scheduler
            .take_due_retries()
            .into_iter()
            .map(|p| (p, self.position(p)))
            .collect()
    }

    // --- dismissal ---

    /// Add dismissal handlers for `panel`. Idempotent.
    pub fn attach_dismiss(&mut self, panel: PanelId, on: DismissOn) {
        if self.disposed {
            return;
        }
        match self.dismiss.iter_mut().find(|(p, _)| *p == panel) {
            Some((_, flags)) => flags.insert(on),
            None => self.dismiss.push((panel, on)),
        }
    }

    /// Remove dismissal handlers for `panel`. Idempotent.
    pub fn detach_dismiss(&mut self, panel: PanelId, on: DismissOn) {
        if let Some((_, flags)) = self.dismiss.iter_mut().find(|(p, _)| *p == panel) {
            flags.remove(on);
        }
        self.dismiss.retain(|(_, f)| !f.is_empty());
    }

    /// Dismissal handlers attached for `panel`.
    pub fn dismiss_handlers(&self, panel: PanelId) -> DismissOn {
        self.dismiss
            .iter()
            .find(|(p, _)| *p == panel)
            .map_or(DismissOn::empty(), |(_, f)| *f)
    }

    /// Pointer-down at `at`: every listening panel hit neither on itself nor
    /// on its anchor asks to close.
    pub fn pointer_down(&self, at: Point) -> Vec<DismissRequest> {
        self.dismiss
            .iter()
            .filter(|(_, f)| f.contains(DismissOn::OUTSIDE_POINTER))
            .filter(|(panel, _)| !self.hits(*panel, at))
            .map(|(panel, _)| DismissRequest {
                panel: *panel,
                reason: DismissReason::OutsidePointer,
            })
            .collect()
    }

    /// Escape: the top-most listening panel asks to close.
    pub fn escape_pressed(&self) -> Option<DismissRequest> {
        self.dismiss
            .iter()
            .filter(|(_, f)| f.contains(DismissOn::ESCAPE))
            .max_by_key(|(panel, _)| self.z_index(*panel))
            .map(|(panel, _)| DismissRequest {
                panel: *panel,
                reason: DismissReason::Escape,
            })
    }

    /// Stacking value of `panel`, if registered with any provider.
    pub fn z_index(&self, panel: PanelId) -> Option<i32> {
        self.providers
            .iter()
            .rev()
            .find_map(|p| p.view(panel))
            .map(|v| v.z_index)
    }

    // --- internals ---

    fn hits(&self, panel: PanelId, at: Point) -> bool {
        let on_panel = self
            .surface
            .panel_rect(panel)
            .is_some_and(|r| r.contains(at));
        let on_anchor = self
            .registry
            .anchor_of(panel)
            .and_then(|a| self.surface.anchor_rect(a))
            .is_some_and(|r| r.contains(at));
        on_panel || on_anchor
    }

    fn raise(&mut self, panel: PanelId) {
        let z = self.next_z.max(self.config.base_z_index);
        self.next_z = z.saturating_add(1);
        if let Some(p) = self.providers.iter_mut().rev().find(|p| p.view(panel).is_some()) {
            p.set_z_index(panel, z);
        }
    }

    fn registration(&self, panel: PanelId) -> Option<(usize, Rc<Registration<C>>)> {
        self.providers
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, p)| p.registration(panel).map(|r| (i, Rc::clone(r))))
    }

    fn position(&mut self, panel: PanelId) -> PositionOutcome {
        let Some((idx, reg)) = self.registration(panel) else {
            return PositionOutcome::Skipped;
        };
        if !(reg.open && reg.render) {
            return PositionOutcome::Skipped;
        }
        match self.measure(panel, &reg) {
            Ok(placement) => {
                self.scheduler.clear_retry(panel);
                let style = PanelStyle {
                    top: placement.top(),
                    left: placement.left(),
                    max_width: placement.width.max_width,
                    min_width: placement.width.min_width,
                    max_height: placement.max_height,
                    z_index: self.providers[idx]
                        .view(panel)
                        .map_or(self.config.base_z_index, |v| v.z_index),
                    side: placement.side,
                };
                self.surface.apply_style(panel, &style);
                self.providers[idx].commit_style(panel, style);
                tracing::trace!(?panel, top = style.top, left = style.left, flip = ?placement.flip, "positioned");
                PositionOutcome::Positioned(placement)
            }
            Err(err) if !err.is_retryable() => {
                tracing::trace!(?panel, %err, "waiting for connect");
                PositionOutcome::Deferred(err)
            }
            Err(err) => match self.scheduler.schedule_retry(panel) {
                RetryDecision::Scheduled { attempt } => {
                    tracing::trace!(?panel, attempt, %err, "retrying next frame");
                    self.surface.request_frame();
                    PositionOutcome::Deferred(err)
                }
                RetryDecision::Exhausted => {
                    tracing::warn!(?panel, %err, "giving up positioning panel");
                    PositionOutcome::Exhausted(err)
                }
            },
        }
    }

    fn measure(&self, panel: PanelId, reg: &Registration<C>) -> Result<Placement, MeasureError> {
        let anchor_id = self
            .registry
            .anchor_of(panel)
            .ok_or(MeasureError::NotConnected(panel))?;
        let anchor = self
            .surface
            .anchor_rect(anchor_id)
            .ok_or(MeasureError::MissingAnchor(anchor_id))?;
        let panel_rect = self
            .surface
            .panel_rect(panel)
            .ok_or(MeasureError::MissingPanel(panel))?;
        let mut req = PositionRequest::new(
            anchor,
            panel_rect,
            reg.anchor_origin,
            reg.transform_origin,
            self.surface.viewport(),
        );
        req.offset = f64::from(reg.offset_px);
        req.width_mode = reg.width_mode;
        req.list = if reg.clamp_list {
            self.surface.list_metrics(panel)
        } else {
            None
        };
        req.options = self.config.positioning;
        Ok(compute_position(&req)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::{Rect, Size};
    use tether_geometry::Side;

    #[derive(Debug, Default)]
    struct Fake {
        anchors: Vec<(AnchorId, Rect)>,
        panels: Vec<(PanelId, Rect)>,
        styles: Vec<(PanelId, PanelStyle)>,
        frames: u32,
        binds: Vec<Duration>,
        unbinds: u32,
    }

    impl Surface for Fake {
        fn anchor_rect(&self, anchor: AnchorId) -> Option<Rect> {
            self.anchors.iter().find(|(a, _)| *a == anchor).map(|(_, r)| *r)
        }
        fn panel_rect(&self, panel: PanelId) -> Option<Rect> {
            self.panels.iter().find(|(p, _)| *p == panel).map(|(_, r)| *r)
        }
        fn viewport(&self) -> Size {
            Size::new(1024.0, 768.0)
        }
        fn apply_style(&mut self, panel: PanelId, style: &PanelStyle) {
            self.styles.push((panel, *style));
        }
        fn request_frame(&mut self) {
            self.frames += 1;
        }
        fn bind_viewport_listeners(&mut self, debounce: Duration) {
            self.binds.push(debounce);
        }
        fn unbind_viewport_listeners(&mut self) {
            self.unbinds += 1;
        }
    }

    fn open_reg(panel: u32) -> Rc<Registration<()>> {
        let mut r = Registration::new(PanelId(panel), AnchorId(panel), ());
        r.open = true;
        Rc::new(r)
    }

    fn mounted() -> Fake {
        Fake {
            anchors: vec![(AnchorId(1), Rect::new(100.0, 100.0, 220.0, 140.0))],
            panels: vec![(PanelId(1), Rect::new(0.0, 0.0, 200.0, 150.0))],
            ..Fake::default()
        }
    }

    #[test]
    fn connect_positions_open_panel() {
        let mut cx = OverlayContext::new(mounted(), OverlayConfig::default());
        cx.register_provider();
        cx.register_or_update(open_reg(1));
        // Not connected yet: nothing applied.
        assert!(cx.surface().styles.is_empty());
        cx.connect(AnchorId(1), PanelId(1));
        let (_, style) = cx.surface().styles[0];
        assert_eq!((style.top, style.left), (140.0, 100.0));
        assert_eq!(style.side, Side::Bottom);
        assert_eq!(style.z_index, 1000);
        assert_eq!(cx.surface().binds, vec![Duration::from_millis(25)]);
    }

    #[test]
    fn missing_provider_is_a_no_op() {
        let mut cx: OverlayContext<Fake, ()> =
            OverlayContext::new(mounted(), OverlayConfig::default());
        assert_eq!(cx.register_or_update(open_reg(1)), RenderOutcome::NoProvider);
        assert!(!cx.unregister(ProviderId(7), PanelId(1)));
    }

    #[test]
    fn retries_stop_after_budget() {
        let mut cx = OverlayContext::new(Fake::default(), OverlayConfig::default());
        cx.register_provider();
        cx.connect(AnchorId(1), PanelId(1));
        cx.register_or_update(open_reg(1));
        assert_eq!(cx.surface().frames, 1);
        let mut outcomes = Vec::new();
        for _ in 0..6 {
            outcomes.extend(cx.on_frame());
        }
        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes[2].1, PositionOutcome::Exhausted(_)));
        assert_eq!(cx.surface().frames, 3);
    }

    #[test]
    fn dispose_releases_and_silences() {
        let mut cx: OverlayContext<Fake, ()> =
            OverlayContext::new(mounted(), OverlayConfig::default());
        cx.register_provider();
        cx.connect(AnchorId(1), PanelId(1));
        cx.dispose();
        cx.dispose();
        assert_eq!(cx.surface().unbinds, 1);
        assert!(cx.registry().is_empty());
        cx.viewport_event(Duration::ZERO);
        assert!(!cx.poll(Duration::from_secs(1)));
        assert_eq!(cx.reposition_panel(PanelId(1)), PositionOutcome::Skipped);
    }

    #[test]
    fn provider_ids_wrap() {
        let mut cx: OverlayContext<Fake, ()> =
            OverlayContext::new(mounted(), OverlayConfig::default());
        cx.next_provider = u32::MAX;
        assert_eq!(cx.register_provider(), ProviderId(u32::MAX));
        assert_eq!(cx.register_provider(), ProviderId(0));
        assert_eq!(cx.current_provider(), Some(ProviderId(0)));
    }

    #[test]
    fn set_debounce_rebinds_only_when_bound() {
        let mut cx: OverlayContext<Fake, ()> =
            OverlayContext::new(mounted(), OverlayConfig::default());
        cx.set_debounce(Duration::from_millis(40));
        assert!(cx.surface().binds.is_empty());
        cx.connect(AnchorId(1), PanelId(1));
        cx.set_debounce(Duration::from_millis(60));
        assert_eq!(
            cx.surface().binds,
            vec![Duration::from_millis(40), Duration::from_millis(60)]
        );
        assert_eq!(cx.surface().unbinds, 1);
    }
}
