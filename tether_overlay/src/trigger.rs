// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger: the anchor-side owner of one panel.
//!
//! A [`Trigger`] keeps the panel's [`Registration`] template and its
//! [`LifecycleController`], remembers which provider it registered with, and
//! applies lifecycle effects to an [`OverlayContext`]. Effects the context
//! cannot act on (focus moves, timers) are returned to the host.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::time::Duration;

use crate::config::AnimationConfig;
use crate::context::OverlayContext;
use crate::lifecycle::{LifecycleController, LifecycleEffect};
use crate::provider::RenderOutcome;
use crate::surface::Surface;
use crate::types::{DismissRequest, PanelId, ProviderId, Registration};

/// Owner of one panel's registration and lifecycle.
#[derive(Clone, Debug)]
pub struct Trigger<C> {
    template: Registration<C>,
    current: Option<Rc<Registration<C>>>,
    lifecycle: LifecycleController,
    provider: Option<ProviderId>,
}

impl<C: Clone> Trigger<C> {
    /// A closed trigger for `template`. Its `open` and `render` fields are
    /// driven by the lifecycle from here on.
    pub fn new(template: Registration<C>, lifecycle: LifecycleController) -> Self {
        Self {
            template,
            current: None,
            lifecycle,
            provider: None,
        }
    }

    /// A trigger with default animation and no dismissal handlers.
    pub fn with_defaults(template: Registration<C>) -> Self {
        Self::new(template, LifecycleController::new(AnimationConfig::default()))
    }

    /// The panel this trigger owns.
    pub fn panel(&self) -> PanelId {
        self.template.panel
    }

    /// Lifecycle state.
    pub fn lifecycle(&self) -> &LifecycleController {
        &self.lifecycle
    }

    /// The registration last submitted, if the panel is rendered.
    pub fn registration(&self) -> Option<&Rc<Registration<C>>> {
        self.current.as_ref()
    }

    /// Provider the panel is registered with.
    pub fn provider(&self) -> Option<ProviderId> {
        self.provider
    }

    /// Connect the template's anchor to the panel.
    pub fn connect<S: Surface>(&self, cx: &mut OverlayContext<S, C>) {
        cx.connect(self.template.anchor, self.template.panel);
    }

    /// Apply an open intent. Returns every effect for the host to inspect.
    pub fn set_open<S: Surface>(
        &mut self,
        cx: &mut OverlayContext<S, C>,
        open: bool,
        now: Duration,
    ) -> Vec<LifecycleEffect> {
        let effects = self.lifecycle.set_open(open, now);
        self.apply(cx, &effects);
        effects
    }

    /// Edit the template. A rendered panel is resubmitted as a new
    /// registration.
    pub fn update<S: Surface>(
        &mut self,
        cx: &mut OverlayContext<S, C>,
        edit: impl FnOnce(&mut Registration<C>),
    ) -> Option<RenderOutcome> {
        let anchor = self.template.anchor;
        edit(&mut self.template);
        if self.template.anchor != anchor && cx.registry().contains(self.panel()) {
            cx.connect(self.template.anchor, self.template.panel);
        }
        self.lifecycle.is_rendered().then(|| self.submit(cx))
    }

    /// Advance the exit timer.
    pub fn tick<S: Surface>(
        &mut self,
        cx: &mut OverlayContext<S, C>,
        now: Duration,
    ) -> Vec<LifecycleEffect> {
        let effects = self.lifecycle.tick(now);
        self.apply(cx, &effects);
        effects
    }

    /// Close in response to a dismissal request addressed to this panel.
    pub fn handle_dismiss<S: Surface>(
        &mut self,
        cx: &mut OverlayContext<S, C>,
        request: &DismissRequest,
        now: Duration,
    ) -> Vec<LifecycleEffect> {
        if request.panel != self.panel() {
            return Vec::new();
        }
        tracing::debug!(panel = ?request.panel, reason = ?request.reason, "dismissed");
        self.set_open(cx, false, now)
    }

    /// Toggle outside-pointer dismissal.
    pub fn set_close_on_outside<S: Surface>(&mut self, cx: &mut OverlayContext<S, C>, on: bool) {
        let effects = self.lifecycle.set_close_on_outside(on);
        self.apply(cx, &effects);
    }

    /// Toggle Escape dismissal.
    pub fn set_close_on_escape<S: Surface>(&mut self, cx: &mut OverlayContext<S, C>, on: bool) {
        let effects = self.lifecycle.set_close_on_escape(on);
        self.apply(cx, &effects);
    }

    /// Move to the context's current provider if it changed.
    ///
    /// The panel leaves the old provider before joining the new one.
    pub fn sync_provider<S: Surface>(
        &mut self,
        cx: &mut OverlayContext<S, C>,
    ) -> Option<RenderOutcome> {
        if !self.lifecycle.is_rendered() || self.provider == cx.current_provider() {
            return None;
        }
        let reg = self.current.clone()?;
        Some(self.register(cx, reg))
    }

    /// Tear the panel down now: disconnect, cancel timers and unregister.
    pub fn unmount<S: Surface>(&mut self, cx: &mut OverlayContext<S, C>) {
        let effects = self.lifecycle.cancel();
        self.apply(cx, &effects);
        cx.disconnect(self.panel());
        self.release(cx);
    }

    fn apply<S: Surface>(&mut self, cx: &mut OverlayContext<S, C>, effects: &[LifecycleEffect]) {
        let panel = self.panel();
        let mut resubmit = false;
        for effect in effects {
            match *effect {
                LifecycleEffect::Render | LifecycleEffect::Show | LifecycleEffect::Hide => {
                    resubmit = true;
                }
                LifecycleEffect::Unregister => self.release(cx),
                LifecycleEffect::AttachDismiss(on) => cx.attach_dismiss(panel, on),
                LifecycleEffect::DetachDismiss(on) => cx.detach_dismiss(panel, on),
                LifecycleEffect::StartExitTimer { .. }
                | LifecycleEffect::CancelExitTimer
                | LifecycleEffect::FocusPanel
                | LifecycleEffect::RestoreFocus => {}
            }
        }
        if resubmit && self.lifecycle.is_rendered() {
            self.submit(cx);
        }
    }

    fn submit<S: Surface>(&mut self, cx: &mut OverlayContext<S, C>) -> RenderOutcome {
        let mut reg = self.template.clone();
        reg.open = self.lifecycle.is_visible();
        reg.render = true;
        self.register(cx, Rc::new(reg))
    }

    fn register<S: Surface>(
        &mut self,
        cx: &mut OverlayContext<S, C>,
        reg: Rc<Registration<C>>,
    ) -> RenderOutcome {
        let current = cx.current_provider();
        if let Some(old) = self.provider.filter(|old| Some(*old) != current) {
            tracing::debug!(panel = ?self.panel(), ?old, new = ?current, "moving to new provider");
            cx.unregister(old, self.panel());
            self.provider = None;
            // Dismissal handlers are dropped with the old slot.
            let attached = self.lifecycle.attached();
            if !attached.is_empty() {
                cx.attach_dismiss(self.panel(), attached);
            }
        }
        let outcome = cx.register_or_update(Rc::clone(&reg));
        if outcome != RenderOutcome::NoProvider {
            self.provider = current;
        }
        self.current = Some(reg);
        outcome
    }

    fn release<S: Surface>(&mut self, cx: &mut OverlayContext<S, C>) {
        if let Some(id) = self.provider.take() {
            cx.unregister(id, self.panel());
        }
        self.current = None;
    }
}
