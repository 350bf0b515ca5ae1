// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle controller: open intent in, render and visibility effects out.
//!
//! ## States
//!
//! ```text
//! Closed ──open──▶ Open ──close──▶ Closing{deadline} ──tick ≥ deadline──▶ Closed
//!                   ▲                     │
//!                   └───────open──────────┘
//! ```
//!
//! With exit animation disabled (or a zero exit duration) closing goes
//! straight from `Open` to `Closed`.
//!
//! The controller holds no references to the provider or the context. Each
//! call returns the [`LifecycleEffect`]s the owner must apply, in order, the
//! same way hover tracking returns enter/leave events.
//!
//! ## Minimal example
//!
//! ```
//! use core::time::Duration;
//! use tether_overlay::config::AnimationConfig;
//! use tether_overlay::lifecycle::{LifecycleController, LifecycleEffect, LifecycleState};
//!
//! let ms = Duration::from_millis;
//! let mut c = LifecycleController::new(AnimationConfig::with_exit(ms(150)));
//! assert_eq!(
//!     c.set_open(true, ms(0)),
//!     vec![LifecycleEffect::Render, LifecycleEffect::Show]
//! );
//! c.set_open(false, ms(10));
//! assert_eq!(c.state(), LifecycleState::Closing { deadline: ms(160) });
//! assert_eq!(c.tick(ms(160)), vec![LifecycleEffect::Unregister]);
//! assert_eq!(c.state(), LifecycleState::Closed);
//! ```

use alloc::vec::Vec;
use core::time::Duration;

use crate::config::AnimationConfig;
use crate::types::DismissOn;

/// Where a panel is in its open/close cycle.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum LifecycleState {
    /// Not rendered, not registered.
    #[default]
    Closed,
    /// Rendered and visible.
    Open,
    /// Rendered but hidden while the exit transition runs.
    Closing {
        /// When the exit timer fires.
        deadline: Duration,
    },
}

/// Work for the owner of a [`LifecycleController`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LifecycleEffect {
    /// Render the content subtree (register with the provider).
    Render,
    /// Submit with `open = true`.
    Show,
    /// Submit with `open = false`, keeping the subtree rendered.
    Hide,
    /// An exit timer now runs until `deadline`.
    StartExitTimer {
        /// When [`LifecycleController::tick`] will finish closing.
        deadline: Duration,
    },
    /// The pending exit timer was dropped.
    CancelExitTimer,
    /// Stop rendering and unregister from the provider.
    Unregister,
    /// Attach these dismissal handlers.
    AttachDismiss(DismissOn),
    /// Detach these dismissal handlers.
    DetachDismiss(DismissOn),
    /// Move focus into the panel.
    FocusPanel,
    /// Return focus to the anchor.
    RestoreFocus,
}

/// Per-panel open/close state machine.
#[derive(Clone, Debug)]
pub struct LifecycleController {
    state: LifecycleState,
    animation: AnimationConfig,
    close_on_outside: bool,
    close_on_escape: bool,
    auto_focus: bool,
    attached: DismissOn,
}

impl LifecycleController {
    /// A closed controller with no dismissal handlers and no auto focus.
    pub fn new(animation: AnimationConfig) -> Self {
        Self {
            state: LifecycleState::Closed,
            animation,
            close_on_outside: false,
            close_on_escape: false,
            auto_focus: false,
            attached: DismissOn::empty(),
        }
    }

    /// Request dismissal on outside pointer-down while visible.
    #[must_use]
    pub fn with_close_on_outside(mut self, on: bool) -> Self {
        self.close_on_outside = on;
        self
    }

    /// Request dismissal on Escape while visible and top-most.
    #[must_use]
    pub fn with_close_on_escape(mut self, on: bool) -> Self {
        self.close_on_escape = on;
        self
    }

    /// Emit [`LifecycleEffect::FocusPanel`] when opening.
    #[must_use]
    pub fn with_auto_focus(mut self, on: bool) -> Self {
        self.auto_focus = on;
        self
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Animation settings.
    pub fn animation(&self) -> AnimationConfig {
        self.animation
    }

    /// The content subtree is rendered (open or closing).
    pub fn is_rendered(&self) -> bool {
        !matches!(self.state, LifecycleState::Closed)
    }

    /// The panel is shown.
    pub fn is_visible(&self) -> bool {
        matches!(self.state, LifecycleState::Open)
    }

    /// Dismissal handlers currently attached.
    pub fn attached(&self) -> DismissOn {
        self.attached
    }

    /// When the exit timer fires, if one is running.
    pub fn next_deadline(&self) -> Option<Duration> {
        match self.state {
            LifecycleState::Closing { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Apply a new open intent at `now`.
    ///
    /// Repeating the current intent yields no effects.
    pub fn set_open(&mut self, open: bool, now: Duration) -> Vec<LifecycleEffect> {
        let mut out = Vec::new();
        match (self.state, open) {
            (LifecycleState::Open, true)
            | (LifecycleState::Closed | LifecycleState::Closing { .. }, false) => {}
            (LifecycleState::Closed | LifecycleState::Closing { .. }, true) => {
                if matches!(self.state, LifecycleState::Closing { .. }) {
                    out.push(LifecycleEffect::CancelExitTimer);
                }
                self.state = LifecycleState::Open;
                out.push(LifecycleEffect::Render);
                out.push(LifecycleEffect::Show);
                self.sync_dismiss(&mut out);
                if self.auto_focus {
                    out.push(LifecycleEffect::FocusPanel);
                }
                tracing::debug!(state = ?self.state, "panel opened");
            }
            (LifecycleState::Open, false) => {
                out.push(LifecycleEffect::Hide);
                if self.animation.animates_exit() {
                    let deadline = now.saturating_add(self.animation.exit_duration);
                    self.state = LifecycleState::Closing { deadline };
                    self.sync_dismiss(&mut out);
                    out.push(LifecycleEffect::RestoreFocus);
                    out.push(LifecycleEffect::StartExitTimer { deadline });
                } else {
                    self.state = LifecycleState::Closed;
                    self.sync_dismiss(&mut out);
                    out.push(LifecycleEffect::RestoreFocus);
                    out.push(LifecycleEffect::Unregister);
                }
                tracing::debug!(state = ?self.state, "panel closing");
            }
        }
        out
    }

    /// Advance time. Finishes a close whose exit timer has elapsed.
    pub fn tick(&mut self, now: Duration) -> Vec<LifecycleEffect> {
        match self.state {
            LifecycleState::Closing { deadline } if now >= deadline => {
                self.state = LifecycleState::Closed;
                tracing::debug!("exit timer elapsed");
                alloc::vec![LifecycleEffect::Unregister]
            }
            _ => Vec::new(),
        }
    }

    /// Toggle outside-pointer dismissal.
    pub fn set_close_on_outside(&mut self, on: bool) -> Vec<LifecycleEffect> {
        self.close_on_outside = on;
        let mut out = Vec::new();
        self.sync_dismiss(&mut out);
        out
    }

    /// Toggle Escape dismissal.
    pub fn set_close_on_escape(&mut self, on: bool) -> Vec<LifecycleEffect> {
        self.close_on_escape = on;
        let mut out = Vec::new();
        self.sync_dismiss(&mut out);
        out
    }

    /// Drop to `Closed` without an unregister effect; used on unmount.
    pub fn cancel(&mut self) -> Vec<LifecycleEffect> {
        let mut out = Vec::new();
        if matches!(self.state, LifecycleState::Closing { .. }) {
            out.push(LifecycleEffect::CancelExitTimer);
        }
        self.state = LifecycleState::Closed;
        self.sync_dismiss(&mut out);
        out
    }

    fn wanted_dismiss(&self) -> DismissOn {
        let mut want = DismissOn::empty();
        if self.is_visible() {
            want.set(DismissOn::OUTSIDE_POINTER, self.close_on_outside);
            want.set(DismissOn::ESCAPE, self.close_on_escape);
        }
        want
    }

    fn sync_dismiss(&mut self, out: &mut Vec<LifecycleEffect>) {
        let want = self.wanted_dismiss();
        let detach = self.attached - want;
        let attach = want - self.attached;
        if !detach.is_empty() {
            out.push(LifecycleEffect::DetachDismiss(detach));
        }
        if !attach.is_empty() {
            out.push(LifecycleEffect::AttachDismiss(attach));
        }
        self.attached = want;
    }
}
