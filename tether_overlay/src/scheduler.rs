// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout scheduler: trailing-edge debounce and bounded per-frame retries.
//!
//! ## Overview
//!
//! The scheduler owns timing state only. Time comes from the host as a
//! monotonic [`Duration`] since some fixed origin; the scheduler never reads a
//! clock.
//!
//! - [`LayoutScheduler::viewport_event`] records a resize or scroll and pushes
//!   the deadline to `now + debounce`.
//! - [`LayoutScheduler::poll`] reports, exactly once per burst, that the
//!   deadline has passed and a full recompute is due.
//! - [`LayoutScheduler::schedule_retry`] tracks failed measurements per panel
//!   and says whether another frame is worth it.
//!
//! The [`OverlayContext`](crate::context::OverlayContext) turns these answers
//! into recomputes and frame requests.

use alloc::vec::Vec;
use core::time::Duration;

use crate::types::PanelId;

/// Outcome of [`LayoutScheduler::schedule_retry`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RetryDecision {
    /// Try again on the next frame; `attempt` counts from 1.
    Scheduled {
        /// Which retry this is.
        attempt: u8,
    },
    /// Budget spent; the panel stays unpositioned until an explicit recompute.
    Exhausted,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Retry {
    panel: PanelId,
    attempts: u8,
    due: bool,
}

/// Debounce and retry bookkeeping for one context.
#[derive(Clone, Debug)]
pub struct LayoutScheduler {
    debounce: Duration,
    deadline: Option<Duration>,
    listeners_bound: bool,
    max_retries: u8,
    retries: Vec<Retry>,
}

impl LayoutScheduler {
    /// Create a scheduler with the given debounce window and retry budget.
    pub fn new(debounce: Duration, max_retries: u8) -> Self {
        Self {
            debounce,
            deadline: None,
            listeners_bound: false,
            max_retries,
            retries: Vec::new(),
        }
    }

    /// Current debounce window.
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Change the debounce window.
    ///
    /// A pending deadline keeps its old value; the new window applies from the
    /// next event.
    pub fn set_debounce(&mut self, window: Duration) {
        self.debounce = window;
    }

    /// Whether the shared resize/scroll listeners are installed.
    pub fn listeners_bound(&self) -> bool {
        self.listeners_bound
    }

    pub(crate) fn set_listeners_bound(&mut self, bound: bool) {
        self.listeners_bound = bound;
    }

    /// Record a resize/scroll event at `now`.
    pub fn viewport_event(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.debounce));
    }

    /// When the pending recompute is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// True once when the pending deadline has been reached.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Record a failed measurement for `panel`.
    pub fn schedule_retry(&mut self, panel: PanelId) -> RetryDecision {
        let max = self.max_retries;
        let idx = match self.retries.iter().position(|r| r.panel == panel) {
            Some(i) => i,
            None => {
                self.retries.push(Retry {
                    panel,
                    attempts: 0,
                    due: false,
                });
                self.retries.len() - 1
            }
        };
        let entry = &mut self.retries[idx];
        if entry.attempts >= max {
            entry.due = false;
            return RetryDecision::Exhausted;
        }
        entry.attempts += 1;
        entry.due = true;
        RetryDecision::Scheduled {
            attempt: entry.attempts,
        }
    }

    /// Panels waiting for a frame retry, in the order they failed.
    ///
    /// Attempt counts are kept so the budget spans frames.
    pub fn take_due_retries(&mut self) -> Vec<PanelId> {
        let mut out = Vec::new();
        for r in &mut self.retries {
            if r.due {
                r.due = false;
                out.push(r.panel);
            }
        }
        out
    }

    /// Retries used so far for `panel`.
    pub fn attempts(&self, panel: PanelId) -> u8 {
        self.retries
            .iter()
            .find(|r| r.panel == panel)
            .map_or(0, |r| r.attempts)
    }

    /// Whether `panel` has a frame retry pending.
    pub fn has_pending_retry(&self, panel: PanelId) -> bool {
        self.retries.iter().any(|r| r.panel == panel && r.due)
    }

    /// Forget retry state for `panel` (success, explicit recompute, or unmount).
    pub fn clear_retry(&mut self, panel: PanelId) {
        self.retries.retain(|r| r.panel != panel);
    }

    /// Drop the pending deadline and all retry state.
    pub fn cancel_all(&mut self) {
        self.deadline = None;
        self.retries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn burst_coalesces_into_one_recompute() {
        let mut s = LayoutScheduler::new(ms(25), 3);
        let mut fired = 0;
        for t in [0, 5, 10, 20, 30] {
            s.viewport_event(ms(t));
            if s.poll(ms(t)) {
                fired += 1;
            }
        }
        // Last event at 30ms: nothing before 55ms.
        assert!(!s.poll(ms(54)));
        assert_eq!(s.next_deadline(), Some(ms(55)));
        assert!(s.poll(ms(55)));
        fired += 1;
        assert!(!s.poll(ms(200)));
        assert_eq!(fired, 1);
    }

    #[test]
    fn new_window_applies_to_next_event() {
        let mut s = LayoutScheduler::new(ms(25), 3);
        s.set_debounce(ms(100));
        s.viewport_event(ms(10));
        assert!(!s.poll(ms(35)));
        assert!(s.poll(ms(110)));
    }

    #[test]
    fn far_future_event_saturates() {
        let mut s = LayoutScheduler::new(ms(25), 3);
        s.viewport_event(Duration::MAX);
        assert_eq!(s.next_deadline(), Some(Duration::MAX));
        assert!(s.poll(Duration::MAX));
    }

    #[test]
    fn retries_are_bounded() {
        let mut s = LayoutScheduler::new(ms(25), 3);
        let p = PanelId(1);
        assert_eq!(s.schedule_retry(p), RetryDecision::Scheduled { attempt: 1 });
        assert_eq!(s.take_due_retries(), vec![p]);
        assert!(s.take_due_retries().is_empty());
        assert_eq!(s.schedule_retry(p), RetryDecision::Scheduled { attempt: 2 });
        assert_eq!(s.schedule_retry(p), RetryDecision::Scheduled { attempt: 3 });
        assert_eq!(s.schedule_retry(p), RetryDecision::Exhausted);
        assert!(!s.has_pending_retry(p));
        assert_eq!(s.attempts(p), 3);
        s.clear_retry(p);
        assert_eq!(s.attempts(p), 0);
        assert_eq!(s.schedule_retry(p), RetryDecision::Scheduled { attempt: 1 });
    }
}
