// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for a context and for per-trigger animation.

use core::time::Duration;

use tether_geometry::PositionOptions;

/// Context-wide settings, fixed at [`OverlayContext::new`](crate::context::OverlayContext::new)
/// except for the debounce window.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayConfig {
    /// Trailing-edge debounce window for resize/scroll recomputes.
    pub debounce: Duration,
    /// Flip and clamp tunables passed to the calculator.
    pub positioning: PositionOptions,
    /// Frame retries after a failed measurement before giving up.
    pub max_retries: u8,
    /// Lowest z-index handed to a newly opened panel.
    pub base_z_index: i32,
}

impl OverlayConfig {
    /// Set the debounce window.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the positioning tunables.
    #[must_use]
    pub fn with_positioning(mut self, positioning: PositionOptions) -> Self {
        self.positioning = positioning;
        self
    }

    /// Set the retry budget.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u8) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the stacking base.
    #[must_use]
    pub fn with_base_z_index(mut self, base: i32) -> Self {
        self.base_z_index = base;
        self
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(25),
            positioning: PositionOptions::DEFAULT,
            max_retries: 3,
            base_z_index: 1000,
        }
    }
}

/// Exit animation settings for one trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationConfig {
    /// When false, closing unregisters synchronously.
    pub enabled: bool,
    /// How long a closing panel stays rendered for its exit transition.
    pub exit_duration: Duration,
}

impl AnimationConfig {
    /// Animation off: open/close are immediate.
    pub const DISABLED: Self = Self {
        enabled: false,
        exit_duration: Duration::ZERO,
    };

    /// Animation on with the given exit duration.
    pub const fn with_exit(exit_duration: Duration) -> Self {
        Self {
            enabled: true,
            exit_duration,
        }
    }

    /// True when closing goes through the `Closing` state.
    pub fn animates_exit(&self) -> bool {
        self.enabled && !self.exit_duration.is_zero()
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::with_exit(Duration::from_millis(150))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = OverlayConfig::default();
        assert_eq!(c.debounce, Duration::from_millis(25));
        assert_eq!(c.max_retries, 3);
        assert!(AnimationConfig::default().animates_exit());
        assert!(!AnimationConfig::DISABLED.animates_exit());
        assert!(!AnimationConfig::with_exit(Duration::ZERO).animates_exit());
    }
}
