// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ledger of which anchor each connected panel measures against.
//!
//! The registry only records mappings. Repositioning on connect and releasing
//! listeners on dispose are done by the
//! [`OverlayContext`](crate::context::OverlayContext) that owns it.

use alloc::vec::Vec;

use crate::types::{AnchorId, PanelId};

/// What [`Registry::connect`] did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Connection {
    /// New mapping recorded.
    Added,
    /// The panel was mapped to a different anchor; the old one is returned.
    Replaced(AnchorId),
    /// The mapping already existed.
    Unchanged,
}

/// `PanelId → AnchorId` in connection order.
///
/// Recompute passes walk panels in this order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    entries: Vec<(PanelId, AnchorId)>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `panel` is anchored to `anchor`. Idempotent.
    ///
    /// Reconnecting a panel to a new anchor keeps its position in the order.
    pub fn connect(&mut self, anchor: AnchorId, panel: PanelId) -> Connection {
        match self.entries.iter_mut().find(|(p, _)| *p == panel) {
            Some((_, a)) if *a == anchor => Connection::Unchanged,
            Some((_, a)) => {
                let old = core::mem::replace(a, anchor);
                Connection::Replaced(old)
            }
            None => {
                self.entries.push((panel, anchor));
                Connection::Added
            }
        }
    }

    /// Forget `panel`. Returns the anchor it was connected to, if any.
    pub fn disconnect(&mut self, panel: PanelId) -> Option<AnchorId> {
        let i = self.entries.iter().position(|(p, _)| *p == panel)?;
        Some(self.entries.remove(i).1)
    }

    /// Anchor of a connected panel.
    pub fn anchor_of(&self, panel: PanelId) -> Option<AnchorId> {
        self.entries
            .iter()
            .find(|(p, _)| *p == panel)
            .map(|(_, a)| *a)
    }

    /// Whether `panel` is connected.
    pub fn contains(&self, panel: PanelId) -> bool {
        self.anchor_of(panel).is_some()
    }

    /// Connected panels in connection order.
    pub fn panels(&self) -> impl Iterator<Item = PanelId> + '_ {
        self.entries.iter().map(|(p, _)| *p)
    }

    /// Number of connected panels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is connected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every mapping, returning how many there were.
    pub fn dispose(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn connect_is_idempotent() {
        let mut r = Registry::new();
        assert_eq!(r.connect(AnchorId(1), PanelId(10)), Connection::Added);
        assert_eq!(r.connect(AnchorId(1), PanelId(10)), Connection::Unchanged);
        assert_eq!(r.len(), 1);
        assert_eq!(r.anchor_of(PanelId(10)), Some(AnchorId(1)));
    }

    #[test]
    fn reconnect_replaces_in_place() {
        let mut r = Registry::new();
        r.connect(AnchorId(1), PanelId(10));
        r.connect(AnchorId(2), PanelId(20));
        assert_eq!(
            r.connect(AnchorId(3), PanelId(10)),
            Connection::Replaced(AnchorId(1))
        );
        assert_eq!(r.panels().collect::<Vec<_>>(), vec![PanelId(10), PanelId(20)]);
        assert_eq!(r.anchor_of(PanelId(10)), Some(AnchorId(3)));
    }

    #[test]
    fn disconnect_twice_is_harmless() {
        let mut r = Registry::new();
        r.connect(AnchorId(1), PanelId(10));
        assert_eq!(r.disconnect(PanelId(10)), Some(AnchorId(1)));
        assert_eq!(r.disconnect(PanelId(10)), None);
        assert!(r.is_empty());
    }

    #[test]
    fn dispose_clears_everything() {
        let mut r = Registry::new();
        r.connect(AnchorId(1), PanelId(10));
        r.connect(AnchorId(2), PanelId(20));
        assert_eq!(r.dispose(), 2);
        assert!(!r.contains(PanelId(20)));
    }
}
