// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measurement errors. None of these reach callers as failures: the context
//! turns them into frame retries and reports them through
//! [`PositionOutcome`](crate::context::PositionOutcome).

use tether_geometry::GeometryError;

use crate::types::{AnchorId, PanelId};

/// Why a panel could not be measured this time around.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum MeasureError {
    /// The panel has no anchor in the registry.
    #[error("panel {0:?} is not connected to an anchor")]
    NotConnected(PanelId),
    /// The anchor element is not mounted.
    #[error("anchor {0:?} is not mounted")]
    MissingAnchor(AnchorId),
    /// The panel element is not mounted.
    #[error("panel {0:?} is not mounted")]
    MissingPanel(PanelId),
    /// A rect or the viewport was non-finite or degenerate.
    #[error(transparent)]
    InvalidGeometry(#[from] GeometryError),
}

impl MeasureError {
    /// Whether waiting a frame could help.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::NotConnected(_))
    }
}
