//! Session mode and the drag gesture state machine.
//!
//! `DragState` is the gesture being tracked between drag-start and drop. It
//! carries the classified card so the drop handler never re-inspects the
//! payload.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use serde::{Deserialize, Serialize};

use crate::card::{CardKind, DraggableCard};
use crate::zone::DropZone;

/// Identifier of a dispatched trip.
pub type TripId = u64;

/// Whether the session composes a new trip or edits a dispatched one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SessionMode {
    #[default]
    Create,
    Edit {
        trip_id: TripId,
        /// Number shown to users in the title; falls back to `trip_id`.
        #[serde(default)]
        external_number: Option<u64>,
    },
}

impl SessionMode {
    #[must_use]
    pub fn is_edit(self) -> bool {
        matches!(self, Self::Edit { .. })
    }

    #[must_use]
    pub fn trip_id(self) -> Option<TripId> {
        match self {
            Self::Create => None,
            Self::Edit { trip_id, .. } => Some(trip_id),
        }
    }
}

/// Internal state for the drag state machine.
#[derive(Debug, Clone, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A card is being dragged.
    Dragging {
        card: DraggableCard,
        /// Kind resolved at drag-start.
        kind: CardKind,
    },
}

impl DragState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The card in flight, if any.
    #[must_use]
    pub fn card(&self) -> Option<&DraggableCard> {
        match self {
            Self::Idle => None,
            Self::Dragging { card, .. } => Some(card),
        }
    }

    /// The zone that would accept the card in flight.
    #[must_use]
    pub fn highlight(&self) -> Option<DropZone> {
        match self {
            Self::Idle => None,
            Self::Dragging { kind, .. } => Some(DropZone::for_kind(*kind)),
        }
    }
}
