//! Drop zones and the resolver that turns a drop into a [`MutationIntent`].

#[cfg(test)]
#[path = "zone_test.rs"]
mod zone_test;

use serde::{Deserialize, Serialize};

use crate::card::{CardKind, CardSource, DraggableCard, Entity, EntityId};
use crate::draft::{Assignment, Facet, MutationIntent, TripDraft};

/// Why a drop was refused. Never escapes the engine as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DropError {
    /// The card's kind is not the kind the zone accepts.
    #[error("{kind:?} card cannot be dropped on {zone:?}")]
    Incompatible { zone: DropZone, kind: CardKind },
    /// A search-result load that is already on the trip.
    #[error("load {0} is already on the trip")]
    DuplicateLoad(EntityId),
}

/// The fixed drop targets of the trip constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropZone {
    #[serde(rename = "driverZone")]
    Driver,
    #[serde(rename = "truckZone")]
    Truck,
    #[serde(rename = "trailerZone")]
    Trailer,
    #[serde(rename = "loadsZone")]
    Loads,
}

impl DropZone {
    pub const ALL: [DropZone; 4] = [Self::Driver, Self::Truck, Self::Trailer, Self::Loads];

    /// The only card kind this zone accepts.
    #[must_use]
    pub fn accepts(self) -> CardKind {
        match self {
            Self::Driver => CardKind::Driver,
            Self::Truck => CardKind::Truck,
            Self::Trailer => CardKind::Trailer,
            Self::Loads => CardKind::Load,
        }
    }

    /// The zone that accepts `kind`.
    #[must_use]
    pub fn for_kind(kind: CardKind) -> Self {
        match kind {
            CardKind::Driver => Self::Driver,
            CardKind::Truck => Self::Truck,
            CardKind::Trailer => Self::Trailer,
            CardKind::Load => Self::Loads,
        }
    }

    /// The facet a singleton zone writes to; `None` for the loads zone.
    #[must_use]
    pub fn facet(self) -> Option<Facet> {
        match self {
            Self::Driver => Some(Facet::Driver),
            Self::Truck => Some(Facet::Truck),
            Self::Trailer => Some(Facet::Trailer),
            Self::Loads => None,
        }
    }

    /// Zone id as used by the host (`"driverZone"`, ...).
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Driver => "driverZone",
            Self::Truck => "truckZone",
            Self::Trailer => "trailerZone",
            Self::Loads => "loadsZone",
        }
    }
}

/// Resolve a drop of `card` onto `zone` against the current draft.
///
/// # Errors
///
/// Returns [`DropError::Incompatible`] when the card's kind does not match the
/// zone, and [`DropError::DuplicateLoad`] when a fresh load is already on the
/// trip.
pub fn resolve(zone: DropZone, card: &DraggableCard, draft: &TripDraft) -> Result<MutationIntent, DropError> {
    let kind = card.kind();
    if zone.accepts() != kind {
        return Err(DropError::Incompatible { zone, kind });
    }

    let id = card.id();
    let intent = match &card.entity {
        Entity::Load(load) => {
            if !draft.contains_load(id) {
                MutationIntent::Append(load.clone())
            } else if card.source == CardSource::Assigned {
                MutationIntent::Unchanged
            } else {
                return Err(DropError::DuplicateLoad(id));
            }
        }
        Entity::Driver(d) => replace_or_keep(draft, Facet::Driver, id, || Assignment::Driver(d.clone())),
        Entity::Truck(t) => replace_or_keep(draft, Facet::Truck, id, || Assignment::Truck(t.clone())),
        Entity::Trailer(t) => replace_or_keep(draft, Facet::Trailer, id, || Assignment::Trailer(t.clone())),
    };
    Ok(intent)
}

fn replace_or_keep(
    draft: &TripDraft,
    facet: Facet,
    id: EntityId,
    assignment: impl FnOnce() -> Assignment,
) -> MutationIntent {
    if draft.facet_id(facet) == Some(id) {
        MutationIntent::Unchanged
    } else {
        MutationIntent::Replace(assignment())
    }
}
