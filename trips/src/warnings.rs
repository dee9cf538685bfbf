//! Equipment warnings derived from a draft.
//!
//! Nothing here is stored: the engine calls [`evaluate`] on every read of the
//! view. Missing equipment or unknown capacities yield `false`, never an error.

#[cfg(test)]
#[path = "warnings_test.rs"]
mod warnings_test;

use serde::{Deserialize, Serialize};

use crate::card::Load;
use crate::draft::TripDraft;

/// The three equipment warnings shown above the trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripWarnings {
    /// Loads are longer than the trailer deck.
    pub length: bool,
    /// Loads outweigh the combined truck and trailer capacity.
    pub weight: bool,
    /// A load needs air ride and the trailer lacks it.
    pub air_ride: bool,
}

impl TripWarnings {
    #[must_use]
    pub fn any(&self) -> bool {
        self.length || self.weight || self.air_ride
    }
}

/// Summed dimensions of the load list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadTotals {
    pub length: f64,
    pub weight: f64,
}

impl LoadTotals {
    #[must_use]
    pub fn of(loads: &[Load]) -> Self {
        loads.iter().fold(Self::default(), |acc, l| Self { length: acc.length + l.length, weight: acc.weight + l.weight })
    }
}

/// Compute warnings for `draft`.
#[must_use]
pub fn evaluate(draft: &TripDraft) -> TripWarnings {
    let totals = LoadTotals::of(&draft.loads);
    let trailer = draft.trailer.as_ref();

    let length = trailer
        .and_then(|t| t.max_length)
        .is_some_and(|max| totals.length > max);

    let combined_weight = match (draft.truck.as_ref().and_then(|t| t.max_weight), trailer.and_then(|t| t.max_weight)) {
        (Some(truck), Some(trailer)) => Some(truck + trailer),
        _ => None,
    };
    let weight = combined_weight.is_some_and(|max| totals.weight > max);

    let air_ride = trailer.is_some_and(|t| !t.air_ride && draft.loads.iter().any(|l| l.air_ride_required));

    TripWarnings { length, weight, air_ride }
}
