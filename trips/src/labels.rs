//! User-visible strings for a [`TripView`], produced through the host's
//! translation service.

#[cfg(test)]
#[path = "labels_test.rs"]
mod labels_test;

use serde::Serialize;

use crate::config::MeasurementSystem;
use crate::drag::SessionMode;
use crate::engine::TripView;
use crate::zone::DropZone;

/// The host translation service: `translate(key, params) -> string`.
pub trait Translate {
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str, &[(&str, String)]) -> String,
{
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String {
        self(key, params)
    }
}

/// Translated strings for one render of the trip constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripLabels {
    pub title: String,
    /// "Reset" when creating, "Cancel" when editing.
    pub secondary_action: String,
    /// "Dispatch" when creating, "Save" when editing.
    pub primary_action: String,
    /// Present only in edit mode.
    pub split_action: Option<String>,
    /// One line per active warning, in length, weight, air-ride order.
    pub warnings: Vec<String>,
    /// Caption for each drop zone placeholder.
    pub zones: Vec<(DropZone, String)>,
    /// One summary line per load, in stop order.
    pub loads: Vec<String>,
}

/// Build the labels for `view`.
#[must_use]
pub fn build(view: &TripView, measurement: MeasurementSystem, t: &dyn Translate) -> TripLabels {
    let (title, secondary_action, primary_action, split_action) = match view.mode {
        SessionMode::Create => {
            (t.translate("trips:newTrip", &[]), t.translate("btn:reset", &[]), t.translate("btn:dispatch", &[]), None)
        }
        SessionMode::Edit { trip_id, external_number } => {
            let number = external_number.unwrap_or(trip_id).to_string();
            (
                t.translate("trips:editTrip", &[("tripId", number)]),
                t.translate("btn:cancel", &[]),
                t.translate("btn:save", &[]),
                Some(t.translate("btn:split", &[])),
            )
        }
    };

    let warnings = [
        (view.warnings.length, "trips:lengthWarning"),
        (view.warnings.weight, "trips:weightWarning"),
        (view.warnings.air_ride, "trips:airRideWarning"),
    ]
    .into_iter()
    .filter(|(active, _)| *active)
    .map(|(_, key)| t.translate(key, &[]))
    .collect();

    let zones = DropZone::ALL.into_iter().map(|zone| (zone, t.translate(zone_caption_key(zone), &[]))).collect();

    let summary_key = format!("{}:loadSummary", measurement.namespace());
    let loads = view
        .draft
        .loads
        .iter()
        .map(|load| {
            t.translate(
                &summary_key,
                &[
                    ("reference", load.reference.clone()),
                    ("length", load.length.to_string()),
                    ("weight", load.weight.to_string()),
                ],
            )
        })
        .collect();

    TripLabels { title, secondary_action, primary_action, split_action, warnings, zones, loads }
}

fn zone_caption_key(zone: DropZone) -> &'static str {
    match zone {
        DropZone::Driver => "trips:addDriver",
        DropZone::Truck => "trips:addTruck",
        DropZone::Trailer => "trips:addTrailer",
        DropZone::Loads => "trips:addLoads",
    }
}
