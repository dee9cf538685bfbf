//! Entity builders shared by the unit tests.

use uuid::Uuid;

use crate::card::{Driver, Load, Trailer, Truck};
use crate::draft::TripDraft;

pub fn driver(name: &str) -> Driver {
    Driver { id: Uuid::new_v4(), name: name.to_string() }
}

pub fn truck(max_weight: Option<f64>) -> Truck {
    Truck { id: Uuid::new_v4(), unit_number: "T-100".into(), max_weight }
}

pub fn trailer(max_length: Option<f64>, max_weight: Option<f64>, air_ride: bool) -> Trailer {
    Trailer { id: Uuid::new_v4(), unit_number: "TR-200".into(), max_length, max_weight, air_ride }
}

pub fn load(length: f64, weight: f64, air_ride_required: bool) -> Load {
    Load { id: Uuid::new_v4(), reference: "PO-1".into(), length, weight, air_ride_required }
}

/// Driver, truck (20 000), trailer (53 ft, 25 000, air ride) and one 10 ft / 5 000 load.
pub fn full_draft() -> TripDraft {
    TripDraft {
        driver: Some(driver("Ada")),
        truck: Some(truck(Some(20_000.0))),
        trailer: Some(trailer(Some(53.0), Some(25_000.0), true)),
        loads: vec![load(10.0, 5_000.0, false)],
        ..Default::default()
    }
}
