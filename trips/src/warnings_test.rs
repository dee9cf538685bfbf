#![allow(clippy::float_cmp)]

use super::*;
use crate::test_helpers::{full_draft, load, trailer, truck};

#[test]
fn empty_draft_has_no_warnings() {
    assert_eq!(evaluate(&TripDraft::default()), TripWarnings::default());
}

#[test]
fn full_draft_within_limits_has_no_warnings() {
    assert!(!evaluate(&full_draft()).any());
}

#[test]
fn air_ride_scenario_without_driver() {
    let l1 = load(60.0, 1_000.0, true);
    let draft = TripDraft {
        driver: None,
        truck: Some(truck(Some(20_000.0))),
        trailer: Some(trailer(Some(53.0), Some(20_000.0), false)),
        loads: vec![l1],
        ..Default::default()
    };
    let warnings = evaluate(&draft);
    assert!(warnings.air_ride);
    assert!(warnings.length, "60 ft of loads exceeds a 53 ft deck");
    assert!(!warnings.weight);
}

#[test]
fn length_equal_to_capacity_is_not_a_warning() {
    let draft = TripDraft {
        trailer: Some(trailer(Some(53.0), None, true)),
        loads: vec![load(20.0, 1.0, false), load(33.0, 1.0, false)],
        ..Default::default()
    };
    assert!(!evaluate(&draft).length);
}

#[test]
fn length_sums_all_loads() {
    let draft = TripDraft {
        trailer: Some(trailer(Some(53.0), None, true)),
        loads: vec![load(30.0, 1.0, false), load(30.0, 1.0, false)],
        ..Default::default()
    };
    assert!(evaluate(&draft).length);
}

#[test]
fn no_trailer_means_no_length_or_air_ride_warning() {
    let draft = TripDraft {
        truck: Some(truck(Some(1.0))),
        loads: vec![load(500.0, 500.0, true)],
        ..Default::default()
    };
    let warnings = evaluate(&draft);
    assert!(!warnings.length);
    assert!(!warnings.air_ride);
    assert!(!warnings.weight);
}

#[test]
fn weight_uses_combined_capacity() {
    let mut draft = TripDraft {
        truck: Some(truck(Some(10_000.0))),
        trailer: Some(trailer(None, Some(15_000.0), true)),
        loads: vec![load(1.0, 24_000.0, false)],
        ..Default::default()
    };
    assert!(!evaluate(&draft).weight);
    draft.loads.push(load(1.0, 2_000.0, false));
    assert!(evaluate(&draft).weight);
}

#[test]
fn weight_needs_both_capacities() {
    let draft = TripDraft {
        truck: Some(truck(None)),
        trailer: Some(trailer(None, Some(1.0), true)),
        loads: vec![load(1.0, 99_999.0, false)],
        ..Default::default()
    };
    assert!(!evaluate(&draft).weight);
}

#[test]
fn air_ride_trailer_satisfies_requirement() {
    let draft = TripDraft {
        trailer: Some(trailer(None, None, true)),
        loads: vec![load(1.0, 1.0, true)],
        ..Default::default()
    };
    assert!(!evaluate(&draft).air_ride);
}

#[test]
fn evaluate_is_idempotent_and_pure() {
    let mut draft = full_draft();
    draft.loads.push(load(100.0, 100_000.0, true));
    let before = draft.clone();
    let first = evaluate(&draft);
    let second = evaluate(&draft);
    assert_eq!(first, second);
    assert_eq!(draft, before);
}

#[test]
fn totals_sum_lengths_and_weights() {
    let totals = LoadTotals::of(&[load(10.0, 100.0, false), load(2.5, 50.0, false)]);
    assert_eq!(totals.length, 12.5);
    assert_eq!(totals.weight, 150.0);
}
