use super::*;
use crate::card::Entity;
use crate::test_helpers::{driver, full_draft, load, trailer, truck};

fn search(entity: Entity) -> DraggableCard {
    DraggableCard::search(entity)
}

// =============================================================
// DropZone
// =============================================================

#[test]
fn zone_serde_uses_host_ids() {
    for zone in DropZone::ALL {
        let json = serde_json::to_string(&zone).unwrap();
        assert_eq!(json, format!("\"{}\"", zone.id()));
        let back: DropZone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, zone);
    }
}

#[test]
fn for_kind_inverts_accepts() {
    for zone in DropZone::ALL {
        assert_eq!(DropZone::for_kind(zone.accepts()), zone);
    }
}

#[test]
fn only_singleton_zones_have_facets() {
    assert_eq!(DropZone::Driver.facet(), Some(Facet::Driver));
    assert_eq!(DropZone::Loads.facet(), None);
}

// =============================================================
// resolve
// =============================================================

#[test]
fn driver_on_driver_zone_replaces() {
    let d = driver("D1");
    let intent = resolve(DropZone::Driver, &search(Entity::Driver(d.clone())), &TripDraft::default()).unwrap();
    assert_eq!(intent, MutationIntent::Replace(Assignment::Driver(d)));
}

#[test]
fn second_driver_still_replaces() {
    let draft = full_draft();
    let d2 = driver("D2");
    let intent = resolve(DropZone::Driver, &search(Entity::Driver(d2.clone())), &draft).unwrap();
    assert_eq!(intent, MutationIntent::Replace(Assignment::Driver(d2)));
}

#[test]
fn same_driver_again_is_unchanged() {
    let draft = full_draft();
    let current = draft.driver.clone().unwrap();
    let intent = resolve(DropZone::Driver, &search(Entity::Driver(current)), &draft).unwrap();
    assert_eq!(intent, MutationIntent::Unchanged);
}

#[test]
fn load_on_loads_zone_appends() {
    let l = load(10.0, 1.0, false);
    let intent = resolve(DropZone::Loads, &search(Entity::Load(l.clone())), &full_draft()).unwrap();
    assert_eq!(intent, MutationIntent::Append(l));
}

#[test]
fn load_on_driver_zone_is_incompatible() {
    let err = resolve(DropZone::Driver, &search(Entity::Load(load(1.0, 1.0, false))), &TripDraft::default())
        .unwrap_err();
    assert_eq!(err, DropError::Incompatible { zone: DropZone::Driver, kind: CardKind::Load });
}

#[test]
fn every_mismatch_is_incompatible() {
    let cards = [
        search(Entity::Driver(driver("D"))),
        search(Entity::Truck(truck(None))),
        search(Entity::Trailer(trailer(None, None, false))),
        search(Entity::Load(load(1.0, 1.0, false))),
    ];
    for zone in DropZone::ALL {
        for card in &cards {
            let result = resolve(zone, card, &TripDraft::default());
            if zone.accepts() == card.kind() {
                assert!(result.is_ok(), "{zone:?} should accept {:?}", card.kind());
            } else {
                assert!(matches!(result, Err(DropError::Incompatible { .. })));
            }
        }
    }
}

#[test]
fn fresh_duplicate_load_is_rejected() {
    let draft = full_draft();
    let existing = draft.loads[0].clone();
    let err = resolve(DropZone::Loads, &search(Entity::Load(existing.clone())), &draft).unwrap_err();
    assert_eq!(err, DropError::DuplicateLoad(existing.id));
}

#[test]
fn assigned_load_redropped_is_unchanged() {
    let draft = full_draft();
    let existing = draft.loads[0].clone();
    let card = DraggableCard::assigned(Entity::Load(existing));
    assert_eq!(resolve(DropZone::Loads, &card, &draft).unwrap(), MutationIntent::Unchanged);
}
