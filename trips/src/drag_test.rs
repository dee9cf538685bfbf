use super::*;
use crate::card::Entity;
use crate::test_helpers::load;

#[test]
fn drag_state_default_is_idle() {
    let state = DragState::default();
    assert!(state.is_idle());
    assert!(state.card().is_none());
    assert!(state.highlight().is_none());
}

#[test]
fn dragging_highlights_matching_zone() {
    let card = DraggableCard::search(Entity::Load(load(1.0, 1.0, false)));
    let state = DragState::Dragging { kind: card.kind(), card };
    assert!(!state.is_idle());
    assert_eq!(state.highlight(), Some(DropZone::Loads));
}

#[test]
fn session_mode_defaults_to_create() {
    assert_eq!(SessionMode::default(), SessionMode::Create);
    assert!(!SessionMode::Create.is_edit());
    assert_eq!(SessionMode::Create.trip_id(), None);
}

#[test]
fn edit_mode_exposes_trip_id() {
    let mode = SessionMode::Edit { trip_id: 42, external_number: Some(1042) };
    assert!(mode.is_edit());
    assert_eq!(mode.trip_id(), Some(42));
}

#[test]
fn session_mode_serde_is_tagged() {
    let json = serde_json::to_value(SessionMode::Edit { trip_id: 7, external_number: None }).unwrap();
    assert_eq!(json, serde_json::json!({ "mode": "edit", "trip_id": 7, "external_number": null }));
    let back: SessionMode = serde_json::from_value(serde_json::json!({ "mode": "create" })).unwrap();
    assert_eq!(back, SessionMode::Create);
}
