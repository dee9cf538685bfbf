use std::io::Cursor;

use serde_json::json;
use trips::config::ComposerConfig;
use trips::draft::TripDraft;
use uuid::Uuid;

use super::*;

fn lines(events: &[Value]) -> Cursor<String> {
    let body: Vec<String> = events.iter().map(Value::to_string).collect();
    Cursor::new(body.join("\n"))
}

#[test]
fn parses_tagged_events() {
    let event: Event = serde_json::from_str(r#"{"event":"drop","zone":"trailerZone"}"#).unwrap();
    assert_eq!(event, Event::Drop { zone: DropZone::Trailer });
    let event: Event = serde_json::from_str(r#"{"event":"split","facet":"truck"}"#).unwrap();
    assert_eq!(event, Event::Split { facet: Facet::Truck });
    let event: Event = serde_json::from_str(r#"{"event":"reset"}"#).unwrap();
    assert_eq!(event, Event::Reset);
}

#[test]
fn replay_assigns_driver_and_load() {
    let driver = Uuid::new_v4();
    let load = Uuid::new_v4();
    let input = lines(&[
        json!({ "event": "drag_start", "card": { "driver": { "id": driver, "name": "Ada" } } }),
        json!({ "event": "drop", "zone": "driverZone" }),
        json!({ "event": "drag_start", "card": { "load": { "id": load, "length": 10.0, "weight": 500.0 } } }),
        json!({ "event": "drop", "zone": "loadsZone" }),
    ]);
    let mut composer = Composer::new(ComposerConfig::default());
    let actions = replay(&mut composer, input).unwrap();

    assert!(actions.contains(&Action::Assigned { facet: Facet::Driver, id: driver }));
    assert!(actions.contains(&Action::LoadAdded { index: 0, id: load }));
    let draft = composer.draft();
    assert_eq!(draft.driver.as_ref().map(|d| d.id), Some(driver));
    assert_eq!(draft.loads.len(), 1);
}

#[test]
fn blank_lines_are_skipped() {
    let mut composer = Composer::new(ComposerConfig::default());
    let input = Cursor::new("\n  \n{\"event\":\"reset\"}\n\n".to_owned());
    let actions = replay(&mut composer, input).unwrap();
    assert_eq!(actions.last(), Some(&Action::RenderNeeded));
}

#[test]
fn invalid_event_reports_line() {
    let mut composer = Composer::new(ComposerConfig::default());
    let input = Cursor::new("{\"event\":\"reset\"}\n{\"event\":\"fly\"}\n".to_owned());
    let err = replay(&mut composer, input).unwrap_err();
    assert!(matches!(err, ReplayError::Event { line: 2, .. }));
}

#[test]
fn remove_out_of_range_stops_replay() {
    let mut composer = Composer::new(ComposerConfig::default());
    let input = lines(&[json!({ "event": "remove_load", "index": 3 })]);
    let err = replay(&mut composer, input).unwrap_err();
    assert!(matches!(err, ReplayError::Draft { line: 1, source: DraftError::IndexOutOfRange { index: 3, len: 0 } }));
}

#[test]
fn split_in_create_mode_is_an_error() {
    let mut composer = Composer::new(ComposerConfig::default());
    let err = apply_at(&mut composer, Event::Split { facet: Facet::Driver }, 1).unwrap_err();
    assert!(matches!(err, ReplayError::Split { .. }));
}

#[test]
fn rejected_drop_is_not_an_error() {
    let mut composer = Composer::edit(ComposerConfig::default(), 1, None, TripDraft::default()).unwrap();
    apply_at(&mut composer, Event::DragStart { card: json!({ "truck": { "id": Uuid::new_v4() } }) }, 1).unwrap();
    let actions = apply_at(&mut composer, Event::Drop { zone: DropZone::Driver }, 2).unwrap();
    assert!(matches!(actions.first(), Some(Action::DropRejected { zone: DropZone::Driver, .. })));
    assert!(composer.draft().truck.is_none());
}
