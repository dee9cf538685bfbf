//! Recorded composition sessions and their replay through the engine.
//!
//! A session is a JSONL stream, one host event per line:
//!
//! ```text
//! {"event":"drag_start","card":{"driver":{"id":"…","name":"Ada"}}}
//! {"event":"drop","zone":"driverZone"}
//! {"event":"remove_load","index":0}
//! ```

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::io::BufRead;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};
use trips::draft::{DraftError, Facet};
use trips::engine::{Action, Composer};
use trips::split::SplitError;
use trips::zone::DropZone;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read session: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: invalid event: {source}")]
    Event {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: {source}")]
    Draft {
        line: usize,
        #[source]
        source: DraftError,
    },
    #[error("line {line}: {source}")]
    Split {
        line: usize,
        #[source]
        source: SplitError,
    },
}

/// One host event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    DragStart { card: Value },
    Drop { zone: DropZone },
    DragCancel,
    RemoveLoad { index: usize },
    Split { facet: Facet },
    Clear { facet: Facet },
    Reset,
}

/// Apply one event read from `line`. Drop rejections are reported as
/// actions, not errors.
fn apply_at(composer: &mut Composer, event: Event, line: usize) -> Result<Vec<Action>, ReplayError> {
    let actions = match event {
        Event::DragStart { card } => composer.on_drag_start_payload(&card),
        Event::Drop { zone } => composer.on_drop(zone),
        Event::DragCancel => composer.on_drag_cancel(),
        Event::RemoveLoad { index } => {
            composer.remove_load(index).map_err(|source| ReplayError::Draft { line, source })?
        }
        Event::Split { facet } => composer.request_split(facet).map_err(|source| ReplayError::Split { line, source })?,
        Event::Clear { facet } => composer.clear_facet(facet),
        Event::Reset => composer.reset_all(),
    };
    Ok(actions)
}

/// Replay every event in `input`, returning the actions in order.
///
/// Blank lines are skipped. Replay stops at the first failing event.
///
/// # Errors
///
/// Returns [`ReplayError`] with the 1-based line number of the failing event.
pub fn replay(composer: &mut Composer, input: impl BufRead) -> Result<Vec<Action>, ReplayError> {
    let mut actions = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let event: Event =
            serde_json::from_str(trimmed).map_err(|source| ReplayError::Event { line: line_no, source })?;
        debug!(line = line_no, ?event, "replaying event");
        match apply_at(composer, event, line_no) {
            Ok(mut produced) => actions.append(&mut produced),
            Err(err) => {
                error!(error = %err, "replay stopped");
                return Err(err);
            }
        }
    }
    Ok(actions)
}
