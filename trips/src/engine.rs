use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::card::{CardKind, DraggableCard, Entity, EntityId, Load, classify};
use crate::config::ComposerConfig;
use crate::drag::{DragState, SessionMode, TripId};
use crate::draft::{DraftError, DraftStore, Facet, MutationIntent, Requirement, SplitFacets, TripDraft};
use crate::form::{self, FormError, FormState};
use crate::labels::{self, Translate, TripLabels};
use crate::split::{SplitController, SplitError};
use crate::warnings::{self, LoadTotals, TripWarnings};
use crate::zone::{DropZone, resolve};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    DragStarted { kind: CardKind, highlight: DropZone },
    Assigned { facet: Facet, id: EntityId },
    /// An entity left the trip and goes back to its results pool.
    Evicted { entity: Entity },
    LoadAdded { index: usize, id: EntityId },
    LoadRemoved { index: usize, load: Load },
    DropRejected { zone: DropZone, reason: String },
    Split { facet: Facet },
    Reset,
    RenderNeeded,
}

/// Render-ready read model.
#[derive(Debug, Clone, Serialize)]
pub struct TripView {
    pub mode: SessionMode,
    pub draft: Arc<TripDraft>,
    pub warnings: TripWarnings,
    pub totals: LoadTotals,
    pub can_submit: bool,
    pub missing: Vec<Requirement>,
    /// Zone accepting the card being dragged.
    pub highlight: Option<DropZone>,
    /// Facets whose split control should be enabled.
    pub split_available: SplitFacets,
}

/// Payload handed to the submission pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSubmission {
    /// Set when saving an edited trip, absent when dispatching a new one.
    pub trip_id: Option<TripId>,
    pub driver_id: EntityId,
    pub truck_id: EntityId,
    pub trailer_id: EntityId,
    /// Loads in stop order.
    pub load_ids: Vec<EntityId>,
    pub split: SplitFacets,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("trip is incomplete, missing {missing:?}")]
    Incomplete { missing: Vec<Requirement> },
}

/// One trip composition session.
///
/// Owns the draft store for the lifetime of the session and processes host
/// events strictly one at a time.
#[derive(Debug)]
pub struct Composer {
    store: DraftStore,
    drag: DragState,
    mode: SessionMode,
    split: SplitController,
    config: ComposerConfig,
}

impl Composer {
    /// Open a session composing a new trip.
    #[must_use]
    pub fn new(config: ComposerConfig) -> Self {
        Self::with_store(config, SessionMode::Create, DraftStore::new())
    }

    /// Open a session editing a dispatched trip.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::DuplicateLoad`] if `draft` repeats a load.
    pub fn edit(
        config: ComposerConfig,
        trip_id: TripId,
        external_number: Option<u64>,
        draft: TripDraft,
    ) -> Result<Self, DraftError> {
        let store = DraftStore::with_draft(draft)?;
        Ok(Self::with_store(config, SessionMode::Edit { trip_id, external_number }, store))
    }

    /// Open a session hydrated from the host form.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] if a field cannot be decoded.
    pub fn from_form(config: ComposerConfig, mode: SessionMode, form: &dyn FormState) -> Result<Self, FormError> {
        let store = DraftStore::with_draft(form::read_draft(form)?)?;
        Ok(Self::with_store(config, mode, store))
    }

    fn with_store(config: ComposerConfig, mode: SessionMode, store: DraftStore) -> Self {
        let split = SplitController::new(mode.is_edit(), config.split_enabled);
        debug!(?mode, "trip composer opened");
        Self { store, drag: DragState::Idle, mode, split, config }
    }

    // --- Drag lifecycle ---

    /// Begin dragging a classified card. Replaces any card already in flight.
    pub fn on_drag_start(&mut self, card: DraggableCard) -> Vec<Action> {
        let kind = card.kind();
        let highlight = DropZone::for_kind(kind);
        debug!(?kind, id = %card.id(), "drag started");
        self.drag = DragState::Dragging { card, kind };
        vec![Action::DragStarted { kind, highlight }, Action::RenderNeeded]
    }

    /// Begin dragging a raw card payload. Unclassifiable payloads are logged
    /// and leave the engine idle.
    pub fn on_drag_start_payload(&mut self, payload: &Value) -> Vec<Action> {
        match classify(payload) {
            Ok(card) => self.on_drag_start(card),
            Err(err) => {
                warn!(error = %err, "ignoring unclassifiable card");
                self.drag = DragState::Idle;
                Vec::new()
            }
        }
    }

    /// Drop the card in flight onto `zone`.
    pub fn on_drop(&mut self, zone: DropZone) -> Vec<Action> {
        let DragState::Dragging { card, .. } = std::mem::take(&mut self.drag) else {
            debug!(zone = zone.id(), "drop without a drag ignored");
            return Vec::new();
        };

        let intent = match resolve(zone, &card, self.store.draft()) {
            Ok(intent) => intent,
            Err(err) => {
                debug!(zone = zone.id(), error = %err, "drop rejected");
                return vec![Action::DropRejected { zone, reason: err.to_string() }, Action::RenderNeeded];
            }
        };

        let mut actions = Vec::new();
        match &intent {
            MutationIntent::Replace(assignment) => {
                actions.push(Action::Assigned { facet: assignment.facet(), id: assignment.id() });
            }
            MutationIntent::Append(load) => {
                actions.push(Action::LoadAdded { index: self.store.draft().loads.len(), id: load.id });
            }
            MutationIntent::Unchanged => {}
        }

        match self.store.apply(intent) {
            Ok(commit) => {
                if let Some(entity) = commit.evicted {
                    actions.push(Action::Evicted { entity });
                }
            }
            Err(err) => {
                warn!(zone = zone.id(), error = %err, "resolved drop refused by store");
                return vec![Action::DropRejected { zone, reason: err.to_string() }, Action::RenderNeeded];
            }
        }

        debug!(zone = zone.id(), warnings = ?self.warnings(), "drop applied");
        actions.push(Action::RenderNeeded);
        actions
    }

    /// The drag ended outside every zone.
    pub fn on_drag_cancel(&mut self) -> Vec<Action> {
        if self.drag.is_idle() {
            return Vec::new();
        }
        self.drag = DragState::Idle;
        vec![Action::RenderNeeded]
    }

    // --- Direct operations ---

    /// Remove the load at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::IndexOutOfRange`] if no load sits at `index`.
    pub fn remove_load(&mut self, index: usize) -> Result<Vec<Action>, DraftError> {
        let (_, load) = self.store.remove_load(index)?;
        Ok(vec![Action::LoadRemoved { index, load }, Action::RenderNeeded])
    }

    /// Split `facet` off for independent reassignment.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::NotAllowed`] outside edit mode, when splitting is
    /// disabled, or when the facet is empty.
    pub fn request_split(&mut self, facet: Facet) -> Result<Vec<Action>, SplitError> {
        let already = self.store.draft().split.get(facet);
        self.split.request_split(&mut self.store, facet)?;
        if already {
            return Ok(Vec::new());
        }
        info!(?facet, trip_id = ?self.mode.trip_id(), "facet split");
        Ok(vec![Action::Split { facet }, Action::RenderNeeded])
    }

    /// Unassign one facet.
    pub fn clear_facet(&mut self, facet: Facet) -> Vec<Action> {
        let (_, evicted) = self.store.clear_facet(facet);
        match evicted {
            Some(entity) => vec![Action::Evicted { entity }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// Clear driver, truck, trailer, and loads. When editing, split flags
    /// survive the reset.
    pub fn reset_all(&mut self) -> Vec<Action> {
        let previous = self.store.snapshot();
        if self.mode.is_edit() {
            self.store.clear_assignments();
        } else {
            self.store.reset();
        }

        let mut actions: Vec<Action> = [
            previous.driver.clone().map(Entity::Driver),
            previous.truck.clone().map(Entity::Truck),
            previous.trailer.clone().map(Entity::Trailer),
        ]
        .into_iter()
        .flatten()
        .chain(previous.loads.iter().cloned().map(Entity::Load))
        .map(|entity| Action::Evicted { entity })
        .collect();
        actions.push(Action::Reset);
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Host boundaries ---

    /// Write the draft back into the host form.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Encode`] if a field cannot be serialized.
    pub fn write_form(&self, form: &mut dyn FormState) -> Result<(), FormError> {
        form::write_draft(form, self.store.draft())
    }

    /// Build the payload for the submission pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Incomplete`] listing what is still missing.
    pub fn submit(&self) -> Result<TripSubmission, SubmitError> {
        let draft = self.store.draft();
        let (Some(driver), Some(truck), Some(trailer)) = (&draft.driver, &draft.truck, &draft.trailer) else {
            return Err(SubmitError::Incomplete { missing: draft.missing() });
        };
        if draft.loads.is_empty() {
            return Err(SubmitError::Incomplete { missing: draft.missing() });
        }

        let submission = TripSubmission {
            trip_id: self.mode.trip_id(),
            driver_id: driver.id,
            truck_id: truck.id,
            trailer_id: trailer.id,
            load_ids: draft.loads.iter().map(|l| l.id).collect(),
            split: draft.split,
        };
        info!(trip_id = ?submission.trip_id, loads = submission.load_ids.len(), "trip ready for submission");
        Ok(submission)
    }

    /// Discard the session. In edit mode, returns the trip to navigate back to.
    #[must_use]
    pub fn cancel(self) -> Option<TripId> {
        debug!(mode = ?self.mode, "trip composer cancelled");
        self.mode.trip_id()
    }

    // --- Queries ---

    /// The current draft snapshot.
    #[must_use]
    pub fn draft(&self) -> Arc<TripDraft> {
        self.store.snapshot()
    }

    #[must_use]
    pub fn warnings(&self) -> TripWarnings {
        warnings::evaluate(self.store.draft())
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.store.draft().can_submit()
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub fn config(&self) -> ComposerConfig {
        self.config
    }

    #[must_use]
    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Compose the read model for the renderer.
    #[must_use]
    pub fn view(&self) -> TripView {
        let draft = self.store.snapshot();
        let mut split_available = SplitFacets::default();
        for facet in Facet::ALL {
            split_available.set(facet, self.split.can_split(&draft, facet));
        }
        TripView {
            mode: self.mode,
            warnings: warnings::evaluate(&draft),
            totals: LoadTotals::of(&draft.loads),
            can_submit: draft.can_submit(),
            missing: draft.missing(),
            highlight: self.drag.highlight(),
            split_available,
            draft,
        }
    }

    /// Translate the current view into user-visible strings.
    #[must_use]
    pub fn labels(&self, translate: &dyn Translate) -> TripLabels {
        labels::build(&self.view(), self.config.measurement, translate)
    }
}
