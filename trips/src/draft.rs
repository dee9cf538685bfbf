//! Trip draft model and its copy-on-write store.
//!
//! `TripDraft` is the aggregate under construction: three singleton facets
//! (driver, truck, trailer), the ordered load list, and the per-facet split
//! flags. `DraftStore` owns the current snapshot behind an `Arc` and replaces
//! it wholesale on every mutation, so a snapshot handed to the renderer or to
//! the submission pipeline never changes underneath its reader.

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::card::{CardKind, Driver, Entity, EntityId, Load, Trailer, Truck};

/// Error returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// `remove_load` was called with an index outside `[0, len)`.
    #[error("load index {index} out of range for {len} loads")]
    IndexOutOfRange { index: usize, len: usize },
    /// The load is already part of the trip.
    #[error("load {0} is already on the trip")]
    DuplicateLoad(EntityId),
}

/// One of the three singleton assignment slots of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Driver,
    Truck,
    Trailer,
}

impl Facet {
    pub const ALL: [Facet; 3] = [Self::Driver, Self::Truck, Self::Trailer];

    /// The card kind this facet accepts.
    #[must_use]
    pub fn kind(self) -> CardKind {
        match self {
            Self::Driver => CardKind::Driver,
            Self::Truck => CardKind::Truck,
            Self::Trailer => CardKind::Trailer,
        }
    }
}

/// Per-facet split flags.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitFacets {
    pub driver: bool,
    pub truck: bool,
    pub trailer: bool,
}

impl SplitFacets {
    #[must_use]
    pub fn get(&self, facet: Facet) -> bool {
        match facet {
            Facet::Driver => self.driver,
            Facet::Truck => self.truck,
            Facet::Trailer => self.trailer,
        }
    }

    pub fn set(&mut self, facet: Facet, value: bool) {
        match facet {
            Facet::Driver => self.driver = value,
            Facet::Truck => self.truck = value,
            Facet::Trailer => self.trailer = value,
        }
    }

    /// Whether any facet has been split off.
    #[must_use]
    pub fn any(&self) -> bool {
        self.driver || self.truck || self.trailer
    }
}

/// The `{driver, truck, trailer}` triple, as held in the `driverWithAssets`
/// form field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverWithAssets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<Driver>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck: Option<Truck>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer: Option<Trailer>,
}

/// A part of the trip that must be present before it can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    Driver,
    Truck,
    Trailer,
    Loads,
}

/// The in-progress assignment of driver, truck, trailer, and loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripDraft {
    pub driver: Option<Driver>,
    pub truck: Option<Truck>,
    pub trailer: Option<Trailer>,
    /// Stop order; index 0 is the first stop.
    pub loads: Vec<Load>,
    pub split: SplitFacets,
}

impl TripDraft {
    /// Build a draft from the two form fields.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::DuplicateLoad`] if `loads` repeats an identity.
    pub fn from_parts(assets: DriverWithAssets, loads: Vec<Load>) -> Result<Self, DraftError> {
        ensure_unique(&loads)?;
        Ok(Self { driver: assets.driver, truck: assets.truck, trailer: assets.trailer, loads, split: SplitFacets::default() })
    }

    /// Whether `facet` currently holds an entity.
    #[must_use]
    pub fn has(&self, facet: Facet) -> bool {
        match facet {
            Facet::Driver => self.driver.is_some(),
            Facet::Truck => self.truck.is_some(),
            Facet::Trailer => self.trailer.is_some(),
        }
    }

    /// Identity of the entity in `facet`, if any.
    #[must_use]
    pub fn facet_id(&self, facet: Facet) -> Option<EntityId> {
        match facet {
            Facet::Driver => self.driver.as_ref().map(|d| d.id),
            Facet::Truck => self.truck.as_ref().map(|t| t.id),
            Facet::Trailer => self.trailer.as_ref().map(|t| t.id),
        }
    }

    #[must_use]
    pub fn contains_load(&self, id: EntityId) -> bool {
        self.loads.iter().any(|l| l.id == id)
    }

    /// The facet triple, cloned out for the `driverWithAssets` field.
    #[must_use]
    pub fn driver_with_assets(&self) -> DriverWithAssets {
        DriverWithAssets { driver: self.driver.clone(), truck: self.truck.clone(), trailer: self.trailer.clone() }
    }

    /// Parts still missing before the trip can be submitted, in display order.
    #[must_use]
    pub fn missing(&self) -> Vec<Requirement> {
        let mut missing = Vec::new();
        if self.driver.is_none() {
            missing.push(Requirement::Driver);
        }
        if self.truck.is_none() {
            missing.push(Requirement::Truck);
        }
        if self.trailer.is_none() {
            missing.push(Requirement::Trailer);
        }
        if self.loads.is_empty() {
            missing.push(Requirement::Loads);
        }
        missing
    }

    /// Driver, truck, and trailer assigned and at least one load.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.missing().is_empty()
    }

    /// Take the entity out of `facet`, leaving it empty.
    fn take(&mut self, facet: Facet) -> Option<Entity> {
        match facet {
            Facet::Driver => self.driver.take().map(Entity::Driver),
            Facet::Truck => self.truck.take().map(Entity::Truck),
            Facet::Trailer => self.trailer.take().map(Entity::Trailer),
        }
    }
}

/// An entity destined for one of the singleton facets.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    Driver(Driver),
    Truck(Truck),
    Trailer(Trailer),
}

impl Assignment {
    #[must_use]
    pub fn facet(&self) -> Facet {
        match self {
            Self::Driver(_) => Facet::Driver,
            Self::Truck(_) => Facet::Truck,
            Self::Trailer(_) => Facet::Trailer,
        }
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        match self {
            Self::Driver(d) => d.id,
            Self::Truck(t) => t.id,
            Self::Trailer(t) => t.id,
        }
    }
}

impl From<Assignment> for Entity {
    fn from(assignment: Assignment) -> Self {
        match assignment {
            Assignment::Driver(d) => Entity::Driver(d),
            Assignment::Truck(t) => Entity::Truck(t),
            Assignment::Trailer(t) => Entity::Trailer(t),
        }
    }
}

/// A resolved drop, ready to be applied to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationIntent {
    /// Put the entity into its facet, evicting the previous occupant.
    Replace(Assignment),
    /// Add the load after the current last stop.
    Append(Load),
    /// The drop lands where the entity already is.
    Unchanged,
}

/// A direct write to one of the two form-backed fields.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWrite {
    DriverWithAssets(DriverWithAssets),
    Loads(Vec<Load>),
}

/// Outcome of [`DraftStore::apply`].
#[derive(Debug, Clone)]
pub struct Commit {
    /// The new snapshot.
    pub draft: Arc<TripDraft>,
    /// The occupant displaced by a `Replace`, to be returned to its pool.
    pub evicted: Option<Entity>,
}

/// Copy-on-write owner of the current trip draft.
#[derive(Debug, Clone, Default)]
pub struct DraftStore {
    current: Arc<TripDraft>,
}

impl DraftStore {
    /// Create a store holding an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `draft`. Split flags are scoped to
    /// one session, so any flags carried in by `draft` are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::DuplicateLoad`] if the draft repeats a load.
    pub fn with_draft(mut draft: TripDraft) -> Result<Self, DraftError> {
        ensure_unique(&draft.loads)?;
        draft.split = SplitFacets::default();
        Ok(Self { current: Arc::new(draft) })
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<TripDraft> {
        Arc::clone(&self.current)
    }

    #[must_use]
    pub fn draft(&self) -> &TripDraft {
        &self.current
    }

    /// Apply a resolved drop.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::DuplicateLoad`] when appending a load that is
    /// already on the trip.
    pub fn apply(&mut self, intent: MutationIntent) -> Result<Commit, DraftError> {
        let (draft, evicted) = match intent {
            MutationIntent::Unchanged => (self.snapshot(), None),
            MutationIntent::Replace(assignment) => {
                let mut evicted = None;
                let draft = self.commit(|next| {
                    evicted = next.take(assignment.facet());
                    match assignment {
                        Assignment::Driver(d) => next.driver = Some(d),
                        Assignment::Truck(t) => next.truck = Some(t),
                        Assignment::Trailer(t) => next.trailer = Some(t),
                    }
                });
                (draft, evicted)
            }
            MutationIntent::Append(load) => {
                if self.current.contains_load(load.id) {
                    return Err(DraftError::DuplicateLoad(load.id));
                }
                (self.commit(|next| next.loads.push(load)), None)
            }
        };
        Ok(Commit { draft, evicted })
    }

    /// Remove the load at `index`, shifting later stops up by one.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::IndexOutOfRange`] if `index >= loads.len()`.
    pub fn remove_load(&mut self, index: usize) -> Result<(Arc<TripDraft>, Load), DraftError> {
        let len = self.current.loads.len();
        let Some(removed) = self.current.loads.get(index).cloned() else {
            return Err(DraftError::IndexOutOfRange { index, len });
        };
        let draft = self.commit(|next| {
            next.loads.remove(index);
        });
        Ok((draft, removed))
    }

    /// Unassign one facet. Its split flag, if set, is kept: the flag records
    /// that the facet was split during this session, and splits are never
    /// undone within a session.
    pub fn clear_facet(&mut self, facet: Facet) -> (Arc<TripDraft>, Option<Entity>) {
        if !self.current.has(facet) {
            return (self.snapshot(), None);
        }
        let mut evicted = None;
        let draft = self.commit(|next| evicted = next.take(facet));
        (draft, evicted)
    }

    /// Clear every facet, every load, and every split flag.
    pub fn reset(&mut self) -> Arc<TripDraft> {
        self.current = Arc::new(TripDraft::default());
        self.snapshot()
    }

    /// Clear every facet and every load, keeping the split flags.
    pub fn clear_assignments(&mut self) -> Arc<TripDraft> {
        let split = self.current.split;
        self.current = Arc::new(TripDraft { split, ..TripDraft::default() });
        self.snapshot()
    }

    /// Overwrite one form-backed field wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::DuplicateLoad`] if a loads write repeats an identity.
    pub fn set(&mut self, write: FieldWrite) -> Result<Arc<TripDraft>, DraftError> {
        match write {
            FieldWrite::DriverWithAssets(assets) => Ok(self.commit(|next| {
                next.driver = assets.driver;
                next.truck = assets.truck;
                next.trailer = assets.trailer;
            })),
            FieldWrite::Loads(loads) => {
                ensure_unique(&loads)?;
                Ok(self.commit(|next| next.loads = loads))
            }
        }
    }

    /// Flag `facet` as split. Precondition checks belong to the split controller.
    pub(crate) fn mark_split(&mut self, facet: Facet) -> Arc<TripDraft> {
        if self.current.split.get(facet) {
            return self.snapshot();
        }
        self.commit(|next| next.split.set(facet, true))
    }

    fn commit(&mut self, mutate: impl FnOnce(&mut TripDraft)) -> Arc<TripDraft> {
        let mut next = TripDraft::clone(&self.current);
        mutate(&mut next);
        self.current = Arc::new(next);
        self.snapshot()
    }
}

fn ensure_unique(loads: &[Load]) -> Result<(), DraftError> {
    for (i, load) in loads.iter().enumerate() {
        if loads[..i].iter().any(|earlier| earlier.id == load.id) {
            return Err(DraftError::DuplicateLoad(load.id));
        }
    }
    Ok(())
}
