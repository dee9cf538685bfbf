//! Split controller: marks facets of a dispatched trip for independent
//! reassignment.
//!
//! Splitting only flags intent on the draft. Materializing the secondary
//! assignment is the host's job once it sees the flag.

#[cfg(test)]
#[path = "split_test.rs"]
mod split_test;

use std::sync::Arc;

use serde::Serialize;

use crate::draft::{DraftStore, Facet, TripDraft};

/// Why a split request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitDenial {
    /// The session is composing a new trip, not editing a dispatched one.
    NotEditing,
    /// Splitting is switched off by configuration.
    Disabled,
    /// Nothing is assigned to the facet.
    EmptyFacet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    #[error("cannot split {facet:?}: {reason:?}")]
    NotAllowed { facet: Facet, reason: SplitDenial },
}

/// Per-session split policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitController {
    edit_mode: bool,
    enabled: bool,
}

impl SplitController {
    #[must_use]
    pub fn new(edit_mode: bool, enabled: bool) -> Self {
        Self { edit_mode, enabled }
    }

    /// Check the split preconditions for `facet` against `draft`.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::NotAllowed`] with the first failing precondition.
    pub fn check(&self, draft: &TripDraft, facet: Facet) -> Result<(), SplitError> {
        let deny = |reason| Err(SplitError::NotAllowed { facet, reason });
        if !self.enabled {
            return deny(SplitDenial::Disabled);
        }
        if !self.edit_mode {
            return deny(SplitDenial::NotEditing);
        }
        if !draft.has(facet) {
            return deny(SplitDenial::EmptyFacet);
        }
        Ok(())
    }

    /// Whether a split of `facet` would currently succeed and change anything.
    #[must_use]
    pub fn can_split(&self, draft: &TripDraft, facet: Facet) -> bool {
        !draft.split.get(facet) && self.check(draft, facet).is_ok()
    }

    /// Flag `facet` as split. Splitting an already split facet is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::NotAllowed`] outside edit mode, when splitting is
    /// disabled, or when the facet is empty.
    pub fn request_split(&self, store: &mut DraftStore, facet: Facet) -> Result<Arc<TripDraft>, SplitError> {
        self.check(store.draft(), facet)?;
        Ok(store.mark_split(facet))
    }
}
