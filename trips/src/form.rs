//! Bridge to the host form container.
//!
//! The host keeps the draft as two named JSON fields. This is the only module
//! that speaks in field names; everywhere else the draft is typed.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::collections::HashMap;

use serde_json::Value;

use crate::card::Load;
use crate::draft::{DraftError, DriverWithAssets, TripDraft};

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("form field `{0}` could not be decoded: {1}")]
    Decode(&'static str, #[source] serde_json::Error),
    #[error("form field `{0}` could not be encoded: {1}")]
    Encode(&'static str, #[source] serde_json::Error),
    #[error(transparent)]
    Draft(#[from] DraftError),
}

/// The two form fields the engine reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    DriverWithAssets,
    Loads,
}

impl FormField {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DriverWithAssets => "driverWithAssets",
            Self::Loads => "loads",
        }
    }
}

/// A host form container.
pub trait FormState {
    /// Current value of `field`, or `None` when the field was never set.
    fn get(&self, field: FormField) -> Option<Value>;
    fn set(&mut self, field: FormField, value: Value);
}

/// Hash-map backed form, for hosts without their own container.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    fields: HashMap<&'static str, Value>,
}

impl MemoryForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormState for MemoryForm {
    fn get(&self, field: FormField) -> Option<Value> {
        self.fields.get(field.name()).cloned()
    }

    fn set(&mut self, field: FormField, value: Value) {
        self.fields.insert(field.name(), value);
    }
}

/// Read a draft out of the form. Absent or null fields read as empty.
///
/// # Errors
///
/// Returns [`FormError::Decode`] when a field has the wrong shape and
/// [`FormError::Draft`] when the loads repeat an identity.
pub fn read_draft(form: &dyn FormState) -> Result<TripDraft, FormError> {
    let assets: DriverWithAssets = read_field(form, FormField::DriverWithAssets)?.unwrap_or_default();
    let loads: Vec<Load> = read_field(form, FormField::Loads)?.unwrap_or_default();
    Ok(TripDraft::from_parts(assets, loads)?)
}

/// Write the draft's facets and loads into the form.
///
/// # Errors
///
/// Returns [`FormError::Encode`] if a field cannot be serialized.
pub fn write_draft(form: &mut dyn FormState, draft: &TripDraft) -> Result<(), FormError> {
    let field = FormField::DriverWithAssets;
    let assets = serde_json::to_value(draft.driver_with_assets()).map_err(|e| FormError::Encode(field.name(), e))?;
    form.set(field, assets);

    let field = FormField::Loads;
    let loads = serde_json::to_value(&draft.loads).map_err(|e| FormError::Encode(field.name(), e))?;
    form.set(field, loads);
    Ok(())
}

fn read_field<T: serde::de::DeserializeOwned>(form: &dyn FormState, field: FormField) -> Result<Option<T>, FormError> {
    match form.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(|e| FormError::Decode(field.name(), e)),
    }
}
