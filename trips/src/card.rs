//! Card model: the entities a dispatcher can drag and the classifier that
//! turns a raw card payload into a typed [`DraggableCard`].
//!
//! Cards arrive from the results lists as loose JSON objects that carry the
//! entity under a key named after its kind (`{"driver": {...}}`). The
//! classifier inspects that shape exactly once; everything downstream
//! switches on [`CardKind`] instead of probing fields.

#[cfg(test)]
#[path = "card_test.rs"]
mod card_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Unique identifier for a driver, asset, or load.
pub type EntityId = Uuid;

/// Error returned by [`classify`].
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    /// The payload is not a JSON object.
    #[error("card payload is not an object")]
    NotAnObject,
    /// None of the entity keys is present.
    #[error("card payload carries no driver, truck, trailer, or load")]
    MissingEntity,
    /// More than one entity key is present.
    #[error("card payload carries more than one entity: {0:?}")]
    Ambiguous(Vec<CardKind>),
    /// The entity body does not match its kind.
    #[error("malformed {kind:?} card: {source}")]
    Malformed {
        kind: CardKind,
        #[source]
        source: serde_json::Error,
    },
    /// The `source` tag is not a known [`CardSource`].
    #[error("unknown card source: {0}")]
    UnknownSource(String),
}

/// The kind of entity a card represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Driver,
    Truck,
    Trailer,
    Load,
}

impl CardKind {
    /// Every kind, in payload-key order.
    pub const ALL: [CardKind; 4] = [Self::Driver, Self::Truck, Self::Trailer, Self::Load];

    /// The payload key that carries an entity of this kind.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Driver => "driver",
            Self::Truck => "truck",
            Self::Trailer => "trailer",
            Self::Load => "load",
        }
    }
}

/// A driver that can be assigned to a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
}

/// A power unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    pub id: EntityId,
    #[serde(default)]
    pub unit_number: String,
    /// Payload weight the truck can carry; `None` when unknown.
    #[serde(default)]
    pub max_weight: Option<f64>,
}

/// A trailer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trailer {
    pub id: EntityId,
    #[serde(default)]
    pub unit_number: String,
    /// Usable deck length; `None` when unknown.
    #[serde(default)]
    pub max_length: Option<f64>,
    /// Payload weight the trailer can carry; `None` when unknown.
    #[serde(default)]
    pub max_weight: Option<f64>,
    /// Whether the trailer rides on air suspension.
    #[serde(default)]
    pub air_ride: bool,
}

/// A load to be picked up and delivered as one stop sequence entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub id: EntityId,
    #[serde(default)]
    pub reference: String,
    pub length: f64,
    pub weight: f64,
    #[serde(default)]
    pub air_ride_required: bool,
}

/// A draggable entity, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entity {
    Driver(Driver),
    Truck(Truck),
    Trailer(Trailer),
    Load(Load),
}

impl Entity {
    #[must_use]
    pub fn kind(&self) -> CardKind {
        match self {
            Self::Driver(_) => CardKind::Driver,
            Self::Truck(_) => CardKind::Truck,
            Self::Trailer(_) => CardKind::Trailer,
            Self::Load(_) => CardKind::Load,
        }
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        match self {
            Self::Driver(d) => d.id,
            Self::Truck(t) => t.id,
            Self::Trailer(t) => t.id,
            Self::Load(l) => l.id,
        }
    }
}

/// Where a card was picked up from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSource {
    /// A search result list; the entity is not yet on this trip.
    #[default]
    Search,
    /// The trip itself; the entity is already assigned.
    Assigned,
}

/// An entity in flight between a results list and a drop zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraggableCard {
    pub entity: Entity,
    #[serde(default)]
    pub source: CardSource,
}

impl DraggableCard {
    /// Wrap an entity picked from a search result list.
    #[must_use]
    pub fn search(entity: Entity) -> Self {
        Self { entity, source: CardSource::Search }
    }

    /// Wrap an entity that is already assigned to the trip.
    #[must_use]
    pub fn assigned(entity: Entity) -> Self {
        Self { entity, source: CardSource::Assigned }
    }

    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.entity.kind()
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.entity.id()
    }
}

/// Classify a raw card payload.
///
/// The payload must be an object holding exactly one of the keys `driver`,
/// `truck`, `trailer`, or `load`, plus an optional `source` tag
/// (`"search"` or `"assigned"`, defaulting to `"search"`).
///
/// # Errors
///
/// Returns a [`ClassificationError`] when the payload is not an object, has
/// zero or several entity keys, carries an entity body that does not decode
/// for its kind, or names an unknown source.
pub fn classify(payload: &Value) -> Result<DraggableCard, ClassificationError> {
    let Some(fields) = payload.as_object() else {
        return Err(ClassificationError::NotAnObject);
    };

    let present: Vec<CardKind> = CardKind::ALL
        .into_iter()
        .filter(|kind| fields.get(kind.key()).is_some_and(|v| !v.is_null()))
        .collect();

    let kind = match present.as_slice() {
        [] => return Err(ClassificationError::MissingEntity),
        [kind] => *kind,
        _ => return Err(ClassificationError::Ambiguous(present)),
    };

    let source = match fields.get("source").and_then(Value::as_str) {
        None | Some("search") => CardSource::Search,
        Some("assigned") => CardSource::Assigned,
        Some(other) => return Err(ClassificationError::UnknownSource(other.to_string())),
    };

    let body = fields.get(kind.key()).cloned().unwrap_or(Value::Null);
    let malformed = |source| ClassificationError::Malformed { kind, source };
    let entity = match kind {
        CardKind::Driver => Entity::Driver(serde_json::from_value(body).map_err(malformed)?),
        CardKind::Truck => Entity::Truck(serde_json::from_value(body).map_err(malformed)?),
        CardKind::Trailer => Entity::Trailer(serde_json::from_value(body).map_err(malformed)?),
        CardKind::Load => Entity::Load(serde_json::from_value(body).map_err(malformed)?),
    };

    Ok(DraggableCard { entity, source })
}
