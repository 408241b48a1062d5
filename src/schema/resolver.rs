//! Reference resolution
//!
//! Reference fields are never verified locally. Existence of the target
//! entity is delegated to an `EntityResolver` supplied by the host.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity kinds a vehicle listing may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "locations")]
    Location,
    #[serde(rename = "contacts")]
    Contact,
    #[serde(rename = "vehicle-makes")]
    VehicleMake,
    #[serde(rename = "vehicle-models")]
    VehicleModel,
    #[serde(rename = "countries")]
    Country,
    #[serde(rename = "users")]
    User,
    #[serde(rename = "binaries")]
    Binary,
}

impl EntityKind {
    /// Returns the collection holding entities of this kind
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Location => "locations",
            EntityKind::Contact => "contacts",
            EntityKind::VehicleMake => "vehicle-makes",
            EntityKind::VehicleModel => "vehicle-models",
            EntityKind::Country => "countries",
            EntityKind::User => "users",
            EntityKind::Binary => "binaries",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection())
    }
}

/// One pending reference check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    /// Field path the id was found at
    pub field: String,
    /// Target entity kind
    pub kind: EntityKind,
    /// Target id
    pub id: String,
}

/// Entity existence lookup provided by the host.
///
/// `resolve_all` receives every reference of a record at once and must
/// return one answer per lookup, in order. Hosts that can resolve in
/// parallel override it; the validator aggregates all failures either way.
pub trait EntityResolver {
    /// Checks if an entity of `kind` with `id` exists
    fn resolve(&self, kind: EntityKind, id: &str) -> bool;

    /// Resolves a batch of lookups
    fn resolve_all(&self, lookups: &[Lookup]) -> Vec<bool> {
        lookups
            .iter()
            .map(|lookup| self.resolve(lookup.kind, &lookup.id))
            .collect()
    }
}

/// Resolver backed by in-memory id sets
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    known: HashMap<EntityKind, HashSet<String>>,
}

impl MemoryResolver {
    /// Creates an empty resolver (every reference dangles)
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver from collection → ids listings
    pub fn from_entities(entities: HashMap<EntityKind, Vec<String>>) -> Self {
        let known = entities
            .into_iter()
            .map(|(kind, ids)| (kind, ids.into_iter().collect()))
            .collect();
        Self { known }
    }

    /// Registers an existing entity
    pub fn insert(&mut self, kind: EntityKind, id: impl Into<String>) {
        self.known.entry(kind).or_default().insert(id.into());
    }

    /// Builder form of `insert`
    pub fn with(mut self, kind: EntityKind, id: impl Into<String>) -> Self {
        self.insert(kind, id);
        self
    }

    /// Returns the number of known entities across all kinds
    pub fn len(&self) -> usize {
        self.known.values().map(HashSet::len).sum()
    }

    /// Checks if no entity is known
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EntityResolver for MemoryResolver {
    fn resolve(&self, kind: EntityKind, id: &str) -> bool {
        self.known.get(&kind).map_or(false, |ids| ids.contains(id))
    }
}
