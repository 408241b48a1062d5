//! Schema assembly
//!
//! Combines the base field set of a revision with the fields contributed by
//! its capability modules. Contributors never overwrite each other: a name
//! declared twice is an assembly error.

use std::collections::HashSet;

use super::errors::{SchemaError, SchemaResult};
use super::plugins::{capabilities_for, Capability};
use super::revision::Revision;
use super::types::{FieldDef, Schema};
use super::vehicle::{vehicle_fields, COLLECTION};

/// Builds the schema of one revision
pub struct SchemaAssembler {
    collection: String,
    revision: Revision,
    base: Vec<FieldDef>,
    capabilities: Vec<Box<dyn Capability>>,
}

impl SchemaAssembler {
    /// Creates an assembler with no fields
    pub fn new(collection: impl Into<String>, revision: Revision) -> Self {
        Self {
            collection: collection.into(),
            revision,
            base: Vec::new(),
            capabilities: Vec::new(),
        }
    }

    /// Sets the base field set
    pub fn base(mut self, fields: Vec<FieldDef>) -> Self {
        self.base = fields;
        self
    }

    /// Applies a capability module
    pub fn with(mut self, capability: Box<dyn Capability>) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Applies several capability modules in order
    pub fn with_all(mut self, capabilities: Vec<Box<dyn Capability>>) -> Self {
        self.capabilities.extend(capabilities);
        self
    }

    /// Produces the schema: base fields first, then capability fields in
    /// the order the capabilities were applied.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateField` (FATAL) if any name is declared twice.
    pub fn assemble(self) -> SchemaResult<Schema> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(self.base.len());

        for field in self.base {
            if !seen.insert(field.name.clone()) {
                return Err(SchemaError::duplicate_field(
                    self.revision.tag(),
                    &field.name,
                    "base",
                ));
            }
            fields.push(field);
        }

        for capability in &self.capabilities {
            for field in capability.fields(self.revision) {
                if !seen.insert(field.name.clone()) {
                    return Err(SchemaError::duplicate_field(
                        self.revision.tag(),
                        &field.name,
                        capability.name(),
                    ));
                }
                fields.push(field);
            }
        }

        Ok(Schema::new(self.collection, self.revision, fields))
    }
}

/// Assembles the full vehicle listing schema of a revision
pub fn vehicle_schema(revision: Revision) -> SchemaResult<Schema> {
    SchemaAssembler::new(COLLECTION, revision)
        .base(vehicle_fields(revision))
        .with_all(capabilities_for(revision))
        .assemble()
}
