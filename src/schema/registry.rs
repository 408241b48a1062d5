//! Revision registry
//!
//! Holds the assembled schema of every revision, built once at startup, and
//! decides which revision a stored record must be validated against:
//! - the revision tag stored with the record, or
//! - the latest revision if the record is untagged.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::observability::{log_event_with_fields, Event};

use super::assembler::vehicle_schema;
use super::errors::{SchemaError, SchemaResult};
use super::revision::{Revision, REVISION_FIELD};
use super::types::Schema;

/// In-memory registry of assembled schemas indexed by revision.
pub struct RevisionRegistry {
    schemas: BTreeMap<Revision, Schema>,
}

impl RevisionRegistry {
    /// Assembles the vehicle listing schema of every revision.
    ///
    /// Assembly errors are FATAL: the process must not serve with a
    /// partially declared field set.
    pub fn build() -> SchemaResult<Self> {
        let mut schemas = BTreeMap::new();
        for revision in Revision::ALL {
            let schema = vehicle_schema(revision)?;
            let field_count = schema.fields.len().to_string();
            log_event_with_fields(
                Event::SchemaAssembled,
                &[("revision", revision.tag()), ("fields", &field_count)],
            );
            schemas.insert(revision, schema);
        }
        Ok(Self { schemas })
    }

    /// Builds a registry from explicit schemas (one per revision)
    pub fn from_schemas(schemas: impl IntoIterator<Item = Schema>) -> Self {
        Self {
            schemas: schemas.into_iter().map(|s| (s.revision, s)).collect(),
        }
    }

    /// Gets the schema of a revision.
    pub fn get(&self, revision: Revision) -> SchemaResult<&Schema> {
        self.schemas
            .get(&revision)
            .ok_or_else(|| SchemaError::unknown_revision(revision.tag()))
    }

    /// Gets the schema of a revision tag.
    pub fn get_by_tag(&self, tag: &str) -> SchemaResult<&Schema> {
        self.get(Revision::from_tag(tag)?)
    }

    /// Returns the schema untagged records are validated against.
    pub fn latest(&self) -> SchemaResult<&Schema> {
        self.get(Revision::latest())
    }

    /// Returns the revision a record was stored under.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRevision` if the tag is not a declared revision or
    /// is not a string.
    pub fn revision_of(&self, record: &Value) -> SchemaResult<Revision> {
        match record.get(REVISION_FIELD) {
            None | Some(Value::Null) => Ok(Revision::latest()),
            Some(Value::String(tag)) => Revision::from_tag(tag),
            Some(other) => Err(SchemaError::unknown_revision(other.to_string())),
        }
    }

    /// Returns all assembled schemas, oldest revision first.
    pub fn all_schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    /// Returns the number of assembled revisions.
    pub fn revision_count(&self) -> usize {
        self.schemas.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::errors::SchemaErrorCode;
    use serde_json::json;

    #[test]
    fn test_build_assembles_every_revision() {
        let registry = RevisionRegistry::build().unwrap();
        assert_eq!(registry.revision_count(), 3);
        assert_eq!(registry.latest().unwrap().revision, Revision::V3);
        let revisions: Vec<Revision> = registry.all_schemas().map(|s| s.revision).collect();
        assert_eq!(revisions, Revision::ALL.to_vec());
    }

    #[test]
    fn test_untagged_record_uses_latest() {
        let registry = RevisionRegistry::build().unwrap();
        let record = json!({ "price": 1 });
        assert_eq!(registry.revision_of(&record).unwrap(), Revision::V3);
    }

    #[test]
    fn test_tagged_record_uses_tag() {
        let registry = RevisionRegistry::build().unwrap();
        let record = json!({ "_revision": "v1" });
        assert_eq!(registry.revision_of(&record).unwrap(), Revision::V1);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let registry = RevisionRegistry::build().unwrap();
        let err = registry.revision_of(&json!({ "_revision": "v7" })).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::UnknownRevision);

        let err = registry.revision_of(&json!({ "_revision": 2 })).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::UnknownRevision);
    }

    #[test]
    fn test_missing_schema_reported_as_unknown_revision() {
        let registry = RevisionRegistry::from_schemas(Vec::new());
        let err = registry.get(Revision::V2).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::UnknownRevision);
        assert!(registry.get_by_tag("v2").is_err());
    }
}
