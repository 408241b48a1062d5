//! Index planner
//!
//! Declares the fixed index set behind the listing query shapes of a schema
//! revision and proves it internally consistent before the storage engine
//! sees it:
//! 1. Index names are unique
//! 2. Every key names a declared field
//! 3. The leading key is independently searchable
//! 4. Inner keys are sortable
//! 5. The last key is a unique tiebreak, so cursor pagination is deterministic
//! 6. Text indexes cover searchable string fields

use std::collections::HashSet;

use crate::observability::{log_event_with_fields, Event};
use crate::schema::{FieldType, Revision, RevisionRegistry, Schema, ID_FIELD};

use super::errors::{PlannerError, PlannerResult};
use super::index::{IndexDef, IndexKey, IndexKind, QueryShape, SortDirection};

/// Field every listing query filters on first
pub const PRICE_FIELD: &str = "price";
/// Field covered by the full-text index
pub const TEXT_FIELD: &str = "description";

/// Secondary sort fields combined with the price filter
const SORT_FIELDS: [&str; 2] = ["manufacturedAt", "mileage"];

/// Returns the recency field listings are ordered by under a revision
pub fn recency_field(revision: Revision) -> &'static str {
    match revision {
        Revision::V1 | Revision::V2 => "createdAt",
        Revision::V3 => "updatedAt",
    }
}

/// Verified index set of one revision (no runtime state)
#[derive(Debug, Clone)]
pub struct IndexPlan {
    /// Revision the plan was verified against
    pub revision: Revision,
    /// Recency field used as the final sort before the tiebreak
    pub recency: String,
    /// Declared indexes, compound first, then text
    pub indexes: Vec<IndexDef>,
}

impl IndexPlan {
    /// Compound indexes in declaration order
    pub fn compound(&self) -> impl Iterator<Item = &IndexDef> {
        self.indexes.iter().filter(|i| i.kind == IndexKind::Compound)
    }

    /// Text indexes in declaration order
    pub fn text(&self) -> impl Iterator<Item = &IndexDef> {
        self.indexes.iter().filter(|i| i.kind == IndexKind::Text)
    }

    /// Looks up an index by name
    pub fn get(&self, name: &str) -> Option<&IndexDef> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// Selects the index serving a query shape.
    ///
    /// An index serves a shape if its leading keys cover exactly the filter
    /// fields and the following keys start with the requested sort, either
    /// as declared or fully reversed (backward scan). Shorter indexes win,
    /// then forward scans, then declaration order.
    pub fn select(&self, shape: &QueryShape) -> Option<&IndexDef> {
        let filter: HashSet<&str> = shape.filter.iter().map(String::as_str).collect();

        self.compound()
            .filter_map(|index| {
                let n = filter.len();
                if index.keys.len() < n + shape.sort.len() {
                    return None;
                }
                let leading: HashSet<&str> = index.keys[..n].iter().map(|k| k.field.as_str()).collect();
                if leading != filter {
                    return None;
                }
                let rest = &index.keys[n..n + shape.sort.len()];
                let forward = rest == shape.sort.as_slice();
                let backward = rest
                    .iter()
                    .zip(&shape.sort)
                    .all(|(key, wanted)| key.reverse() == *wanted);
                if forward {
                    Some(((index.keys.len(), 0u8), index))
                } else if backward {
                    Some(((index.keys.len(), 1u8), index))
                } else {
                    None
                }
            })
            .min_by_key(|(score, _)| *score)
            .map(|(_, index)| index)
    }
}

/// Planner bound to the assembled schema of one revision
pub struct IndexPlanner<'a> {
    schema: &'a Schema,
}

impl<'a> IndexPlanner<'a> {
    /// Creates a new planner
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// The static index declaration for the schema's revision.
    ///
    /// `{price, R}`, `{price, manufacturedAt±, R}` and `{price, mileage±, R}`
    /// where `R` is the recency field in both directions followed by the
    /// identity tiebreak in the same direction, plus a text index over the
    /// description.
    pub fn declared_indexes(&self) -> Vec<IndexDef> {
        let recency = recency_field(self.schema.revision);
        let directions = [SortDirection::Asc, SortDirection::Desc];
        let mut indexes = Vec::new();

        for last in directions {
            indexes.push(IndexDef::compound(vec![
                IndexKey::asc(PRICE_FIELD),
                IndexKey::new(recency, last),
                IndexKey::new(ID_FIELD, last),
            ]));
        }

        for field in SORT_FIELDS {
            for middle in directions {
                for last in directions {
                    indexes.push(IndexDef::compound(vec![
                        IndexKey::asc(PRICE_FIELD),
                        IndexKey::new(field, middle),
                        IndexKey::new(recency, last),
                        IndexKey::new(ID_FIELD, last),
                    ]));
                }
            }
        }

        indexes.push(IndexDef::text(TEXT_FIELD));
        indexes
    }

    /// Declares and verifies the index set.
    ///
    /// # Errors
    ///
    /// Any inconsistency is FATAL: the deployment cannot serve the listing
    /// query shapes deterministically.
    pub fn plan(&self) -> PlannerResult<IndexPlan> {
        let indexes = self.declared_indexes();
        let revision = self.schema.revision.tag();

        if let Err(e) = self.verify(&indexes) {
            log_event_with_fields(
                Event::IndexPlanRejected,
                &[("revision", revision), ("code", e.code().code()), ("index", e.index())],
            );
            return Err(e);
        }

        let count = indexes.len().to_string();
        log_event_with_fields(
            Event::IndexPlanVerified,
            &[("revision", revision), ("indexes", &count)],
        );

        Ok(IndexPlan {
            revision: self.schema.revision,
            recency: recency_field(self.schema.revision).to_string(),
            indexes,
        })
    }

    /// Checks an index set against the schema.
    pub fn verify(&self, indexes: &[IndexDef]) -> PlannerResult<()> {
        let mut names = HashSet::new();

        for index in indexes {
            if !names.insert(index.name.as_str()) {
                return Err(PlannerError::duplicate_index(&index.name));
            }

            for field in index.fields() {
                if !self.schema.has_field(field) {
                    return Err(PlannerError::unknown_field(&index.name, field));
                }
            }

            match index.kind {
                IndexKind::Compound => self.verify_compound(index)?,
                IndexKind::Text => self.verify_text(index)?,
            }
        }

        Ok(())
    }

    fn verify_compound(&self, index: &IndexDef) -> PlannerResult<()> {
        let (leading, tiebreak) = match (index.leading(), index.tiebreak()) {
            (Some(leading), Some(tiebreak)) if index.keys.len() >= 2 => (leading, tiebreak),
            _ => return Err(PlannerError::missing_tiebreak(&index.name, None)),
        };

        if !self.schema.is_searchable(&leading.field) {
            return Err(PlannerError::leading_not_searchable(&index.name, &leading.field));
        }

        if !self.schema.is_unique(&tiebreak.field) {
            return Err(PlannerError::missing_tiebreak(
                &index.name,
                Some(&tiebreak.field),
            ));
        }

        for key in &index.keys[1..index.keys.len() - 1] {
            if !self.schema.is_sortable(&key.field) {
                return Err(PlannerError::field_not_sortable(&index.name, &key.field));
            }
        }

        Ok(())
    }

    fn verify_text(&self, index: &IndexDef) -> PlannerResult<()> {
        for field in index.fields() {
            let ok = self
                .schema
                .field(field)
                .map_or(false, |f| f.searchable && f.field_type == FieldType::String);
            if !ok {
                return Err(PlannerError::invalid_text_index(&index.name, field));
            }
        }
        Ok(())
    }
}

/// Plans and verifies the index set of every registered revision.
pub fn plan_all(registry: &RevisionRegistry) -> PlannerResult<Vec<IndexPlan>> {
    registry
        .all_schemas()
        .map(|schema| IndexPlanner::new(schema).plan())
        .collect()
}
