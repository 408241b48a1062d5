//! Record validator
//!
//! Checks a candidate record against the schema of one revision:
//! - required fields are present and non-null
//! - values match the declared kind (no coercion beyond integral floats)
//! - enum members, inclusive numeric bounds, string lengths
//! - dates no later than the injected evaluation time
//! - list cardinality, with every element checked on its own
//! - reference targets exist (delegated to the `EntityResolver`)
//!
//! Fields are checked in declaration order and every violation is collected.
//! Undeclared fields are dropped from the normalized record. The validator
//! never assigns capability fields; it only checks them when present.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::observability::{log_event_with_fields, Event};

use super::errors::{SchemaError, SchemaResult, Violation};
use super::plugins::{WorkflowStatus, ID_FIELD};
use super::registry::RevisionRegistry;
use super::resolver::{EntityResolver, Lookup};
use super::revision::{Revision, REVISION_FIELD};
use super::types::{FieldDef, FieldType};

/// A record that passed validation, tagged with its revision
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    revision: Revision,
    fields: Map<String, Value>,
}

impl ValidatedRecord {
    /// Revision the record was validated under
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Normalized fields, including the revision tag
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Gets a normalized field value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Converts into a JSON object
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Violations and pending reference lookups, keyed by field position so the
/// final report follows declaration order.
#[derive(Default)]
struct Report {
    violations: Vec<(usize, Violation)>,
    lookups: Vec<(usize, Lookup)>,
}

impl Report {
    fn push(&mut self, position: usize, violation: Violation) {
        self.violations.push((position, violation));
    }

    fn len(&self) -> usize {
        self.violations.len()
    }

    fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validator bound to a revision registry and an entity resolver.
///
/// Validation is pure apart from the resolver lookups and does not mutate
/// the candidate record.
pub struct RecordValidator<'a, R: EntityResolver + ?Sized> {
    registry: &'a RevisionRegistry,
    resolver: &'a R,
}

impl<'a, R: EntityResolver + ?Sized> RecordValidator<'a, R> {
    /// Creates a new validator
    pub fn new(registry: &'a RevisionRegistry, resolver: &'a R) -> Self {
        Self { registry, resolver }
    }

    /// Validates a record under an explicit revision.
    ///
    /// # Arguments
    ///
    /// * `record` - Candidate record (field name → raw value)
    /// * `revision` - Revision to validate against
    /// * `now` - Upper bound for dates declared `not_after_now`
    ///
    /// # Errors
    ///
    /// - `RevisionMismatch` if the record is tagged with another revision
    /// - `UnknownRevision` if the tag is not declared
    /// - `ValidationFailed` carrying every field violation
    pub fn validate(
        &self,
        record: &Value,
        revision: Revision,
        now: DateTime<Utc>,
    ) -> SchemaResult<ValidatedRecord> {
        let obj = match record.as_object() {
            Some(obj) => obj,
            None => {
                let violation = Violation::type_mismatch("$root", "object", json_kind(record));
                return Err(self.reject(revision, vec![violation]));
            }
        };

        if obj.contains_key(REVISION_FIELD) {
            let stored = self.registry.revision_of(record)?;
            if stored != revision {
                return Err(SchemaError::revision_mismatch(revision.tag(), stored.tag()));
            }
        }

        let schema = self.registry.get(revision)?;
        let mut report = Report::default();
        let mut normalized = Map::new();

        for (position, field) in schema.fields.iter().enumerate() {
            match obj.get(&field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        report.push(position, Violation::missing_field(&field.name));
                    }
                }
                Some(value) => {
                    if let Some(value) = self.check_field(position, field, value, now, &mut report)
                    {
                        normalized.insert(field.name.clone(), value);
                    }
                }
            }
        }

        self.resolve_references(&mut report);

        if !report.is_empty() {
            report.violations.sort_by_key(|(position, _)| *position);
            let violations = report.violations.into_iter().map(|(_, v)| v).collect();
            return Err(self.reject(revision, violations));
        }

        let dropped = obj
            .keys()
            .filter(|k| k.as_str() != REVISION_FIELD && !schema.has_field(k))
            .count()
            .to_string();
        log_event_with_fields(
            Event::RecordValidated,
            &[("revision", revision.tag()), ("dropped_fields", &dropped)],
        );

        normalized.insert(
            REVISION_FIELD.to_string(),
            Value::String(revision.tag().to_string()),
        );

        Ok(ValidatedRecord {
            revision,
            fields: normalized,
        })
    }

    /// Validates a stored record under the revision it is tagged with, or
    /// the latest revision if untagged.
    pub fn validate_stored(&self, record: &Value, now: DateTime<Utc>) -> SchemaResult<ValidatedRecord> {
        let revision = self.registry.revision_of(record)?;
        self.validate(record, revision, now)
    }

    /// Validates a replacement for an existing record.
    ///
    /// The candidate is validated under the existing record's revision. The
    /// identity and owner cannot change, and a workflow status change must
    /// be an authorized transition.
    pub fn validate_update(
        &self,
        existing: &Value,
        candidate: &Value,
        now: DateTime<Utc>,
    ) -> SchemaResult<ValidatedRecord> {
        let revision = self.registry.revision_of(existing)?;
        let validated = self.validate(candidate, revision, now)?;

        for field in [ID_FIELD, "user"] {
            let before = existing.get(field).filter(|v| !v.is_null());
            if let Some(before) = before {
                if validated.get(field) != Some(before) {
                    return Err(SchemaError::immutable_field(revision.tag(), field));
                }
            }
        }

        let from = workflow_status(existing.get("status"));
        let to = workflow_status(validated.get("status"));
        let allowed = match (from, to) {
            (None, None) => true,
            (None, Some(to)) => to == WorkflowStatus::initial(),
            (Some(_), None) => false,
            (Some(from), Some(to)) => from == to || from.can_transition(to),
        };
        if !allowed {
            return Err(SchemaError::invalid_transition(
                revision.tag(),
                from.map_or("none", |s| s.as_str()),
                to.map_or("none", |s| s.as_str()),
            ));
        }

        Ok(validated)
    }

    fn reject(&self, revision: Revision, violations: Vec<Violation>) -> SchemaError {
        let count = violations.len().to_string();
        log_event_with_fields(
            Event::RecordRejected,
            &[("revision", revision.tag()), ("violations", &count)],
        );
        SchemaError::validation_failed(revision.tag(), violations)
    }

    /// Resolves every pending lookup in one batch and records the misses.
    fn resolve_references(&self, report: &mut Report) {
        if report.lookups.is_empty() {
            return;
        }
        let lookups: Vec<Lookup> = report.lookups.iter().map(|(_, l)| l.clone()).collect();
        let found = self.resolver.resolve_all(&lookups);

        for (i, (position, lookup)) in report.lookups.iter().enumerate() {
            // A short answer from the resolver counts as not found.
            if !found.get(i).copied().unwrap_or(false) {
                report.violations.push((
                    *position,
                    Violation::dangling_reference(&lookup.field, lookup.kind.collection(), &lookup.id),
                ));
            }
        }
    }

    /// Checks kind and field-level constraints, returning the normalized
    /// value if the field is clean.
    fn check_field(
        &self,
        position: usize,
        field: &FieldDef,
        value: &Value,
        now: DateTime<Utc>,
        report: &mut Report,
    ) -> Option<Value> {
        let before = report.len();
        let normalized = self.check_kind(position, &field.field_type, value, &field.name, report)?;

        match &field.field_type {
            FieldType::String => {
                let s = normalized.as_str().unwrap_or_default();
                if let Some(allowed) = &field.enum_values {
                    if !allowed.iter().any(|a| a == s) {
                        let allowed: Vec<&str> = allowed.iter().map(String::as_str).collect();
                        report.push(position, Violation::invalid_enum(&field.name, &allowed, s));
                    }
                }
                if let Some(max) = field.max_length {
                    let length = s.chars().count();
                    if length > max {
                        report.push(position, Violation::too_long(&field.name, max, length));
                    }
                }
            }
            FieldType::Integer | FieldType::Number => {
                if let Some(n) = normalized.as_f64() {
                    let below = field.min.map_or(false, |min| n < min);
                    let above = field.max.map_or(false, |max| n > max);
                    if below || above {
                        report.push(
                            position,
                            Violation::out_of_range(&field.name, field.bounds_description(), n),
                        );
                    }
                }
            }
            FieldType::Date => {
                if field.not_after_now {
                    if let Some(date) = parse_date(value) {
                        if date > now {
                            report.push(
                                position,
                                Violation::future_date(&field.name, format_date(now), format_date(date)),
                            );
                        }
                    }
                }
            }
            FieldType::List { .. } => {
                if let (Some(max), Some(items)) = (field.max_items, normalized.as_array()) {
                    if items.len() > max {
                        report.push(position, Violation::too_many_items(&field.name, max, items.len()));
                    }
                }
            }
            FieldType::Boolean | FieldType::Reference { .. } | FieldType::Map => {}
        }

        if report.len() > before {
            None
        } else {
            Some(normalized)
        }
    }

    /// Checks the primitive kind of a value, queueing reference lookups.
    fn check_kind(
        &self,
        position: usize,
        expected: &FieldType,
        value: &Value,
        path: &str,
        report: &mut Report,
    ) -> Option<Value> {
        let mismatch = |report: &mut Report, expected: &str| -> Option<Value> {
            report.push(position, Violation::type_mismatch(path, expected, json_kind(value)));
            None
        };

        match expected {
            FieldType::String => match value {
                Value::String(_) => Some(value.clone()),
                _ => mismatch(report, "string"),
            },
            FieldType::Integer => match integral(value) {
                Some(n) => Some(Value::from(n)),
                // Past i64 but still whole; the range check reports it.
                None if value.is_u64() => Some(value.clone()),
                None => mismatch(report, "integer"),
            },
            FieldType::Number => match value.as_f64() {
                Some(_) => Some(value.clone()),
                None => mismatch(report, "number"),
            },
            FieldType::Boolean => match value {
                Value::Bool(_) => Some(value.clone()),
                _ => mismatch(report, "boolean"),
            },
            FieldType::Date => match parse_date(value) {
                Some(date) => Some(Value::String(format_date(date))),
                None => mismatch(report, "date"),
            },
            FieldType::Reference { kind } => match value.as_str() {
                Some(id) if is_object_id(id) => {
                    report.lookups.push((
                        position,
                        Lookup {
                            field: path.to_string(),
                            kind: *kind,
                            id: id.to_string(),
                        },
                    ));
                    Some(value.clone())
                }
                _ => mismatch(report, "object id reference"),
            },
            FieldType::List { element } => {
                let items = match value.as_array() {
                    Some(items) => items,
                    None => return mismatch(report, "list"),
                };
                let before = report.len();
                let mut normalized = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    if item.is_null() {
                        report.push(
                            position,
                            Violation::type_mismatch(&item_path, element.type_name(), "null"),
                        );
                        continue;
                    }
                    if let Some(item) = self.check_kind(position, element, item, &item_path, report) {
                        normalized.push(item);
                    }
                }
                if report.len() > before {
                    None
                } else {
                    Some(Value::Array(normalized))
                }
            }
            FieldType::Map => match value {
                Value::Object(_) => Some(value.clone()),
                _ => mismatch(report, "map"),
            },
        }
    }
}

/// Returns the JSON kind name for error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

fn workflow_status(value: Option<&Value>) -> Option<WorkflowStatus> {
    value.and_then(Value::as_str).and_then(WorkflowStatus::parse)
}

/// Integer value of a JSON number; floats qualify only with a zero fraction.
fn integral(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Parses an RFC 3339 timestamp, a plain `YYYY-MM-DD` date (midnight UTC) or
/// integer epoch milliseconds.
///
/// Years outside 0..=9999 have no RFC 3339 form and are refused.
fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    parse_any_date(value).filter(|date| (0..=9999).contains(&date.year()))
}

fn parse_any_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            if let Ok(date) = DateTime::parse_from_rfc3339(s) {
                return Some(date.with_timezone(&Utc));
            }
            let day = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
            Some(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?))
        }
        Value::Number(_) => Utc.timestamp_millis_opt(value.as_i64()?).single(),
        _ => None,
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Checks the 24 hex digit object id form.
fn is_object_id(id: &str) -> bool {
    id.len() == 24 && id.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::errors::{SchemaErrorCode, ViolationCode};
    use crate::schema::resolver::{EntityKind, MemoryResolver};
    use serde_json::json;

    const LOCATION: &str = "aaaaaaaaaaaaaaaaaaaaaaa1";
    const CONTACT: &str = "aaaaaaaaaaaaaaaaaaaaaaa2";
    const MAKE: &str = "aaaaaaaaaaaaaaaaaaaaaaa3";
    const MODEL: &str = "aaaaaaaaaaaaaaaaaaaaaaa4";
    const PHOTO: &str = "bbbbbbbbbbbbbbbbbbbbbbb1";
    const MISSING: &str = "cccccccccccccccccccccccc";

    fn resolver() -> MemoryResolver {
        MemoryResolver::new()
            .with(EntityKind::Location, LOCATION)
            .with(EntityKind::Contact, CONTACT)
            .with(EntityKind::VehicleMake, MAKE)
            .with(EntityKind::VehicleModel, MODEL)
            .with(EntityKind::Binary, PHOTO)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn car() -> Value {
        json!({
            "type": "car",
            "make": MAKE,
            "model": MODEL,
            "manufacturedAt": "2024-06-01",
            "fuel": "petrol",
            "transmission": "automatic",
            "mileage": 1000,
            "condition": "used",
            "color": "black",
            "price": 500000,
            "currency": "LKR"
        })
    }

    fn failure(record: &Value, revision: Revision) -> SchemaError {
        let registry = RevisionRegistry::build().unwrap();
        let resolver = resolver();
        let validator = RecordValidator::new(&registry, &resolver);
        validator.validate(record, revision, now()).unwrap_err()
    }

    #[test]
    fn test_valid_record_passes() {
        let registry = RevisionRegistry::build().unwrap();
        let resolver = resolver();
        let validator = RecordValidator::new(&registry, &resolver);

        let record = validator.validate(&car(), Revision::V3, now()).unwrap();
        assert_eq!(record.revision(), Revision::V3);
        assert_eq!(record.get("_revision"), Some(&json!("v3")));
        assert_eq!(record.get("manufacturedAt"), Some(&json!("2024-06-01T00:00:00Z")));
    }

    #[test]
    fn test_missing_price_reported() {
        let mut record = car();
        record.as_object_mut().unwrap().remove("price");
        let err = failure(&record, Revision::V3);
        assert_eq!(err.code(), SchemaErrorCode::ValidationFailed);
        assert_eq!(err.violations().len(), 1);
        assert!(err.has_violation("price", ViolationCode::MissingField));
        assert!(err.violations()[0].to_string().starts_with("MissingField: price"));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let mut record = car();
        record["price"] = Value::Null;
        assert!(failure(&record, Revision::V3).has_violation("price", ViolationCode::MissingField));
    }

    #[test]
    fn test_violations_collected_in_declaration_order() {
        let mut record = car();
        record["type"] = json!("Car");
        record["make"] = json!(MISSING);
        record["price"] = json!(-1);
        record["currency"] = json!("USD");

        let err = failure(&record, Revision::V3);
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["type", "make", "price", "currency"]);
        assert_eq!(err.violations()[1].code, ViolationCode::DanglingReference);
    }

    #[test]
    fn test_type_mismatch() {
        let mut record = car();
        record["mileage"] = json!("1000");
        record["centralLock"] = json!("yes");
        let err = failure(&record, Revision::V3);
        assert!(err.has_violation("mileage", ViolationCode::TypeMismatch));
        assert!(err.has_violation("centralLock", ViolationCode::TypeMismatch));
    }

    #[test]
    fn test_integer_rejects_fractions() {
        let mut record = car();
        record["doors"] = json!(4.5);
        assert!(failure(&record, Revision::V3).has_violation("doors", ViolationCode::TypeMismatch));

        let registry = RevisionRegistry::build().unwrap();
        let resolver = resolver();
        let validator = RecordValidator::new(&registry, &resolver);
        let mut record = car();
        record["doors"] = json!(4.0);
        let validated = validator.validate(&record, Revision::V3, now()).unwrap();
        assert_eq!(validated.get("doors"), Some(&json!(4)));
    }

    #[test]
    fn test_malformed_reference_is_type_mismatch() {
        let mut record = car();
        record["make"] = json!("toyota");
        let err = failure(&record, Revision::V3);
        assert!(err.has_violation("make", ViolationCode::TypeMismatch));
    }

    #[test]
    fn test_future_date_rejected() {
        let mut record = car();
        record["manufacturedAt"] = json!("2024-06-01T12:00:00.001Z");
        assert!(failure(&record, Revision::V3).has_violation("manufacturedAt", ViolationCode::FutureDate));
    }

    #[test]
    fn test_epoch_millis_date_accepted() {
        let registry = RevisionRegistry::build().unwrap();
        let resolver = resolver();
        let validator = RecordValidator::new(&registry, &resolver);
        let mut record = car();
        record["manufacturedAt"] = json!(now().timestamp_millis());
        let validated = validator.validate(&record, Revision::V3, now()).unwrap();
        assert_eq!(validated.get("manufacturedAt"), Some(&json!("2024-06-01T12:00:00Z")));
    }

    #[test]
    fn test_photo_elements_checked_individually() {
        let mut record = car();
        record["photos"] = json!([PHOTO, MISSING, 7]);
        let err = failure(&record, Revision::V3);
        assert!(err.has_violation("photos[1]", ViolationCode::DanglingReference));
        assert!(err.has_violation("photos[2]", ViolationCode::TypeMismatch));
        assert!(!err.has_violation("photos[0]", ViolationCode::DanglingReference));
    }

    #[test]
    fn test_undeclared_fields_dropped() {
        let registry = RevisionRegistry::build().unwrap();
        let resolver = resolver();
        let validator = RecordValidator::new(&registry, &resolver);
        let mut record = car();
        record["images"] = json!([PHOTO]);
        record["nickname"] = json!("speedy");
        let validated = validator.validate(&record, Revision::V3, now()).unwrap();
        assert!(validated.get("images").is_none());
        assert!(validated.get("nickname").is_none());
    }

    #[test]
    fn test_capability_fields_checked_not_assigned() {
        let registry = RevisionRegistry::build().unwrap();
        let resolver = resolver();
        let validator = RecordValidator::new(&registry, &resolver);

        let validated = validator.validate(&car(), Revision::V3, now()).unwrap();
        for reserved in ["createdAt", "updatedAt", "tags", "status", "user", "_id"] {
            assert!(validated.get(reserved).is_none(), "{} assigned", reserved);
        }

        let mut record = car();
        record["status"] = json!("archived");
        record["tags"] = json!("not-a-list");
        let err = validator.validate(&record, Revision::V3, now()).unwrap_err();
        assert!(err.has_violation("status", ViolationCode::InvalidEnumValue));
        assert!(err.has_violation("tags", ViolationCode::TypeMismatch));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = failure(&json!([1, 2]), Revision::V3);
        assert!(err.has_violation("$root", ViolationCode::TypeMismatch));
    }

    #[test]
    fn test_revision_mismatch() {
        let mut record = car();
        record["_revision"] = json!("v1");
        let err = failure(&record, Revision::V3);
        assert_eq!(err.code(), SchemaErrorCode::RevisionMismatch);
    }

    #[test]
    fn test_validate_stored_uses_tag() {
        let registry = RevisionRegistry::build().unwrap();
        let resolver = resolver();
        let validator = RecordValidator::new(&registry, &resolver);

        let mut record = car();
        record["_revision"] = json!("v1");
        let err = validator.validate_stored(&record, now()).unwrap_err();
        // v1 still requires location, contact and the drivetrain details
        assert!(err.has_violation("location", ViolationCode::MissingField));
        assert!(err.has_violation("contact", ViolationCode::MissingField));
        assert!(err.has_violation("doors", ViolationCode::MissingField));

        let validated = validator.validate_stored(&car(), now()).unwrap();
        assert_eq!(validated.revision(), Revision::V3);
    }

    #[test]
    fn test_update_keeps_identity_and_owner() {
        let registry = RevisionRegistry::build().unwrap();
        let resolver = resolver().with(EntityKind::User, "dddddddddddddddddddddddd");
        let validator = RecordValidator::new(&registry, &resolver);

        let mut existing = car();
        existing["_id"] = json!("665b0e0e0e0e0e0e0e0e0e0e");
        existing["user"] = json!("dddddddddddddddddddddddd");
        existing["_revision"] = json!("v3");

        let mut candidate = existing.clone();
        candidate["price"] = json!(450000);
        assert!(validator.validate_update(&existing, &candidate, now()).is_ok());

        candidate["_id"] = json!("665b0e0e0e0e0e0e0e0e0e0f");
        let err = validator.validate_update(&existing, &candidate, now()).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::ImmutableField);
    }

    #[test]
    fn test_update_enforces_workflow_transitions() {
        let registry = RevisionRegistry::build().unwrap();
        let resolver = resolver();
        let validator = RecordValidator::new(&registry, &resolver);

        let mut existing = car();
        existing["status"] = json!("editing");

        let mut candidate = car();
        candidate["status"] = json!("published");
        let err = validator.validate_update(&existing, &candidate, now()).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::InvalidTransition);

        candidate["status"] = json!("reviewing");
        assert!(validator.validate_update(&existing, &candidate, now()).is_ok());
    }

    #[test]
    fn test_update_cannot_clear_status() {
        let registry = RevisionRegistry::build().unwrap();
        let resolver = resolver();
        let validator = RecordValidator::new(&registry, &resolver);

        let mut existing = car();
        existing["status"] = json!("retired");

        let err = validator.validate_update(&existing, &car(), now()).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::InvalidTransition);
        assert!(err.message().contains("'retired' to 'none'"));
    }

    #[test]
    fn test_update_of_unstatused_record_starts_editing() {
        let registry = RevisionRegistry::build().unwrap();
        let resolver = resolver();
        let validator = RecordValidator::new(&registry, &resolver);

        let mut candidate = car();
        candidate["status"] = json!("published");
        let err = validator.validate_update(&car(), &candidate, now()).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::InvalidTransition);

        candidate["status"] = json!("editing");
        assert!(validator.validate_update(&car(), &candidate, now()).is_ok());
    }

    #[test]
    fn test_integer_past_i64_is_out_of_range() {
        let registry = RevisionRegistry::build().unwrap();
        let resolver = resolver();
        let validator = RecordValidator::new(&registry, &resolver);

        let mut record = car();
        record["seats"] = json!(u64::MAX);
        let err = validator.validate_stored(&record, now()).unwrap_err();
        assert!(err.has_violation("seats", ViolationCode::OutOfRange));
        assert!(!err.has_violation("seats", ViolationCode::TypeMismatch));
    }

    #[test]
    fn test_dates_outside_four_digit_years_refused() {
        let far = Utc.with_ymd_and_hms(12000, 1, 1, 0, 0, 0).unwrap();
        assert!(parse_date(&json!(far.timestamp_millis())).is_none());

        let early = Utc.with_ymd_and_hms(-5, 1, 1, 0, 0, 0).unwrap();
        assert!(parse_date(&json!(early.timestamp_millis())).is_none());

        let last = Utc.with_ymd_and_hms(9999, 12, 31, 0, 0, 0).unwrap();
        let parsed = parse_date(&json!(last.timestamp_millis())).unwrap();
        assert_eq!(parse_date(&json!(format_date(parsed))), Some(parsed));
    }

    #[test]
    fn test_helpers() {
        assert!(is_object_id("5f1a2b3c4d5e6f7a8b9c0d1e"));
        assert!(!is_object_id("5f1a2b3c4d5e6f7a8b9c0d1"));
        assert!(!is_object_id("zf1a2b3c4d5e6f7a8b9c0d1e"));
        assert_eq!(integral(&json!(3.0)), Some(3));
        assert_eq!(integral(&json!(3.5)), None);
        assert_eq!(json_kind(&json!(1.5)), "number");
        assert!(parse_date(&json!("yesterday")).is_none());
    }
}
