//! Schema error types
//!
//! Field-level violation codes:
//! - VEHICLE_MISSING_FIELD
//! - VEHICLE_TYPE_MISMATCH
//! - VEHICLE_INVALID_ENUM_VALUE
//! - VEHICLE_OUT_OF_RANGE
//! - VEHICLE_TOO_LONG
//! - VEHICLE_FUTURE_DATE
//! - VEHICLE_TOO_MANY_ITEMS
//! - VEHICLE_DANGLING_REFERENCE
//!
//! Record-level error codes:
//! - VEHICLE_UNKNOWN_REVISION (REJECT)
//! - VEHICLE_REVISION_MISMATCH (REJECT)
//! - VEHICLE_VALIDATION_FAILED (REJECT)
//! - VEHICLE_IMMUTABLE_FIELD (REJECT, updates only)
//! - VEHICLE_INVALID_TRANSITION (REJECT, updates only)
//! - VEHICLE_DUPLICATE_FIELD (FATAL, schema assembly only)

use std::fmt;

use serde::Serialize;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Caller-reported, the record is not persisted
    Reject,
    /// Process initialization must stop
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Per-field violation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationCode {
    /// Required field absent or null
    MissingField,
    /// Value kind disagrees with the declared type
    TypeMismatch,
    /// String outside the declared enum set
    InvalidEnumValue,
    /// Number outside the declared inclusive bounds
    OutOfRange,
    /// String longer than the declared maximum
    TooLong,
    /// Date later than the evaluation-time bound
    FutureDate,
    /// List longer than the declared cardinality
    TooManyItems,
    /// Reference target not found by the resolver
    DanglingReference,
}

impl ViolationCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ViolationCode::MissingField => "VEHICLE_MISSING_FIELD",
            ViolationCode::TypeMismatch => "VEHICLE_TYPE_MISMATCH",
            ViolationCode::InvalidEnumValue => "VEHICLE_INVALID_ENUM_VALUE",
            ViolationCode::OutOfRange => "VEHICLE_OUT_OF_RANGE",
            ViolationCode::TooLong => "VEHICLE_TOO_LONG",
            ViolationCode::FutureDate => "VEHICLE_FUTURE_DATE",
            ViolationCode::TooManyItems => "VEHICLE_TOO_MANY_ITEMS",
            ViolationCode::DanglingReference => "VEHICLE_DANGLING_REFERENCE",
        }
    }

    /// Returns the short name used in reports ("MissingField")
    pub fn name(&self) -> &'static str {
        match self {
            ViolationCode::MissingField => "MissingField",
            ViolationCode::TypeMismatch => "TypeMismatch",
            ViolationCode::InvalidEnumValue => "InvalidEnumValue",
            ViolationCode::OutOfRange => "OutOfRange",
            ViolationCode::TooLong => "TooLong",
            ViolationCode::FutureDate => "FutureDate",
            ViolationCode::TooManyItems => "TooManyItems",
            ViolationCode::DanglingReference => "DanglingReference",
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Field path (e.g., "photos[2]")
    pub field: String,
    /// Violation kind
    pub code: ViolationCode,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or kind found
    pub actual: String,
}

impl Violation {
    pub fn new(
        field: impl Into<String>,
        code: ViolationCode,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, ViolationCode::MissingField, "field to be present", "missing")
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, ViolationCode::TypeMismatch, expected, actual)
    }

    pub fn invalid_enum(field: impl Into<String>, allowed: &[&str], actual: &str) -> Self {
        Self::new(
            field,
            ViolationCode::InvalidEnumValue,
            format!("one of [{}]", allowed.join(", ")),
            format!("'{}'", actual),
        )
    }

    pub fn out_of_range(field: impl Into<String>, bounds: impl Into<String>, actual: f64) -> Self {
        Self::new(field, ViolationCode::OutOfRange, bounds, actual.to_string())
    }

    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        Self::new(
            field,
            ViolationCode::TooLong,
            format!("at most {} characters", max),
            format!("{} characters", actual),
        )
    }

    pub fn future_date(field: impl Into<String>, now: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(
            field,
            ViolationCode::FutureDate,
            format!("a date no later than {}", now.into()),
            actual,
        )
    }

    pub fn too_many_items(field: impl Into<String>, max: usize, actual: usize) -> Self {
        Self::new(
            field,
            ViolationCode::TooManyItems,
            format!("at most {} items", max),
            format!("{} items", actual),
        )
    }

    pub fn dangling_reference(field: impl Into<String>, collection: &str, id: &str) -> Self {
        Self::new(
            field,
            ViolationCode::DanglingReference,
            format!("an existing entry in '{}'", collection),
            format!("unknown id '{}'", id),
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (expected {}, got {})",
            self.code, self.field, self.expected, self.actual
        )
    }
}

/// Record-level error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Revision tag not declared
    UnknownRevision,
    /// Record tagged with a different revision than requested
    RevisionMismatch,
    /// One or more field violations
    ValidationFailed,
    /// Update changes identity or owner
    ImmutableField,
    /// Update makes an unauthorized workflow transition
    InvalidTransition,
    /// Two contributors declared the same field
    DuplicateField,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::UnknownRevision => "VEHICLE_UNKNOWN_REVISION",
            SchemaErrorCode::RevisionMismatch => "VEHICLE_REVISION_MISMATCH",
            SchemaErrorCode::ValidationFailed => "VEHICLE_VALIDATION_FAILED",
            SchemaErrorCode::ImmutableField => "VEHICLE_IMMUTABLE_FIELD",
            SchemaErrorCode::InvalidTransition => "VEHICLE_INVALID_TRANSITION",
            SchemaErrorCode::DuplicateField => "VEHICLE_DUPLICATE_FIELD",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::DuplicateField => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with full context
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    revision: Option<String>,
    violations: Vec<Violation>,
}

impl SchemaError {
    /// Create an unknown revision error
    pub fn unknown_revision(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            code: SchemaErrorCode::UnknownRevision,
            message: format!("Revision '{}' is not declared", tag),
            revision: Some(tag),
            violations: Vec::new(),
        }
    }

    /// Create a revision mismatch error
    pub fn revision_mismatch(requested: impl Into<String>, stored: impl Into<String>) -> Self {
        let requested = requested.into();
        Self {
            code: SchemaErrorCode::RevisionMismatch,
            message: format!(
                "Record is tagged '{}' but was validated as '{}'",
                stored.into(),
                requested
            ),
            revision: Some(requested),
            violations: Vec::new(),
        }
    }

    /// Create a validation failed error carrying every violation found
    pub fn validation_failed(revision: impl Into<String>, violations: Vec<Violation>) -> Self {
        let revision = revision.into();
        let summary: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
        Self {
            code: SchemaErrorCode::ValidationFailed,
            message: format!(
                "{} violation(s) under revision '{}': {}",
                violations.len(),
                revision,
                summary.join("; ")
            ),
            revision: Some(revision),
            violations,
        }
    }

    /// Create an immutable field error
    pub fn immutable_field(revision: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::ImmutableField,
            message: format!("Field '{}' cannot change after creation", field.into()),
            revision: Some(revision.into()),
            violations: Vec::new(),
        }
    }

    /// Create an invalid workflow transition error
    pub fn invalid_transition(revision: impl Into<String>, from: &str, to: &str) -> Self {
        Self {
            code: SchemaErrorCode::InvalidTransition,
            message: format!("Workflow cannot move from '{}' to '{}'", from, to),
            revision: Some(revision.into()),
            violations: Vec::new(),
        }
    }

    /// Create a duplicate field error (schema assembly)
    pub fn duplicate_field(revision: impl Into<String>, field: impl Into<String>, contributor: &str) -> Self {
        let revision = revision.into();
        Self {
            code: SchemaErrorCode::DuplicateField,
            message: format!(
                "Field '{}' declared twice in revision '{}' (second declaration from '{}')",
                field.into(),
                revision,
                contributor
            ),
            revision: Some(revision),
            violations: Vec::new(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the revision tag if applicable
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Returns the collected field violations
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Checks whether a violation with the given code was reported for a field
    pub fn has_violation(&self, field: &str, code: ViolationCode) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.code == code)
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchemaErrorCode::UnknownRevision.code(), "VEHICLE_UNKNOWN_REVISION");
        assert_eq!(SchemaErrorCode::RevisionMismatch.code(), "VEHICLE_REVISION_MISMATCH");
        assert_eq!(SchemaErrorCode::ValidationFailed.code(), "VEHICLE_VALIDATION_FAILED");
        assert_eq!(ViolationCode::MissingField.code(), "VEHICLE_MISSING_FIELD");
        assert_eq!(ViolationCode::DanglingReference.code(), "VEHICLE_DANGLING_REFERENCE");
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(SchemaErrorCode::UnknownRevision.severity(), Severity::Reject);
        assert_eq!(SchemaErrorCode::ValidationFailed.severity(), Severity::Reject);
        assert_eq!(SchemaErrorCode::DuplicateField.severity(), Severity::Fatal);
    }

    #[test]
    fn test_violation_display() {
        let v = Violation::missing_field("price");
        assert!(v.to_string().starts_with("MissingField: price"));
    }

    #[test]
    fn test_validation_failed_lists_every_violation() {
        let err = SchemaError::validation_failed(
            "v3",
            vec![
                Violation::missing_field("price"),
                Violation::too_long("description", 5000, 5001),
            ],
        );
        assert_eq!(err.violations().len(), 2);
        assert!(err.message().contains("price"));
        assert!(err.message().contains("description"));
        assert!(err.has_violation("price", ViolationCode::MissingField));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_display_includes_severity() {
        let err = SchemaError::duplicate_field("v1", "tags", "tags");
        let display = err.to_string();
        assert!(display.contains("FATAL"));
        assert!(display.contains("VEHICLE_DUPLICATE_FIELD"));
    }
}
