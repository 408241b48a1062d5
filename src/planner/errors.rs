//! Planner error types
//!
//! Every planner error describes an unsafe deployment: the declared index
//! set cannot serve deterministic, cursor-paginated listing queries. All are
//! FATAL to process initialization.
//!
//! Error codes:
//! - VEHICLE_INDEX_DUPLICATE
//! - VEHICLE_INDEX_UNKNOWN_FIELD
//! - VEHICLE_INDEX_LEADING_NOT_SEARCHABLE
//! - VEHICLE_INDEX_FIELD_NOT_SORTABLE
//! - VEHICLE_INDEX_MISSING_TIEBREAK
//! - VEHICLE_INDEX_INVALID_TEXT

use std::fmt;

/// Severity levels for planner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Process initialization must stop
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// Two indexes share a name
    DuplicateIndex,
    /// Index key names a field the schema does not declare
    UnknownField,
    /// Leading key is not independently searchable
    LeadingNotSearchable,
    /// Inner key is not sortable
    FieldNotSortable,
    /// Last key is missing or not unique
    MissingTiebreak,
    /// Text index over a non-searchable or non-string field
    InvalidTextIndex,
}

impl PlannerErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::DuplicateIndex => "VEHICLE_INDEX_DUPLICATE",
            PlannerErrorCode::UnknownField => "VEHICLE_INDEX_UNKNOWN_FIELD",
            PlannerErrorCode::LeadingNotSearchable => "VEHICLE_INDEX_LEADING_NOT_SEARCHABLE",
            PlannerErrorCode::FieldNotSortable => "VEHICLE_INDEX_FIELD_NOT_SORTABLE",
            PlannerErrorCode::MissingTiebreak => "VEHICLE_INDEX_MISSING_TIEBREAK",
            PlannerErrorCode::InvalidTextIndex => "VEHICLE_INDEX_INVALID_TEXT",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error type with full context
#[derive(Debug, Clone)]
pub struct PlannerError {
    code: PlannerErrorCode,
    message: String,
    index: String,
    field: Option<String>,
}

impl PlannerError {
    fn new(
        code: PlannerErrorCode,
        index: impl Into<String>,
        field: Option<String>,
        message: String,
    ) -> Self {
        Self {
            code,
            message,
            index: index.into(),
            field,
        }
    }

    /// Create a duplicate index error
    pub fn duplicate_index(index: impl Into<String>) -> Self {
        let index = index.into();
        let message = format!("Index '{}' is declared more than once", index);
        Self::new(PlannerErrorCode::DuplicateIndex, index, None, message)
    }

    /// Create an unknown field error
    pub fn unknown_field(index: impl Into<String>, field: impl Into<String>) -> Self {
        let index = index.into();
        let field = field.into();
        let message = format!("Index '{}' references undeclared field '{}'", index, field);
        Self::new(PlannerErrorCode::UnknownField, index, Some(field), message)
    }

    /// Create a leading field not searchable error
    pub fn leading_not_searchable(index: impl Into<String>, field: impl Into<String>) -> Self {
        let index = index.into();
        let field = field.into();
        let message = format!(
            "Index '{}' leads with '{}', which is not searchable",
            index, field
        );
        Self::new(PlannerErrorCode::LeadingNotSearchable, index, Some(field), message)
    }

    /// Create a field not sortable error
    pub fn field_not_sortable(index: impl Into<String>, field: impl Into<String>) -> Self {
        let index = index.into();
        let field = field.into();
        let message = format!("Index '{}' sorts on '{}', which is not sortable", index, field);
        Self::new(PlannerErrorCode::FieldNotSortable, index, Some(field), message)
    }

    /// Create a missing tiebreak error
    pub fn missing_tiebreak(index: impl Into<String>, last: Option<&str>) -> Self {
        let index = index.into();
        let message = match last {
            Some(field) => format!(
                "Index '{}' ends with '{}', which is not a unique tiebreak",
                index, field
            ),
            None => format!("Index '{}' has no tiebreak key", index),
        };
        Self::new(
            PlannerErrorCode::MissingTiebreak,
            index,
            last.map(str::to_string),
            message,
        )
    }

    /// Create an invalid text index error
    pub fn invalid_text_index(index: impl Into<String>, field: impl Into<String>) -> Self {
        let index = index.into();
        let field = field.into();
        let message = format!(
            "Text index '{}' requires searchable string field, got '{}'",
            index, field
        );
        Self::new(PlannerErrorCode::InvalidTextIndex, index, Some(field), message)
    }

    /// Returns the error code
    pub fn code(&self) -> PlannerErrorCode {
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

    /// Returns the offending index name
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Returns the field name if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for PlannerError {}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
