//! Schema type definitions
//!
//! Supported types:
//! - string: UTF-8 string, optionally restricted to an enum set
//! - integer: whole number
//! - number: 64-bit floating point
//! - boolean
//! - date: RFC 3339 string or epoch milliseconds
//! - reference: object id of another entity
//! - list: homogeneous array with element type
//! - map: free-form object

use serde::Serialize;

use super::resolver::EntityKind;
use super::revision::Revision;

/// Field types
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// Whole number
    Integer,
    /// Any finite number
    Number,
    /// Boolean
    Boolean,
    /// Point in time
    Date,
    /// Object id resolved against another collection
    Reference {
        /// Target entity kind
        kind: EntityKind,
    },
    /// Homogeneous array
    List {
        /// Element type (boxed to allow recursive types)
        element: Box<FieldType>,
    },
    /// Free-form object
    Map,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Reference { .. } => "reference",
            FieldType::List { .. } => "list",
            FieldType::Map => "map",
        }
    }

    /// Checks if values of this type carry a numeric range
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Number)
    }
}

/// Field definition: type, constraints and storage flags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    /// Field name as stored
    pub name: String,
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether the field must be present and non-null
    pub required: bool,
    /// Allowed string values (case-sensitive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Inclusive lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Inclusive upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Maximum string length in characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Maximum list cardinality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    /// Dates must not be later than the evaluation time
    pub not_after_now: bool,
    /// Usable as a filter in listing queries
    pub searchable: bool,
    /// Usable as a sort key in listing queries
    pub sortable: bool,
    /// Values are unique across the collection
    pub unique: bool,
}

impl FieldDef {
    fn of(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required: false,
            enum_values: None,
            min: None,
            max: None,
            max_length: None,
            max_items: None,
            not_after_now: false,
            searchable: false,
            sortable: false,
            unique: false,
        }
    }

    /// Create an optional string field
    pub fn string(name: &str) -> Self {
        Self::of(name, FieldType::String)
    }

    /// Create an optional integer field
    pub fn integer(name: &str) -> Self {
        Self::of(name, FieldType::Integer)
    }

    /// Create an optional number field
    pub fn number(name: &str) -> Self {
        Self::of(name, FieldType::Number)
    }

    /// Create an optional boolean field
    pub fn boolean(name: &str) -> Self {
        Self::of(name, FieldType::Boolean)
    }

    /// Create an optional date field
    pub fn date(name: &str) -> Self {
        Self::of(name, FieldType::Date)
    }

    /// Create an optional reference field
    pub fn reference(name: &str, kind: EntityKind) -> Self {
        Self::of(name, FieldType::Reference { kind })
    }

    /// Create an optional list field
    pub fn list(name: &str, element: FieldType) -> Self {
        Self::of(
            name,
            FieldType::List {
                element: Box::new(element),
            },
        )
    }

    /// Create an optional free-form map field
    pub fn map(name: &str) -> Self {
        Self::of(name, FieldType::Map)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.enum_values = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub fn not_after_now(mut self) -> Self {
        self.not_after_now = true;
        self
    }

    /// Describes the declared numeric bounds ("between 0 and 50")
    pub fn bounds_description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("a value between {} and {}", min, max),
            (Some(min), None) => format!("a value of at least {}", min),
            (None, Some(max)) => format!("a value of at most {}", max),
            (None, None) => "any value".to_string(),
        }
    }
}

/// Assembled field set of one revision, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    /// Collection the records are stored in
    pub collection: String,
    /// Revision this field set belongs to
    pub revision: Revision,
    /// Field definitions in declaration order
    pub fields: Vec<FieldDef>,
}

impl Schema {
    /// Create a new schema
    pub fn new(collection: impl Into<String>, revision: Revision, fields: Vec<FieldDef>) -> Self {
        Self {
            collection: collection.into(),
            revision,
            fields,
        }
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Checks if a field is declared
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Names of required fields in declaration order
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }

    /// Checks if a field is declared searchable
    pub fn is_searchable(&self, name: &str) -> bool {
        self.field(name).map_or(false, |f| f.searchable)
    }

    /// Checks if a field is declared sortable
    pub fn is_sortable(&self, name: &str) -> bool {
        self.field(name).map_or(false, |f| f.sortable)
    }

    /// Checks if a field is declared unique
    pub fn is_unique(&self, name: &str) -> bool {
        self.field(name).map_or(false, |f| f.unique)
    }
}
