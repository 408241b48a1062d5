//! Index definitions handed to the storage engine
//!
//! A compound index is an ordered tuple of (field, direction) keys. Names
//! follow the storage engine convention of joining `field_direction` pairs,
//! e.g. `price_1_createdAt_-1__id_-1`.

use std::fmt;

use serde::Serialize;

/// Key direction within an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Storage engine key value (1 / -1)
    pub fn value(&self) -> i32 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }

    pub fn reverse(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// One key of an index or sort
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IndexKey {
    /// Field name
    pub field: String,
    /// Key direction
    pub direction: SortDirection,
}

impl IndexKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn reverse(&self) -> Self {
        Self::new(self.field.clone(), self.direction.reverse())
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction.as_str())
    }
}

/// Index kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Ordered multi-field index
    Compound,
    /// Full-text index over one string field
    Text,
}

impl IndexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Compound => "compound",
            IndexKind::Text => "text",
        }
    }
}

/// A declared index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDef {
    /// Storage engine index name
    pub name: String,
    /// Index kind
    pub kind: IndexKind,
    /// Keys in index order
    pub keys: Vec<IndexKey>,
}

impl IndexDef {
    /// Creates a compound index over the given keys
    pub fn compound(keys: Vec<IndexKey>) -> Self {
        let name = keys
            .iter()
            .map(|k| format!("{}_{}", k.field, k.direction.value()))
            .collect::<Vec<_>>()
            .join("_");
        Self {
            name,
            kind: IndexKind::Compound,
            keys,
        }
    }

    /// Creates a full-text index over one field
    pub fn text(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            name: format!("{}_text", field),
            kind: IndexKind::Text,
            keys: vec![IndexKey::asc(field)],
        }
    }

    /// First key of the index
    pub fn leading(&self) -> Option<&IndexKey> {
        self.keys.first()
    }

    /// Last key of the index (the pagination tiebreak for compound indexes)
    pub fn tiebreak(&self) -> Option<&IndexKey> {
        self.keys.last()
    }

    /// Field names in index order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.field.as_str())
    }
}

impl fmt::Display for IndexDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        write!(f, "{} ({}: {})", self.name, self.kind.as_str(), keys.join(", "))
    }
}

/// A listing query shape: filter fields followed by ordered sort keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryShape {
    /// Fields constrained by the filter
    pub filter: Vec<String>,
    /// Requested sort order
    pub sort: Vec<IndexKey>,
}

impl QueryShape {
    /// Creates a shape filtering on one field
    pub fn filter(field: impl Into<String>) -> Self {
        Self {
            filter: vec![field.into()],
            sort: Vec::new(),
        }
    }

    /// Appends a sort key
    pub fn sort_by(mut self, key: IndexKey) -> Self {
        self.sort.push(key);
        self
    }
}
