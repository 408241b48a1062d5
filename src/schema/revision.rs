//! Schema revisions of the vehicle listing record
//!
//! Each stored record carries the tag of the revision it was written under.
//! Field presence, required flags, enum members and limits are declared once
//! with the span of revisions they apply to.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// Field holding the revision tag on stored records.
pub const REVISION_FIELD: &str = "_revision";

/// Historical revisions of the vehicle listing field set, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Revision {
    /// First listing layout: single contact, five images.
    #[serde(rename = "v1")]
    V1,
    /// Contact lists, edition/country, relaxed required flags.
    #[serde(rename = "v2")]
    V2,
    /// Photos, workflow state, optional location/contacts.
    #[serde(rename = "v3")]
    V3,
}

impl Revision {
    /// All revisions, oldest first.
    pub const ALL: [Revision; 3] = [Revision::V1, Revision::V2, Revision::V3];

    /// The revision untagged records are validated against.
    pub fn latest() -> Self {
        Revision::V3
    }

    /// Returns the stored tag
    pub fn tag(&self) -> &'static str {
        match self {
            Revision::V1 => "v1",
            Revision::V2 => "v2",
            Revision::V3 => "v3",
        }
    }

    /// Parses a stored tag.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRevision` for tags no revision carries.
    pub fn from_tag(tag: &str) -> SchemaResult<Self> {
        Revision::ALL
            .iter()
            .copied()
            .find(|r| r.tag() == tag)
            .ok_or_else(|| SchemaError::unknown_revision(tag))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Half-open range of revisions `[since, until)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    since: Revision,
    until: Option<Revision>,
}

impl Span {
    /// Every revision.
    pub const fn always() -> Self {
        Self {
            since: Revision::V1,
            until: None,
        }
    }

    /// No revision.
    pub const fn never() -> Self {
        Self {
            since: Revision::V3,
            until: Some(Revision::V3),
        }
    }

    /// From `since` onward.
    pub const fn since(since: Revision) -> Self {
        Self { since, until: None }
    }

    /// Up to, but excluding, `until`.
    pub const fn until(until: Revision) -> Self {
        Self {
            since: Revision::V1,
            until: Some(until),
        }
    }

    /// Checks if the span covers a revision
    pub fn contains(&self, revision: Revision) -> bool {
        revision >= self.since && self.until.map_or(true, |until| revision < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for revision in Revision::ALL {
            assert_eq!(Revision::from_tag(revision.tag()).unwrap(), revision);
        }
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let err = Revision::from_tag("v9").unwrap_err();
        assert_eq!(err.code().code(), "VEHICLE_UNKNOWN_REVISION");
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!(Revision::from_tag("V1").is_err());
    }

    #[test]
    fn test_revisions_ordered() {
        assert!(Revision::V1 < Revision::V2);
        assert!(Revision::V2 < Revision::V3);
        assert_eq!(Revision::latest(), Revision::V3);
    }

    #[test]
    fn test_span_contains() {
        assert!(Span::always().contains(Revision::V1));
        assert!(Span::always().contains(Revision::V3));

        let later = Span::since(Revision::V2);
        assert!(!later.contains(Revision::V1));
        assert!(later.contains(Revision::V2));
        assert!(later.contains(Revision::V3));

        let earlier = Span::until(Revision::V2);
        assert!(earlier.contains(Revision::V1));
        assert!(!earlier.contains(Revision::V2));

        for revision in Revision::ALL {
            assert!(!Span::never().contains(revision));
        }
    }

    #[test]
    fn test_serde_uses_tags() {
        let json = serde_json::to_string(&Revision::V2).unwrap();
        assert_eq!(json, "\"v2\"");
        let parsed: Revision = serde_json::from_str("\"v3\"").unwrap();
        assert_eq!(parsed, Revision::V3);
    }
}
