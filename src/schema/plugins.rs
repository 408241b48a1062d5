//! Capability modules attached to the vehicle listing
//!
//! Each capability contributes the fields it owns. The fields are validated
//! by type when present, but values are assigned by the host (storage layer,
//! tagging and workflow services), never by the validator.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::resolver::EntityKind;
use super::revision::Revision;
use super::types::{FieldDef, FieldType};

/// A reusable bundle of fields applied to a base record type
pub trait Capability {
    /// Name used in assembly errors and logs
    fn name(&self) -> &'static str;

    /// Fields contributed under the given revision
    fn fields(&self, revision: Revision) -> Vec<FieldDef>;
}

/// Storage identity: `_id` (pagination tiebreak) and `__v` (document version)
pub struct Identity;

/// Identity field name
pub const ID_FIELD: &str = "_id";
/// Document version field name
pub const VERSION_FIELD: &str = "__v";

impl Capability for Identity {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn fields(&self, _revision: Revision) -> Vec<FieldDef> {
        vec![
            FieldDef::string(ID_FIELD).unique().sortable(),
            FieldDef::integer(VERSION_FIELD).min(0.0),
        ]
    }
}

/// Owning user reference
pub struct Owner;

impl Capability for Owner {
    fn name(&self) -> &'static str {
        "owner"
    }

    fn fields(&self, _revision: Revision) -> Vec<FieldDef> {
        vec![FieldDef::reference("user", EntityKind::User).searchable()]
    }
}

/// A single host-maintained timestamp
pub struct Timestamp(pub &'static str);

impl Capability for Timestamp {
    fn name(&self) -> &'static str {
        self.0
    }

    fn fields(&self, _revision: Revision) -> Vec<FieldDef> {
        vec![FieldDef::date(self.0).searchable().sortable()]
    }
}

/// Free-form tags
pub struct Tags;

impl Capability for Tags {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn fields(&self, _revision: Revision) -> Vec<FieldDef> {
        vec![FieldDef::list("tags", FieldType::String).searchable()]
    }
}

/// `has` / `allowed` capability maps
pub struct Permits;

impl Capability for Permits {
    fn name(&self) -> &'static str {
        "permits"
    }

    fn fields(&self, _revision: Revision) -> Vec<FieldDef> {
        vec![FieldDef::map("has"), FieldDef::map("allowed")]
    }
}

/// Workflow state: status, permissions and visibility
pub struct Workflow;

impl Capability for Workflow {
    fn name(&self) -> &'static str {
        "workflow"
    }

    fn fields(&self, _revision: Revision) -> Vec<FieldDef> {
        vec![
            FieldDef::string("status")
                .one_of(&WorkflowStatus::ALL.map(|s| s.as_str()))
                .searchable(),
            FieldDef::list("permissions", FieldType::Map),
            FieldDef::map("visibility"),
        ]
    }
}

/// Capabilities applied to the listing under each revision, in order
pub fn capabilities_for(revision: Revision) -> Vec<Box<dyn Capability>> {
    let mut capabilities: Vec<Box<dyn Capability>> = vec![
        Box::new(Identity),
        Box::new(Owner),
        Box::new(Timestamp("createdAt")),
        Box::new(Timestamp("updatedAt")),
    ];
    if revision >= Revision::V2 {
        capabilities.push(Box::new(Timestamp("modifiedAt")));
        capabilities.push(Box::new(Permits));
    }
    if revision >= Revision::V3 {
        capabilities.push(Box::new(Workflow));
    }
    capabilities.push(Box::new(Tags));
    capabilities
}

/// Field names owned by capabilities under a revision
pub fn reserved_fields(revision: Revision) -> Vec<String> {
    capabilities_for(revision)
        .iter()
        .flat_map(|c| c.fields(revision))
        .map(|f| f.name)
        .collect()
}

/// Workflow status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Editing,
    Reviewing,
    Published,
    Retired,
}

impl WorkflowStatus {
    pub const ALL: [WorkflowStatus; 4] = [
        WorkflowStatus::Editing,
        WorkflowStatus::Reviewing,
        WorkflowStatus::Published,
        WorkflowStatus::Retired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Editing => "editing",
            WorkflowStatus::Reviewing => "reviewing",
            WorkflowStatus::Published => "published",
            WorkflowStatus::Retired => "retired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        WorkflowStatus::ALL.iter().copied().find(|st| st.as_str() == s)
    }

    /// State of a listing that has never been in the workflow.
    pub fn initial() -> Self {
        WorkflowStatus::Editing
    }

    /// Checks if a transition to `next` is authorized.
    ///
    /// Listings are never hard-deleted; `Retired` is the terminal state for
    /// public visibility and can only go back to `Editing`.
    pub fn can_transition(&self, next: WorkflowStatus) -> bool {
        use WorkflowStatus::*;
        matches!(
            (self, next),
            (Editing, Reviewing)
                | (Reviewing, Editing)
                | (Reviewing, Published)
                | (Published, Editing)
                | (Published, Retired)
                | (Retired, Editing)
        )
    }

    /// Checks if listings in this state are shown publicly
    pub fn is_public(&self) -> bool {
        *self == WorkflowStatus::Published
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
