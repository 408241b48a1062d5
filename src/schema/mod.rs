//! Vehicle listing schema
//!
//! The listing field set is declared once and keyed by revision. Capability
//! modules (identity, owner, timestamps, tags, workflow) are applied by the
//! assembler; the validator checks candidate records against the assembled
//! schema of exactly one revision.
//!
//! # Design Principles
//!
//! - Per-revision presence, required flags, enum sets and limits
//! - Every violation reported in one pass, in declaration order
//! - Reference existence delegated to the host's resolver
//! - Evaluation time injected, never read from a clock
//! - Capability fields checked but never assigned

mod assembler;
mod errors;
mod plugins;
mod registry;
mod resolver;
mod revision;
mod serialize;
mod types;
mod validator;
mod vehicle;

pub use assembler::{vehicle_schema, SchemaAssembler};
pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity, Violation, ViolationCode};
pub use plugins::{
    capabilities_for, reserved_fields, Capability, Identity, Owner, Permits, Tags, Timestamp,
    Workflow, WorkflowStatus, ID_FIELD, VERSION_FIELD,
};
pub use registry::RevisionRegistry;
pub use resolver::{EntityKind, EntityResolver, Lookup, MemoryResolver};
pub use revision::{Revision, Span, REVISION_FIELD};
pub use serialize::{to_public, PUBLIC_ID_FIELD};
pub use types::{FieldDef, FieldType, Schema};
pub use validator::{RecordValidator, ValidatedRecord};
pub use vehicle::{field_specs, vehicle_fields, FieldSpec, COLLECTION};
