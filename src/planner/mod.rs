//! Index planner for vehicle listings
//!
//! Declares the compound and text indexes the storage engine must build for
//! a schema revision, and verifies them before the process serves queries.
//!
//! # Design Principles
//!
//! - Static: the index set is configuration, evaluated once at startup
//! - Deterministic: same revision → same indexes in the same order
//! - Paginated: every compound index ends with a unique tiebreak
//! - Fatal: any inconsistency stops initialization
//!
//! # Index Selection Priority (strict order)
//!
//! 1. Fewest keys
//! 2. Forward scan over backward scan
//! 3. Declaration order

mod errors;
mod explain;
mod index;
mod planner;

pub use errors::{PlannerError, PlannerErrorCode, PlannerResult, Severity};
pub use explain::ExplainPlan;
pub use index::{IndexDef, IndexKey, IndexKind, QueryShape, SortDirection};
pub use planner::{plan_all, recency_field, IndexPlan, IndexPlanner, PRICE_FIELD, TEXT_FIELD};
