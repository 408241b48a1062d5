//! vehicle_listing - Revision-aware schema validator and index planner for
//! vehicle listings
//!
//! - `schema`: field declarations per revision, capability assembly, record
//!   validation and the public serialization boundary
//! - `planner`: declared index set per revision and its verification
//! - `observability`: structured JSON logging
//! - `cli`: the `vehicles` command-line tool

pub mod cli;
pub mod observability;
pub mod planner;
pub mod schema;
