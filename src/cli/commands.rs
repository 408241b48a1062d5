//! CLI command implementations
//!
//! Every command follows the same boot sequence:
//! 1. Load and validate configuration
//! 2. Apply the configured log level
//! 3. Assemble the schema of every revision
//!
//! Commands then read at most one record from stdin and write exactly one
//! JSON response to stdout. Failures are written by `run`, so a command only
//! writes on success.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use crate::observability::{log_event_with_fields, Event, Logger};
use crate::planner::{plan_all, ExplainPlan, IndexPlanner};
use crate::schema::{
    EntityResolver, Revision, RevisionRegistry, RecordValidator, ValidatedRecord, REVISION_FIELD,
};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let result = run_command(cli.command);
    if let Err(e) = &result {
        write_error(e)?;
    }
    result
}

/// Run a parsed command
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Validate {
            config,
            revision,
            now,
        } => validate(&config, revision.as_deref(), now.as_deref()),
        Command::Indexes { config, revision } => indexes(&config, revision.as_deref()),
        Command::Check { config } => check(&config),
    }
}

/// Validate one record read from stdin and print the normalized record.
pub fn validate(config_path: &Path, revision: Option<&str>, now: Option<&str>) -> CliResult<()> {
    let (config, registry) = boot(config_path)?;
    let resolver = config.resolver()?;
    let now = parse_now(now)?;

    let record = read_request()?;

    let validated = validate_record(&config, &registry, &resolver, &record, revision, now)?;
    write_response(validated.into_value())
}

/// Print the verified index plan of one revision
pub fn indexes(config_path: &Path, revision: Option<&str>) -> CliResult<()> {
    let (config, registry) = boot(config_path)?;
    let revision = select_revision(&config, revision)?;
    let schema = registry.get(revision)?;

    let plan = IndexPlanner::new(schema).plan()?;
    write_response(ExplainPlan::from_plan(&plan).to_json())
}

/// Assemble every revision and verify every index plan
pub fn check(config_path: &Path) -> CliResult<()> {
    let (config, registry) = boot(config_path)?;
    let resolver = config.resolver()?;
    let plans = plan_all(&registry)?;

    let mut revisions = Map::new();
    for (schema, plan) in registry.all_schemas().zip(&plans) {
        revisions.insert(
            schema.revision.tag().to_string(),
            json!({
                "fields": schema.fields.len(),
                "indexes": plan.indexes.len(),
                "recency": plan.recency,
            }),
        );
    }

    write_response(json!({
        "default_revision": config.default_revision.tag(),
        "entities": resolver.len(),
        "revisions": revisions,
    }))
}

/// Validates a record under the revision chosen by precedence:
/// `--revision` flag, then the record's own tag, then the configured default.
pub fn validate_record<R: EntityResolver + ?Sized>(
    config: &Config,
    registry: &RevisionRegistry,
    resolver: &R,
    record: &Value,
    revision: Option<&str>,
    now: DateTime<Utc>,
) -> CliResult<ValidatedRecord> {
    let revision = match revision {
        Some(tag) => Revision::from_tag(tag)?,
        None if record.get(REVISION_FIELD).map_or(false, |v| !v.is_null()) => {
            registry.revision_of(record)?
        }
        None => config.default_revision,
    };

    let validator = RecordValidator::new(registry, resolver);
    Ok(validator.validate(record, revision, now)?)
}

fn select_revision(config: &Config, revision: Option<&str>) -> CliResult<Revision> {
    match revision {
        Some(tag) => Ok(Revision::from_tag(tag)?),
        None => Ok(config.default_revision),
    }
}

fn parse_now(now: Option<&str>) -> CliResult<DateTime<Utc>> {
    match now {
        None => Ok(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| CliError::invalid_argument(format!("Invalid --now '{}': {}", s, e))),
    }
}

fn boot(config_path: &Path) -> CliResult<(Config, RevisionRegistry)> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.log_severity());

    let path = config_path.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("path", &path),
            ("default_revision", config.default_revision.tag()),
        ],
    );

    let registry = RevisionRegistry::build()?;
    Ok((config, registry))
}
