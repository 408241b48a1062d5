//! Configuration file
//!
//! ```json
//! { "default_revision": "v3", "log_level": "info", "entities": "./entities.json" }
//! ```
//!
//! `entities` is resolved relative to the config file and maps collection
//! names to the ids known to exist in them.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::Severity;
use crate::schema::{EntityKind, MemoryResolver, Revision};

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Revision applied to untagged records and index plans (default: latest)
    #[serde(default = "Revision::latest")]
    pub default_revision: Revision,

    /// Minimum log severity (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Entity id file for reference checks (optional)
    #[serde(default)]
    pub entities: Option<PathBuf>,

    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_revision: Revision::latest(),
            log_level: default_log_level(),
            entities: None,
            base_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if Severity::parse(&self.log_level).is_none() {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error, fatal.",
                self.log_level
            )));
        }
        Ok(())
    }

    /// Configured minimum log severity
    pub fn log_severity(&self) -> Severity {
        Severity::parse(&self.log_level).unwrap_or(Severity::Info)
    }

    /// Absolute or config-relative path of the entity file
    pub fn entities_path(&self) -> Option<PathBuf> {
        self.entities.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                self.base_dir.join(p)
            }
        })
    }

    /// Builds the in-memory resolver from the entity file.
    ///
    /// Without an entity file the resolver is empty and every reference is
    /// reported dangling.
    pub fn resolver(&self) -> CliResult<MemoryResolver> {
        let path = match self.entities_path() {
            Some(path) => path,
            None => return Ok(MemoryResolver::new()),
        };

        let content = fs::read_to_string(&path).map_err(|e| {
            CliError::config_error(format!("Failed to read entities '{}': {}", path.display(), e))
        })?;

        let entities: HashMap<EntityKind, Vec<String>> = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid entities JSON: {}", e)))?;

        Ok(MemoryResolver::from_entities(entities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EntityResolver;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_config_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "vehicles.json", "{}");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_revision, Revision::V3);
        assert_eq!(config.log_severity(), Severity::Info);
        assert!(config.resolver().unwrap().is_empty());
    }

    #[test]
    fn test_config_rejects_unknown_revision() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "vehicles.json", r#"{ "default_revision": "v9" }"#);
        assert!(matches!(Config::load(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_config_rejects_log_level() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "vehicles.json", r#"{ "log_level": "loud" }"#);
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "vehicles.json", r#"{ "data_dir": "/tmp" }"#);
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code_str(), "VEHICLE_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_entities_relative_to_config() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "entities.json",
            r#"{ "locations": ["aaaaaaaaaaaaaaaaaaaaaaa1"], "vehicle-makes": ["bbbbbbbbbbbbbbbbbbbbbbb1"] }"#,
        );
        let path = write(
            &dir,
            "vehicles.json",
            r#"{ "default_revision": "v1", "log_level": "warn", "entities": "entities.json" }"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_revision, Revision::V1);
        assert_eq!(config.log_severity(), Severity::Warn);

        let resolver = config.resolver().unwrap();
        assert_eq!(resolver.len(), 2);
        assert!(resolver.resolve(EntityKind::Location, "aaaaaaaaaaaaaaaaaaaaaaa1"));
        assert!(!resolver.resolve(EntityKind::Contact, "aaaaaaaaaaaaaaaaaaaaaaa1"));
    }

    #[test]
    fn test_entities_unknown_collection() {
        let dir = TempDir::new().unwrap();
        write(&dir, "entities.json", r#"{ "garages": ["x"] }"#);
        let path = write(&dir, "vehicles.json", r#"{ "entities": "entities.json" }"#);
        let config = Config::load(&path).unwrap();
        assert!(matches!(config.resolver(), Err(CliError::Config(_))));
    }
}
