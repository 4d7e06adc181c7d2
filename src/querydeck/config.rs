use crate::error::{QueryDeckError, Result};
use crate::model::DEFAULT_QUERY_NAME;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// What a failed push does to the baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PushFailurePolicy {
    /// Leave baseline and deletion markers alone, so the changes stay unpushed.
    #[default]
    KeepBaseline,
    /// Advance the baseline anyway. Failed changes then look synced.
    AdvanceBaseline,
}

impl fmt::Display for PushFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushFailurePolicy::KeepBaseline => write!(f, "keep-baseline"),
            PushFailurePolicy::AdvanceBaseline => write!(f, "advance-baseline"),
        }
    }
}

impl FromStr for PushFailurePolicy {
    type Err = QueryDeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "keep-baseline" | "keep" => Ok(PushFailurePolicy::KeepBaseline),
            "advance-baseline" | "advance" => Ok(PushFailurePolicy::AdvanceBaseline),
            other => Err(QueryDeckError::Api(format!(
                "Unknown push failure policy '{}' (expected keep-baseline or advance-baseline)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Configuration for querydeck, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryDeckConfig {
    /// Name given to queries created from the editor
    #[serde(default = "default_query_name")]
    pub default_query_name: String,

    #[serde(default)]
    pub push_failure: PushFailurePolicy,

    /// Log filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_query_name() -> String {
    DEFAULT_QUERY_NAME.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for QueryDeckConfig {
    fn default() -> Self {
        Self {
            default_query_name: default_query_name(),
            push_failure: PushFailurePolicy::default(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl QueryDeckConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Sets the default name for new queries (trimmed, must not be blank)
    pub fn set_default_query_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QueryDeckError::Api(
                "Default query name cannot be empty".to_string(),
            ));
        }
        self.default_query_name = name.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QueryDeckConfig::default();
        assert_eq!(config.default_query_name, "Untitled Query");
        assert_eq!(config.push_failure, PushFailurePolicy::KeepBaseline);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_set_default_query_name_trims() {
        let mut config = QueryDeckConfig::default();
        config.set_default_query_name("  Scratch ").unwrap();
        assert_eq!(config.default_query_name, "Scratch");
        assert!(config.set_default_query_name("   ").is_err());
    }

    #[test]
    fn test_push_failure_policy_parsing() {
        assert_eq!(
            "advance".parse::<PushFailurePolicy>().unwrap(),
            PushFailurePolicy::AdvanceBaseline
        );
        assert_eq!(
            "keep-baseline".parse::<PushFailurePolicy>().unwrap(),
            PushFailurePolicy::KeepBaseline
        );
        assert!("sometimes".parse::<PushFailurePolicy>().is_err());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = QueryDeckConfig::load(dir.path()).unwrap();
        assert_eq!(config, QueryDeckConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = QueryDeckConfig::default();
        config.push_failure = PushFailurePolicy::AdvanceBaseline;
        config.save(dir.path().join("nested")).unwrap();

        let loaded = QueryDeckConfig::load(dir.path().join("nested")).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{ "push_failure": "advance-baseline" }"#,
        )
        .unwrap();

        let loaded = QueryDeckConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.push_failure, PushFailurePolicy::AdvanceBaseline);
        assert_eq!(loaded.default_query_name, "Untitled Query");
        assert_eq!(loaded.log_level, "warn");
    }
}
