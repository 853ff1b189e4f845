use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

const HOME_ENV: &str = "BUDGET_BUDDY_HOME";
const DEFAULT_DIR_NAME: &str = ".budget_buddy";
const SNAPSHOT_FILE: &str = "snapshot.json";

/// Stores user-configurable summary preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
    /// Fail on malformed records instead of excluding them.
    #[serde(default)]
    pub strict_ingest: bool,
    /// Display-only currency code; amounts are never converted.
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_snapshot: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recent_limit: Self::default_recent_limit(),
            strict_ingest: false,
            currency: Self::default_currency(),
            default_snapshot: None,
        }
    }
}

impl Config {
    pub fn default_recent_limit() -> usize {
        5
    }

    pub fn default_currency() -> String {
        "USD".into()
    }

    /// Application data directory: `$BUDGET_BUDDY_HOME`, else `~/.budget_buddy`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_snapshot_path(&self) -> PathBuf {
        if let Some(path) = &self.default_snapshot {
            return path.clone();
        }
        Self::base_dir().join(SNAPSHOT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = serde_json::from_str("{}").expect("empty config");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.recent_limit, 5);
        assert!(!cfg.strict_ingest);
    }

    #[test]
    fn explicit_snapshot_path_wins() {
        let cfg = Config {
            default_snapshot: Some(PathBuf::from("/tmp/records.json")),
            ..Config::default()
        };
        assert_eq!(cfg.resolve_snapshot_path(), PathBuf::from("/tmp/records.json"));
    }
}
