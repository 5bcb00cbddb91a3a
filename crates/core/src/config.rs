use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendlineError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub rolling_week: Duration,
}

impl Default for Config {
    fn default() -> Self {
        let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let data_root = env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(home).join(".local/share"));

        Self {
            db_path: data_root.join("trendline/trendline.duckdb"),
            rolling_week: Duration::from_secs(60 * 60 * 24 * 7),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();
        let config_path = config_file_path();
        if let Some(file_overrides) = load_file_overrides(&config_path)? {
            apply_overrides(&mut cfg, file_overrides, "config file")?;
        }
        let env_overrides = load_env_overrides();
        apply_overrides(&mut cfg, env_overrides, "environment")?;
        Ok(cfg)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigOverrides {
    db_path: Option<PathBuf>,
    rolling_week: Option<String>,
}

fn config_file_path() -> PathBuf {
    if let Ok(path) = env::var("TRENDLINE_CONFIG") {
        return PathBuf::from(path);
    }

    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let config_home = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(home).join(".config"));
    config_home.join("trendline/config.toml")
}

fn load_file_overrides(path: &PathBuf) -> Result<Option<ConfigOverrides>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| TrendlineError::Config(format!("failed reading {}: {e}", path.display())))?;
    let parsed: ConfigOverrides = toml::from_str(&raw)
        .map_err(|e| TrendlineError::Config(format!("failed parsing {}: {e}", path.display())))?;
    Ok(Some(parsed))
}

fn load_env_overrides() -> ConfigOverrides {
    ConfigOverrides {
        db_path: env::var("TRENDLINE_DB_PATH").ok().map(PathBuf::from),
        rolling_week: env::var("TRENDLINE_ROLLING_WEEK").ok(),
    }
}

fn apply_overrides(cfg: &mut Config, overrides: ConfigOverrides, source: &str) -> Result<()> {
    if let Some(v) = overrides.db_path {
        cfg.db_path = v;
    }
    if let Some(v) = overrides.rolling_week {
        cfg.rolling_week = humantime::parse_duration(&v).map_err(|e| {
            TrendlineError::Config(format!("bad rolling_week in {source}: {e} (value={v})"))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rolling_week_is_seven_days() {
        let cfg = Config::default();
        assert_eq!(cfg.rolling_week, Duration::from_secs(604_800));
        assert!(cfg.db_path.ends_with("trendline/trendline.duckdb"));
    }

    #[test]
    fn overrides_update_fields() {
        let mut cfg = Config::default();
        let file = ConfigOverrides {
            db_path: Some(PathBuf::from("/tmp/metrics.duckdb")),
            rolling_week: Some("14days".to_string()),
        };

        apply_overrides(&mut cfg, file, "config file").unwrap();

        assert_eq!(cfg.db_path, PathBuf::from("/tmp/metrics.duckdb"));
        assert_eq!(cfg.rolling_week, Duration::from_secs(1_209_600));
    }

    #[test]
    fn env_overrides_apply_after_the_file() {
        let mut cfg = Config::default();
        let file = ConfigOverrides {
            db_path: Some(PathBuf::from("/srv/file.duckdb")),
            rolling_week: Some("14days".to_string()),
        };
        let env = ConfigOverrides {
            db_path: Some(PathBuf::from("/srv/env.duckdb")),
            rolling_week: None,
        };

        apply_overrides(&mut cfg, file, "config file").unwrap();
        apply_overrides(&mut cfg, env, "environment").unwrap();

        assert_eq!(cfg.db_path, PathBuf::from("/srv/env.duckdb"));
        assert_eq!(cfg.rolling_week, Duration::from_secs(1_209_600));
    }

    #[test]
    fn bad_rolling_week_is_rejected() {
        let mut cfg = Config::default();
        let file = ConfigOverrides {
            rolling_week: Some("soon".to_string()),
            ..ConfigOverrides::default()
        };

        let err = apply_overrides(&mut cfg, file, "config file").unwrap_err();
        assert!(matches!(err, TrendlineError::Config(_)));
    }

    #[test]
    fn parses_file_overrides_from_toml() {
        let parsed: ConfigOverrides = toml::from_str("rolling_week = \"7days\"").unwrap();
        assert_eq!(parsed.rolling_week.as_deref(), Some("7days"));
        assert!(parsed.db_path.is_none());
    }
}
