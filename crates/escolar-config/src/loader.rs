use std::path::{Path, PathBuf};

use escolar_common::{Error, Result};
use tracing::{debug, info};

use crate::model::AppConfig;

/// Loads `escolar.yml`, falling back to defaults when absent. The
/// `ESCOLAR_DB` environment variable overrides the configured database
/// path either way.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_path() -> PathBuf {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join(".escolar").join("escolar.yml")
    }

    pub fn load(path: &Path) -> Result<AppConfig> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            let config: AppConfig = serde_yaml::from_str(&raw)
                .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;
            info!("config loaded from {}", path.display());
            config
        } else {
            debug!("no config at {}, using defaults", path.display());
            AppConfig::default()
        };

        if let Ok(db) = std::env::var("ESCOLAR_DB")
            && !db.is_empty()
        {
            config.database.path = PathBuf::from(db);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_yaml_config() {
        let yaml = "database:\n  path: /tmp/escolar-test.db\nlog: debug\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.database.path,
            std::path::PathBuf::from("/tmp/escolar-test.db")
        );
        assert_eq!(config.log.as_deref(), Some("debug"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = ConfigLoader::load(Path::new("/nonexistent/escolar.yml")).unwrap();
        assert!(config.database.path.ends_with("escolar.db"));
    }
}
