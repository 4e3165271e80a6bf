use crate::constants::{CONFIG_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
use crate::error::{KiranaError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub uploads: UploadConfig,
    pub admin: AdminConfig,
}

/// Firestore project holding the `products` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub project_id: String,
    pub api_key: String,
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_database() -> String {
    "(default)".to_string()
}

/// Cloudinary unsigned upload target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub cloud_name: String,
    pub upload_preset: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Shared static password, compared locally. Known-weak by design;
    /// anyone with the config file can read it.
    pub password: String,
}

impl Config {
    /// Loads config from the given path, `$KIRANA_CONFIG`, or the default
    /// location, in that order.
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        let path = match path {
            Some(p) => p.clone(),
            None => match std::env::var(CONFIG_ENV_VAR) {
                Ok(p) => PathBuf::from(p),
                Err(_) => Self::default_path()?,
            },
        };
        if !path.exists() {
            return Err(KiranaError::Config(format!(
                "config file not found: {} (create it or set ${})",
                path.display(),
                CONFIG_ENV_VAR
            )));
        }
        let raw = fs::read_to_string(&path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(raw).map_err(|e| KiranaError::Config(e.to_string()))?;
        if config.store.project_id.is_empty() {
            return Err(KiranaError::Config("store.project_id is empty".to_string()));
        }
        if config.uploads.cloud_name.is_empty() {
            return Err(KiranaError::Config("uploads.cloud_name is empty".to_string()));
        }
        Ok(config)
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(config_dir()?.join(CONFIG_FILE_NAME))
    }
}

/// `~/.config/kirana`, honoring `$XDG_CONFIG_HOME`.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Ok(PathBuf::from(xdg).join(CONFIG_DIR_NAME));
        }
    }
    let home = std::env::var("HOME")
        .map_err(|_| KiranaError::Config("HOME is not set".to_string()))?;
    Ok(PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[store]
project_id = "balaji-shop"
api_key = "AIzaSyTest"

[uploads]
cloud_name = "dbdeujr2x"
upload_preset = "balaji-uploads"

[admin]
password = "hunter2"
"#;

    #[test]
    fn parse_sample_config() {
        let config = Config::parse(SAMPLE).unwrap();
        assert_eq!(config.store.project_id, "balaji-shop");
        assert_eq!(config.store.database, "(default)");
        assert_eq!(config.uploads.cloud_name, "dbdeujr2x");
        assert_eq!(config.admin.password, "hunter2");
    }

    #[test]
    fn parse_rejects_missing_sections() {
        assert!(Config::parse("[store]\nproject_id = \"x\"").is_err());
    }

    #[test]
    fn parse_rejects_empty_project() {
        let raw = SAMPLE.replace("balaji-shop", "");
        assert!(matches!(Config::parse(&raw), Err(KiranaError::Config(_))));
    }

    #[test]
    fn database_override() {
        let raw = SAMPLE.replace(
            "api_key = \"AIzaSyTest\"",
            "api_key = \"AIzaSyTest\"\ndatabase = \"staging\"",
        );
        let config = Config::parse(&raw).unwrap();
        assert_eq!(config.store.database, "staging");
    }
}
