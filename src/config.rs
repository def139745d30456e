// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{ImportError, Result};
use crate::template::DEFAULT_TEMPLATE_FILE;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub store: StoreConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_members_table")]
    pub members_table: String,
    #[serde(default = "default_chapters_table")]
    pub chapters_table: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportConfig {
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: usize,
    #[serde(default = "default_error_display_limit")]
    pub error_display_limit: usize,
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,
}

impl StoreConfig {
    /// Configured key, or `None` when unset or blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

fn default_members_table() -> String {
    "members".to_string()
}

fn default_chapters_table() -> String {
    "chapters".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_file_size_mb() -> usize {
    10
}

fn default_error_display_limit() -> usize {
    10
}

fn default_template_path() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE_FILE)
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("MEMBER_IMPORT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ImportError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ImportError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            store: StoreConfig {
                url: "http://localhost:54321".to_string(),
                api_key: None,
                members_table: default_members_table(),
                chapters_table: default_chapters_table(),
                timeout_secs: default_timeout_secs(),
            },
            import: ImportConfig {
                max_file_size_mb: default_max_file_size_mb(),
                error_display_limit: default_error_display_limit(),
                template_path: default_template_path(),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.store.url.trim().is_empty() {
            return Err(ImportError::Config("store.url must not be empty".to_string()));
        }

        if self.store.timeout_secs == 0 {
            return Err(ImportError::Config(
                "store.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.import.max_file_size_mb == 0 {
            return Err(ImportError::Config(
                "import.max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.import.error_display_limit, 10);
        assert_eq!(config.store.members_table, "members");
        assert_eq!(
            config.import.template_path,
            PathBuf::from("member_import_template.xlsx")
        );
    }

    #[test]
    fn test_load_from_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("import.toml");
        fs::write(
            &path,
            "[store]\nurl = \"https://db.example.org\"\n\n[import]\nerror_display_limit = 5\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.store.url, "https://db.example.org");
        assert_eq!(config.store.chapters_table, "chapters");
        assert_eq!(config.store.timeout_secs, 30);
        assert_eq!(config.import.error_display_limit, 5);
        assert_eq!(config.import.max_file_size_mb, 10);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default_config();
        config.store.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_api_key_is_treated_as_unset() {
        let mut config = Config::default_config();
        assert_eq!(config.store.api_key(), None);

        config.store.api_key = Some(String::new());
        assert_eq!(config.store.api_key(), None);

        config.store.api_key = Some("   ".to_string());
        assert_eq!(config.store.api_key(), None);

        config.store.api_key = Some(" service-key ".to_string());
        assert_eq!(config.store.api_key(), Some("service-key"));
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let mut config = Config::default_config();
        config.store.url = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
