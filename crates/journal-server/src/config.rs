//! Server configuration.
//!
//! Configuration is loaded once at startup with precedence:
//! 1. Environment variables
//! 2. Config file (`$JOURNAL_CONFIG` or `<data dir>/config.toml`)
//! 3. Default values
//!
//! Standard directory structure:
//! ```text
//! ~/.journal/              # or $JOURNAL_DIR
//! ├── config.toml          # Optional configuration
//! └── journal.db           # Database
//! ```

use anyhow::{Context, Result};
use journal_core::LlmConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    /// Inference endpoint settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Path the config was (or would have been) read from
    #[serde(skip)]
    pub config_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file; defaults to `<data dir>/journal.db`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

/// Base directory for journal data
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".journal")
}

impl Config {
    /// Load configuration from the process environment and config file.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration with a custom environment lookup.
    pub fn load_with<F>(env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = env("JOURNAL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let config_path = env("JOURNAL_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            Self::from_toml(&content)?
        } else {
            Config::default()
        };

        config.config_path = config_path;
        config.apply_env(&env);
        config.fill_defaults(&data_dir);
        Ok(config)
    }

    /// Parse a TOML config document.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    fn apply_env<F>(&mut self, env: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = env("JOURNAL_BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        if let Some(path) = env("JOURNAL_DATABASE_PATH") {
            self.database.path = Some(PathBuf::from(path));
        }
        if let Some(key) = env("AZURE_OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = env("AZURE_OPENAI_BASE_URL") {
            self.llm.base_url = url;
        }
        if let Some(model) = env("JOURNAL_LLM_MODEL") {
            self.llm.model = model;
        }
    }

    fn fill_defaults(&mut self, data_dir: &Path) {
        if self.database.path.is_none() {
            self.database.path = Some(data_dir.join("journal.db"));
        }
    }

    /// Resolved database path
    pub fn database_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| default_data_dir().join("journal.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr, "127.0.0.1:8000");
        assert!(config.database.path.is_none());
        assert_eq!(config.llm.model, "gpt4omini");
        assert!(config.database_path().ends_with("journal.db"));
    }

    #[test]
    fn test_load_uses_data_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("journal");
        let dir_str = dir.to_string_lossy().to_string();

        let config = Config::load_with(env_from(&[("JOURNAL_DIR", dir_str.as_str())])).unwrap();

        assert_eq!(config.config_path, dir.join("config.toml"));
        assert_eq!(config.database_path(), dir.join("journal.db"));
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_load_reads_file_then_env_overrides() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir_str = temp_dir.path().to_string_lossy().to_string();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            r#"
[server]
bind_addr = "0.0.0.0:9000"

[llm]
model = "from-file"
max_tokens = 500
"#,
        )
        .unwrap();

        let config = Config::load_with(env_from(&[
            ("JOURNAL_DIR", dir_str.as_str()),
            ("JOURNAL_LLM_MODEL", "from-env"),
            ("AZURE_OPENAI_API_KEY", "secret"),
            ("AZURE_OPENAI_BASE_URL", "https://example.openai.azure.com/openai/v1"),
        ]))
        .unwrap();

        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.llm.model, "from-env");
        assert_eq!(config.llm.max_tokens, 500);
        assert_eq!(config.llm.api_key.as_deref(), Some("secret"));
        assert_eq!(config.llm.base_url, "https://example.openai.azure.com/openai/v1");
    }

    #[test]
    fn test_explicit_config_and_database_paths() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir_str = temp_dir.path().to_string_lossy().to_string();
        let config_file = temp_dir.path().join("custom.toml");
        std::fs::write(&config_file, "[database]\npath = \"/tmp/from-file.db\"\n").unwrap();
        let config_str = config_file.to_string_lossy().to_string();

        let config = Config::load_with(env_from(&[
            ("JOURNAL_DIR", dir_str.as_str()),
            ("JOURNAL_CONFIG", config_str.as_str()),
        ]))
        .unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/from-file.db"));

        let config = Config::load_with(env_from(&[
            ("JOURNAL_DIR", dir_str.as_str()),
            ("JOURNAL_CONFIG", config_str.as_str()),
            ("JOURNAL_DATABASE_PATH", "/tmp/from-env.db"),
        ]))
        .unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/from-env.db"));
    }

    #[test]
    fn test_load_does_not_create_data_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("unused");
        let dir_str = dir.to_string_lossy().to_string();
        let db_path = temp_dir.path().join("elsewhere").join("journal.db");
        let db_str = db_path.to_string_lossy().to_string();

        let config = Config::load_with(env_from(&[
            ("JOURNAL_DIR", dir_str.as_str()),
            ("JOURNAL_DATABASE_PATH", db_str.as_str()),
        ]))
        .unwrap();

        assert!(!dir.exists());
        assert_eq!(config.database_path(), db_path);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(Config::from_toml("[server\nbind_addr = 1").is_err());
    }
}
