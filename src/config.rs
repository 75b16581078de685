use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BondConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub gemini: GeminiConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeminiConfig {
    /// Generative Language API key. `None` degrades suggestion generation to
    /// mock output instead of failing.
    pub api_key: Option<String>,
    /// Base URL of the Generative Language API. Overridable so tests can
    /// point the client at a local stub.
    pub base_url: String,
    /// Per-request timeout in seconds for catalog and generation calls.
    pub request_timeout_secs: u64,
    /// When true, suggestion generation never calls the remote API and
    /// always returns the canned payload.
    pub use_mock: bool,
}

impl Default for BondConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            gemini: GeminiConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8470,
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_bondkeeper_dir()
            .join("bondkeeper.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".into(),
            request_timeout_secs: 30,
            use_mock: false,
        }
    }
}

/// Returns `~/.bondkeeper/`
pub fn default_bondkeeper_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".bondkeeper")
}

/// Returns the default config file path: `~/.bondkeeper/config.toml`
pub fn default_config_path() -> PathBuf {
    default_bondkeeper_dir().join("config.toml")
}

impl BondConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            BondConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (BONDKEEPER_DB, BONDKEEPER_LOG_LEVEL,
    /// GEMINI_API_KEY, BONDKEEPER_USE_MOCK).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("BONDKEEPER_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("BONDKEEPER_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("GEMINI_API_KEY") {
            if !val.is_empty() {
                self.gemini.api_key = Some(val);
            }
        }
        if let Ok(val) = std::env::var("BONDKEEPER_USE_MOCK") {
            self.gemini.use_mock = val == "1";
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

impl GeminiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = BondConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.log_level, "info");
        assert!(config.gemini.api_key.is_none());
        assert!(!config.gemini.use_mock);
        assert_eq!(config.gemini.request_timeout_secs, 30);
        assert!(config.storage.db_path.ends_with("bondkeeper.db"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
log_level = "debug"
port = 9000

[storage]
db_path = "/tmp/test.db"

[gemini]
api_key = "test-key"
request_timeout_secs = 5
"#;
        let config: BondConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.db_path, "/tmp/test.db");
        assert_eq!(config.gemini.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.gemini.request_timeout_secs, 5);
        // defaults still apply for unset fields
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.gemini.base_url.contains("generativelanguage"));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = BondConfig::default();
        std::env::set_var("BONDKEEPER_DB", "/tmp/override.db");
        std::env::set_var("BONDKEEPER_LOG_LEVEL", "trace");
        std::env::set_var("BONDKEEPER_USE_MOCK", "1");

        config.apply_env_overrides();

        assert_eq!(config.storage.db_path, "/tmp/override.db");
        assert_eq!(config.server.log_level, "trace");
        assert!(config.gemini.use_mock);

        // Only the exact value "1" enables mock mode
        std::env::set_var("BONDKEEPER_USE_MOCK", "yes");
        config.apply_env_overrides();
        assert!(!config.gemini.use_mock);

        // Clean up
        std::env::remove_var("BONDKEEPER_DB");
        std::env::remove_var("BONDKEEPER_LOG_LEVEL");
        std::env::remove_var("BONDKEEPER_USE_MOCK");
    }
}
