//! Application configuration.
//!
//! Loaded from the optional `config/inventory.toml`, overlaid by `INVENTORY__*`
//! environment variables (`INVENTORY__STORE__BASE_URL=http://...`). Every field has a
//! default, so an empty environment yields a working setup.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

const CONFIG_FILE: &str = "config/inventory.toml";
const ENV_PREFIX: &str = "INVENTORY";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Http,
    Local,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_local_path")]
    pub local_path: PathBuf,
    /// No timeout when absent.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            base_url: default_base_url(),
            local_path: default_local_path(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_local_path() -> PathBuf {
    PathBuf::from("data/inventory.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_session_flag_path")]
    pub session_flag_path: PathBuf,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
            session_flag_path: default_session_flag_path(),
        }
    }
}

fn default_username() -> String {
    "aa".to_string()
}

fn default_password() -> String {
    "1234".to_string()
}

fn default_session_flag_path() -> PathBuf {
    PathBuf::from("data/is_auth")
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Falls back to the `API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

impl AssistantConfig {
    /// Configured key, else `API_KEY` from the environment. Blank keys count as missing.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl AppConfig {
    /// Reads `config/inventory.toml` (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        settings.try_deserialize::<AppConfig>().map_err(|e| {
            ConfigError::Message(format!(
                "Inventory configuration could not be loaded from {} or environment: {}",
                path, e
            ))
        })
    }
}
