use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "SPOONACULAR_API_KEY";

/// Top-level application settings
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Where the proxy listens
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream recipe provider
    #[serde(default)]
    pub spoonacular: SpoonacularConfig,
}

/// HTTP listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Configuration for the Spoonacular API
#[derive(Debug, Deserialize, Clone)]
pub struct SpoonacularConfig {
    /// API key for authentication (can also be set via SPOONACULAR_API_KEY)
    pub api_key: Option<String>,
    /// Base URL for the API (overridable for proxies and tests)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Number of recipes requested from find-by-ingredients
    #[serde(default = "default_result_limit")]
    pub result_limit: u32,
    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for SpoonacularConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            result_limit: default_result_limit(),
            timeout: default_timeout(),
        }
    }
}

impl SpoonacularConfig {
    /// Resolve the API key, config first and then the environment.
    ///
    /// Called on every request so a key exported after startup is picked up.
    /// Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        fn non_blank(key: &str) -> Option<String> {
            let key = key.trim();
            (!key.is_empty()).then(|| key.to_string())
        }

        self.api_key
            .as_deref()
            .and_then(non_blank)
            .or_else(|| std::env::var(API_KEY_ENV).ok().as_deref().and_then(non_blank))
    }
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_result_limit() -> u32 {
    12
}

fn default_timeout() -> u64 {
    30
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FRIDGEFINDS__ prefix
    /// 2. fridgefinds.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FRIDGEFINDS__SPOONACULAR__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`Settings::load`] for the layering rules.
pub fn load_config() -> Result<Settings, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("fridgefinds").required(false))
        // Use double underscore for nested: FRIDGEFINDS__SERVER__PORT
        .add_source(
            Environment::with_prefix("FRIDGEFINDS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
