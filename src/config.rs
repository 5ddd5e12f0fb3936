use anyhow::{Context, Result};
use reqwest::Url;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://se-project-group-9.onrender.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub chat: ChatConfig,
    pub app: AppConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Always ends with `/` so relative joins keep the full base path.
    pub base_url: Url,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_key: Option<String>,
    pub channel_type: String,
    pub channel_prefix: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            channel_type: "messaging".to_string(),
            channel_prefix: "health_chat".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeout,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // API configuration
        let api_url = env::var("HEALTHSYNC_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let timeout_secs = env::var("HEALTHSYNC_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("Failed to parse HEALTHSYNC_API_TIMEOUT_SECS")?;
        let api = ApiConfig::new(&api_url, Duration::from_secs(timeout_secs))
            .context("Failed to parse HEALTHSYNC_API_URL")?;

        // Chat configuration
        let defaults = ChatConfig::default();
        let chat = ChatConfig {
            api_key: env::var("HEALTHSYNC_CHAT_API_KEY").ok(),
            channel_type: env::var("HEALTHSYNC_CHAT_CHANNEL_TYPE").unwrap_or(defaults.channel_type),
            channel_prefix: env::var("HEALTHSYNC_CHAT_CHANNEL_PREFIX")
                .unwrap_or(defaults.channel_prefix),
        };

        // App configuration
        let environment = env::var("APP_ENVIRONMENT")
            .ok()
            .and_then(|value| value.parse::<Environment>().ok())
            .unwrap_or_default();
        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "HealthSync".to_string());

        Ok(Config {
            api,
            chat,
            app: AppConfig {
                name: app_name,
                environment,
            },
        })
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "development" => Ok(Environment::Development),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    Url::parse(&with_slash).with_context(|| format!("Invalid base URL: {}", raw))
}

use once_cell::sync::OnceCell;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load the configuration once per process; later calls return the same
/// value. Library code takes its config explicitly; only the binary goes
/// through this global.
pub fn init() -> Result<&'static Config> {
    CONFIG.get_or_try_init(Config::from_env)
}
