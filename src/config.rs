use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "MediSafe";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default text-generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default endpoint base for the Generative Language API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Default bind address for the local dashboard API.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Connect timeout for the outbound client. Requests themselves are not time-limited.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// API key variables, in lookup order. `VITE_API_KEY` keeps old `.env` files working.
const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "VITE_API_KEY"];

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "medisafe_lib=info,medisafe=info,tower_http=warn"
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing API key: set GEMINI_API_KEY")]
    MissingApiKey,

    #[error("Invalid bind address '{value}': {reason}")]
    InvalidAddr { value: String, reason: String },
}

/// Settings for the outbound text-generation exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

impl ExchangeConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = API_KEY_VARS
            .iter()
            .filter_map(|var| lookup(var))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let model = non_blank(lookup("MEDISAFE_MODEL")).unwrap_or_else(|| DEFAULT_MODEL.into());
        let api_base = non_blank(lookup("MEDISAFE_API_BASE"))
            .unwrap_or_else(|| DEFAULT_API_BASE.into())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key,
            model,
            api_base,
        })
    }

    /// Full `generateContent` URL, without the key query parameter.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

/// Settings for the local HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = non_blank(lookup("MEDISAFE_ADDR")).unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = value.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidAddr {
                value: value.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { bind_addr })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
