//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default Cloudflare v4 API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Dashboard page where domains are registered by hand
pub const DEFAULT_DASHBOARD_URL: &str = "https://dash.cloudflare.com/?to=/:account/domains";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Cloudflare API configuration
    pub api: ApiConfig,
    /// External auth tool configuration
    pub auth: AuthConfig,
    /// Wizard configuration
    pub wizard: WizardConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Cloudflare API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// External auth tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Program used for the token fallback and identity lookup
    pub tool: String,
}

/// Wizard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Where the user registers a new domain
    pub dashboard_url: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance
    ///
    /// Credentials are not part of the settings; they are resolved lazily
    /// by [`CredentialResolver`](crate::auth::CredentialResolver).
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            api: ApiConfig {
                base_url: get_env_or_default("CF_API_BASE_URL", DEFAULT_API_BASE_URL),
                timeout: get_env_or_default("CF_REQUEST_TIMEOUT", "30")
                    .parse()
                    .context("Invalid timeout value")?,
            },
            auth: AuthConfig {
                tool: get_env_or_default("CF_AUTH_TOOL", "wrangler"),
            },
            wizard: WizardConfig {
                dashboard_url: get_env_or_default("CF_DASHBOARD_URL", DEFAULT_DASHBOARD_URL),
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "warn"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        // Validate URL format
        if !self.api.base_url.starts_with("http") {
            anyhow::bail!("Invalid API base URL format, should start with 'http'");
        }

        // Validate timeout values
        if self.api.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        if self.auth.tool.trim().is_empty() {
            anyhow::bail!("Auth tool cannot be empty");
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        // Validate log format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
