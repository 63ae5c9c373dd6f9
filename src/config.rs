//! Centralized configuration management for useradmin

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context};

pub const DEFAULT_API_URL: &str = "https://tony-auth-express-vdee.vercel.app";
pub const DEFAULT_PAGE_LIMIT: u32 = 1000;
pub const DEFAULT_PASSWORD: &str = "123456";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the user API (without the `/api/user` suffix)
    pub api_url: String,
    /// Page size requested by the initial load
    pub page_limit: u32,
    /// Password sent with every signup request
    pub default_password: String,
    /// Log file written by the TUI and CLI
    pub log_file: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            default_password: DEFAULT_PASSWORD.to_string(),
            log_file: PathBuf::from("useradmin.log"),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("USERADMIN_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let default_password = std::env::var("USERADMIN_DEFAULT_PASSWORD")
            .unwrap_or_else(|_| DEFAULT_PASSWORD.to_string());

        let log_file = std::env::var("USERADMIN_LOG_FILE")
            .unwrap_or_else(|_| "useradmin.log".to_string())
            .into();

        let http = HttpConfig {
            timeout_seconds: parse_env_var("USERADMIN_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("USERADMIN_USER_AGENT")
                .unwrap_or_else(|_| default_user_agent()),
        };

        Ok(Config {
            api_url,
            page_limit: parse_env_var("USERADMIN_PAGE_LIMIT")?.unwrap_or(DEFAULT_PAGE_LIMIT),
            default_password,
            log_file,
            http,
        })
    }

    /// Override the API base URL (e.g. from a CLI flag)
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self
    }

    /// API base URL with any trailing slash removed
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let base = self.api_base();
        if base.is_empty() {
            return Err(anyhow::anyhow!("API URL cannot be empty"));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "API URL must start with http:// or https://: {}",
                self.api_url
            ));
        }

        if self.page_limit == 0 {
            return Err(anyhow::anyhow!("Page limit must be greater than zero"));
        }

        if let Some(parent) = self.log_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(anyhow::anyhow!(
                    "Log directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        Ok(())
    }
}

fn default_user_agent() -> String {
    format!("useradmin/{}", env!("CARGO_PKG_VERSION"))
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
