//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and handed to the
//! middleware constructors. Nothing reads the environment after that.
//!
//! ```bash
//! export RECEPTOR_USERNAME="user"
//! export RECEPTOR_PASSWORD="pass"
//! export CORS_ENABLED="true"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8887`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `RECEPTOR_USERNAME` / `RECEPTOR_PASSWORD` - Basic auth credentials;
//!   authentication is disabled when the username is empty or unset
//! - `AUTH_COOKIE_NAME` - Cookie bridged into `Authorization`
//!   (default: `receptor_authorization`)
//! - `CORS_ENABLED` - Enable CORS handling (default: `false`)

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_COOKIE_NAME: &str = "receptor_authorization";

/// Expected Basic auth credentials.
#[derive(Clone)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Settings of the middleware chain.
#[derive(Debug, Clone)]
pub struct GateSettings {
    /// `None` disables both Basic auth and cookie bridging.
    pub credentials: Option<BasicCredentials>,
    pub cookie_name: String,
    pub cors_enabled: bool,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            credentials: None,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cors_enabled: false,
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub gate: GateSettings,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a username is configured without a password.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8887".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let credentials =
            Self::load_credentials().context("Failed to load authentication configuration")?;

        let cookie_name =
            env::var("AUTH_COOKIE_NAME").unwrap_or_else(|_| DEFAULT_COOKIE_NAME.to_string());

        let cors_enabled = env::var("CORS_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            gate: GateSettings {
                credentials,
                cookie_name,
                cors_enabled,
            },
        })
    }

    /// Loads the Basic auth pair.
    ///
    /// An empty or missing `RECEPTOR_USERNAME` disables authentication.
    fn load_credentials() -> Result<Option<BasicCredentials>> {
        let username = env::var("RECEPTOR_USERNAME").unwrap_or_default();
        if username.is_empty() {
            return Ok(None);
        }

        let password = env::var("RECEPTOR_PASSWORD")
            .context("RECEPTOR_PASSWORD must be set when RECEPTOR_USERNAME is provided")?;

        Ok(Some(BasicCredentials { username, password }))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - the Basic auth username contains `:`
    /// - the cookie name is not a valid cookie token
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref credentials) = self.gate.credentials
            && credentials.username.contains(':')
        {
            anyhow::bail!("RECEPTOR_USERNAME must not contain ':'");
        }

        if !is_cookie_token(&self.gate.cookie_name) {
            anyhow::bail!(
                "AUTH_COOKIE_NAME must be a non-empty cookie token, got '{}'",
                self.gate.cookie_name
            );
        }

        Ok(())
    }

    /// Returns whether Basic authentication is enabled.
    pub fn is_auth_enabled(&self) -> bool {
        self.gate.credentials.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        if self.is_auth_enabled() {
            tracing::info!("  Basic auth: enabled");
            tracing::info!("  Auth cookie: {}", self.gate.cookie_name);
        } else {
            tracing::info!("  Basic auth: disabled");
        }

        tracing::info!(
            "  CORS: {}",
            if self.gate.cors_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// RFC 6265 cookie-name token: visible ASCII without separators.
fn is_cookie_token(name: &str) -> bool {
    const SEPARATORS: &[u8] = b"()<>@,;:\\\"/[]?={} \t";

    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_graphic() && !SEPARATORS.contains(&b))
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
