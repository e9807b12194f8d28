use anyhow::{anyhow, Context, Result};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use super::locale::Locale;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_CONFIG_FILE: &str = "strategy-ctl.toml";
pub const ENV_PREFIX: &str = "STRATEGY_CTL";

/// Name of the backend's session cookie.
pub const SESSION_COOKIE_NAME: &str = "user-session";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
    /// Page re-requested after a successful action
    pub page_path: String,
    pub locale: Locale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_cookie: None,
            page_path: "/".to_string(),
            locale: Locale::default(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Load defaults, then the TOML file at `path` if it exists, then
    /// `STRATEGY_CTL_*` environment variables.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if dotenvy::dotenv().is_ok() {
            debug!("Loaded environment from .env");
        }

        let file = path
            .to_str()
            .ok_or_else(|| anyhow!("config path is not valid UTF-8: {}", path.display()))?;

        let config: ClientConfig = Config::builder()
            .add_source(File::new(file, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("failed to read configuration from {}", file))?
            .try_deserialize()
            .context("invalid configuration")?;

        info!("Configuration loaded (backend: {}, locale: {})", config.base_url, config.locale);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            errors.push(format!("base_url must be an http(s) URL, got '{}'", self.base_url));
        }
        if !self.page_path.starts_with('/') {
            errors.push(format!("page_path must start with '/', got '{}'", self.page_path));
        }
        if self.request_timeout_secs == Some(0) {
            errors.push("request_timeout_secs must be > 0".to_string());
        }
        if matches!(&self.session_cookie, Some(cookie) if cookie.trim().is_empty()) {
            errors.push("session_cookie must not be blank".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Render the config as TOML, for `init-config`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize configuration")
    }
}
