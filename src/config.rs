//! Application configuration, read from `signbridge.toml`.

use alloc::string::{String, ToString};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, router::MatchOrder};

const BUNDLED: &str = include_str!("../signbridge.toml");

/// Start-up settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Id of the host element.
    pub host_id: String,
    /// Path prefix the application is served under.
    pub base: String,
    /// How the route table picks between matching entries.
    pub match_order: MatchOrder,
    /// Base URL of the translation backend.
    pub backend_url: String,
    /// Default log filter, overridden by `RUST_LOG`.
    pub log_level: String,
    /// Heading shown above every page.
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host_id: "app".to_string(),
            base: "/".to_string(),
            match_order: MatchOrder::Declaration,
            backend_url: "http://localhost:3000".to_string(),
            log_level: "info".to_string(),
            title: "Sign Language Translator".to_string(),
        }
    }
}

impl Config {
    /// The configuration shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file is invalid.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_toml(BUNDLED)
    }

    /// Parses and validates a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] for malformed input or unknown keys, and a
    /// validation error for an empty host id or a relative base path.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants `from_toml` enforces.
    ///
    /// # Errors
    ///
    /// See [`Config::from_toml`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host_id.trim().is_empty() {
            return Err(ConfigError::EmptyHostId);
        }
        if !self.base.starts_with('/') {
            return Err(ConfigError::InvalidBase(self.base.clone()));
        }
        Ok(())
    }

    /// The backend endpoint at `path`, joined without doubled slashes.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let mut url = self.backend_url.trim_end_matches('/').to_string();
        url.push('/');
        url.push_str(path.trim_start_matches('/'));
        url
    }
}
