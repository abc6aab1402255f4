//! Client configuration for the Tmap APIs.

use std::time::Duration;

use crate::{Error, Result};

/// Public Tmap API host.
pub const DEFAULT_BASE_URL: &str = "https://apis.openapi.sk.com";

/// Applied to every outbound request; a timeout surfaces as a service error.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Credentials and endpoints for one [`TmapClient`](crate::TmapClient).
///
/// The app key is opaque; it is only ever forwarded to the service.
#[derive(Debug, Clone, PartialEq)]
pub struct TmapConfig {
    pub app_key: String,
    /// Scheme and host, no trailing slash. Overridable for proxies and tests.
    pub base_url: String,
    pub timeout: Duration,
}

impl TmapConfig {
    pub fn new(app_key: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `TMAP_APP_KEY` (required), `TMAP_BASE_URL` and `TMAP_TIMEOUT_SECS`.
    ///
    /// Binaries that keep these in a `.env` file should load it (e.g. with
    /// `dotenvy`) before calling this.
    pub fn from_env() -> Result<Self> {
        let app_key = std::env::var("TMAP_APP_KEY")
            .map_err(|_| Error::MissingConfig("TMAP_APP_KEY"))?;
        let mut config = Self::new(app_key);

        if let Ok(base_url) = std::env::var("TMAP_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let Ok(secs) = std::env::var("TMAP_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| Error::InvalidConfig { key: "TMAP_TIMEOUT_SECS", value: secs })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
