//! Site configuration (_config.yml)

use anyhow::{anyhow, bail, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::helpers::DateLocale;

/// Environment variable overriding `api_endpoint`
pub const ENDPOINT_ENV: &str = "PRISMIC_API_ENDPOINT";
/// Environment variable overriding `access_token`
pub const ACCESS_TOKEN_ENV: &str = "PRISMIC_ACCESS_TOKEN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,
    pub timezone: String,

    // Prismic
    pub api_endpoint: String,
    pub access_token: Option<String>,
    pub document_type: String,
    pub timeout_secs: u64,

    // Directory
    pub public_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling".to_string(),
            language: "pt-BR".to_string(),
            timezone: "UTC".to_string(),

            api_endpoint: String::new(),
            access_token: None,
            document_type: "posts".to_string(),
            timeout_secs: 30,

            public_dir: "public".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `PRISMIC_API_ENDPOINT` / `PRISMIC_ACCESS_TOKEN` overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENDPOINT_ENV).ok(),
            std::env::var(ACCESS_TOKEN_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, endpoint: Option<String>, token: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            tracing::debug!("Using API endpoint from {}", ENDPOINT_ENV);
            self.api_endpoint = endpoint;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.access_token = Some(token);
        }
    }

    /// Check the fields that can't be checked by deserialization alone
    pub fn validate(&self) -> Result<()> {
        if self.api_endpoint.trim().is_empty() {
            bail!(
                "Prismic API endpoint is not configured (set `api_endpoint` or {})",
                ENDPOINT_ENV
            );
        }
        if self.document_type.trim().is_empty() {
            bail!("`document_type` must not be empty");
        }
        self.date_locale()?;
        self.tz()?;
        Ok(())
    }

    /// Locale used to format publication dates
    pub fn date_locale(&self) -> Result<&'static DateLocale> {
        DateLocale::for_language(&self.language)
            .ok_or_else(|| anyhow!("Unsupported language for dates: {}", self.language))
    }

    /// Time zone publication dates are displayed in
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("Invalid timezone {:?}: {}", self.timezone, e))
    }

    /// HTTP timeout for calls to the CMS
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
