//! spacetraveling: a statically generated blog over the Prismic CMS
//!
//! Posts are fetched from a Prismic repository, projected into display
//! shapes (formatted dates, canonical UIDs, ordered content sections) and
//! rendered with embedded Tera templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod prismic;
pub mod server;
pub mod templates;

pub use error::{ContentError, Error};

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The blog being built
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    ///
    /// Reads `_config.yml` when present, then applies the
    /// `PRISMIC_API_ENDPOINT` / `PRISMIC_ACCESS_TOKEN` overrides.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            public_dir,
        }
    }

    /// Client for the configured Prismic repository
    pub fn client(&self) -> Result<prismic::PrismicClient> {
        self.config.validate()?;
        Ok(prismic::PrismicClient::from_config(&self.config)?)
    }

    /// Generator backed by the configured Prismic repository
    pub fn generator(&self) -> Result<generator::Generator<prismic::PrismicClient>> {
        generator::Generator::new(self, self.client()?)
    }

    /// Generate the listing page
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
