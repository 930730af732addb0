//! folio: a single-person portfolio site
//!
//! The site (home, about, projects, blog, CV and contact pages) is built
//! from content compiled into the binary and an optional `_config.yml`. It
//! can be written out as static HTML or served by a local server that also
//! handles the contact form.

pub mod commands;
pub mod config;
pub mod contact;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod pages;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the configuration file in the site directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The main application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Static content
    pub content: content::Content,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// User assets copied verbatim (CV PDF, images)
    pub static_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Self::with_config(base_dir, config)
    }

    /// Create an instance with an explicit configuration.
    ///
    /// The static and public directories must not contain each other:
    /// generation copies one into the other and `clean` removes the public one.
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let public_dir = lexical_path(&base_dir.join(&config.public_dir));
        let static_dir = lexical_path(&base_dir.join(&config.static_dir));

        if static_dir.starts_with(&public_dir) || public_dir.starts_with(&static_dir) {
            anyhow::bail!(
                "static_dir {:?} and public_dir {:?} must not overlap",
                config.static_dir,
                config.public_dir
            );
        }

        let content = content::Content::builtin()?;

        Ok(Self {
            config,
            content,
            public_dir,
            static_dir,
        })
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

/// Drop `.` segments so equal directories compare equal
fn lexical_path(path: &Path) -> PathBuf {
    path.components().collect()
}
