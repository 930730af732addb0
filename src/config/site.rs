//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,
    pub static_dir: String,

    // Contact
    pub email: String,
    pub calendly_url: String,
    pub cv_file: String,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    #[serde(default)]
    pub contact: ContactConfig,

    // Feed
    pub feed_limit: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Isaac Hasbani".to_string(),
            tagline: "Analytics • Product Strategy • AI".to_string(),
            description: "Portfolio, projects and writing of Isaac Hasbani".to_string(),
            author: "Isaac Hasbani".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            email: "isaachasbani@gmail.com".to_string(),
            calendly_url: "https://calendly.com/isaachasbani".to_string(),
            cv_file: "/isaac-hasbani-cv.pdf".to_string(),
            social: vec![
                SocialLink::new(
                    "LinkedIn",
                    "https://linkedin.com/in/isaachasbani",
                    "@isaachasbani",
                ),
                SocialLink::new("GitHub", "https://github.com/Isaac-2002", "@Isaac-2002"),
                SocialLink::new(
                    "Twitter",
                    "https://twitter.com/isaachasbani",
                    "@isaachasbani",
                ),
            ],
            contact: ContactConfig::default(),

            feed_limit: 20,
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

    /// Serialize to YAML, as written by `folio init`
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// An outbound profile link shown in the footer and on the contact page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub handle: String,
}

impl SocialLink {
    pub fn new(label: &str, url: &str, handle: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
            handle: handle.to_string(),
        }
    }
}

/// Contact form settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// How long a simulated submission waits before reporting success
    pub submit_delay_ms: u64,
}

impl ContactConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1000,
        }
    }
}
