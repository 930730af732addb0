//! Initialize a new site directory

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::CONFIG_FILE;

/// Write a default `_config.yml` and an empty static directory.
///
/// An existing configuration is left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config = SiteConfig::default();

    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join(&config.static_dir))?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        tracing::warn!("{:?} already exists, keeping it", config_path);
        return Ok(());
    }

    let yaml = format!("# folio site configuration\n{}", config.to_yaml()?);
    fs::write(&config_path, yaml)?;
    tracing::info!("Created {:?}", config_path);

    Ok(())
}
