use std::path::{Path, PathBuf};

use n0_error::{Result, StackResultExt};
use tracing::{info, warn};

use crate::config::Config;

// Repo builds up a series of file path conventions from a root directory path.
#[derive(Debug, Clone)]
pub struct Repo(PathBuf);

impl Repo {
    const CONFIG_FILE: &str = "config.yml";
    const LOG_DIR: &str = "logs";

    pub fn default_location() -> Result<PathBuf> {
        let base = dirs_next::config_dir()
            .ok_or_else(|| n0_error::anyerr!("no config directory for this platform"))?;
        Ok(base.join("fabric_stack"))
    }

    /// Opens or creates a repo at the given base directory.
    pub async fn open_or_create(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        tokio::fs::create_dir_all(&base_dir)
            .await
            .context("creating repo directory")?;
        info!("opening repo at {}", base_dir.display());
        Ok(Self(base_dir))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Log directory of a repo rooted at `base_dir`, usable before the repo is opened.
    pub fn log_dir_in(base_dir: &Path) -> PathBuf {
        base_dir.join(Self::LOG_DIR)
    }

    /// Reads the config file, writing the defaults first if there is none.
    /// Environment overrides are applied on top.
    pub async fn config(&self) -> Result<Config> {
        let config_file_path = self.0.join(Self::CONFIG_FILE);
        let config = if !config_file_path.exists() {
            warn!("config file does not exist. writing defaults");
            let cfg = Config::default();
            cfg.write(&config_file_path).await?;
            cfg
        } else {
            Config::from_file(&config_file_path).await?
        };
        config.with_env_overrides()
    }
}
