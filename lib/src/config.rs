use std::{path::Path, sync::Arc, time::Duration};

use n0_error::{Result, StackResultExt, StdResultExt};
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::registrar::{HttpRegistrar, LogRegistrar, Registrar};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Base URL of the account service.
    ///
    /// If None, signups are only logged and no request is made.
    pub api_url: Option<Url>,

    /// Path of the account-creation endpoint, relative to `api_url`.
    pub register_path: String,

    /// Upper bound for a single account-creation request.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            register_path: Self::DEFAULT_REGISTER_PATH.to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    pub const API_URL_ENV: &str = "FABRIC_API_URL";
    const DEFAULT_REGISTER_PATH: &str = "/auth/register";

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = tokio::fs::read_to_string(path)
            .await
            .context("reading config file")?;
        let config = serde_yml::from_str(&config).std_context("parsing config file")?;
        Ok(config)
    }

    pub async fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_yml::to_string(self).anyerr()?;
        tokio::fs::write(path, data)
            .await
            .context("writing config file")?;
        Ok(())
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_api_url_override(std::env::var(Self::API_URL_ENV).ok())
    }

    fn with_api_url_override(mut self, value: Option<String>) -> Result<Self> {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            let url = Url::parse(value.trim()).std_context("parsing FABRIC_API_URL")?;
            self.api_url = Some(url);
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds the registrar signups are handed off to.
    pub fn registrar(&self) -> Result<Arc<dyn Registrar>> {
        match &self.api_url {
            Some(api_url) => {
                let registrar =
                    HttpRegistrar::new(api_url, &self.register_path, self.request_timeout())?;
                info!(endpoint = %registrar.endpoint(), "signups go to the account service");
                Ok(Arc::new(registrar))
            }
            None => {
                info!("no api_url configured, signups are only logged");
                Ok(Arc::new(LogRegistrar))
            }
        }
    }
}
