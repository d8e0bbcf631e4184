use std::sync::Arc;

use fabric_core::{Registrar, Repo};

#[derive(derive_more::Debug, Clone)]
pub struct AppState {
    #[debug("Arc<dyn Registrar>")]
    registrar: Arc<dyn Registrar>,
}

impl AppState {
    pub async fn load() -> n0_error::Result<Self> {
        let repo = Repo::open_or_create(Repo::default_location()?).await?;
        let config = repo.config().await?;
        let registrar = config.registrar()?;
        Ok(AppState { registrar })
    }

    pub fn registrar(&self) -> Arc<dyn Registrar> {
        self.registrar.clone()
    }
}
