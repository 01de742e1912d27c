use std::sync::Arc;

use quill_db::storage::{Storage, mongodb::MongoDbStorage};

use crate::{auth::signing::SessionSigner, config::QuillApiConfig};

#[derive(Clone)]
pub struct ApiContext {
    pub config: QuillApiConfig,
    pub db: Arc<dyn Storage>,
    pub signer: Arc<SessionSigner>,
}

impl ApiContext {
    pub async fn new(config: QuillApiConfig) -> anyhow::Result<Self> {
        let secret = config.get_session_secret()?;
        let db = MongoDbStorage::new(&config.mongodb_uri).await?;

        Ok(Self {
            config,
            db: Arc::new(db),
            signer: Arc::new(SessionSigner::new(secret)),
        })
    }
}
