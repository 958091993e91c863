use std::sync::Arc;

use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::CounterStore;
pub use models::{GroupRecord, StorageConfig, UserRecord};

pub struct StoreFactory;

impl StoreFactory {
    pub async fn create() -> Result<Arc<CounterStore>> {
        let config = crate::config::get_config();
        let database_url = &config.database.database_url;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let store = backend::CounterStore::new(database_url, &backend_type).await?;
        Ok(Arc::new(store))
    }
}
