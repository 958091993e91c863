use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::services::CounterService;
use crate::storage::{CounterStore, StoreFactory};

pub struct StartupContext {
    pub store: Arc<CounterStore>,
    pub counter_service: Arc<CounterService>,
}

/// 准备服务器启动的上下文
/// 包括存储连接、迁移和服务构建
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|e| anyhow::anyhow!("Failed to install rustls crypto provider: {:?}", e))?;

    // 启动失败直接打到 stderr（此时日志可能还没就绪）
    let store = StoreFactory::create()
        .await
        .map_err(|e| {
            eprintln!("{}", e.format_colored());
            e
        })
        .context("Failed to create counter store")?;
    info!(
        "Using storage backend: {}",
        store.get_backend_config().storage_type
    );

    let counter_service = Arc::new(CounterService::new(store.clone()));

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        store,
        counter_service,
    })
}
