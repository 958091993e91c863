//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use sea_orm::{DatabaseConnection, DbErr};
use tracing::warn;

use crate::errors::{ClicktallyError, Result};
use crate::storage::models::StorageConfig;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_group, model_to_user};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(ClicktallyError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 重试耗尽后的 DbErr 分类：连接失败 / 冲突（瞬态）/ 其他
pub(crate) fn map_db_err(operation: &str, e: DbErr) -> ClicktallyError {
    match &e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => ClicktallyError::database_connection(
            format!("{} 失败，数据库不可达: {}", operation, e),
        ),
        DbErr::Custom(msg) if msg.contains("timed out") => {
            ClicktallyError::database_conflict(format!("{} 超时，结果未知: {}", operation, e))
        }
        _ if retry::is_retryable_error(&e) => {
            ClicktallyError::database_conflict(format!("{} 冲突重试耗尽: {}", operation, e))
        }
        _ => ClicktallyError::database_operation(format!("{} 失败: {}", operation, e)),
    }
}

/// SeaORM-based counter store
#[derive(Clone)]
pub struct CounterStore {
    db: DatabaseConnection,
    backend_name: String,
    /// 重试配置
    retry_config: retry::RetryConfig,
    /// 单次写操作超时（毫秒）
    operation_timeout_ms: u64,
}

impl CounterStore {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(ClicktallyError::database_config(
                "DATABASE_URL 未设置".to_string(),
            ));
        }

        // 读取重试配置
        let config = crate::config::get_config();
        let retry_config = retry::RetryConfig {
            max_retries: config.database.retry_count,
            base_delay_ms: config.database.retry_base_delay_ms,
            max_delay_ms: config.database.retry_max_delay_ms,
        };
        let operation_timeout_ms = config.database.timeout * 1000;

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let store = CounterStore {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
            operation_timeout_ms,
        };

        // 运行迁移
        run_migrations(&store.db).await?;

        warn!("{} Storage initialized.", store.backend_name.to_uppercase());
        Ok(store)
    }

    pub fn get_backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: self.backend_name.clone(),
        }
    }

    /// 获取数据库连接（优雅关闭时使用）
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}
