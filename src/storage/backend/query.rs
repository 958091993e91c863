//! Query operations for CounterStore
//!
//! This module contains all read-only database operations.

use sea_orm::{EntityTrait, PaginatorTrait};
use tracing::error;

use super::converters::{model_to_group, model_to_user};
use super::{CounterStore, map_db_err, retry};
use crate::errors::Result;
use crate::storage::models::{GroupRecord, UserRecord};

use migration::entities::{group, user};

impl CounterStore {
    /// 按 user_id 精确查找用户（不存在返回 None）
    pub async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>> {
        let db = &self.db;
        let id = user_id.to_string();

        let result = retry::with_retry(
            &format!("find_user({})", user_id),
            self.retry_config,
            || async { user::Entity::find_by_id(&id).one(db).await },
        )
        .await;

        match result {
            Ok(model) => Ok(model.map(model_to_user)),
            Err(e) => {
                error!("查询用户失败（重试后仍失败）: {}", e);
                Err(map_db_err("find_user", e))
            }
        }
    }

    /// 按 group_name 精确查找分组（不存在返回 None）
    pub async fn find_group(&self, group_name: &str) -> Result<Option<GroupRecord>> {
        let db = &self.db;
        let name = group_name.to_string();

        let result = retry::with_retry(
            &format!("find_group({})", group_name),
            self.retry_config,
            || async { group::Entity::find_by_id(&name).one(db).await },
        )
        .await;

        match result {
            Ok(model) => Ok(model.map(model_to_group)),
            Err(e) => {
                error!("查询分组失败（重试后仍失败）: {}", e);
                Err(map_db_err("find_group", e))
            }
        }
    }

    /// 用户总数（健康检查用）
    pub async fn count_users(&self) -> Result<u64> {
        let db = &self.db;

        retry::with_retry("count_users", self.retry_config, || async {
            user::Entity::find().count(db).await
        })
        .await
        .map_err(|e| map_db_err("count_users", e))
    }
}
