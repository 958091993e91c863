//! Counter service
//!
//! Provides unified business logic for the click counter operations:
//! increment, lookup, group lookup, and get-or-create.

use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::{ClicktallyError, Result};
use crate::storage::{CounterStore, GroupRecord, UserRecord};

/// 一次计数操作的结果：用户行 + 其关联的分组行（可能无关联）
#[derive(Debug, Clone)]
pub struct ClickOutcome {
    pub user: UserRecord,
    pub group: Option<GroupRecord>,
}

/// Service for counter operations
///
/// 本身不持有可变状态，所有可变状态都在 store 中。
pub struct CounterService {
    store: Arc<CounterStore>,
}

impl CounterService {
    /// Create a new CounterService instance
    pub fn new(store: Arc<CounterStore>) -> Self {
        Self { store }
    }

    /// 自增：用户计数 +1，命名分组总计 +1，关联覆盖为该分组
    ///
    /// 每次调用恰好推进一个用户行和一个分组行，两者同事务提交。
    pub async fn increment(&self, user_id: &str, group_name: &str) -> Result<ClickOutcome> {
        let (user, group) = self.store.increment(user_id, group_name).await?;

        info!(
            "Click recorded: user '{}' -> {}, group '{}' -> {}",
            user.user_id, user.click_count, group.group_name, group.total_click_count
        );

        Ok(ClickOutcome {
            user,
            group: Some(group),
        })
    }

    /// 查询用户当前计数及其关联分组的总计；不存在返回 NotFound
    ///
    /// 无关联时分组报告为空（总计按 0 处理）。只读，不产生任何变更。
    pub async fn lookup(&self, user_id: &str) -> Result<ClickOutcome> {
        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| ClicktallyError::not_found("User not found"))?;

        let group = match user.group_name.as_deref() {
            Some(name) => self.store.find_group(name).await?,
            None => None,
        };

        debug!("Lookup user '{}': {} clicks", user.user_id, user.click_count);

        Ok(ClickOutcome { user, group })
    }

    /// 查询分组总计；不存在返回 NotFound。只读。
    pub async fn group_lookup(&self, group_name: &str) -> Result<GroupRecord> {
        self.store
            .find_group(group_name)
            .await?
            .ok_or_else(|| ClicktallyError::not_found("Group not found"))
    }

    /// 按需建档：用户/分组不存在则以 0 计数创建；幂等
    ///
    /// 与 increment 不同，已存在的用户不被修改——计数、关联、updated_at
    /// 都保持原值；返回的分组是用户实际关联的分组。
    pub async fn get_or_create(&self, user_id: &str, group_name: &str) -> Result<ClickOutcome> {
        let (user, group) = self.store.ensure(user_id, group_name).await?;

        debug!(
            "Ensure user '{}' (count {}), group association: {:?}",
            user.user_id, user.click_count, user.group_name
        );

        Ok(ClickOutcome { user, group })
    }
}
