//! Mutation operations for CounterStore
//!
//! 每个写路径都是一个事务：计数通过相对自增的 upsert
//! （`ON CONFLICT .. SET count = count + 1`）完成，任何隔离级别下
//! 并发自增都不会丢失更新；事务内回读，响应反映本次调用后的值。

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, ExprTrait, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use tracing::debug;

use super::{CounterStore, map_db_err, retry};
use crate::errors::Result;
use crate::storage::models::{GroupRecord, UserRecord};

use super::converters::{model_to_group, model_to_user};
use migration::entities::{group, user};

impl CounterStore {
    /// 自增：用户计数 +1，命名分组总计 +1，关联覆盖为该分组
    ///
    /// 两行更新在同一事务内提交，要么都生效要么都不生效。
    pub async fn increment(&self, user_id: &str, group_name: &str) -> Result<(UserRecord, GroupRecord)> {
        let db = &self.db;

        let (user_model, group_model) = retry::with_retry_timeout(
            &format!("increment({})", user_id),
            self.retry_config,
            self.operation_timeout_ms,
            || async { increment_txn(db, user_id, group_name).await },
        )
        .await
        .map_err(|e| map_db_err("increment", e))?;

        debug!(
            "Incremented user '{}' to {}, group '{}' to {}",
            user_model.user_id,
            user_model.click_count,
            group_model.group_name,
            group_model.total_click_count
        );

        Ok((model_to_user(user_model), model_to_group(group_model)))
    }

    /// 按需建档：用户和分组不存在则以 0 计数创建，已存在的行不做任何修改
    ///
    /// 幂等；返回的分组是用户实际关联的分组（可能不是本次命名的）。
    pub async fn ensure(
        &self,
        user_id: &str,
        group_name: &str,
    ) -> Result<(UserRecord, Option<GroupRecord>)> {
        let db = &self.db;

        let (user_model, group_model) = retry::with_retry_timeout(
            &format!("ensure({})", user_id),
            self.retry_config,
            self.operation_timeout_ms,
            || async { ensure_txn(db, user_id, group_name).await },
        )
        .await
        .map_err(|e| map_db_err("ensure", e))?;

        Ok((model_to_user(user_model), group_model.map(model_to_group)))
    }
}

/// 单事务执行一次自增：两个相对 upsert + 回读
async fn increment_txn(
    db: &DatabaseConnection,
    user_id: &str,
    group_name: &str,
) -> std::result::Result<(user::Model, group::Model), DbErr> {
    let txn = db.begin().await?;
    let now = Utc::now();

    // 分组：不存在则以 1 建档，存在则 total = total + 1
    group::Entity::insert(group::ActiveModel {
        group_name: Set(group_name.to_string()),
        total_click_count: Set(1),
    })
    .on_conflict(
        OnConflict::column(group::Column::GroupName)
            .value(
                group::Column::TotalClickCount,
                Expr::col(group::Column::TotalClickCount).add(1),
            )
            .to_owned(),
    )
    .exec_without_returning(&txn)
    .await?;

    // 用户：不存在则以 1 建档并关联分组；存在则 count = count + 1，
    // 关联无条件覆盖为本次命名的分组
    user::Entity::insert(user::ActiveModel {
        user_id: Set(user_id.to_string()),
        click_count: Set(1),
        updated_at: Set(now),
        group_name: Set(Some(group_name.to_string())),
    })
    .on_conflict(
        OnConflict::column(user::Column::UserId)
            .value(
                user::Column::ClickCount,
                Expr::col(user::Column::ClickCount).add(1),
            )
            .update_columns([user::Column::GroupName, user::Column::UpdatedAt])
            .to_owned(),
    )
    .exec_without_returning(&txn)
    .await?;

    // 同一事务内回读两行
    let user_model = user::Entity::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| DbErr::Custom(format!("user row missing after upsert: {}", user_id)))?;
    let group_model = group::Entity::find_by_id(group_name)
        .one(&txn)
        .await?
        .ok_or_else(|| DbErr::Custom(format!("group row missing after upsert: {}", group_name)))?;

    txn.commit().await?;
    Ok((user_model, group_model))
}

/// 单事务执行一次按需建档：两个 insert-if-absent + 回读
async fn ensure_txn(
    db: &DatabaseConnection,
    user_id: &str,
    group_name: &str,
) -> std::result::Result<(user::Model, Option<group::Model>), DbErr> {
    let txn = db.begin().await?;

    // 分组：不存在则建空档（total = 0），已存在保持不变
    group::Entity::insert(group::ActiveModel {
        group_name: Set(group_name.to_string()),
        total_click_count: Set(0),
    })
    .on_conflict(
        OnConflict::column(group::Column::GroupName)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(&txn)
    .await?;

    // 用户：不存在则以 0 建档并关联分组；已存在的行不做任何修改
    // （计数、关联、updated_at 都保持原值）
    user::Entity::insert(user::ActiveModel {
        user_id: Set(user_id.to_string()),
        click_count: Set(0),
        updated_at: Set(Utc::now()),
        group_name: Set(Some(group_name.to_string())),
    })
    .on_conflict(
        OnConflict::column(user::Column::UserId)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(&txn)
    .await?;

    let user_model = user::Entity::find_by_id(user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| DbErr::Custom(format!("user row missing after upsert: {}", user_id)))?;

    // 报告用户实际关联的分组
    let group_model = match user_model.group_name.as_deref() {
        Some(name) => group::Entity::find_by_id(name).one(&txn).await?,
        None => None,
    };

    txn.commit().await?;
    Ok((user_model, group_model))
}
