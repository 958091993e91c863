//! Click API 类型定义

use serde::{Deserialize, Serialize};

use crate::services::ClickOutcome;

/// `POST /api/click/{user_id}` 请求体
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ClickRequest {
    pub group_name: String,
}

/// `POST /api/user` 请求体
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RegisterUserRequest {
    pub user_id: String,
    pub group_name: String,
}

/// 用户计数响应（点击 / 查询 / 建档共用）
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ClickResponse {
    pub user_id: String,
    pub click_count: u64,
    /// RFC 3339 格式
    pub updated_at: Option<String>,
    pub group_name: Option<String>,
    pub group_total_click_count: u64,
}

impl From<ClickOutcome> for ClickResponse {
    fn from(outcome: ClickOutcome) -> Self {
        let group_total_click_count = outcome
            .group
            .as_ref()
            .map(|g| g.total_click_count)
            .unwrap_or(0);

        ClickResponse {
            user_id: outcome.user.user_id,
            click_count: outcome.user.click_count,
            updated_at: Some(outcome.user.updated_at.to_rfc3339()),
            group_name: outcome.user.group_name,
            group_total_click_count,
        }
    }
}

/// 分组总计响应
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GroupClickResponse {
    pub group_name: String,
    pub total_click_count: u64,
}

/// 错误响应体，固定 `{"detail": "..."}` 形状
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorDetail {
    pub detail: String,
}
