use serde::{Deserialize, Serialize};

/// 用户计数记录
///
/// `group_name` 是对 Group 的弱引用（可为空、可重新指向），
/// 解析关联时通过显式查询 groups 表完成。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: String,
    pub click_count: u64,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub group_name: Option<String>,
}

/// 分组聚合计数记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRecord {
    pub group_name: String,
    pub total_click_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}
