use crate::storage::models::{GroupRecord, UserRecord};
use migration::entities::{group, user};

/// 将 Sea-ORM Model 转换为 UserRecord
pub fn model_to_user(model: user::Model) -> UserRecord {
    UserRecord {
        user_id: model.user_id,
        click_count: model.click_count.max(0) as u64,
        updated_at: model.updated_at,
        group_name: model.group_name,
    }
}

/// 将 Sea-ORM Model 转换为 GroupRecord
pub fn model_to_group(model: group::Model) -> GroupRecord {
    GroupRecord {
        group_name: model.group_name,
        total_click_count: model.total_click_count.max(0) as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_model_to_user_basic() {
        let now = Utc::now();
        let model = user::Model {
            user_id: "alice".to_string(),
            click_count: 7,
            updated_at: now,
            group_name: Some("blue".to_string()),
        };

        let record = model_to_user(model);

        assert_eq!(record.user_id, "alice");
        assert_eq!(record.click_count, 7);
        assert_eq!(record.updated_at, now);
        assert_eq!(record.group_name.as_deref(), Some("blue"));
    }

    #[test]
    fn test_model_to_user_without_group() {
        let model = user::Model {
            user_id: "bob".to_string(),
            click_count: 0,
            updated_at: Utc::now(),
            group_name: None,
        };

        let record = model_to_user(model);

        assert!(record.group_name.is_none());
        assert_eq!(record.click_count, 0);
    }

    #[test]
    fn test_model_to_user_negative_count_clamped() {
        let model = user::Model {
            user_id: "weird".to_string(),
            click_count: -5, // 负数应该被转换为 0
            updated_at: Utc::now(),
            group_name: None,
        };

        assert_eq!(model_to_user(model).click_count, 0);
    }

    #[test]
    fn test_model_to_group_basic() {
        let model = group::Model {
            group_name: "blue".to_string(),
            total_click_count: 42,
        };

        let record = model_to_group(model);

        assert_eq!(record.group_name, "blue");
        assert_eq!(record.total_click_count, 42);
    }

    #[test]
    fn test_model_to_group_negative_count_clamped() {
        let model = group::Model {
            group_name: "red".to_string(),
            total_click_count: -1,
        };

        assert_eq!(model_to_group(model).total_click_count, 0);
    }
}
