use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum ClicktallyError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    DatabaseConflict(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
}

impl ClicktallyError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ClicktallyError::DatabaseConfig(_) => "E001",
            ClicktallyError::DatabaseConnection(_) => "E002",
            ClicktallyError::DatabaseOperation(_) => "E003",
            ClicktallyError::DatabaseConflict(_) => "E004",
            ClicktallyError::FileOperation(_) => "E005",
            ClicktallyError::Validation(_) => "E006",
            ClicktallyError::NotFound(_) => "E007",
            ClicktallyError::Serialization(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ClicktallyError::DatabaseConfig(_) => "Database Configuration Error",
            ClicktallyError::DatabaseConnection(_) => "Database Connection Error",
            ClicktallyError::DatabaseOperation(_) => "Database Operation Error",
            ClicktallyError::DatabaseConflict(_) => "Database Conflict",
            ClicktallyError::FileOperation(_) => "File Operation Error",
            ClicktallyError::Validation(_) => "Validation Error",
            ClicktallyError::NotFound(_) => "Resource Not Found",
            ClicktallyError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ClicktallyError::DatabaseConfig(msg) => msg,
            ClicktallyError::DatabaseConnection(msg) => msg,
            ClicktallyError::DatabaseOperation(msg) => msg,
            ClicktallyError::DatabaseConflict(msg) => msg,
            ClicktallyError::FileOperation(msg) => msg,
            ClicktallyError::Validation(msg) => msg,
            ClicktallyError::NotFound(msg) => msg,
            ClicktallyError::Serialization(msg) => msg,
        }
    }

    /// 映射为 HTTP 状态码
    ///
    /// NotFound → 404，Validation → 400，
    /// 冲突重试耗尽 / 连接失败（瞬态错误）→ 503，其余 → 500
    pub fn http_status(&self) -> StatusCode {
        match self {
            ClicktallyError::NotFound(_) => StatusCode::NOT_FOUND,
            ClicktallyError::Validation(_) => StatusCode::BAD_REQUEST,
            ClicktallyError::DatabaseConflict(_) | ClicktallyError::DatabaseConnection(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ClicktallyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClicktallyError {}

// 便捷的构造函数
impl ClicktallyError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ClicktallyError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ClicktallyError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ClicktallyError::DatabaseOperation(msg.into())
    }

    pub fn database_conflict<T: Into<String>>(msg: T) -> Self {
        ClicktallyError::DatabaseConflict(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ClicktallyError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ClicktallyError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ClicktallyError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ClicktallyError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ClicktallyError {
    fn from(err: sea_orm::DbErr) -> Self {
        ClicktallyError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ClicktallyError {
    fn from(err: std::io::Error) -> Self {
        ClicktallyError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ClicktallyError {
    fn from(err: serde_json::Error) -> Self {
        ClicktallyError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClicktallyError>;
