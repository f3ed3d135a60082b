use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum SmartlinkError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Conflict(String),
    Serialization(String),
    DateParse(String),
    WizardStepInvalid(String),
    DraftNotFound(String),
    ExternalApi(String),
}

impl SmartlinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            SmartlinkError::DatabaseConfig(_) => "E001",
            SmartlinkError::DatabaseConnection(_) => "E002",
            SmartlinkError::DatabaseOperation(_) => "E003",
            SmartlinkError::FileOperation(_) => "E004",
            SmartlinkError::Validation(_) => "E005",
            SmartlinkError::NotFound(_) => "E006",
            SmartlinkError::Conflict(_) => "E007",
            SmartlinkError::Serialization(_) => "E008",
            SmartlinkError::DateParse(_) => "E009",
            SmartlinkError::WizardStepInvalid(_) => "E010",
            SmartlinkError::DraftNotFound(_) => "E011",
            SmartlinkError::ExternalApi(_) => "E012",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            SmartlinkError::DatabaseConfig(_) => "Database Configuration Error",
            SmartlinkError::DatabaseConnection(_) => "Database Connection Error",
            SmartlinkError::DatabaseOperation(_) => "Database Operation Error",
            SmartlinkError::FileOperation(_) => "File Operation Error",
            SmartlinkError::Validation(_) => "Validation Error",
            SmartlinkError::NotFound(_) => "Resource Not Found",
            SmartlinkError::Conflict(_) => "Resource Conflict",
            SmartlinkError::Serialization(_) => "Serialization Error",
            SmartlinkError::DateParse(_) => "Date Parse Error",
            SmartlinkError::WizardStepInvalid(_) => "Wizard Step Invalid",
            SmartlinkError::DraftNotFound(_) => "Draft Not Found",
            SmartlinkError::ExternalApi(_) => "External API Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            SmartlinkError::DatabaseConfig(msg)
            | SmartlinkError::DatabaseConnection(msg)
            | SmartlinkError::DatabaseOperation(msg)
            | SmartlinkError::FileOperation(msg)
            | SmartlinkError::Validation(msg)
            | SmartlinkError::NotFound(msg)
            | SmartlinkError::Conflict(msg)
            | SmartlinkError::Serialization(msg)
            | SmartlinkError::DateParse(msg)
            | SmartlinkError::WizardStepInvalid(msg)
            | SmartlinkError::DraftNotFound(msg)
            | SmartlinkError::ExternalApi(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            SmartlinkError::Validation(_)
            | SmartlinkError::DateParse(_)
            | SmartlinkError::WizardStepInvalid(_) => StatusCode::BAD_REQUEST,
            SmartlinkError::NotFound(_) | SmartlinkError::DraftNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            SmartlinkError::Conflict(_) => StatusCode::CONFLICT,
            SmartlinkError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
            SmartlinkError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            SmartlinkError::DatabaseConfig(_)
            | SmartlinkError::DatabaseOperation(_)
            | SmartlinkError::FileOperation(_)
            | SmartlinkError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
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

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SmartlinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SmartlinkError {}

// 便捷的构造函数
impl SmartlinkError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::Conflict(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::DateParse(msg.into())
    }

    pub fn wizard_step_invalid<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::WizardStepInvalid(msg.into())
    }

    pub fn draft_not_found<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::DraftNotFound(msg.into())
    }

    pub fn external_api<T: Into<String>>(msg: T) -> Self {
        SmartlinkError::ExternalApi(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SmartlinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        SmartlinkError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SmartlinkError {
    fn from(err: std::io::Error) -> Self {
        SmartlinkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SmartlinkError {
    fn from(err: serde_json::Error) -> Self {
        SmartlinkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SmartlinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            SmartlinkError::database_config("x"),
            SmartlinkError::database_connection("x"),
            SmartlinkError::database_operation("x"),
            SmartlinkError::file_operation("x"),
            SmartlinkError::validation("x"),
            SmartlinkError::not_found("x"),
            SmartlinkError::conflict("x"),
            SmartlinkError::serialization("x"),
            SmartlinkError::date_parse("x"),
            SmartlinkError::wizard_step_invalid("x"),
            SmartlinkError::draft_not_found("x"),
            SmartlinkError::external_api("x"),
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            SmartlinkError::validation("bad").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SmartlinkError::not_found("gone").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SmartlinkError::conflict("slug taken").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            SmartlinkError::external_api("spotify down").http_status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_format_simple() {
        let err = SmartlinkError::validation("artist_name is required");
        assert_eq!(
            err.format_simple(),
            "Validation Error: artist_name is required"
        );
        assert_eq!(err.to_string(), err.format_simple());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let converted: SmartlinkError = err.into();
        assert!(matches!(converted, SmartlinkError::Serialization(_)));
    }
}
