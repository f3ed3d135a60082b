//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};
use ts_rs::TS;

use super::types::TS_EXPORT_PATH;
use crate::errors::SmartlinkError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，ts-rs 自动生成 TypeScript 类型。
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: smart link / 预存错误
/// - 4000-4099: 向导错误
/// - 5000-5099: 外部服务错误
/// - 6000-6099: 指标错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[ts(rename = "ErrorCode")]
#[ts(repr(enum))]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    InvalidDateFormat = 1012,
    ServiceUnavailable = 1030,

    // 认证错误 2000-2099
    AuthFailed = 2000,
    SpotifyTokenMissing = 2010,

    // smart link / 预存 3000-3099
    LinkNotFound = 3000,
    SlugAlreadyExists = 3001,
    LinkInvalid = 3002,
    LinkDatabaseError = 3005,

    // 向导 4000-4099
    DraftNotFound = 4000,
    WizardStepInvalid = 4001,

    // 外部服务 5000-5099
    SpotifyRequestFailed = 5000,
    SpotifyNotConfigured = 5001,

    // 指标 6000-6099
    MetricsQueryFailed = 6000,
}

impl From<SmartlinkError> for ErrorCode {
    fn from(err: SmartlinkError) -> Self {
        match err {
            SmartlinkError::Validation(_) => ErrorCode::LinkInvalid,
            SmartlinkError::NotFound(_) => ErrorCode::LinkNotFound,
            SmartlinkError::Conflict(_) => ErrorCode::SlugAlreadyExists,
            SmartlinkError::DateParse(_) => ErrorCode::InvalidDateFormat,
            SmartlinkError::WizardStepInvalid(_) => ErrorCode::WizardStepInvalid,
            SmartlinkError::DraftNotFound(_) => ErrorCode::DraftNotFound,
            SmartlinkError::ExternalApi(_) => ErrorCode::SpotifyRequestFailed,
            SmartlinkError::DatabaseConnection(_) => ErrorCode::ServiceUnavailable,
            SmartlinkError::DatabaseOperation(_) => ErrorCode::LinkDatabaseError,
            SmartlinkError::DatabaseConfig(_)
            | SmartlinkError::FileOperation(_)
            | SmartlinkError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "0");
        assert_eq!(
            serde_json::to_string(&ErrorCode::SlugAlreadyExists).unwrap(),
            "3001"
        );
        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::WizardStepInvalid);
    }

    #[test]
    fn test_from_smartlink_error() {
        assert_eq!(
            ErrorCode::from(SmartlinkError::conflict("x")),
            ErrorCode::SlugAlreadyExists
        );
        assert_eq!(
            ErrorCode::from(SmartlinkError::draft_not_found("x")),
            ErrorCode::DraftNotFound
        );
        assert_eq!(
            ErrorCode::from(SmartlinkError::date_parse("x")),
            ErrorCode::InvalidDateFormat
        );
        assert_eq!(
            ErrorCode::from(SmartlinkError::database_connection("x")),
            ErrorCode::ServiceUnavailable
        );
    }
}
