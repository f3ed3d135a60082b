//! Admin API 服务模块
//!
//! 该模块包含管理 API 的所有端点，包括：
//! - 账户资料
//! - Smart link / 预存活动 CRUD
//! - 表单向导草稿
//! - 指标与注册表
//! - Spotify 代理

pub mod drafts;
pub mod error_code;
mod helpers;
pub mod links;
pub mod metrics;
pub mod presaves;
pub mod profiles;
pub mod registry;
pub mod routes;
pub mod spotify;
mod types;

// 重新导出类型
pub use types::*;

// 重新导出帮助函数
pub use helpers::{api_result, error_from_smartlink, error_response, json_response, success_response};

// 重新导出错误码
pub use error_code::ErrorCode;

pub use routes::admin_v1_routes;
