//! HTTP 层：公开页面、健康检查、Admin API 与中间件

pub mod middleware;
pub mod services;
