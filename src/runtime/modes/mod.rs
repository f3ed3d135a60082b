//! Mode routing
//!
//! - Server mode (HTTP server)，需要 `server` feature
//! - CLI mode 在 `crate::interfaces::cli` 中实现，需要 `cli` feature

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "server")]
pub use server::run_server;
