pub mod admin;
pub mod health;
pub mod page;

pub use health::{AppStartTime, HealthService, health_routes};
pub use page::{PageService, page_routes};
