//! Service layer for business logic
//!
//! Shared between the HTTP handlers and the CLI.

mod click_recorder;
mod draft_service;
mod link_service;
mod metrics_service;
mod presave_service;
mod profile_service;
pub mod spotify;

pub use click_recorder::ClickRecorder;
pub use draft_service::{DraftService, SubmitResult};
pub use link_service::{LinkService, validate_link};
pub use metrics_service::{
    ItemMetrics, MetricsService, MetricsSummary, PlatformCount, aggregate, click_rate,
};
pub use presave_service::{PresaveService, validate_presave};
pub use profile_service::ProfileService;
pub use spotify::{SpotifyClient, TimeRange};
