//! Admin API 指标端点

use std::sync::Arc;

use actix_web::{Responder, Result as ActixResult, web};
use tracing::trace;

use crate::services::MetricsService;

use super::helpers::api_result;
use super::types::MetricsQuery;

/// GET /metrics?owner_id=&since=
pub async fn owner_metrics(
    query: web::Query<MetricsQuery>,
    metrics: web::Data<Arc<MetricsService>>,
) -> ActixResult<impl Responder> {
    trace!(
        "Admin API: metrics for owner {} since {:?}",
        query.owner_id, query.since
    );
    Ok(api_result(
        metrics
            .owner_metrics(&query.owner_id, query.since.as_deref())
            .await,
    ))
}
