//! Admin dashboard read-model handler.

use actix_web::{get, web};

use crate::domain::DashboardStats;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Aggregate dashboard counters plus the five most recent users.
///
/// Counts are computed per request; no caching or incremental upkeep.
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Dashboard read-model", body = DashboardStats),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["admin"],
    operation_id = "adminStats"
)]
#[get("/api/admin/stats")]
pub async fn admin_stats(state: web::Data<HttpState>) -> ApiResult<web::Json<DashboardStats>> {
    Ok(web::Json(state.stats.compute().await?))
}
