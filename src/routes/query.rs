use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::constants::{MSG_API_RUNNING, MSG_HEALTHY};
use crate::error::Result;
use crate::models::ApiResponse;
use crate::routes::{export, stats};
use crate::AppState;

/// Query parameters for the read-side dispatcher
#[derive(Debug, Deserialize)]
pub struct ReadQuery {
    pub action: Option<String>,
}

/// Read-side entry point: one endpoint, dispatched on `action`.
/// Unknown actions fall through to the default banner.
pub async fn waitlist_query(
    State(state): State<AppState>,
    Query(params): Query<ReadQuery>,
) -> Result<Json<ApiResponse>> {
    match params.action.as_deref() {
        Some("stats") => stats::get_stats(state).await,
        Some("export") => export::export_data(state).await,
        Some("health") => Ok(Json(ApiResponse::ok(MSG_HEALTHY))),
        _ => Ok(Json(ApiResponse::ok(MSG_API_RUNNING))),
    }
}
