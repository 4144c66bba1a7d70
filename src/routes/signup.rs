use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};

use crate::constants::MSG_SIGNUP_OK;
use crate::error::{AppError, Result};
use crate::models::{ApiResponse, SignupRequest};
use crate::AppState;

/// Waitlist submission (write path)
///
/// The body is taken leniently: a malformed payload answers with the
/// standard failure envelope instead of a framework rejection. The
/// pipeline itself does blocking storage work, so it runs off the async
/// runtime.
pub async fn submit_signup(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>> {
    let Json(request) =
        payload.map_err(|rejection| AppError::InvalidBody(rejection.to_string()))?;

    let pipeline = state.pipeline.clone();
    let receipt = tokio::task::spawn_blocking(move || pipeline.process(request)).await??;

    Ok(Json(ApiResponse::ok(MSG_SIGNUP_OK).with_data(receipt)))
}
