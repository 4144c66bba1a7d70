use axum::Json;
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::constants::MSG_STATS_RETRIEVED;
use crate::error::Result;
use crate::models::{iso_timestamp, ApiResponse, SignupRecord};
use crate::AppState;

/// Aggregated waitlist statistics
#[derive(Debug, Serialize)]
pub struct WaitlistStats {
    #[serde(rename = "totalSignups")]
    pub total_signups: u64,
    #[serde(rename = "todaySignups")]
    pub today_signups: u64,
    #[serde(rename = "lastSignup")]
    pub last_signup: Option<LastSignup>,
}

/// Most recent row, trimmed to what the dashboard shows
#[derive(Debug, Serialize)]
pub struct LastSignup {
    pub timestamp: String,
    pub email: String,
}

/// Stats action: a full scan on every call, nothing cached
pub async fn get_stats(state: AppState) -> Result<Json<ApiResponse>> {
    let store = state.store.clone();
    let rows = tokio::task::spawn_blocking(move || store.all_rows()).await??;

    let stats = summarize(&rows, Local::now());

    Ok(Json(ApiResponse::ok(MSG_STATS_RETRIEVED).with_data(stats)))
}

/// Aggregate rows against the calendar day of `now`, in `now`'s timezone.
/// "Today" means on or after that day's local midnight.
pub fn summarize<Tz: TimeZone>(rows: &[SignupRecord], now: DateTime<Tz>) -> WaitlistStats {
    let today = now.date_naive();
    let tz = now.timezone();

    let today_signups = rows
        .iter()
        .filter(|row| {
            DateTime::from_timestamp(row.created_at, 0)
                .map(|t| t.with_timezone(&tz).date_naive() >= today)
                .unwrap_or(false)
        })
        .count() as u64;

    let last_signup = rows.last().map(|row| LastSignup {
        timestamp: iso_timestamp(row.created_at),
        email: row.email.clone(),
    });

    WaitlistStats {
        total_signups: rows.len() as u64,
        today_signups,
        last_signup,
    }
}
