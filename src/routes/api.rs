// SPDX-License-Identifier: MIT

//! API routes for authenticated users.

use crate::db::NewActivity;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ActivityRecord, Category, StudyMetrics};
use crate::services::{compute_study_metrics, export};
use crate::time_utils::{format_utc_rfc3339, parse_rfc3339};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", post(record_activity).get(get_activities))
        .route("/api/metrics", get(get_metrics))
        .route("/api/export", get(export_csv))
}

// ─── Recording Activity ──────────────────────────────────────

/// Request body for recording a completed study action.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordActivityRequest {
    /// When the action completed (RFC3339); defaults to now
    pub date: Option<String>,
    #[validate(length(max = 120, message = "subject too long"))]
    pub subject: Option<String>,
    #[validate(range(min = 0.0, max = 1000000.0, message = "minutes out of range"))]
    pub minutes: Option<f64>,
    #[validate(range(min = 0.0, max = 1000000.0, message = "accuracy out of range"))]
    pub accuracy: Option<f64>,
    pub category: Option<Category>,
}

#[derive(Serialize)]
pub struct RecordActivityResponse {
    pub activity: ActivityRecord,
}

/// Record a completed study action (focus session, planner task,
/// flashcard session). Records are append-only; derived metrics are
/// recomputed from scratch on every read.
async fn record_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<RecordActivityRequest>,
) -> Result<Json<RecordActivityResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let date = match payload.date {
        Some(raw) => {
            // Reject bad dates at the door; the aggregator would only
            // skip the record silently later.
            parse_rfc3339(&raw).ok_or_else(|| {
                AppError::BadRequest("Invalid 'date': must be RFC3339 datetime".to_string())
            })?;
            raw
        }
        None => format_utc_rfc3339(chrono::Utc::now()),
    };

    let activity = state.db.insert_activity(
        &user.user_id,
        NewActivity {
            date,
            subject: payload.subject,
            minutes: payload.minutes,
            accuracy: payload.accuracy,
            category: payload.category,
        },
    );

    tracing::info!(
        user_id = %user.user_id,
        activity_id = activity.id,
        category = ?activity.category,
        "Recorded study activity"
    );

    Ok(Json(RecordActivityResponse { activity }))
}

// ─── Activities ──────────────────────────────────────────────

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// Filter by completion date (RFC3339)
    after: Option<String>,
    /// Cursor for forward pagination (opaque token).
    cursor: Option<String>,
    /// Pagination: items per page
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_per_page() -> u32 {
    50
}

const MAX_PER_PAGE: u32 = 100;

fn parse_after_timestamp(after: Option<&str>) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
    after
        .map(|raw| {
            parse_rfc3339(raw).ok_or_else(|| {
                AppError::BadRequest(
                    "Invalid 'after' parameter: must be RFC3339 datetime".to_string(),
                )
            })
        })
        .transpose()
}

fn parse_cursor(cursor: Option<&str>) -> Result<Option<u64>> {
    cursor
        .map(|raw| {
            let invalid_cursor = || AppError::BadRequest("Invalid 'cursor' parameter".to_string());

            let decoded = URL_SAFE_NO_PAD.decode(raw).map_err(|_| invalid_cursor())?;
            let decoded_str = std::str::from_utf8(&decoded).map_err(|_| invalid_cursor())?;
            decoded_str.parse::<u64>().map_err(|_| invalid_cursor())
        })
        .transpose()
}

fn encode_cursor(last_id: u64) -> String {
    URL_SAFE_NO_PAD.encode(last_id.to_string())
}

#[derive(Serialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<ActivityRecord>,
    pub per_page: u32,
    pub next_cursor: Option<String>,
}

/// Get the caller's activity records, newest first.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<ActivitiesResponse>> {
    tracing::debug!(
        user_id = %user.user_id,
        after = ?params.after,
        cursor = ?params.cursor,
        "Fetching activities"
    );

    let limit = params.per_page.min(MAX_PER_PAGE) as usize;
    let after = parse_after_timestamp(params.after.as_deref())?;
    let cursor = parse_cursor(params.cursor.as_deref())?;

    // Fetch one extra item to determine if another page is available.
    // The store applies the `after` constraint before cutting the
    // page, so the cursor always lands on a returned record.
    let mut activities = state
        .db
        .activities_page(&user.user_id, cursor, after, limit + 1);

    let has_more = activities.len() > limit;
    if has_more {
        activities.truncate(limit);
    }

    let next_cursor = if has_more {
        activities.last().map(|a| encode_cursor(a.id))
    } else {
        None
    };

    Ok(Json(ActivitiesResponse {
        activities,
        per_page: limit as u32,
        next_cursor,
    }))
}

// ─── Metrics ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct MetricsQuery {
    /// Caller's current calendar day ("YYYY-MM-DD"); defaults to the
    /// UTC day. Streak liveness depends on it.
    today: Option<NaiveDate>,
}

/// Compute the full derived metrics view for the caller.
///
/// Always recomputed from the complete record set; no stored XP or
/// level is ever trusted.
async fn get_metrics(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<MetricsQuery>,
) -> Result<Json<StudyMetrics>> {
    let today = params
        .today
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let records = state.db.activities_for_user(&user.user_id);
    let metrics = compute_study_metrics(&records, today);

    tracing::debug!(
        user_id = %user.user_id,
        records = records.len(),
        streak = metrics.streak,
        level = metrics.level,
        "Computed study metrics"
    );

    Ok(Json(metrics))
}

// ─── CSV Export ──────────────────────────────────────────────

/// Export the caller's raw records as CSV.
async fn export_csv(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let records = state.db.activities_for_user(&user.user_id);
    let csv = export::to_csv(&records);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"study_analytics.csv\"",
            ),
        ],
        csv,
    ))
}
