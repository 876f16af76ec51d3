//! Handler for the owner analytics report.

use axum::{Extension, Json, extract::State};
use serde_json::json;

use crate::api::dto::analytics::AnalyticsResponse;
use crate::domain::entities::OwnerId;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the aggregated click report of the authenticated owner.
///
/// # Endpoint
///
/// `GET /api/analytics`
///
/// # Response
///
/// ```json
/// {
///   "urls": [
///     {
///       "originalUrl": "https://a.com",
///       "shortUrl": "https://x.io/abc",
///       "clicks": 2,
///       "createdAt": "2024-01-01T00:00:00Z",
///       "expired": false
///     }
///   ],
///   "clicksOverTime": [{ "date": "2024-1-5", "clicks": 2 }],
///   "deviceStats": [{ "name": "mobile - Chrome", "count": 2 }]
/// }
/// ```
///
/// An owner without links receives three empty arrays.
///
/// # Errors
///
/// Store failures are logged and answered with a generic 500 message; the
/// cause is never part of the response body.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Extension(owner_id): Extension<OwnerId>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let report = state
        .report_service
        .build_report(owner_id)
        .await
        .map_err(|e| {
            tracing::error!(%owner_id, error = %e, "Error fetching analytics");
            AppError::internal("Error fetching analytics", json!({}))
        })?;

    Ok(Json(report.into()))
}
