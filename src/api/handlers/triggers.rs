//! Trigger endpoint handlers.
//!
//! The ping-creation trigger is the service's single write-side entry point.
//! The hosting platform invokes it once per created ping document, with the
//! owning group and the document id in the path and the document fields as
//! the JSON body.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::post,
};

use crate::api::dto::PingCreatedRequest;
use crate::error::AppError;
use crate::services::notifier::NotifyOutcome;
use crate::state::AppState;

/// Creates trigger routes.
///
/// # Routes
/// - `POST /groups/{group_id}/pings/{ping_id}` - Ping-creation trigger
pub fn trigger_routes() -> Router<AppState> {
    Router::new().route("/groups/{group_id}/pings/{ping_id}", post(ping_created))
}

/// Handles one ping-creation trigger invocation.
///
/// All normal terminal outcomes (sent, missing group, nobody to notify)
/// complete with 204 so the platform does not redeliver; upstream failures
/// surface as 502 and leave redelivery to the platform.
pub async fn ping_created(
    State(state): State<AppState>,
    Path((group_id, ping_id)): Path<(String, String)>,
    Json(body): Json<PingCreatedRequest>,
) -> Result<StatusCode, AppError> {
    let event = body.into_event(group_id, ping_id);
    let outcome = state.notifier.handle_ping_created(&event).await?;

    if let NotifyOutcome::Sent(report) = outcome {
        tracing::debug!(
            success_count = report.success_count,
            failure_count = report.failure_count,
            "Trigger invocation completed with send"
        );
    }

    Ok(StatusCode::NO_CONTENT)
}
