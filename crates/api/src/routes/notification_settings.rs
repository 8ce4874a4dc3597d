//! Notification settings routes.
//!
//! Saving the settings re-arms or stops the reminder loop: it runs while at
//! least one channel is enabled.

use axum::{extract::State, Json};
use domain::models::{NotificationSettingsResponse, UpdateNotificationSettingsRequest};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// Current notification settings with credentials redacted.
///
/// GET /api/v1/settings/notifications
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<NotificationSettingsResponse>, ApiError> {
    let settings = state.settings.load_settings().await?;
    Ok(Json(NotificationSettingsResponse::from(&settings)))
}

/// Update the notification settings.
///
/// PUT /api/v1/settings/notifications
///
/// Credentials omitted from the body keep their stored values.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateNotificationSettingsRequest>,
) -> Result<Json<NotificationSettingsResponse>, ApiError> {
    request.validate()?;

    // Saves are serialized on the scheduler so the loop always follows the
    // last settings written.
    let mut scheduler = state.scheduler.lock().await;
    let current = state.settings.load_settings().await?;
    let saved = state
        .settings
        .save_settings(&request.apply_to(&current))
        .await?;

    scheduler.set_enabled(saved.any_channel_enabled());
    let scheduler_state = scheduler.state();
    drop(scheduler);

    info!(
        email_enabled = saved.email_enabled,
        sms_enabled = saved.sms_enabled,
        thresholds = ?saved.threshold_days,
        scheduler = ?scheduler_state,
        "Notification settings updated"
    );

    Ok(Json(NotificationSettingsResponse::from(&saved)))
}
