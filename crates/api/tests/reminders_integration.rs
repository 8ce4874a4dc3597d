//! Integration tests for the reminder endpoints and the HTTP surface that
//! does not need a database.
//!
//! The reminder engine runs against in-memory stores and mock channels.

mod common;

use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use common::{
    empty_request, get_request, json_request, parse_response_body, settings, vehicle,
    InMemoryApp,
};
use domain::models::NotificationSettings;
use domain::services::{MockEmailChannel, MockSmsChannel, SettingsStore};
use fleet_reminders_api::jobs::SchedulerState;
use fleet_reminders_api::middleware::{init_metrics, REQUEST_ID_HEADER};
use serde_json::json;
use std::time::Duration;
use tower::ServiceExt;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Manual reminder cycle
// ============================================================================

#[tokio::test]
async fn test_run_sends_reminder_for_vehicle_due_tomorrow() {
    let app = InMemoryApp::new(
        settings(true, false),
        vec![
            vehicle("V1", Some(date(2024, 6, 11))),
            vehicle("V2", Some(date(2024, 6, 9))),
            vehicle("V3", None),
        ],
    );

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::POST, "/api/v1/reminders/run"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = parse_response_body(response).await;
    assert_eq!(report["today"], "2024-06-10");
    assert_eq!(report["vehiclesEvaluated"], 3);
    assert_eq!(report["sent"], 1);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["notices"].as_array().unwrap().len(), 1);
    assert_eq!(report["notices"][0]["vehicleNumber"], "V1");
    assert_eq!(report["notices"][0]["daysUntil"], 1);
    assert_eq!(report["outcomes"][0]["channel"], "email");
    assert_eq!(report["outcomes"][0]["result"], "sent");

    let sent = app.email.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].body_text.contains("V1"));
    assert!(sent[0].body_text.contains("2024-06-11"));
    assert_eq!(app.sms.attempts(), 0);
}

#[tokio::test]
async fn test_second_run_same_day_reports_already_delivered() {
    let app = InMemoryApp::new(
        settings(true, true),
        vec![vehicle("V1", Some(date(2024, 6, 12)))],
    );

    let first = app
        .router
        .clone()
        .oneshot(empty_request(Method::POST, "/api/v1/reminders/run"))
        .await
        .unwrap();
    assert_eq!(parse_response_body(first).await["sent"], 2);

    let second = app
        .router
        .clone()
        .oneshot(empty_request(Method::POST, "/api/v1/reminders/run"))
        .await
        .unwrap();
    let report = parse_response_body(second).await;
    assert_eq!(report["sent"], 0);
    assert_eq!(report["alreadyDelivered"], 2);
    assert_eq!(app.email.attempts(), 1);
    assert_eq!(app.sms.attempts(), 1);
}

#[tokio::test]
async fn test_email_failure_does_not_block_sms() {
    let app = InMemoryApp::with_channels(
        settings(true, true),
        vec![
            vehicle("A", Some(date(2024, 6, 11))),
            vehicle("B", Some(date(2024, 6, 12))),
        ],
        MockEmailChannel::failing(),
        MockSmsChannel::new(),
    );

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::POST, "/api/v1/reminders/run"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = parse_response_body(response).await;
    assert_eq!(report["failed"], 2);
    assert_eq!(report["sent"], 2);
    assert_eq!(app.sms.sent().len(), 2);

    let failed = report["outcomes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["result"] == "failed")
        .unwrap();
    assert_eq!(failed["channel"], "email");
    assert!(failed["reason"].as_str().unwrap().contains("Simulated failure"));
}

#[tokio::test]
async fn test_failed_send_is_retried_on_next_run() {
    let email = MockEmailChannel::new().failing_for("nobody@example.com");
    let mut config = settings(true, false);
    config.recipient_email = "nobody@example.com".to_string();
    let app = InMemoryApp::with_channels(
        config,
        vec![vehicle("V1", Some(date(2024, 6, 11)))],
        email,
        MockSmsChannel::new(),
    );

    for _ in 0..2 {
        let response = app
            .router
            .clone()
            .oneshot(empty_request(Method::POST, "/api/v1/reminders/run"))
            .await
            .unwrap();
        assert_eq!(parse_response_body(response).await["failed"], 1);
    }
    assert_eq!(app.email.attempts(), 2);

    let mut fixed = settings(true, false);
    fixed.recipient_email = "ops@example.com".to_string();
    app.settings.replace(fixed);

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::POST, "/api/v1/reminders/run"))
        .await
        .unwrap();
    assert_eq!(parse_response_body(response).await["sent"], 1);
}

#[tokio::test]
async fn test_run_with_channels_disabled_is_skipped() {
    let app = InMemoryApp::new(
        NotificationSettings::default(),
        vec![vehicle("V1", Some(date(2024, 6, 11)))],
    );

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::POST, "/api/v1/reminders/run"))
        .await
        .unwrap();
    let report = parse_response_body(response).await;
    assert_eq!(report["vehiclesEvaluated"], 0);
    assert_eq!(report["outcomes"], json!([]));

    let status = app
        .router
        .clone()
        .oneshot(get_request("/api/v1/reminders/status"))
        .await
        .unwrap();
    let status = parse_response_body(status).await;
    assert_eq!(status["lastCycle"]["result"], "skipped");
}

#[tokio::test]
async fn test_run_picks_up_directory_changes() {
    let app = InMemoryApp::new(settings(true, false), vec![]);

    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::POST, "/api/v1/reminders/run"))
        .await
        .unwrap();
    assert_eq!(parse_response_body(response).await["vehiclesEvaluated"], 0);

    app.vehicles
        .replace(vec![vehicle("V9", Some(date(2024, 6, 12)))]);
    let response = app
        .router
        .clone()
        .oneshot(empty_request(Method::POST, "/api/v1/reminders/run"))
        .await
        .unwrap();
    let report = parse_response_body(response).await;
    assert_eq!(report["vehiclesEvaluated"], 1);
    assert_eq!(report["notices"][0]["daysUntil"], 2);
}

// ============================================================================
// Notification settings
// ============================================================================

fn settings_body(email_enabled: bool, sms_enabled: bool) -> serde_json::Value {
    json!({
        "recipientEmail": "ops@example.com",
        "recipientPhone": "+972501234567",
        "emailEnabled": email_enabled,
        "smsEnabled": sms_enabled,
        "thresholdDays": [2, 1],
        "emailApiKey": "SG.secret"
    })
}

#[tokio::test]
async fn test_settings_update_arms_and_stops_scheduler() {
    let app = InMemoryApp::new(NotificationSettings::default(), vec![]);
    assert_eq!(
        app.state.scheduler.lock().await.state(),
        SchedulerState::Stopped
    );

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/settings/notifications",
            settings_body(true, false),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["thresholdDays"], json!([1, 2]));
    assert_eq!(body["activeChannels"], json!(["email"]));
    assert!(!body.to_string().contains("SG.secret"));
    assert_eq!(
        app.state.scheduler.lock().await.state(),
        SchedulerState::Running
    );

    let mut disable = settings_body(false, false);
    disable.as_object_mut().unwrap().remove("emailApiKey");
    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/settings/notifications",
            disable,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        app.state.scheduler.lock().await.state(),
        SchedulerState::Stopped
    );

    // Omitted credentials keep their stored value
    let stored = app.settings.load_settings().await.unwrap();
    assert_eq!(stored.email_credentials.api_key, "SG.secret");

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/v1/settings/notifications"))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["emailEnabled"], false);
    assert_eq!(body["emailProviderConfigured"], true);

    app.state
        .scheduler
        .lock()
        .await
        .shutdown(Duration::from_secs(5))
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_settings_updates_leave_scheduler_in_step() {
    let app = InMemoryApp::new(NotificationSettings::default(), vec![]);

    let saves: Vec<_> = (0..16)
        .map(|i| {
            let router = app.router.clone();
            tokio::spawn(async move {
                router
                    .oneshot(json_request(
                        Method::PUT,
                        "/api/v1/settings/notifications",
                        settings_body(i % 2 == 0, false),
                    ))
                    .await
                    .unwrap()
                    .status()
            })
        })
        .collect();
    for save in saves {
        assert_eq!(save.await.unwrap(), StatusCode::OK);
    }

    let stored = app.settings.load_settings().await.unwrap();
    let expected = if stored.any_channel_enabled() {
        SchedulerState::Running
    } else {
        SchedulerState::Stopped
    };
    let mut scheduler = app.state.scheduler.lock().await;
    assert_eq!(scheduler.state(), expected);
    scheduler.shutdown(Duration::from_secs(5)).await;
}

// ============================================================================
// Scheduler status
// ============================================================================

#[tokio::test]
async fn test_status_reflects_scheduler_state() {
    let app = InMemoryApp::new(NotificationSettings::default(), vec![]);

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/v1/reminders/status"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let status = parse_response_body(response).await;
    assert_eq!(status["state"], "stopped");
    assert_eq!(status["intervalSecs"], 86400);
    assert_eq!(status["locale"], "he");
    assert_eq!(status["deduplicate"], true);
    assert!(status["lastCycle"].is_null());

    app.state.scheduler.lock().await.start();

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/v1/reminders/status"))
        .await
        .unwrap();
    assert_eq!(parse_response_body(response).await["state"], "running");

    // Let the immediate first cycle complete
    for _ in 0..100 {
        if app.state.reminders.last_cycle().await.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    app.state
        .scheduler
        .lock()
        .await
        .shutdown(Duration::from_secs(5))
        .await;

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/v1/reminders/status"))
        .await
        .unwrap();
    let status = parse_response_body(response).await;
    assert_eq!(status["state"], "stopped");
    assert_eq!(status["lastCycle"]["result"], "skipped");
}

// ============================================================================
// Health, request ids and metrics
// ============================================================================

#[tokio::test]
async fn test_liveness_probe() {
    let app = InMemoryApp::new(NotificationSettings::default(), vec![]);

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/health/live"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(parse_response_body(response).await["status"], "alive");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = InMemoryApp::new(NotificationSettings::default(), vec![]);

    let request = axum::http::Request::builder()
        .uri("/api/health/live")
        .header(REQUEST_ID_HEADER, "req-42")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn test_readiness_fails_without_database() {
    let app = InMemoryApp::new(NotificationSettings::default(), vec![]);

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/health/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_metrics_include_reminder_counters() {
    init_metrics().unwrap();
    let app = InMemoryApp::new(
        settings(true, false),
        vec![vehicle("V1", Some(date(2024, 6, 11)))],
    );

    app.router
        .clone()
        .oneshot(empty_request(Method::POST, "/api/v1/reminders/run"))
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(get_request("/metrics"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("maintenance_reminder_cycles_total"));
    assert!(text.contains("maintenance_reminders_total"));
}

// ============================================================================
// Request validation (rejected before any database access)
// ============================================================================

#[tokio::test]
async fn test_create_vehicle_rejects_invalid_body() {
    let app = InMemoryApp::new(NotificationSettings::default(), vec![]);

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/vehicles",
            json!({ "vehicleNumber": "  ", "maintenanceDate": "1999-01-01" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["maintenance_date", "vehicle_number"]);
}

#[tokio::test]
async fn test_update_settings_rejects_bad_thresholds() {
    let app = InMemoryApp::new(NotificationSettings::default(), vec![]);

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/settings/notifications",
            json!({
                "recipientEmail": "not-an-email",
                "emailEnabled": true,
                "smsEnabled": false,
                "thresholdDays": [-1]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
    assert_eq!(
        app.state.scheduler.lock().await.state(),
        SchedulerState::Stopped
    );
}

#[tokio::test]
async fn test_create_platoon_rejects_blank_name() {
    let app = InMemoryApp::new(NotificationSettings::default(), vec![]);

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/platoons",
            json!({ "name": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["details"][0]["field"], "name");
}

#[tokio::test]
async fn test_append_maintenance_log_rejects_blank_notes() {
    let app = InMemoryApp::new(NotificationSettings::default(), vec![]);

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/vehicles/{}/maintenance-logs", uuid::Uuid::new_v4()),
            json!({ "notes": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["details"][0]["field"], "notes");
}
