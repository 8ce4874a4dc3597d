use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use domain::services::{
    DeliveryLedger, NoopDeliveryLedger, NotificationDispatcher, SettingsStore,
};
use persistence::repositories::{
    NotificationDeliveryRepository, NotificationSettingsRepository, VehicleRepository,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::jobs::{JobScheduler, MaintenanceReminderJob};
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{
    fleet_units, health, maintenance, maintenance_logs, notification_settings, reminders,
    vehicles,
};
use crate::services::{EmailService, SmsService};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    /// Notification settings record; also read by the reminder job.
    pub settings: Arc<dyn SettingsStore>,
    /// Scheduler driving the reminder job; stopped until started.
    pub scheduler: Arc<Mutex<JobScheduler>>,
    pub reminders: Arc<MaintenanceReminderJob>,
}

impl AppState {
    /// Creates the state with a stopped scheduler that owns `reminders`.
    pub fn new(
        pool: PgPool,
        config: Arc<Config>,
        settings: Arc<dyn SettingsStore>,
        reminders: Arc<MaintenanceReminderJob>,
    ) -> Self {
        let mut scheduler = JobScheduler::new();
        scheduler.register_shared(reminders.clone());

        Self {
            pool,
            config,
            settings,
            scheduler: Arc::new(Mutex::new(scheduler)),
            reminders,
        }
    }
}

/// Wires the production reminder engine on top of the database pool.
pub fn build_state(config: Config, pool: PgPool) -> AppState {
    let config = Arc::new(config);
    let settings = &config.reminders;

    let ledger: Arc<dyn DeliveryLedger> = if settings.deduplicate {
        Arc::new(NotificationDeliveryRepository::new(pool.clone()))
    } else {
        Arc::new(NoopDeliveryLedger)
    };

    let settings_store: Arc<dyn SettingsStore> =
        Arc::new(NotificationSettingsRepository::new(pool.clone()));

    let dispatcher = NotificationDispatcher::new(
        Arc::new(EmailService::new(config.email.clone())),
        Arc::new(SmsService::new(config.sms.clone())),
    )
    .with_ledger(ledger)
    .with_send_timeout(settings.send_timeout())
    .with_locale(settings.locale());

    let reminders = Arc::new(MaintenanceReminderJob::new(
        settings_store.clone(),
        Arc::new(VehicleRepository::new(pool.clone())),
        dispatcher,
        Arc::new(settings.clock()),
        settings.check_interval(),
    ));

    AppState::new(pool, config, settings_store, reminders)
}

pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api_routes = Router::new()
        .route(
            "/api/v1/vehicles",
            get(vehicles::list_vehicles).post(vehicles::create_vehicle),
        )
        .route(
            "/api/v1/vehicles/:vehicle_id",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .route(
            "/api/v1/vehicles/:vehicle_id/maintenance-logs",
            get(maintenance_logs::list_logs).post(maintenance_logs::append_log),
        )
        .route(
            "/api/v1/platoons",
            get(fleet_units::list_platoons).post(fleet_units::create_platoon),
        )
        .route(
            "/api/v1/platoons/:platoon_id",
            delete(fleet_units::delete_platoon),
        )
        .route(
            "/api/v1/vehicle-types",
            get(fleet_units::list_vehicle_types).post(fleet_units::create_vehicle_type),
        )
        .route(
            "/api/v1/vehicle-types/:vehicle_type_id",
            delete(fleet_units::delete_vehicle_type),
        )
        .route(
            "/api/v1/maintenance/calendar",
            get(maintenance::get_calendar),
        )
        .route(
            "/api/v1/settings/notifications",
            get(notification_settings::get_settings).put(notification_settings::update_settings),
        )
        .route("/api/v1/reminders/run", post(reminders::run_now))
        .route("/api/v1/reminders/status", get(reminders::status));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
