use std::time::Duration;

use anyhow::Result;
use fleet_reminders_api::{app, config, jobs, middleware};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;
    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics()?;

    info!("Starting fleet reminders v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&config.database.pool_config()).await?;
    persistence::db::run_migrations(&pool).await?;

    let addr = config.socket_addr()?;
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let state = app::build_state(config, pool.clone());

    // The loop only runs while a channel is enabled. If the settings cannot
    // be read it starts anyway; each cycle re-reads them.
    let start_reminders = match state.settings.load_settings().await {
        Ok(settings) => settings.any_channel_enabled(),
        Err(e) => {
            warn!(error = %e, "Failed to load notification settings at startup");
            true
        }
    };
    state.scheduler.lock().await.set_enabled(start_reminders);
    info!(
        enabled = start_reminders,
        interval_secs = state.reminders.interval().as_secs(),
        "Reminder scheduler initialized"
    );

    let mut background = jobs::JobScheduler::new();
    background.register(jobs::PoolMetricsJob::new(pool));
    background.start();

    let app = app::create_app(state.clone());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, shutting down background jobs");
    state.scheduler.lock().await.shutdown(shutdown_timeout).await;
    background.shutdown(shutdown_timeout).await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
