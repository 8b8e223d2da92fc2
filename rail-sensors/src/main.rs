use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rail_sensors::config::AppConfig;
use rail_sensors::config_flow::{ConfigFlow, ProbeContext};
use rail_sensors::darwin::DarwinClient;
use rail_sensors::planner::TransportApiClient;
use rail_sensors::registry::{EntryRegistry, EntryStore};
use rail_sensors::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let config_path = AppConfig::path_from_env();
    let config = AppConfig::load_or_default(&config_path).expect("Failed to load config");
    tracing::info!(
        path = %config_path.display(),
        update_interval_secs = config.update_interval_secs,
        "Loaded configuration"
    );

    // Entries get their own TransportAPI client, built from their credentials.
    let planner_config = config.clone();
    let registry = Arc::new(EntryRegistry::new(
        EntryStore::new(&config.entries_path),
        config.coordinator_settings(),
        move |credentials| TransportApiClient::new(planner_config.transportapi(credentials)),
    ));

    match registry.restore().await {
        Ok(count) => tracing::info!(count, "Restored entries"),
        Err(e) => tracing::error!(error = %e, "Failed to restore entries"),
    }

    let darwin_config = config.darwin();
    let flow = ConfigFlow::new(ProbeContext::new(move || {
        DarwinClient::new(darwin_config.clone())
    }));

    let app = create_router(AppState::new(registry.clone(), flow));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .expect("Failed to bind listen address");
    tracing::info!(addr = %config.listen_addr, "Rail sensors listening");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        tracing::error!(error = %e, "Server error");
    }

    registry.unload_all().await;
    tracing::info!("Shut down");
}
