use std::net::SocketAddr;
use std::sync::Arc;
use skybook_api::{app, AppState};
use skybook_store::{app_config::Config, seed, InMemoryFlightRepository, InMemoryPassengerRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skybook_api=debug,skybook_store=info,skybook_seatmap=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting Skybook API on port {}", config.server.port);

    let repo = Arc::new(InMemoryFlightRepository::new());
    if config.seed.enabled {
        seed::seed(repo.as_ref(), chrono::Utc::now()).await?;
    }

    let passenger_repo = Arc::new(InMemoryPassengerRepository::new());
    let app_state = AppState::new(repo, passenger_repo, config.seatmap.clone());
    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
