use groundhog_check::{
    AppState, Config,
    clock::{Clock, FixedClock, SystemClock},
    router,
    weather::WeatherClient,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    if config.api_key.is_empty() {
        warn!("WEATHER_API_KEY is not set; the weather provider will reject requests");
    }

    let clock: Arc<dyn Clock> = match config.fixed_today {
        Some(date) => {
            info!(%date, "calendar pinned by APP_TODAY");
            Arc::new(FixedClock(date))
        }
        None => Arc::new(SystemClock),
    };

    let weather = WeatherClient::new(config.api_key.clone(), config.api_base.clone())?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = router(AppState::new(config, clock, weather));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
