use anyhow::Context;
use chatroom::{app, clock::Clock, config::Config, logging, store::Store, sweeper::Sweeper, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init_logging(&config.logging)?;

    // the store must be reachable before anything else starts
    let store = Store::connect(&config.database_url, config.database_max_connections)
        .await
        .with_context(|| format!("connecting to {}", config.database_url))?;
    let clock = Clock::with_offset_hours(config.utc_offset_hours)?;

    let sweeper = Sweeper::new(store.clone(), clock, config.sweep).spawn();

    let app = app(AppState { store, clock });
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::info!("running on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.stop().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
