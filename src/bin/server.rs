use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use axum_server::Handle;
use finance_backend::{AppState, build_router, config::Config, graceful_shutdown};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine, the variables may come from the environment.
    dotenvy::dotenv().ok();

    setup_logging();

    let config = Config::parse();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("server stopped with an error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let store_location = config.store_location();
    let connection = store_location.open()?;
    tracing::info!("Opened database at {store_location}");

    let state = AppState::new(connection);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let addr = config.socket_addr();
    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(build_router(state.clone()).into_make_service())
        .await?;

    // The router's clones of the state are gone once the server has stopped.
    drop(state);
    tracing::info!("Closed database at {store_location}");

    Ok(())
}

fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
