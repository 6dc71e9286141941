//! # Supabase Route Guard Server
//!
//! Entry point: load configuration, build the provider client and the
//! guards, then serve.

use supabase_route_guard::{routes, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main application entry point
///
/// 1. Sets up logging (override the filter with `RUST_LOG`)
/// 2. Loads configuration from environment variables
/// 3. Builds the auth provider client, route table and guards
/// 4. Starts the HTTP server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,supabase_route_guard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    let bind_addr = config.bind_address();

    // Fails fast when SUPABASE_URL / SUPABASE_KEY are missing
    let app_state = AppState::new(config)?;
    tracing::info!(
        login = %app_state.route_guard.login_path(),
        "Application state initialized"
    );

    let app = routes::router(app_state);

    tracing::info!("Starting server on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
