use axum::{
    http::HeaderValue,
    routing::post,
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dvand_waitlist_server::config::CorsOrigin;
use dvand_waitlist_server::routes::{submit_signup, waitlist_query};
use dvand_waitlist_server::{open_database, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dvand_waitlist_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Dvand Waitlist Server...");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Environment: {}, Server: {}",
        config.environment,
        config.server_address()
    );

    // Open the embedded database (creates tables on first run)
    let db = open_database(&config.database_path)?;

    // Configure CORS from the static origin policy
    let cors = match &config.allowed_origin {
        CorsOrigin::Any => CorsLayer::new().allow_origin(Any),
        CorsOrigin::Fixed(origin) => CorsLayer::new().allow_origin(origin.parse::<HeaderValue>()?),
    }
    .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
    .allow_headers(Any);

    // Create app state
    let state = AppState::new(db, config.clone());

    // Build router: one endpoint, POST submits, GET dispatches on ?action=
    let app = Router::new()
        .route("/api/waitlist", post(submit_signup).get(waitlist_query))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server_address().parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
