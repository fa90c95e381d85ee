use anyhow::{Context, Result};
use axum::http::HeaderValue;
use dashboard_server::{api, config::Settings, db::Database, state::AppState};
use std::net::SocketAddr;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::new().context("Failed to load settings")?;

    let db = Database::new(&settings.database.path).context("Failed to create database")?;
    db.initialize()
        .context("Failed to initialize database schema")?;
    tracing::info!("Database initialized at {}", settings.database.path);

    let cors = cors_layer(settings.cors_origins())?;
    let app = api::router(AppState::new(db))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Failed to parse server address")?;
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

fn cors_layer(origins: Option<Vec<String>>) -> Result<CorsLayer> {
    let allow_origin = match origins {
        None => AllowOrigin::from(Any),
        Some(origins) => {
            let values = origins
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin)
                        .with_context(|| format!("Invalid CORS origin: {}", origin))
                })
                .collect::<Result<Vec<_>>>()?;
            tracing::info!("CORS restricted to {} origin(s)", values.len());
            AllowOrigin::list(values)
        }
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
