//! Notes HTTP backend.
//!
//! Loads [`Settings`], connects to Postgres, applies migrations and serves the
//! [`api::router`] until interrupted.

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use api::auth::TokenSigner;
use api::db::{self, PgStore};
use api::{cors_layer, router, AppState, Settings};
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "server=info,api=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(settings).await {
        tracing::error!("server error: {:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    let pool = db::connect(&settings.database.url)
        .await
        .context("failed to connect to database")?;
    db::migrate(&pool)
        .await
        .context("failed to run migrations")?;

    let store = Arc::new(PgStore::new(pool));
    let signer = TokenSigner::new(&settings.session.secret).context("invalid session secret")?;
    let state = AppState::new(store.clone(), store, signer, settings.session.secure);

    let cors = cors_layer(&settings.client.url).context("invalid CLIENT_URL")?;
    let app = router(state).layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(client_origin = %settings.client.url, "Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
