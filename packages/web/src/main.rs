use std::sync::Arc;

use anyhow::Context;
use api::auth::{GoogleOAuth, OAuthConfig};
use api::quotes::ApiNinjasQuotes;
use api::{router, with_method_override, AppState, Settings};
use axum::extract::Request;
use axum::ServiceExt;
use store::PgStore;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use time::Duration;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::new().context("loading settings")?;

    info!("Connecting to database...");
    let store = PgStore::connect(&settings.database_url)
        .await
        .context("connecting to database")?;
    store.migrate().await.context("running migrations")?;

    let session_store = PostgresStore::new(store.pool().clone());
    session_store
        .migrate()
        .await
        .context("creating session table")?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(settings.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(settings.session_inactivity_days)))
        .with_signed(settings.session_key()?);

    let google = GoogleOAuth::new(OAuthConfig::google(&settings)?)?;
    let store = Arc::new(store);
    let state = AppState::new(
        store.clone(),
        store,
        Arc::new(google),
        Arc::new(ApiNinjasQuotes::new(settings.quote_api_key.clone())),
    );

    let app = with_method_override(router(state, &settings.static_dir).layer(session_layer));

    let address = settings.listen_addr();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
