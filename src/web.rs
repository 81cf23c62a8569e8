use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::client::http_client;
use crate::config::Configuration;
use crate::error::Error;
use crate::source::FlickrSource;

#[derive(Clone)]
struct AdapterState {
    source: Arc<FlickrSource>,
}

/// Router exposing the single read-only photo endpoint at `route`.
pub fn router(source: FlickrSource, route: &str) -> Router {
    let state = AdapterState {
        source: Arc::new(source),
    };
    Router::new()
        .route(route, get(serve_photos))
        .with_state(state)
}

async fn serve_photos(State(state): State<AdapterState>) -> Result<Response, Error> {
    let photos = state.source.fetch().await.inspect_err(|err| {
        error!(error = %err, "photo source request failed");
    })?;
    info!(count = photos.len(), "serving photo set");
    Ok(Json(photos).into_response())
}

pub async fn run(config: &Configuration) -> Result<()> {
    let client = http_client().context("failed to build http client")?;
    let source = FlickrSource::new(client, config.upstream.clone());
    let app = router(source, &config.adapter.route);

    let addr = SocketAddr::new(
        config
            .adapter
            .bind_address
            .parse()
            .with_context(|| format!("invalid bind address {}", config.adapter.bind_address))?,
        config.adapter.port,
    );
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind adapter listener on {addr}"))?;
    info!(%addr, route = %config.adapter.route, "photo source adapter listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("adapter server exited")?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.ok();
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut term) = signal(SignalKind::terminate()) {
            term.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown requested");
}
