use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::net::TcpListener;

use crate::{
    api,
    errors::{Error, Result},
    info,
    markets::MarketResolver,
    spotify::SpotifyClient,
};

/// State shared by every request.
///
/// The resolver, and with it the geocoding cache and rate limiter, is created
/// once and lives as long as the server.
#[derive(Debug)]
pub struct AppState {
    pub spotify: SpotifyClient,
    pub resolver: MarketResolver,
}

impl AppState {
    pub fn new(spotify: SpotifyClient, resolver: MarketResolver) -> Self {
        Self { spotify, resolver }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::search_form))
        .route("/search", get(api::search))
        .route("/health", get(api::health))
        .layer(Extension(state))
}

/// Parses and binds the listen address.
///
/// # Errors
///
/// Fails if the address does not parse or cannot be bound.
pub async fn bind(addr: &str) -> Result<TcpListener> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| Error::Configuration(format!("invalid server address `{}`: {}", addr, e)))?;

    Ok(TcpListener::bind(&addr).await?)
}

/// Serves the app on a bound listener until the process stops.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    info!(
        "Listening on http://{} ({} resolver)",
        listener.local_addr()?,
        state.resolver.kind()
    );

    axum::serve(listener, router(state)).await?;
    Ok(())
}
