//! REST API over the balance calculation.
//!
//! Provides three GET endpoints:
//! - `/balance/{ags}/{year}`: the complete balance
//! - `/balance/{ags}/{year}/indicators`: build-rate indicators
//! - `/municipalities`: known municipalities

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::refdata::RefData;

pub use self::types::{ErrorResponse, IndicatorsResponse, MunicipalityEntry};

/// Immutable application state shared across all request handlers.
///
/// Reference data is loaded once before serving; every request computes
/// its balance from it without locking since nothing is mutated.
pub struct AppState {
    /// Reference data, overrides already applied.
    pub data: RefData,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/balance/{ags}/{year}", get(handlers::get_balance))
        .route("/balance/{ags}/{year}/indicators", get(handlers::get_indicators))
        .route("/municipalities", get(handlers::get_municipalities))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind to `addr` or the
/// server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
