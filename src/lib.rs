//! A web app for exploring a spreadsheet of financial transactions.
//!
//! Upload an Excel workbook or CSV file with a `Date` and an `Amount` column,
//! then browse summary statistics, KPIs, monthly trends and a comparison of
//! two periods. Pages are served as HTML; the same analysis is available as
//! JSON.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

pub mod analysis;
pub mod loader;
pub mod transaction;

mod alert;
mod api;
mod app_state;
mod charts;
mod descriptive;
mod endpoints;
mod error;
mod exploratory;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod preview;
mod routing;
mod session;
mod upload;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, DEFAULT_MAX_UPLOAD_BYTES};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
