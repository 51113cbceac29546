//! Penguins is a small web dashboard for exploring the Palmer penguins
//! dataset.
//!
//! The dashboard filters the penguins by species and island and renders the
//! filtered rows as two tables, two histograms and a scatterplot. This
//! library provides the HTTP server that serves the page and its outputs as
//! HTML.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod controls;
mod dashboard;
mod dataset;
mod endpoints;
mod error;
mod filter;
mod html;
mod internal_server_error;
mod not_found;
mod pagination;
mod routing;

pub use app_state::{AppState, DashboardConfig};
pub use controls::{BinCount, Controls};
pub use dashboard::Output;
pub use dataset::{Column, Dataset, Measurement, Penguin, Sex};
pub use error::Error;
pub use filter::{FilterCache, FilteredView, NotReady, Selection, filter_penguins};
pub use pagination::PaginationConfig;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for ctrl+c: {error}");
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
                tracing::error!("Could not listen for the terminate signal: {error}");
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
