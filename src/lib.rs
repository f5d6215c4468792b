//! Budget Tracker is a web app for recording spending and seeing where the
//! money goes.
//!
//! This library provides a REST API that directly serves HTML pages. Entries
//! are kept in an [EntryStore], either a SQLite database or a JSON document
//! on disk, and the dashboard shows the entries that match a search together
//! with the total spent and a chart of spending by category.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod aggregation;
mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod entry;
mod error;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod store;
mod timezone;

pub use aggregation::{
    CategoryTotal, EntrySummary, UNCATEGORIZED_LABEL, category_totals, filter, summarize,
    toggle_status, toggled_status, total_spending,
};
pub use app_state::AppState;
pub use entry::{
    Amount, BudgetEntry, Category, EntryFormData, EntryId, EntryUpdate, NewEntry, PaymentMethod,
    Status, ValidationErrors,
};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use store::{
    ENTRIES_KEY, EntryStore, LocalEntryStore, SharedStore, SqliteEntryStore, create_entry_table,
    share,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`. If a signal handler cannot be
/// installed, the error is logged and that signal is ignored.
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
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
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

#[cfg(test)]
mod test_utils;
