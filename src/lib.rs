//! A small bookkeeping backend for recording income and expenses.
//!
//! This library provides a JSON REST API over a SQLite database: bootstrap the
//! schema, record and list transactions, and summarise them into totals.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use tokio::signal;

mod app_state;
pub mod config;
mod db;
pub mod endpoints;
mod health;
mod init_db;
mod logging;
mod report;
mod routing;
#[cfg(test)]
mod test_utils;
mod transaction;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use report::{Summary, get_summary};
pub use routing::build_router;
pub use transaction::{NewTransaction, Transaction, TransactionType};

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
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::info!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request body could not be read as the expected JSON object.
    ///
    /// Holds the message produced by the JSON extractor.
    #[error("{0}")]
    InvalidBody(String),

    /// The request body could not be read, e.g. because it was too large.
    #[error("{message}")]
    UnreadableBody {
        /// The status reported by the body extractor.
        status: StatusCode,
        /// The extractor's message.
        message: String,
    },

    /// One of `description`, `amount` or `type` was absent, null or empty.
    #[error("All fields are required")]
    MissingFields,

    /// The transaction type was not one of `income` or `expense`.
    #[error("Type must be income or expense")]
    InvalidType,

    /// The amount was given as a string that is not a finite number.
    #[error("Amount must be a number")]
    InvalidAmount,

    /// An error reported by the database.
    ///
    /// The message is passed through to the client unmodified.
    #[error("{0}")]
    SqlError(#[from] rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl Error {
    /// The HTTP status code that this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::UnreadableBody { status, .. } => *status,
            Error::InvalidBody(_)
            | Error::MissingFields
            | Error::InvalidType
            | Error::InvalidAmount => StatusCode::BAD_REQUEST,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// A short description of what went wrong.
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("An unexpected error occurred: {self}");
        } else {
            tracing::debug!("Rejected request: {self}");
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
