//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::Error;

/// The state of the REST server.
///
/// Cloning the state is cheap; all clones share the same database connection.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] around an open SQLite database connection.
    ///
    /// The schema is not created here, that is done on request by the
    /// `/init-db` endpoint or by calling [crate::initialize_db].
    pub fn new(db_connection: Connection) -> Self {
        Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
        }
    }

    /// Lock the database connection for the duration of a request.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the lock has been poisoned.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}
