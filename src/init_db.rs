//! The endpoint that creates the database tables.

use axum::extract::State;

use crate::{AppState, Error, db::initialize};

/// The text sent once the tables exist.
pub const INITIALIZED_MESSAGE: &str = "Database Initialized Successfully";

/// Create any missing tables.
///
/// Safe to call repeatedly. On failure, tables created before the failing
/// statement are kept and the database's error message is returned.
pub async fn get_init_db(State(state): State<AppState>) -> Result<&'static str, Error> {
    let connection = state.connection()?;
    initialize(&connection)?;
    tracing::info!("database tables initialized");

    Ok(INITIALIZED_MESSAGE)
}
