//! Liveness and database connectivity checks.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    db::{DatabaseTime, ping},
};

/// The text served on the root route.
pub const RUNNING_MESSAGE: &str = "Finance Zhafira Backend Running";

/// Confirm that the server process is up.
pub async fn get_root() -> &'static str {
    RUNNING_MESSAGE
}

/// Run a trivial query and respond with its rows, e.g. `[{"now": "..."}]`.
pub async fn get_test_db(
    State(state): State<AppState>,
) -> Result<Json<Vec<DatabaseTime>>, Error> {
    let connection = state.connection()?;
    let rows = ping(&connection)?;

    Ok(Json(rows))
}
