//! Helpers shared by the endpoint tests.

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{AppState, build_router, db::initialize};

/// Create app state backed by an in-memory database with the schema created.
pub(crate) fn get_initialized_test_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");
    initialize(&connection).expect("Could not initialize database.");

    AppState::new(connection)
}

/// Create a test server over the full router with the schema created.
pub(crate) fn get_initialized_test_server() -> (AppState, TestServer) {
    let state = get_initialized_test_state();
    let server =
        TestServer::try_new(build_router(state.clone())).expect("Could not create test server.");

    (state, server)
}

/// Create a test server over the full router with an empty database.
pub(crate) fn get_uninitialized_test_server() -> (AppState, TestServer) {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");
    let state = AppState::new(connection);
    let server =
        TestServer::try_new(build_router(state.clone())).expect("Could not create test server.");

    (state, server)
}
