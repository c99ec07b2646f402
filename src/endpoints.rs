//! The API endpoints URIs.

/// The root route, a plain text liveness check.
pub const ROOT: &str = "/";
/// The route that runs a trivial query to check the database connection.
pub const TEST_DB: &str = "/test-db";
/// The route that creates the database tables.
pub const INIT_DB: &str = "/init-db";
/// The route to create and list transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for the income and expense summary.
pub const SUMMARY: &str = "/report/summary";
