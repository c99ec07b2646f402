//! Schema bootstrap and connectivity checks for the application's database.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::transaction::create_transaction_table;

/// Create the tables for the domain models if they do not already exist.
///
/// The tables are created in a fixed order: accounts, transactions, customers,
/// products. Each statement runs on its own, so if one fails the tables
/// created before it are left in place and the failing statement's error is
/// returned.
///
/// # Errors
/// Returns the first SQL error encountered.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    create_account_table(connection)?;
    create_transaction_table(connection)?;
    create_customer_table(connection)?;
    create_product_table(connection)?;

    Ok(())
}

/// Create the account table.
///
/// No endpoint reads or writes accounts yet.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(100) NOT NULL,
                type VARCHAR(50) NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Create the customer table.
///
/// No endpoint reads or writes customers yet.
pub fn create_customer_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS customers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(100) NOT NULL,
                phone VARCHAR(50),
                address TEXT
                )",
        (),
    )?;

    Ok(())
}

/// Create the product table.
///
/// No endpoint reads or writes products yet.
pub fn create_product_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(100) NOT NULL,
                price NUMERIC NOT NULL,
                stock INTEGER DEFAULT 0
                )",
        (),
    )?;

    Ok(())
}

/// The row returned by [ping].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseTime {
    /// The database's current time as an RFC 3339 string in UTC.
    pub now: String,
}

/// Run a trivial query to check that the database is reachable.
///
/// # Errors
/// Returns an error if the query fails.
pub fn ping(connection: &Connection) -> Result<Vec<DatabaseTime>, rusqlite::Error> {
    connection
        .prepare("SELECT strftime('%Y-%m-%dT%H:%M:%fZ', 'now') AS now")?
        .query_map([], |row| Ok(DatabaseTime { now: row.get(0)? }))?
        .collect()
}
