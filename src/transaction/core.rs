//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Type, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned.
    Income,
    /// Money that was spent.
    Expense,
}

impl TransactionType {
    /// The name used for this type in JSON and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// A string that is neither `income` nor `expense`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction type \"{0}\"")]
pub struct UnknownTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(UnknownTransactionType(other.to_owned())),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are created with [create_transaction] and are never changed
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: i64,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// When the transaction was recorded, set by the database.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A validated request to record a transaction.
///
/// The ID and timestamp are assigned by the database on insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money, the sign is not checked.
    pub amount: f64,
    /// Whether the money was earned or spent.
    pub kind: TransactionType,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a new transaction and return the stored row.
///
/// Identical calls create distinct rows.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error,
/// e.g. the transaction table has not been created.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO transactions (description, amount, type)
             VALUES (?1, ?2, ?3)
             RETURNING id, description, amount, type, created_at",
        )?
        .query_row(
            (
                transaction.description,
                transaction.amount,
                transaction.kind,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve every transaction, most recent first.
///
/// Transactions recorded at the same instant are ordered by descending ID.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, description, amount, type, created_at FROM transactions
             ORDER BY created_at DESC, id DESC",
        )?
        .query_map([], map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transactions", [], |row| row.get(0))
        .map_err(Error::from)
}

/// Create the transaction table in the database.
///
/// `created_at` is stored as UTC text with millisecond precision.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT,
                amount NUMERIC NOT NULL,
                type VARCHAR(20) NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
                )",
        (),
    )?;

    Ok(())
}

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]");
const TIMESTAMP_FORMAT_WHOLE_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Parse a UTC timestamp written by SQLite, with or without fractional seconds.
fn parse_timestamp(text: &str) -> Result<OffsetDateTime, time::error::Parse> {
    PrimitiveDateTime::parse(text, TIMESTAMP_FORMAT)
        .or_else(|_| PrimitiveDateTime::parse(text, TIMESTAMP_FORMAT_WHOLE_SECONDS))
        .map(PrimitiveDateTime::assume_utc)
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let description = row.get(1)?;
    let amount = row.get(2)?;
    let kind = row.get(3)?;
    let raw_created_at: String = row.get(4)?;
    let created_at = parse_timestamp(&raw_created_at).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(error))
    })?;

    Ok(Transaction {
        id,
        description,
        amount,
        kind,
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        db::initialize,
        transaction::{NewTransaction, TransactionType, count_transactions, create_transaction},
    };

    use super::{get_all_transactions, parse_timestamp};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn new_transaction(amount: f64, kind: TransactionType) -> NewTransaction {
        NewTransaction {
            description: "test".to_owned(),
            amount,
            kind,
        }
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let result = create_transaction(
            NewTransaction {
                description: "Salary".to_owned(),
                amount: 1234.5,
                kind: TransactionType::Income,
            },
            &conn,
        );

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.id, 1);
                assert_eq!(transaction.description.as_deref(), Some("Salary"));
                assert_eq!(transaction.amount, 1234.5);
                assert_eq!(transaction.kind, TransactionType::Income);
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn identical_transactions_get_distinct_ids() {
        let conn = get_test_connection();

        let first = create_transaction(new_transaction(5.0, TransactionType::Expense), &conn)
            .expect("Could not create transaction");
        let second = create_transaction(new_transaction(5.0, TransactionType::Expense), &conn)
            .expect("Could not create transaction");

        assert_ne!(first.id, second.id);
        assert_eq!(count_transactions(&conn).unwrap(), 2);
    }

    #[test]
    fn create_fails_without_table() {
        let conn = Connection::open_in_memory().unwrap();

        let result = create_transaction(new_transaction(1.0, TransactionType::Income), &conn);

        match result {
            Err(Error::SqlError(error)) => {
                assert!(error.to_string().contains("no such table"), "got {error}")
            }
            other => panic!("Expected an SQL error, got {other:?}"),
        }
    }

    #[test]
    fn lists_newest_first() {
        let conn = get_test_connection();
        for (amount, created_at) in [
            (1.0, "2025-01-01 09:00:00.000"),
            (2.0, "2025-03-01 09:00:00.000"),
            (3.0, "2025-02-01 09:00:00.000"),
        ] {
            conn.execute(
                "INSERT INTO transactions (description, amount, type, created_at)
                 VALUES ('seeded', ?1, 'income', ?2)",
                (amount, created_at),
            )
            .unwrap();
        }

        let transactions = get_all_transactions(&conn).expect("Could not get transactions");

        let amounts: Vec<f64> = transactions.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn ties_are_broken_by_id() {
        let conn = get_test_connection();
        for amount in [1.0, 2.0, 3.0] {
            conn.execute(
                "INSERT INTO transactions (description, amount, type, created_at)
                 VALUES ('seeded', ?1, 'expense', '2025-01-01 09:00:00.000')",
                (amount,),
            )
            .unwrap();
        }

        let transactions = get_all_transactions(&conn).expect("Could not get transactions");

        let ids: Vec<i64> = transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn lists_empty_table() {
        let conn = get_test_connection();

        let transactions = get_all_transactions(&conn).expect("Could not get transactions");

        assert!(transactions.is_empty());
    }

    #[test]
    fn unknown_type_in_database_is_an_error() {
        let conn = get_test_connection();
        conn.execute(
            "INSERT INTO transactions (description, amount, type) VALUES ('x', 1, 'transfer')",
            (),
        )
        .unwrap();

        let result = get_all_transactions(&conn);

        assert!(matches!(result, Err(Error::SqlError(_))), "got {result:?}");
    }

    #[test]
    fn parses_timestamps_with_and_without_fractions() {
        assert_eq!(
            parse_timestamp("2025-10-05 12:30:45.250").unwrap(),
            datetime!(2025-10-05 12:30:45.25 UTC)
        );
        assert_eq!(
            parse_timestamp("2025-10-05 12:30:45").unwrap(),
            datetime!(2025-10-05 12:30:45 UTC)
        );
    }
}
