//! Summary report of income, expenses and net profit.

use axum::{Json, extract::State};
use rusqlite::{Connection, TransactionBehavior};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, transaction::TransactionType};

/// Totals over every recorded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of all income, zero if there is none.
    pub total_income: f64,
    /// The sum of all expenses, zero if there are none.
    pub total_expense: f64,
    /// `total_income - total_expense`.
    pub net_profit: f64,
}

impl Summary {
    /// Create a summary from the two totals.
    pub fn new(total_income: f64, total_expense: f64) -> Self {
        Self {
            total_income,
            total_expense,
            net_profit: total_income - total_expense,
        }
    }
}

fn sum_by_type(kind: TransactionType, connection: &Connection) -> Result<f64, rusqlite::Error> {
    connection.query_row(
        "SELECT TOTAL(amount) FROM transactions WHERE type = ?1",
        (kind,),
        |row| row.get(0),
    )
}

/// Sum the income and the expenses.
///
/// The two sums are read in one transaction so they see the same rows even if
/// another connection writes in between.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_summary(connection: &Connection) -> Result<Summary, Error> {
    let transaction =
        rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Deferred)?;

    let total_income = sum_by_type(TransactionType::Income, &transaction)?;
    let total_expense = sum_by_type(TransactionType::Expense, &transaction)?;

    transaction.commit()?;

    Ok(Summary::new(total_income, total_expense))
}

/// A route handler that responds with the [Summary] of all transactions.
pub async fn get_summary_endpoint(State(state): State<AppState>) -> Result<Json<Summary>, Error> {
    let connection = state.connection()?;
    let summary = get_summary(&connection)?;

    Ok(Json(summary))
}
