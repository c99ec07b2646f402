//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the validated `NewTransaction` request
//! - Database functions for storing and listing transactions
//! - Route handlers for creating and listing transactions

mod core;
mod create_endpoint;
mod list_endpoint;

pub use self::core::{NewTransaction, Transaction, TransactionType, create_transaction_table};
pub use create_endpoint::create_transaction_endpoint;
pub use list_endpoint::get_transactions_endpoint;

#[cfg(test)]
pub use self::core::{count_transactions, create_transaction};
