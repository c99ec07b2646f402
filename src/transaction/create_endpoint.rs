//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    transaction::{NewTransaction, Transaction, TransactionType, core::create_transaction},
};

/// The JSON body for creating a transaction.
///
/// Every field is optional here so that missing fields are reported with the
/// same message, see [NewTransaction::try_from].
#[derive(Debug, Default, Deserialize)]
pub struct TransactionPayload {
    /// Text detailing the transaction.
    pub description: Option<String>,
    /// The value of the transaction.
    pub amount: Option<AmountInput>,
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// An amount given either as a JSON number or as a string, e.g. `12.5` or `"12.5"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number.
    Number(f64),
    /// A JSON string holding a number.
    Text(String),
}

impl AmountInput {
    /// A numeric zero counts as empty, the string `"0"` does not.
    fn is_empty(&self) -> bool {
        match self {
            AmountInput::Number(number) => *number == 0.0,
            AmountInput::Text(text) => text.is_empty(),
        }
    }

    fn to_f64(&self) -> Result<f64, Error> {
        let amount = match self {
            AmountInput::Number(number) => *number,
            AmountInput::Text(text) => text.trim().parse().map_err(|_| Error::InvalidAmount)?,
        };

        if amount.is_finite() {
            Ok(amount)
        } else {
            Err(Error::InvalidAmount)
        }
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|text| !text.is_empty())
}

impl TryFrom<TransactionPayload> for NewTransaction {
    type Error = Error;

    /// Validate the request body.
    ///
    /// Checks, in order, that every field is present and non-empty, that the
    /// type is "income" or "expense", and that the amount is a number.
    fn try_from(payload: TransactionPayload) -> Result<Self, Self::Error> {
        let (Some(description), Some(amount), Some(kind)) = (
            non_empty(payload.description),
            payload.amount.filter(|amount| !amount.is_empty()),
            non_empty(payload.kind),
        ) else {
            return Err(Error::MissingFields);
        };

        let kind: TransactionType = kind.parse().map_err(|_| Error::InvalidType)?;
        let amount = amount.to_f64()?;

        Ok(NewTransaction {
            description,
            amount,
            kind,
        })
    }
}

/// Bodies that could not be read keep the extractor's status, e.g. 413 for an
/// oversized body. Everything else about a bad body is a 400.
fn body_rejection_error(rejection: JsonRejection) -> Error {
    match rejection {
        JsonRejection::BytesRejection(_) => Error::UnreadableBody {
            status: rejection.status(),
            message: rejection.body_text(),
        },
        _ => Error::InvalidBody(rejection.body_text()),
    }
}

/// A route handler for creating a new transaction, responds with the stored transaction.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<Json<Transaction>, Error> {
    let Json(payload) = payload.map_err(body_rejection_error)?;
    let new_transaction = NewTransaction::try_from(payload)?;

    let connection = state.connection()?;
    let transaction = create_transaction(new_transaction, &connection)?;
    tracing::debug!("created transaction {}", transaction.id);

    Ok(Json(transaction))
}
