//! Defines the endpoint for listing every transaction.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    transaction::{Transaction, core::get_all_transactions},
};

/// A route handler that responds with all transactions, most recent first.
pub async fn get_transactions_endpoint(
    State(state): State<AppState>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let connection = state.connection()?;
    let transactions = get_all_transactions(&connection)?;

    Ok(Json(transactions))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        ErrorBody, endpoints,
        test_utils::{get_initialized_test_server, get_uninitialized_test_server},
        transaction::Transaction,
    };

    #[tokio::test]
    async fn empty_table_gives_empty_list() {
        let (_, server) = get_initialized_test_server();

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Transaction>>(), vec![]);
    }

    #[tokio::test]
    async fn lists_created_transactions_newest_first() {
        let (_, server) = get_initialized_test_server();
        for (description, amount, kind) in [
            ("first", 100, "income"),
            ("second", 30, "expense"),
            ("third", 50, "income"),
        ] {
            server
                .post(endpoints::TRANSACTIONS)
                .json(&json!({"description": description, "amount": amount, "type": kind}))
                .await
                .assert_status_ok();
        }

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status_ok();
        let transactions = response.json::<Vec<Transaction>>();
        let descriptions: Vec<_> = transactions
            .iter()
            .filter_map(|transaction| transaction.description.as_deref())
            .collect();
        assert_eq!(descriptions, vec!["third", "second", "first"]);
        assert!(
            transactions
                .windows(2)
                .all(|pair| pair[0].created_at >= pair[1].created_at),
            "transactions are not ordered by creation time: {transactions:#?}"
        );
    }

    #[tokio::test]
    async fn store_error_is_a_server_error() {
        let (_, server) = get_uninitialized_test_server();

        let response = server.get(endpoints::TRANSACTIONS).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            response
                .json::<ErrorBody>()
                .error
                .contains("no such table")
        );
    }
}
