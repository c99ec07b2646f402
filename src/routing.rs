//! Application router configuration.

use axum::{
    Json, Router,
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::{
    AppState, ErrorBody, endpoints,
    health::{get_root, get_test_db},
    init_db::get_init_db,
    logging::logging_middleware,
    report::get_summary_endpoint,
    transaction::{create_transaction_endpoint, get_transactions_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route(endpoints::ROOT, get(get_root))
        .route(endpoints::TEST_DB, get(get_test_db))
        .route(endpoints::INIT_DB, get(get_init_db))
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware));

    add_tracing_layer(router)
}

/// Respond to a request for a route that does not exist.
async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_owned(),
        }),
    )
        .into_response()
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but `Error` already
        // logs its own failures, so disable that.
        .on_failure(());

    router.layer(tracing_layer)
}
