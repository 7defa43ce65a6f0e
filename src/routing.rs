//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post, put},
};

use crate::{
    AppState,
    auth::{get_log_in_page, get_log_out, post_log_in, session_guard, session_guard_hx},
    client::{create_client_endpoint, get_new_client_page},
    csv_import::{get_upload_page, upload_endpoint},
    endpoints,
    not_found::get_404_not_found,
    summary::get_summary_page,
    transaction::{get_transactions_page, update_account_endpoint},
    user::{create_user_endpoint, get_new_user_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in));

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::SUMMARY_VIEW, get(get_summary_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::UPLOAD_VIEW, get(get_upload_page))
        .route(endpoints::NEW_CLIENT_VIEW, get(get_new_client_page))
        .route(endpoints::NEW_USER_VIEW, get(get_new_user_page))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .layer(middleware::from_fn_with_state(state.clone(), session_guard));

    // These POST/PUT routes need to use the HX-REDIRECT header for auth redirects to work properly for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(
                endpoints::TRANSACTION_ACCOUNT,
                put(update_account_endpoint),
            )
            .route(endpoints::UPLOAD_API, post(upload_endpoint))
            .route(endpoints::CLIENTS_API, post(create_client_endpoint))
            .route(endpoints::USERS_API, post(create_user_endpoint))
            .layer(middleware::from_fn_with_state(state.clone(), session_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the summary page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::SUMMARY_VIEW)
}
