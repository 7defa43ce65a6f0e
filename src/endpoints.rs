//! The dashboard's route URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}/account', use [format_endpoint].

use std::fmt::Display;

/// The root route which redirects to the summary page.
pub const ROOT: &str = "/";
/// The landing page for logged in users.
pub const SUMMARY_VIEW: &str = "/summary";
/// The page listing the transaction sheet.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for uploading CSV files.
pub const UPLOAD_VIEW: &str = "/upload";
/// The page for adding a client.
pub const NEW_CLIENT_VIEW: &str = "/clients/new";
/// The page for adding a user.
pub const NEW_USER_VIEW: &str = "/users/new";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to set the account of a transaction.
pub const TRANSACTION_ACCOUNT: &str = "/api/transactions/{transaction_id}/account";
/// The route to upload a CSV file.
pub const UPLOAD_API: &str = "/api/upload";
/// The route to add a client.
pub const CLIENTS_API: &str = "/api/clients";
/// The route to add a user.
pub const USERS_API: &str = "/api/users";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::SUMMARY_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::UPLOAD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_CLIENT_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_USER_VIEW);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN_VIEW);

        assert_endpoint_is_valid_uri(endpoints::LOG_IN_API);
        assert_endpoint_is_valid_uri(endpoints::LOG_OUT);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::TRANSACTION_ACCOUNT, 1));
        assert_endpoint_is_valid_uri(endpoints::UPLOAD_API);
        assert_endpoint_is_valid_uri(endpoints::CLIENTS_API);
        assert_endpoint_is_valid_uri(endpoints::USERS_API);
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint(endpoints::TRANSACTION_ACCOUNT, 12);

        assert_eq!(formatted_path, "/api/transactions/12/account");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn unclosed_parameter_is_replaced_to_the_end() {
        assert_eq!(format_endpoint("/hello/{world", 3), "/hello/3");
    }
}
