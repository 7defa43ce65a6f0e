//! This file defines the routes for displaying the log-in page and handling log-in requests.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    api::ApiClient,
    auth::redirect::normalize_redirect_url,
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, log_in_card, loading_spinner,
        BUTTON_PRIMARY_STYLE,
    },
    session::Session,
};

pub const EMPTY_CREDENTIALS_ERROR_MSG: &str = "Username and password cannot be empty.";

fn log_in_form(username: &str, error_message: Option<&str>, redirect_url: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#username, #password, #submit-button"
            hx-swap="outerHTML"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(redirect_url) = redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }

            div
            {
                label for="username" class=(FORM_LABEL_STYLE) { "Username" }

                input
                    type="text"
                    name="username"
                    id="username"
                    autocomplete="username"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    autofocus
                    value=(username);
            }

            div
            {
                label for="password" class=(FORM_LABEL_STYLE) { "Password" }

                input
                    type="password"
                    name="password"
                    id="password"
                    placeholder="••••••••"
                    autocomplete="current-password"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }

            button
                type="submit" id="submit-button" tabindex="0"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Log in"
            }
        }
    }
}

fn parse_redirect_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    match raw_url.and_then(normalize_redirect_url) {
        Some(redirect_url) => Some(redirect_url),
        None => {
            if let Some(redirect_url) = raw_url {
                tracing::warn!("Invalid redirect URL from {source}: {redirect_url}");
            }
            None
        }
    }
}

/// The state needed to perform a login.
#[derive(Clone)]
pub struct LoginState {
    pub api: ApiClient,
    pub session: Arc<Session>,
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            session: state.session.clone(),
        }
    }
}

/// Display the log-in page.
///
/// Shows the error from the last failed attempt, if any.
pub async fn get_log_in_page(
    State(state): State<LoginState>,
    Query(query): Query<RedirectQuery>,
) -> Response {
    let redirect_url = parse_redirect_url(query.redirect_url.as_deref(), "log-in query");
    let last_error = state.session.last_error();
    let log_in_form = log_in_form("", last_error.as_deref(), redirect_url.as_deref());
    let content = log_in_card("Log in to your account", &log_in_form);
    base("Log In", &[], &content).into_response()
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request the user becomes the session user and the
/// client is redirected to the requested page, or the summary page.
/// Otherwise, the form is returned with an error message explaining the problem.
pub async fn post_log_in(State(state): State<LoginState>, Form(user_data): Form<LogInData>) -> Response {
    let redirect_url = parse_redirect_url(user_data.redirect_url.as_deref(), "log-in form");
    let redirect_url = redirect_url.as_deref();
    let username = user_data.username.trim();

    if username.is_empty() || user_data.password.trim().is_empty() {
        return log_in_form(username, Some(EMPTY_CREDENTIALS_ERROR_MSG), redirect_url).into_response();
    }

    if state.session.is_loading() {
        tracing::debug!("{username} is logging in while another log in is in flight");
    }

    match state
        .session
        .log_in(&state.api, username, &user_data.password)
        .await
    {
        Ok(_) => (
            HxRedirect(redirect_url.unwrap_or(endpoints::SUMMARY_VIEW).to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => log_in_form(username, Some(&error.to_string()), redirect_url).into_response(),
    }
}

#[derive(Deserialize)]
pub struct RedirectQuery {
    pub redirect_url: Option<String>,
}

/// The raw data entered by the user in the log-in form.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    pub username: String,

    pub password: String,

    /// Optional URL to redirect to after logging in.
    /// Only accepted from the log-in form submission.
    pub redirect_url: Option<String>,
}

#[cfg(test)]
mod log_in_page_tests {
    use std::sync::Arc;

    use axum::{
        Form,
        extract::{Query, State},
        http::StatusCode,
    };

    use crate::{
        endpoints,
        session::Session,
        test_utils::{
            assert_content_type, assert_form_error_message, assert_form_input,
            assert_form_submit_button, assert_hx_endpoint, assert_hx_redirect, assert_valid_html,
            must_get_form, parse_html_document, parse_html_fragment, stub_api,
        },
    };

    use super::{
        EMPTY_CREDENTIALS_ERROR_MSG, LogInData, LoginState, RedirectQuery, get_log_in_page,
        post_log_in,
    };

    fn state_replying(bodies: &[&str]) -> LoginState {
        let (api, _) = stub_api(bodies);

        LoginState {
            api,
            session: Arc::new(Session::default()),
        }
    }

    fn form(username: &str, password: &str, redirect_url: Option<&str>) -> Form<LogInData> {
        Form(LogInData {
            username: username.to_owned(),
            password: password.to_owned(),
            redirect_url: redirect_url.map(str::to_owned),
        })
    }

    #[tokio::test]
    async fn log_in_page_displays_form() {
        let state = state_replying(&[]);

        let response =
            get_log_in_page(State(state), Query(RedirectQuery { redirect_url: None })).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");

        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::LOG_IN_API, "hx-post");
        assert_form_input(&form, "username", "text");
        assert_form_input(&form, "password", "password");
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn log_in_page_keeps_valid_redirect_url() {
        let state = state_replying(&[]);

        let response = get_log_in_page(
            State(state),
            Query(RedirectQuery {
                redirect_url: Some("/transactions".to_owned()),
            }),
        )
        .await;

        let document = parse_html_document(response).await;
        let selector = scraper::Selector::parse("input[name=redirect_url]").unwrap();
        let input = document.select(&selector).next().expect("No redirect input");
        assert_eq!(input.value().attr("value"), Some("/transactions"));
    }

    #[tokio::test]
    async fn successful_log_in_redirects_to_summary() {
        let state = state_replying(&[r#"{"ok": true, "user": {"username": "budi", "role": "Admin"}}"#]);
        let session = state.session.clone();

        let response = post_log_in(State(state), form("budi", "hunter2", None)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::SUMMARY_VIEW);
        assert_eq!(
            session.current_user().map(|user| user.role),
            Some("Admin".to_owned())
        );
    }

    #[tokio::test]
    async fn successful_log_in_redirects_to_requested_page() {
        let state = state_replying(&[r#"{"ok": true, "role": "User"}"#]);

        let response = post_log_in(
            State(state),
            form("budi", "hunter2", Some("/transactions")),
        )
        .await;

        assert_hx_redirect(&response, endpoints::TRANSACTIONS_VIEW);
    }

    #[tokio::test]
    async fn log_in_ignores_external_redirect() {
        let state = state_replying(&[r#"{"ok": true, "role": "User"}"#]);

        let response = post_log_in(
            State(state),
            form("budi", "hunter2", Some("https://example.com")),
        )
        .await;

        assert_hx_redirect(&response, endpoints::SUMMARY_VIEW);
    }

    #[tokio::test]
    async fn rejected_log_in_shows_server_message() {
        let state = state_replying(&[r#"{"ok": false, "error": "Invalid username or password"}"#]);
        let session = state.session.clone();

        let response = post_log_in(State(state), form("budi", "wrong", None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Invalid username or password");
        assert_eq!(session.current_user(), None);
        assert_eq!(
            session.last_error().as_deref(),
            Some("Invalid username or password")
        );
    }

    #[tokio::test]
    async fn blank_credentials_are_not_sent() {
        let (api, transport) = stub_api(&[]);
        let state = LoginState {
            api,
            session: Arc::new(Session::default()),
        };

        let response = post_log_in(State(state), form("  ", "hunter2", None)).await;

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, EMPTY_CREDENTIALS_ERROR_MSG);
        assert!(transport.requests().is_empty());
    }
}
