//! Middleware that only lets requests through while someone is logged in.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    auth::redirect::{build_log_in_redirect_url, build_log_in_redirect_url_from_target},
    endpoints,
    session::Session,
};

/// The state needed for the session guard.
#[derive(Clone)]
pub struct GuardState {
    pub session: Arc<Session>,
}

impl FromRef<AppState> for GuardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
        }
    }
}

#[inline]
async fn session_guard_internal(
    state: GuardState,
    mut request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
) -> Response {
    let Some(user) = state.session.current_user() else {
        let log_in_redirect_url = build_log_in_redirect_url(&request).unwrap_or_else(|| {
            tracing::warn!("Could not build a redirect URL for the request. Falling back to summary.");

            build_log_in_redirect_url_from_target(endpoints::SUMMARY_VIEW)
                .unwrap_or_else(|| endpoints::LOG_IN_VIEW.to_owned())
        });

        return get_redirect(&log_in_redirect_url);
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Middleware function that checks that a user is logged in.
/// The user is placed into the request and the request executed normally if so, otherwise a redirect to the log-in page is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user): Extension<User>` to receive the user.
pub async fn session_guard(State(state): State<GuardState>, request: Request, next: Next) -> Response {
    session_guard_internal(state, request, next, |redirect_url| {
        Redirect::to(redirect_url).into_response()
    })
    .await
}

/// Middleware function that checks that a user is logged in.
/// The user is placed into the request and the request executed normally if so, otherwise a HTMX redirect to the log-in page is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user): Extension<User>` to receive the user.
pub async fn session_guard_hx(
    State(state): State<GuardState>,
    request: Request,
    next: Next,
) -> Response {
    session_guard_internal(state, request, next, |redirect_url| {
        (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}
