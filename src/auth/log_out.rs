//! Route handler for logging out.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::{AppState, endpoints, session::Session};

#[derive(Clone)]
pub struct LogOutState {
    pub session: Arc<Session>,
}

impl FromRef<AppState> for LogOutState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
        }
    }
}

/// Forget the current user and send the browser to the log-in page.
pub async fn get_log_out(State(state): State<LogOutState>) -> Response {
    state.session.log_out();

    Redirect::to(endpoints::LOG_IN_VIEW).into_response()
}
