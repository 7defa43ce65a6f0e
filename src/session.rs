//! Who is logged in to the dashboard.
//!
//! The dashboard is a single-tenant tool, so there is one session for the
//! whole server, held in memory and lost on restart.

use std::sync::{PoisonError, RwLock};

use crate::{
    api::{ApiClient, ApiError},
    user::User,
};

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    last_error: Option<String>,
    loading: bool,
}

/// The logged-in user along with the outcome of the last log-in attempt.
#[derive(Debug, Default)]
pub struct Session {
    state: RwLock<SessionState>,
}

impl Session {
    /// The logged-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.read(|state| state.user.clone())
    }

    /// The message from the last failed log-in, cleared by the next attempt.
    pub fn last_error(&self) -> Option<String> {
        self.read(|state| state.last_error.clone())
    }

    /// Whether a log-in request is in flight.
    pub fn is_loading(&self) -> bool {
        self.read(|state| state.loading)
    }

    /// Check the credentials with the service and, if they are accepted, make
    /// the returned user the current user.
    ///
    /// # Errors
    /// Returns the adapter error, whose message is also kept as
    /// [Session::last_error].
    pub async fn log_in(&self, api: &ApiClient, username: &str, password: &str) -> Result<User, ApiError> {
        self.write(|state| {
            state.loading = true;
            state.last_error = None;
        });
        let _loading = LoadingGuard { session: self };

        let result = api.log_in(username, password).await;

        self.write(|state| {
            match &result {
                Ok(user) => {
                    tracing::info!("{} logged in with role {}", user.username, user.role);
                    state.user = Some(user.clone());
                }
                Err(error) => {
                    tracing::warn!("Log in as {username} failed: {error}");
                    state.last_error = Some(error.to_string());
                }
            }
        });

        result
    }

    /// Forget the current user.
    pub fn log_out(&self) {
        self.write(|state| {
            if let Some(user) = state.user.take() {
                tracing::info!("{} logged out", user.username);
            }
        });
    }

    fn read<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&*state)
    }

    fn write(&self, f: impl FnOnce(&mut SessionState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *state)
    }
}

/// Clears the loading flag once a log-in attempt finishes, including when the
/// request future is dropped before the service replies.
struct LoadingGuard<'a> {
    session: &'a Session,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.session.write(|state| state.loading = false);
    }
}
