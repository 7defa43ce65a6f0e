//! Implements a struct that holds the state of the dashboard server.

use std::sync::Arc;

use crate::{api::ApiClient, session::Session, transaction::LoadedTransactions};

/// The state of the dashboard server.
///
/// Feature handlers take the parts they need through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    /// The client for the spreadsheet service.
    pub api: ApiClient,

    /// The logged-in user, shared by every request.
    pub session: Arc<Session>,

    /// The transactions shown on the transactions page.
    pub transactions: Arc<LoadedTransactions>,
}

impl AppState {
    /// Create the state for a server that talks to the service through `api`.
    ///
    /// Nobody is logged in and no transactions are loaded.
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            session: Arc::new(Session::default()),
            transactions: Arc::new(LoadedTransactions::default()),
        }
    }
}
