//! Clients of the business, the counterparties of transactions.

mod create;

pub use create::{create_client_endpoint, get_new_client_page};

/// A client registered in the spreadsheet.
///
/// The sheet has no client IDs, so the name doubles as the ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// Identifies the client, same as `client`.
    pub id: String,
    /// The client's name.
    pub client: String,
}

impl Client {
    /// Create a client whose ID is its name.
    pub fn new(name: &str) -> Self {
        Self {
            id: name.to_owned(),
            client: name.to_owned(),
        }
    }
}
