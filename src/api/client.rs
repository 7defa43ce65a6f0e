//! The operations the dashboard performs against the spreadsheet service.

use std::{fmt::Display, sync::Arc};

use serde_json::Value;

use crate::{
    api::{
        ApiError, Transport,
        error::DEFAULT_REJECTION_MESSAGE,
        normalize::{
            summary_from_reply, transactions_from_table, upload_count_from_reply,
            user_from_log_in_reply,
        },
    },
    client::Client,
    csv_import::CsvRecord,
    summary::SummaryData,
    transaction::{Transaction, TransactionId},
    user::{Role, User},
};

/// The `action` field the service dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LogIn,
    AddUser,
    AddClient,
    GetTransactions,
    UpdateTransaction,
    UploadDatabase,
    GetSummary,
}

impl Action {
    /// The name of the action as the service expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::LogIn => "login",
            Action::AddUser => "addUser",
            Action::AddClient => "addClient",
            Action::GetTransactions => "getTransactions",
            Action::UpdateTransaction => "updateTransaction",
            Action::UploadDatabase => "uploadDatabase",
            Action::GetSummary => "getSummary",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The number of rows the service appended after an upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// How many rows were added to the sheet.
    pub count: u64,
}

/// A typed client for the spreadsheet service.
///
/// Cheap to clone, all clones share the same transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client that sends its requests through `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send `action` with `params` and return the parsed JSON reply.
    ///
    /// # Errors
    /// Returns an error if the request fails, the reply is empty or not JSON,
    /// or the reply carries `ok: false`.
    pub async fn submit(&self, action: Action, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let mut form = Vec::with_capacity(params.len() + 1);
        form.push(("action", action.as_str().to_owned()));
        form.extend(params.iter().map(|(key, value)| (*key, value.clone())));

        tracing::debug!("Sending {action} to the spreadsheet service");

        let body = self.transport.post_form(&form).await?;

        if body.trim().is_empty() {
            tracing::error!("Empty reply to {action}");
            return Err(ApiError::EmptyResponse);
        }

        let reply: Value = serde_json::from_str(&body).map_err(|error| {
            tracing::error!("Reply to {action} is not JSON ({error}): {body}");
            ApiError::InvalidJson
        })?;

        if reply.get("ok") == Some(&Value::Bool(false)) {
            let message = reply
                .get("error")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .unwrap_or(DEFAULT_REJECTION_MESSAGE);

            tracing::warn!("The service rejected {action}: {message}");
            return Err(ApiError::Rejected(message.to_owned()));
        }

        Ok(reply)
    }

    /// Check the credentials and return the user the service knows them by.
    pub async fn log_in(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let reply = self
            .submit(
                Action::LogIn,
                &[
                    ("username", username.to_owned()),
                    ("password", password.to_owned()),
                ],
            )
            .await?;

        user_from_log_in_reply(&reply, username)
    }

    /// Register a new dashboard user.
    pub async fn add_user(&self, username: &str, role: Role, password: &str) -> Result<User, ApiError> {
        self.submit(
            Action::AddUser,
            &[
                ("username", username.to_owned()),
                ("role", role.as_str().to_owned()),
                ("password", password.to_owned()),
            ],
        )
        .await?;

        Ok(User {
            username: username.to_owned(),
            role: role.as_str().to_owned(),
        })
    }

    /// Register a new client.
    pub async fn add_client(&self, name: &str) -> Result<Client, ApiError> {
        self.submit(Action::AddClient, &[("clientName", name.to_owned())])
            .await?;

        Ok(Client::new(name))
    }

    /// Fetch every row of the transaction sheet.
    pub async fn get_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let reply = self.submit(Action::GetTransactions, &[]).await?;

        transactions_from_table(reply)
    }

    /// Set the account of the transaction `id`.
    ///
    /// # Errors
    /// IDs start at 1, so an `id` of 0 is rejected without contacting the
    /// service.
    pub async fn update_transaction_account(
        &self,
        id: TransactionId,
        account: &str,
    ) -> Result<(), ApiError> {
        let Some(row_index) = id.checked_sub(1) else {
            return Err(ApiError::Rejected(format!(
                "Transaction ID {id} is invalid, IDs start at 1."
            )));
        };

        self.submit(
            Action::UpdateTransaction,
            &[
                ("rowIndex", row_index.to_string()),
                ("akun", account.to_owned()),
            ],
        )
        .await?;

        Ok(())
    }

    /// Append `records` to the transaction sheet.
    pub async fn upload_records(&self, records: &[CsvRecord]) -> Result<UploadSummary, ApiError> {
        let records =
            serde_json::to_string(records).map_err(|error| ApiError::Encoding(error.to_string()))?;

        let reply = self
            .submit(Action::UploadDatabase, &[("records", records)])
            .await?;

        Ok(UploadSummary {
            count: upload_count_from_reply(&reply),
        })
    }

    /// Fetch the pre-aggregated figures for the summary page.
    pub async fn get_summary(&self) -> Result<SummaryData, ApiError> {
        let reply = self.submit(Action::GetSummary, &[]).await?;

        summary_from_reply(reply)
    }
}
