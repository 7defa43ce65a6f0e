//! Defines the endpoint for changing the account of a transaction.
use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;

use crate::{AppState, Error, api::ApiClient};

use super::{
    core::{LoadedTransactions, TransactionId, derive_accounts},
    transactions_page::transaction_row,
};

pub(super) const EMPTY_ACCOUNT_ERROR_MSG: &str = "Please choose an account.";

/// The state needed to update a transaction's account.
#[derive(Clone)]
pub struct UpdateAccountState {
    pub api: ApiClient,
    pub transactions: Arc<LoadedTransactions>,
}

impl FromRef<AppState> for UpdateAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            transactions: state.transactions.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AccountForm {
    pub account: String,
}

/// Save the new account in the sheet and return the updated table row.
///
/// The loaded transactions only change once the sheet has accepted the
/// update. Failures are returned as an alert.
pub async fn update_account_endpoint(
    State(state): State<UpdateAccountState>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<AccountForm>,
) -> Response {
    let account = form.account.trim();

    if account.is_empty() {
        return Error::Validation(EMPTY_ACCOUNT_ERROR_MSG.to_owned()).into_alert_response();
    }

    if let Err(error) = state
        .api
        .update_transaction_account(transaction_id, account)
        .await
    {
        tracing::error!("Could not update the account of transaction {transaction_id}: {error}");
        return Error::from(error).into_alert_response();
    }

    let Some(transaction) = state.transactions.set_account(transaction_id, account) else {
        tracing::warn!("Transaction {transaction_id} was updated but is not loaded");
        return Error::MissingTransaction(transaction_id).into_alert_response();
    };

    let accounts = derive_accounts(&state.transactions.snapshot());

    transaction_row(&transaction, &accounts).into_response()
}
