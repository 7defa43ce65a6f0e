//! Defines the route handler for the page that displays transactions as a table.
use std::sync::Arc;

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    api::ApiClient,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_SMALL_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, format_number, loading_spinner,
    },
    navigation::dashboard_page,
    user::User,
};

use super::core::{Account, LoadedTransactions, Transaction, derive_accounts};

pub(super) const LOAD_ERROR_MSG: &str =
    "Transactions could not be loaded. Please try again later.";

/// The state needed for the transactions page.
#[derive(Clone)]
pub struct TransactionsState {
    pub api: ApiClient,
    pub transactions: Arc<LoadedTransactions>,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            transactions: state.transactions.clone(),
        }
    }
}

/// Fetch the transaction sheet and render it as a table.
///
/// The fetched rows replace the loaded transactions that account edits are
/// applied to.
pub async fn get_transactions_page(
    State(state): State<TransactionsState>,
    Extension(user): Extension<User>,
) -> Response {
    let content = match state.api.get_transactions().await {
        Ok(transactions) => {
            let accounts = derive_accounts(&transactions);
            let content = transactions_view(&transactions, &accounts);
            state.transactions.replace(transactions);
            content
        }
        Err(error) => {
            tracing::error!("Could not load transactions: {error}");
            html!(
                div class=(PAGE_CONTAINER_STYLE)
                {
                    p class="text-red-500 text-base" role="alert" { (LOAD_ERROR_MSG) }
                }
            )
        }
    };

    dashboard_page(
        "Transactions",
        endpoints::TRANSACTIONS_VIEW,
        Some(&user),
        &[],
        &content,
    )
    .into_response()
}

fn transactions_view(transactions: &[Transaction], accounts: &[Account]) -> Markup {
    html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            @if transactions.is_empty() {
                p class="text-base" { "There are no transactions in the sheet yet." }
            } @else {
                div class="overflow-x-auto rounded shadow-md"
                {
                    table
                        id="transactions"
                        class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Client" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Debit" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Credit" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Note" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Account" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (transaction_row(transaction, accounts))
                            }
                        }
                    }
                }
            }
        }
    )
}

pub(super) fn transaction_row_id(transaction: &Transaction) -> String {
    format!("transaction-{}", transaction.id)
}

/// A table row with a form for changing the transaction's account.
///
/// Saving swaps the row for the one rendered by the update endpoint.
pub(super) fn transaction_row(transaction: &Transaction, accounts: &[Account]) -> Markup {
    let row_id = transaction_row_id(transaction);
    let update_url = format_endpoint(endpoints::TRANSACTION_ACCOUNT, transaction.id);
    let is_known_account = accounts
        .iter()
        .any(|account| account.name == transaction.account);

    html!(
        tr id=(row_id) class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (transaction.client) }
            td class={(TABLE_CELL_STYLE) " text-green-600"} { (format_number(transaction.debit)) }
            td class={(TABLE_CELL_STYLE) " text-red-500"} { (format_number(transaction.credit)) }
            td class=(TABLE_CELL_STYLE) { (transaction.note) }
            td class=(TABLE_CELL_STYLE)
            {
                form
                    hx-put=(update_url)
                    hx-target={"#" (row_id)}
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    hx-disabled-elt="find select, find button"
                    class="flex items-center gap-2"
                {
                    select
                        name="account"
                        aria-label="Account"
                        class="bg-transparent border border-gray-300 dark:border-gray-600 rounded p-1"
                    {
                        @if !is_known_account {
                            option value=(transaction.account) selected disabled hidden
                            {
                                (transaction.account)
                            }
                        }

                        @for account in accounts {
                            option
                                value=(account.name)
                                selected[account.name == transaction.account]
                            {
                                (account.name)
                            }
                        }
                    }

                    button type="submit" class=(BUTTON_SMALL_STYLE)
                    {
                        span class="inline htmx-indicator" { (loading_spinner()) }
                        "Save"
                    }
                }
            }
        }
    )
}
