//! The transaction sheet: the table of transactions and editing their accounts.

mod core;
mod transactions_page;
mod update_endpoint;

pub use self::core::{LoadedTransactions, Transaction, TransactionId};
pub use transactions_page::get_transactions_page;
pub use update_endpoint::update_account_endpoint;

#[cfg(test)]
pub(crate) use self::core::test_transaction;
