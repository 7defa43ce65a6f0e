//! Transaction and account types and the in-memory copy of the transaction sheet.

use std::sync::{PoisonError, RwLock};

/// Identifies a transaction by its 1-based row position in the sheet.
pub type TransactionId = usize;

/// A row of the transaction sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The 1-based position of the row below the header.
    pub id: TransactionId,
    /// The date as written in the sheet.
    pub date: String,
    /// The client the money moved to or from.
    pub client: String,
    /// The debit amount.
    pub debit: f64,
    /// The credit amount.
    pub credit: f64,
    /// The account the transaction is booked against.
    pub account: String,
    /// Free text describing the transaction.
    pub note: String,
}

/// An account name seen in the transaction sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The position of the account in first-seen order.
    pub id: usize,
    /// The account name.
    pub name: String,
}

/// Collect the distinct, non-empty account names across `transactions`.
///
/// Accounts are returned in the order they are first seen.
pub fn derive_accounts(transactions: &[Transaction]) -> Vec<Account> {
    let mut names: Vec<&str> = Vec::new();

    for transaction in transactions {
        let name = transaction.account.as_str();

        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }

    names
        .into_iter()
        .enumerate()
        .map(|(id, name)| Account {
            id,
            name: name.to_owned(),
        })
        .collect()
}

/// Set the account of the transaction with `id` and return the updated
/// transaction, or `None` if no transaction has that ID.
pub fn apply_account_update<'a>(
    transactions: &'a mut [Transaction],
    id: TransactionId,
    account: &str,
) -> Option<&'a Transaction> {
    let transaction = transactions
        .iter_mut()
        .find(|transaction| transaction.id == id)?;
    transaction.account = account.to_owned();

    Some(transaction)
}

/// The transactions most recently fetched from the sheet.
///
/// Account edits are patched in here after the sheet accepts them, since the
/// service does not send back the updated row.
#[derive(Debug, Default)]
pub struct LoadedTransactions {
    transactions: RwLock<Vec<Transaction>>,
}

impl LoadedTransactions {
    /// Replace the loaded transactions with a fresh copy from the sheet.
    pub fn replace(&self, transactions: Vec<Transaction>) {
        *self
            .transactions
            .write()
            .unwrap_or_else(PoisonError::into_inner) = transactions;
    }

    /// A copy of the loaded transactions.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.transactions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Set the account of one loaded transaction, see [apply_account_update].
    pub fn set_account(&self, id: TransactionId, account: &str) -> Option<Transaction> {
        let mut transactions = self
            .transactions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        apply_account_update(&mut transactions, id, account).cloned()
    }
}

#[cfg(test)]
pub(crate) fn test_transaction(id: TransactionId, client: &str, account: &str) -> Transaction {
    Transaction {
        id,
        date: format!("2025-01-{id:02}"),
        client: client.to_owned(),
        debit: 100.0 * id as f64,
        credit: 0.0,
        account: account.to_owned(),
        note: format!("Invoice {id}"),
    }
}
