//! Reads the loosely-typed replies of the spreadsheet service into our types.
//!
//! The service has changed over time, so most replies come in more than one
//! shape. Each function here accepts every shape we know about.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    api::ApiError,
    summary::{ClientBalance, DailyTransactions, MonthlyRevenue, SummaryData},
    transaction::Transaction,
    user::User,
};

/// Read the user out of a successful log-in reply.
///
/// In order of preference: a nested `user` object, flat `username` and
/// `role` fields, or just `role`, in which case `form_username` (the name the
/// user typed) is used.
pub(super) fn user_from_log_in_reply(reply: &Value, form_username: &str) -> Result<User, ApiError> {
    if let Some(user) = reply.get("user") {
        if let (Some(username), Some(role)) = (truthy_str(user, "username"), truthy_str(user, "role"))
        {
            return Ok(User {
                username: username.to_owned(),
                role: role.to_owned(),
            });
        }
    }

    if let (Some(username), Some(role)) = (truthy_str(reply, "username"), truthy_str(reply, "role"))
    {
        return Ok(User {
            username: username.to_owned(),
            role: role.to_owned(),
        });
    }

    if let Some(role) = truthy_str(reply, "role") {
        return Ok(User {
            username: form_username.to_owned(),
            role: role.to_owned(),
        });
    }

    let received_keys = reply
        .as_object()
        .map(|object| object.keys().cloned().collect::<Vec<_>>().join(", "))
        .unwrap_or_default();

    tracing::error!("Log in reply has no usable user data: {reply}");

    Err(ApiError::UnexpectedReply(format!(
        "Login succeeded but the user data is invalid. Received properties: [{received_keys}]"
    )))
}

fn truthy_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

#[derive(Deserialize)]
struct TableReply {
    headers: Vec<Value>,
    rows: Vec<Vec<Value>>,
}

/// Map the `{headers, rows}` table of the transaction sheet to transactions.
///
/// Headers are matched after lowercasing and trimming. Row positions become
/// the 1-based transaction IDs.
pub(super) fn transactions_from_table(reply: Value) -> Result<Vec<Transaction>, ApiError> {
    let table: TableReply = serde_json::from_value(reply).map_err(|error| {
        tracing::error!("Transaction reply is not a table: {error}");
        ApiError::UnexpectedReply("The transaction data from the server is incomplete.".to_owned())
    })?;

    let headers: Vec<String> = table
        .headers
        .iter()
        .map(|header| cell_text(Some(header)).trim().to_lowercase())
        .collect();

    let column = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let date = column(&["tanggal"]);
    let client = column(&["client", "partner"]);
    let debit = column(&["debet"]);
    let credit = column(&["credit"]);
    let account = column(&["akun"]);
    let note = column(&["keterangan"]);

    let transactions = table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let text = |column: Option<usize>| cell_text(column.and_then(|i| row.get(i)));
            let number = |column: Option<usize>| cell_number(column.and_then(|i| row.get(i)));

            Transaction {
                id: index + 1,
                date: text(date),
                client: text(client),
                debit: number(debit),
                credit: number(credit),
                account: text(account),
                note: text(note),
            }
        })
        .collect();

    Ok(transactions)
}

fn cell_text(cell: Option<&Value>) -> String {
    match cell {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn cell_number(cell: Option<&Value>) -> f64 {
    match cell {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// A value that may arrive as a JSON number or as text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(f64),
    Text(String),
}

fn lenient_number(value: Option<Lenient>) -> f64 {
    match value {
        Some(Lenient::Number(number)) => number,
        Some(Lenient::Text(text)) => text.trim().parse().unwrap_or(0.0),
        None => 0.0,
    }
}

fn lenient_text(value: Option<Lenient>) -> String {
    match value {
        Some(Lenient::Number(number)) => number.to_string(),
        Some(Lenient::Text(text)) => text,
        None => String::new(),
    }
}

#[derive(Deserialize)]
struct RawItem {
    client: Option<String>,
    partner: Option<String>,
    balance: Option<Lenient>,
    ym: Option<Lenient>,
    revenue: Option<Lenient>,
    date: Option<Lenient>,
    trx: Option<Lenient>,
}

impl RawItem {
    /// Older versions of the sheet call the client "partner".
    fn client(&mut self) -> String {
        self.client
            .take()
            .filter(|client| !client.is_empty())
            .or_else(|| self.partner.take())
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSummary {
    total_balance: Option<Vec<RawItem>>,
    monthly_revenue: Option<Vec<RawItem>>,
    daily_transactions: Option<Vec<RawItem>>,
}

/// Read the summary figures out of a `getSummary` reply.
///
/// A reply without `summary.totalBalance` yields empty figures.
pub(super) fn summary_from_reply(reply: Value) -> Result<SummaryData, ApiError> {
    let Some(summary) = reply.get("summary").filter(|summary| !summary.is_null()) else {
        tracing::warn!("Received empty or invalid summary data from the server.");
        return Ok(SummaryData::default());
    };

    let raw: RawSummary = serde_json::from_value(summary.clone()).map_err(|error| {
        tracing::error!("Summary reply has an unexpected shape: {error}");
        ApiError::UnexpectedReply("The summary data from the server is invalid.".to_owned())
    })?;

    let Some(total_balance) = raw.total_balance else {
        tracing::warn!("Received empty or invalid summary data from the server.");
        return Ok(SummaryData::default());
    };

    Ok(SummaryData {
        total_balance: total_balance
            .into_iter()
            .map(|mut item| ClientBalance {
                client: item.client(),
                balance: lenient_number(item.balance.take()),
            })
            .collect(),
        monthly_revenue: raw
            .monthly_revenue
            .unwrap_or_default()
            .into_iter()
            .map(|mut item| MonthlyRevenue {
                client: item.client(),
                ym: lenient_text(item.ym.take()),
                revenue: lenient_number(item.revenue.take()),
            })
            .collect(),
        daily_transactions: raw
            .daily_transactions
            .unwrap_or_default()
            .into_iter()
            .map(|mut item| DailyTransactions {
                client: item.client(),
                date: lenient_text(item.date.take()),
                trx: lenient_number(item.trx.take()),
            })
            .collect(),
    })
}

/// Read how many rows an `uploadDatabase` reply says were appended.
///
/// The count may be a number or text. A missing count means nothing was
/// added, and a count that cannot be read is logged and taken as zero.
pub(super) fn upload_count_from_reply(reply: &Value) -> u64 {
    let Some(count) = reply.get("count").filter(|count| !count.is_null()) else {
        return 0;
    };

    let number = match Lenient::deserialize(count) {
        Ok(Lenient::Number(number)) => Some(number),
        Ok(Lenient::Text(text)) => text.trim().parse::<f64>().ok(),
        Err(_) => None,
    };

    match number.filter(|number| number.is_finite() && *number >= 0.0) {
        Some(number) => number.round() as u64,
        None => {
            tracing::warn!("Could not read the upload count {count}, assuming no rows were added");
            0
        }
    }
}
