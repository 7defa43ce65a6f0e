//! The summary page: balances per client and charts of revenue and activity.

mod charts;
mod core;
mod page;

pub use self::core::{ClientBalance, DailyTransactions, MonthlyRevenue, SummaryData};
pub use page::get_summary_page;
