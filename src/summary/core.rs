//! The pre-aggregated figures shown on the summary page.

use std::collections::BTreeSet;

use time::{Date, macros::format_description};

/// The balance owed by or to a client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientBalance {
    pub client: String,
    pub balance: f64,
}

/// The revenue from a client in one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRevenue {
    pub client: String,
    /// The month as `YYYY-MM`.
    pub ym: String,
    pub revenue: f64,
}

/// The number of transactions with a client on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTransactions {
    pub client: String,
    pub date: String,
    pub trx: f64,
}

/// Everything the summary page displays, as aggregated by the spreadsheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryData {
    pub total_balance: Vec<ClientBalance>,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub daily_transactions: Vec<DailyTransactions>,
}

impl SummaryData {
    /// Whether there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.total_balance.is_empty()
            && self.monthly_revenue.is_empty()
            && self.daily_transactions.is_empty()
    }

    /// The distinct client names across all three collections, sorted.
    pub fn clients(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .total_balance
            .iter()
            .map(|item| item.client.as_str())
            .chain(self.monthly_revenue.iter().map(|item| item.client.as_str()))
            .chain(
                self.daily_transactions
                    .iter()
                    .map(|item| item.client.as_str()),
            )
            .filter(|name| !name.is_empty())
            .collect();

        names.into_iter().map(str::to_owned).collect()
    }

    /// Keep only the records for `client`.
    pub fn for_client(self, client: &str) -> Self {
        Self {
            total_balance: self
                .total_balance
                .into_iter()
                .filter(|item| item.client == client)
                .collect(),
            monthly_revenue: self
                .monthly_revenue
                .into_iter()
                .filter(|item| item.client == client)
                .collect(),
            daily_transactions: self
                .daily_transactions
                .into_iter()
                .filter(|item| item.client == client)
                .collect(),
        }
    }
}

/// Chart-ready data: one label per x-axis category and one series per client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSeries {
    pub labels: Vec<String>,
    pub series: Vec<(String, Vec<f64>)>,
}

/// Lay out monthly revenue with months in order along the x-axis.
///
/// Months with no revenue for a client are filled with zero.
pub fn revenue_by_month(records: &[MonthlyRevenue]) -> ClientSeries {
    let labels: Vec<String> = records
        .iter()
        .map(|record| record.ym.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let series = group_by_client(
        records
            .iter()
            .map(|record| (&record.client, &record.ym, record.revenue)),
        &labels,
    );

    ClientSeries { labels, series }
}

/// Lay out daily transaction counts with days in calendar order.
///
/// Dates that are not `YYYY-MM-DD` (optionally followed by a time) sort after
/// the ones that are, in text order.
pub fn transactions_by_day(records: &[DailyTransactions]) -> ClientSeries {
    let mut labels: Vec<String> = records
        .iter()
        .map(|record| record.date.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    labels.sort_by_key(|label| (parse_day(label).is_none(), parse_day(label), label.clone()));

    let series = group_by_client(
        records
            .iter()
            .map(|record| (&record.client, &record.date, record.trx)),
        &labels,
    );

    ClientSeries { labels, series }
}

fn group_by_client<'a>(
    values: impl Iterator<Item = (&'a String, &'a String, f64)>,
    labels: &[String],
) -> Vec<(String, Vec<f64>)> {
    let mut series: Vec<(String, Vec<f64>)> = Vec::new();

    for (client, label, value) in values {
        let Some(position) = labels.iter().position(|l| l == label) else {
            continue;
        };

        let index = match series.iter().position(|(name, _)| name == client) {
            Some(index) => index,
            None => {
                series.push((client.clone(), vec![0.0; labels.len()]));
                series.len() - 1
            }
        };

        series[index].1[position] += value;
    }

    series
}

fn parse_day(text: &str) -> Option<Date> {
    let day = text.get(..10)?;

    Date::parse(day, format_description!("[year]-[month]-[day]")).ok()
}

#[cfg(test)]
mod tests {
    use super::{
        ClientBalance, DailyTransactions, MonthlyRevenue, SummaryData, revenue_by_month,
        transactions_by_day,
    };

    fn revenue(client: &str, ym: &str, revenue: f64) -> MonthlyRevenue {
        MonthlyRevenue {
            client: client.to_owned(),
            ym: ym.to_owned(),
            revenue,
        }
    }

    fn daily(client: &str, date: &str, trx: f64) -> DailyTransactions {
        DailyTransactions {
            client: client.to_owned(),
            date: date.to_owned(),
            trx,
        }
    }

    #[test]
    fn revenue_is_grouped_by_client_over_sorted_months() {
        let records = vec![
            revenue("PT Maju", "2025-02", 200.0),
            revenue("CV Jaya", "2025-01", 50.0),
            revenue("PT Maju", "2025-01", 100.0),
        ];

        let got = revenue_by_month(&records);

        assert_eq!(got.labels, vec!["2025-01", "2025-02"]);
        assert_eq!(
            got.series,
            vec![
                ("PT Maju".to_owned(), vec![100.0, 200.0]),
                ("CV Jaya".to_owned(), vec![50.0, 0.0]),
            ]
        );
    }

    #[test]
    fn days_are_in_calendar_order() {
        let records = vec![
            daily("PT Maju", "2025-01-10T00:00:00.000Z", 2.0),
            daily("PT Maju", "2025-01-09", 1.0),
            daily("PT Maju", "sometime", 4.0),
        ];

        let got = transactions_by_day(&records);

        assert_eq!(
            got.labels,
            vec!["2025-01-09", "2025-01-10T00:00:00.000Z", "sometime"]
        );
        assert_eq!(
            got.series,
            vec![("PT Maju".to_owned(), vec![1.0, 2.0, 4.0])]
        );
    }

    #[test]
    fn filter_keeps_only_one_client() {
        let summary = SummaryData {
            total_balance: vec![
                ClientBalance {
                    client: "PT Maju".to_owned(),
                    balance: 10.0,
                },
                ClientBalance {
                    client: "CV Jaya".to_owned(),
                    balance: 20.0,
                },
            ],
            monthly_revenue: vec![revenue("CV Jaya", "2025-01", 5.0)],
            daily_transactions: vec![daily("PT Maju", "2025-01-01", 1.0)],
        };

        assert_eq!(summary.clients(), vec!["CV Jaya", "PT Maju"]);

        let filtered = summary.for_client("CV Jaya");

        assert_eq!(filtered.total_balance.len(), 1);
        assert_eq!(filtered.total_balance[0].balance, 20.0);
        assert_eq!(filtered.monthly_revenue.len(), 1);
        assert!(filtered.daily_transactions.is_empty());
    }
}
