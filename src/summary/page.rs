//! Renders the summary page.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState,
    api::ApiClient,
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, link,
    },
    navigation::dashboard_page,
    summary::{
        charts::{
            SummaryChart, charts_script, charts_view, daily_transactions_chart,
            monthly_revenue_chart,
        },
        core::{ClientBalance, SummaryData},
    },
    user::User,
};

const ECHARTS_CDN_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

pub(super) const LOAD_ERROR_MSG: &str = "Summary data could not be loaded. Please try again later.";

/// The state needed for the summary page.
#[derive(Clone)]
pub struct SummaryState {
    pub api: ApiClient,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// Only show the figures for this client.
    pub client: Option<String>,
}

/// Display balances per client and the revenue and transaction charts.
pub async fn get_summary_page(
    State(state): State<SummaryState>,
    Extension(user): Extension<User>,
    Query(query): Query<SummaryQuery>,
) -> Response {
    let summary = match state.api.get_summary().await {
        Ok(summary) => summary,
        Err(error) => {
            tracing::error!("Could not load the summary: {error}");
            let content = html!(
                div class=(PAGE_CONTAINER_STYLE)
                {
                    p class="text-red-500 text-base" role="alert" { (LOAD_ERROR_MSG) }
                }
            );

            return dashboard_page("Summary", endpoints::SUMMARY_VIEW, Some(&user), &[], &content)
                .into_response();
        }
    };

    let clients = summary.clients();
    let selected = query
        .client
        .filter(|client| !client.is_empty() && clients.contains(client));

    let summary = match &selected {
        Some(client) => summary.for_client(client),
        None => summary,
    };

    let charts = [
        SummaryChart {
            id: "monthly-revenue-chart",
            options: monthly_revenue_chart(&summary.monthly_revenue).to_string(),
        },
        SummaryChart {
            id: "daily-transactions-chart",
            options: daily_transactions_chart(&summary.daily_transactions).to_string(),
        },
    ];

    let content = summary_view(&summary, &clients, selected.as_deref(), &charts);

    let scripts = if summary.is_empty() {
        Vec::new()
    } else {
        vec![
            HeadElement::ScriptLink(ECHARTS_CDN_URL.to_owned()),
            charts_script(&charts),
        ]
    };

    dashboard_page(
        "Summary",
        endpoints::SUMMARY_VIEW,
        Some(&user),
        &scripts,
        &content,
    )
    .into_response()
}

fn summary_view(
    summary: &SummaryData,
    clients: &[String],
    selected: Option<&str>,
    charts: &[SummaryChart],
) -> Markup {
    html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            @if !clients.is_empty() {
                (client_filter(clients, selected))
            }

            @if summary.is_empty() {
                p class="text-base"
                {
                    "There is no data to summarise yet. "
                    (link(endpoints::UPLOAD_VIEW, "Upload a CSV file"))
                    " to get started."
                }
            } @else {
                (balances_view(&summary.total_balance))
                (charts_view(charts))
            }
        }
    )
}

fn client_filter(clients: &[String], selected: Option<&str>) -> Markup {
    html!(
        form
            id="client-filter"
            method="get"
            action=(endpoints::SUMMARY_VIEW)
            class="flex items-end gap-2 mb-4 max-w-md"
        {
            div class="flex-1"
            {
                label for="client" class=(FORM_LABEL_STYLE) { "Client" }

                select
                    id="client"
                    name="client"
                    class=(FORM_TEXT_INPUT_STYLE)
                    onchange="this.form.submit()"
                {
                    option value="" selected[selected.is_none()] { "All clients" }

                    @for client in clients {
                        option value=(client) selected[selected == Some(client.as_str())] { (client) }
                    }
                }
            }

            noscript
            {
                button type="submit" class="px-3 py-2 text-sm bg-blue-500 text-white rounded" { "Filter" }
            }
        }
    )
}

fn balances_view(balances: &[ClientBalance]) -> Markup {
    html!(
        section id="balances" class="mb-6 w-full overflow-x-auto rounded shadow-md"
        {
            h2 class="text-lg font-semibold mb-2" { "Balance per Client" }

            @if balances.is_empty() {
                p { "No balances to show." }
            } @else {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Client" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Balance" }
                        }
                    }

                    tbody
                    {
                        @for balance in balances {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (balance.client) }
                                td class={(TABLE_CELL_STYLE) " text-right font-mono"}
                                {
                                    (format_currency(balance.balance))
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension,
        extract::{Query, State},
        http::StatusCode,
    };
    use scraper::{Html, Selector};

    use crate::{
        test_utils::{assert_valid_html, parse_html_document, stub_api},
        user::User,
    };

    use super::{LOAD_ERROR_MSG, SummaryQuery, SummaryState, get_summary_page};

    const SUMMARY_REPLY: &str = r#"{
        "ok": true,
        "summary": {
            "totalBalance": [
                {"client": "PT Maju", "balance": 1500000},
                {"partner": "CV Jaya", "balance": "250000"}
            ],
            "monthlyRevenue": [
                {"client": "PT Maju", "ym": "2025-01", "revenue": 100}
            ],
            "dailyTransactions": [
                {"client": "CV Jaya", "date": "2025-01-02", "trx": 3}
            ]
        }
    }"#;

    fn user() -> User {
        User {
            username: "budi".to_owned(),
            role: "Admin".to_owned(),
        }
    }

    async fn render(reply: &str, client: Option<&str>) -> (StatusCode, Html) {
        let (api, _) = stub_api(&[reply]);

        let response = get_summary_page(
            State(SummaryState { api }),
            Extension(user()),
            Query(SummaryQuery {
                client: client.map(str::to_owned),
            }),
        )
        .await;

        let status = response.status();
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        (status, document)
    }

    fn balance_rows(document: &Html) -> Vec<Vec<String>> {
        let row_selector = Selector::parse("#balances tbody tr").unwrap();
        let cell_selector = Selector::parse("td").unwrap();

        document
            .select(&row_selector)
            .map(|row| {
                row.select(&cell_selector)
                    .map(|cell| cell.text().collect::<String>().trim().to_owned())
                    .collect()
            })
            .collect()
    }

    #[tokio::test]
    async fn shows_balances_in_rupiah() {
        let (status, document) = render(SUMMARY_REPLY, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            balance_rows(&document),
            vec![
                vec!["PT Maju".to_owned(), "Rp 1.500.000,00".to_owned()],
                vec!["CV Jaya".to_owned(), "Rp 250.000,00".to_owned()],
            ]
        );

        let charts = Selector::parse("#charts > div > div").unwrap();
        let ids: Vec<_> = document
            .select(&charts)
            .filter_map(|chart| chart.value().attr("id"))
            .collect();
        assert_eq!(ids, vec!["monthly-revenue-chart", "daily-transactions-chart"]);
    }

    #[tokio::test]
    async fn client_filter_lists_every_client() {
        let (_, document) = render(SUMMARY_REPLY, None).await;

        let options = Selector::parse("#client-filter option").unwrap();
        let values: Vec<_> = document
            .select(&options)
            .filter_map(|option| option.value().attr("value"))
            .collect();

        assert_eq!(values, vec!["", "CV Jaya", "PT Maju"]);
    }

    #[tokio::test]
    async fn filter_shows_one_client() {
        let (_, document) = render(SUMMARY_REPLY, Some("CV Jaya")).await;

        assert_eq!(
            balance_rows(&document),
            vec![vec!["CV Jaya".to_owned(), "Rp 250.000,00".to_owned()]]
        );

        let selected = Selector::parse("#client-filter option[selected]").unwrap();
        let selected: Vec<_> = document
            .select(&selected)
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(selected, vec!["CV Jaya"]);
    }

    #[tokio::test]
    async fn unknown_client_filter_shows_everything() {
        let (_, document) = render(SUMMARY_REPLY, Some("Nobody")).await;

        assert_eq!(balance_rows(&document).len(), 2);
    }

    #[tokio::test]
    async fn load_error_shows_message() {
        let (status, document) = render(r#"{"ok": false, "error": "Sheet missing"}"#, None).await;

        assert_eq!(status, StatusCode::OK);
        let alert = Selector::parse("p[role=alert]").unwrap();
        let text = document
            .select(&alert)
            .next()
            .expect("No error message")
            .text()
            .collect::<String>();
        assert_eq!(text, LOAD_ERROR_MSG);
    }

    #[tokio::test]
    async fn empty_summary_points_to_upload() {
        let (_, document) = render(r#"{"ok": true, "summary": {}}"#, None).await;

        let upload_link = Selector::parse("main a[href=\"/upload\"]").unwrap();
        assert_eq!(document.select(&upload_link).count(), 1);
        assert_eq!(balance_rows(&document).len(), 0);
    }
}
