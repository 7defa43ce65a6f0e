//! Error messages shown in the alert container.

use maud::{Markup, html};

/// A dismissable message rendered into `#alert-container`.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (message, details) = match self {
            Alert::Error { message, details } => (message, details),
            Alert::ErrorSimple { message } => (message, String::new()),
        };

        html! {
            div
                class="flex items-start p-4 mb-4 text-red-800 border border-red-300 rounded-lg \
                    bg-red-50 dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
                role="alert"
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (message) }

                    @if !details.is_empty() {
                        p class="text-sm mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Close"
                    class="ms-3 font-bold"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_shows_message_and_details() {
        let html = Alert::Error {
            message: "Could not save".to_owned(),
            details: "Try again.".to_owned(),
        }
        .into_html()
        .into_string();

        let fragment = Html::parse_fragment(&html);
        let alert = fragment
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("No alert found");

        let text = alert.text().collect::<String>();
        assert!(text.contains("Could not save"));
        assert!(text.contains("Try again."));
    }

    #[test]
    fn simple_alert_has_no_details_paragraph() {
        let html = Alert::ErrorSimple {
            message: "Please choose an account.".to_owned(),
        }
        .into_html()
        .into_string();

        let fragment = Html::parse_fragment(&html);
        let paragraphs = fragment.select(&Selector::parse("p").unwrap()).count();

        assert_eq!(paragraphs, 1);
    }
}
