//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as an out-of-band swap that replaces the alert
//! container at the bottom of every page, so any HTMX response can carry one.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// A message shown to the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action succeeded and there are details worth reporting.
    Success { message: String, details: String },
    /// The action failed, `details` should tell the user how to fix it.
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert as HTML that HTMX will swap into the alert container.
    pub fn into_html(self) -> Markup {
        let (is_success, message, details) = match self {
            Alert::Success { message, details } => (true, message, details),
            Alert::Error { message, details } => (false, message, details),
        };

        let style = if is_success {
            "flex items-start gap-3 p-4 mb-4 text-sm rounded-lg shadow-lg \
            text-green-800 bg-green-50 border border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        } else {
            "flex items-start gap-3 p-4 mb-4 text-sm rounded-lg shadow-lg \
            text-red-800 bg-red-50 border border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div role="alert" class=(style)
                {
                    div class="flex-1"
                    {
                        p class="font-semibold" { (message) }

                        @if !details.is_empty() {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Tutup"
                        class="ms-auto -my-1.5 p-1.5 rounded-lg hover:opacity-75"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_renders_message_and_details() {
        let alert = Alert::Error {
            message: "Keterangan harus diisi".to_owned(),
            details: "Tuliskan keterangan".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_html().into_string());

        let container = html
            .select(&Selector::parse("#alert-container").unwrap())
            .next()
            .expect("alert container missing");
        assert_eq!(container.value().attr("hx-swap-oob"), Some("true"));
        let text = container.text().collect::<String>();
        assert!(text.contains("Keterangan harus diisi"));
        assert!(text.contains("Tuliskan keterangan"));
    }
}
