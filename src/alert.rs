//! Alert system for displaying success and error messages to users.
//!
//! Alerts are swapped into the `#alert-container` element of the base page,
//! either as the target of a failed htmx request or out-of-band alongside a
//! successful response.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// An alert message with the styling for its outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (message, details, style, close_style) = match &self {
            Alert::Success { message, details } => (
                message,
                details,
                "p-4 mb-4 text-green-800 border border-green-300 rounded-lg \
                bg-green-50 dark:bg-gray-800 dark:text-green-400 dark:border-green-800",
                "hover:bg-green-200 dark:hover:bg-gray-700",
            ),
            Alert::Error { message, details } => (
                message,
                details,
                "p-4 mb-4 text-red-800 border border-red-300 rounded-lg \
                bg-red-50 dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                "hover:bg-red-200 dark:hover:bg-gray-700",
            ),
        };

        // Template adapted from https://flowbite.com/docs/components/alerts/
        html! {
            div role="alert" class=(style)
            {
                div class="flex items-center justify-between gap-4"
                {
                    p class="text-lg font-medium" { (message) }

                    button
                        type="button"
                        aria-label="Close"
                        onclick="this.closest('[role=alert]').remove()"
                        class={ "rounded-lg p-1.5 inline-flex items-center justify-center h-8 w-8 " (close_style) }
                    {
                        "✕"
                    }
                }

                @if !details.is_empty() {
                    p class="mt-2 text-sm" { (details) }
                }
            }
        }
    }

    /// Render the alert so that htmx swaps it into the alert container in
    /// addition to the main response.
    pub fn into_oob_html(self) -> Markup {
        html! {
            div id="alert-container" hx-swap-oob="innerHTML" { (self.into_html()) }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        Html(self.into_html().into_string()).into_response()
    }
}
