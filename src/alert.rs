//! Alert messages swapped into the page's alert container by htmx.
//!
//! Alerts replace `#alert-container` out-of-band, so handlers can return one
//! alongside (or instead of) their regular response.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// A dismissible success or error message.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message with extra details.
    Success { message: String, details: String },
    /// An error message with extra details, e.g. how to fix the problem.
    Error { message: String, details: String },
    /// An error message without details.
    ErrorSimple { message: String },
}

const SUCCESS_STYLE: &str = "flex items-start gap-3 p-4 rounded-lg shadow-lg \
    text-green-800 bg-green-50 border border-green-300 \
    dark:bg-gray-800 dark:text-green-400 dark:border-green-800";

const ERROR_STYLE: &str = "flex items-start gap-3 p-4 rounded-lg shadow-lg \
    text-red-800 bg-red-50 border border-red-300 \
    dark:bg-gray-800 dark:text-red-400 dark:border-red-800";

impl Alert {
    fn parts(&self) -> (&'static str, &str, Option<&str>) {
        match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, Some(details)),
            Alert::Error { message, details } => (ERROR_STYLE, message, Some(details)),
            Alert::ErrorSimple { message } => (ERROR_STYLE, message, None),
        }
    }

    fn markup(&self) -> Markup {
        let (style, message, details) = self.parts();

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(style) role="alert"
                {
                    div class="flex-1"
                    {
                        p class="text-sm font-medium" { (message) }

                        @if let Some(details) = details.filter(|details| !details.is_empty()) {
                            p class="mt-1 text-sm opacity-80" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Close"
                        class="ms-auto text-sm font-semibold opacity-70 hover:opacity-100"
                        onclick="document.getElementById('alert-container').classList.add('hidden')"
                    {
                        "✕"
                    }
                }
            }
        }
    }

    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Html<String> {
        Html(self.markup().into_string())
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
