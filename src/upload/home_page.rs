use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, UNDEFINED_VALUE, base, format_count, loading_spinner,
    },
    navigation::NavBar,
    preview::{PREVIEW_ROWS, preview_table},
    session::SessionState,
    transaction::TransactionTable,
};

/// File types the loader understands.
const ACCEPTED_FILE_TYPES: &str = ".xlsx,.xls,.csv";

const WARNING_STYLE: &str = "p-4 text-sm rounded-lg text-yellow-800 bg-yellow-50 \
    border border-yellow-300 dark:bg-gray-800 dark:text-yellow-300 dark:border-yellow-800";

/// Route handler for the home page.
pub async fn get_home_page(State(state): State<SessionState>) -> Result<Response, Error> {
    let table = state.current_table()?;

    Ok(home_view(table.as_deref()).into_response())
}

fn home_view(table: Option<&TransactionTable>) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md mb-8"
            {
                h2 class="text-xl font-bold mb-4" { "Upload Transactions" }

                (upload_form_view())
            }

            @match table {
                Some(table) => {
                    div class="w-full space-y-6"
                    {
                        (overview_view(table))
                        (warnings_view(table))
                        (preview_table(table.head(PREVIEW_ROWS), table.len()))
                        (clear_session_form_view())
                    }
                }
                None => {
                    p class="text-gray-600 dark:text-gray-400"
                    {
                        "Upload an Excel workbook or CSV file whose first row names a "
                        code { "Date" } " and an " code { "Amount" } " column. "
                        "Positive amounts are income, negative amounts are expenses."
                    }
                }
            }
        }
    };

    base("Home", &[], &content)
}

fn upload_form_view() -> Markup {
    let spinner = loading_spinner();

    html! {
        form
            hx-post=(endpoints::UPLOAD)
            enctype="multipart/form-data"
            hx-disabled-elt="#file, #submit-button"
            hx-indicator="#indicator"
            hx-swap="none"
            hx-target-error="#alert-container"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="file" class=(FORM_LABEL_STYLE)
                {
                    "Choose a spreadsheet to upload"
                }

                input
                    id="file"
                    type="file"
                    name="file"
                    accept=(ACCEPTED_FILE_TYPES)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button
                type="submit"
                id="submit-button"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator" { (spinner) }
                " Upload File"
            }
        }
    }
}

fn overview_view(table: &TransactionTable) -> Markup {
    let years = table
        .years()
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    html! {
        section id="file-overview" class="w-full"
        {
            h3 class="text-xl font-semibold mb-4" { "Loaded Data" }

            dl class="grid grid-cols-1 sm:grid-cols-2 gap-4"
            {
                (overview_item("File", table.file_name().to_owned()))
                (overview_item("Transactions", format_count(table.len())))
                (overview_item(
                    "Date range",
                    table
                        .date_bounds()
                        .map(|(first, last)| format!("{first} to {last}"))
                        .unwrap_or_else(|| UNDEFINED_VALUE.to_owned()),
                ))
                (overview_item(
                    "Years",
                    if years.is_empty() { UNDEFINED_VALUE.to_owned() } else { years },
                ))
            }
        }
    }
}

fn overview_item(label: &str, value: String) -> Markup {
    html! {
        div class="p-4 bg-white dark:bg-gray-800 rounded-lg shadow"
        {
            dt class="text-sm text-gray-600 dark:text-gray-400" { (label) }
            dd class="text-lg font-semibold" { (value) }
        }
    }
}

fn warnings_view(table: &TransactionTable) -> Markup {
    let unparsed_dates = table.unparsed_dates();
    let skipped_rows = table.skipped_rows();

    html! {
        @if unparsed_dates > 0 || skipped_rows > 0 {
            ul id="load-warnings" class="space-y-2"
            {
                @if unparsed_dates > 0 {
                    li class=(WARNING_STYLE)
                    {
                        (format_count(unparsed_dates)) " " (rows(unparsed_dates))
                        " had a date that could not be read. "
                        "They count towards totals but are left out of monthly charts and date filters."
                    }
                }

                @if skipped_rows > 0 {
                    li class=(WARNING_STYLE)
                    {
                        (format_count(skipped_rows)) " " (rows(skipped_rows))
                        @if skipped_rows == 1 { " was" } @else { " were" }
                        " skipped because the amount is missing or not a number."
                    }
                }
            }
        }
    }
}

fn rows(count: usize) -> &'static str {
    if count == 1 { "row" } else { "rows" }
}

fn clear_session_form_view() -> Markup {
    html! {
        form
            hx-post=(endpoints::CLEAR_SESSION)
            hx-swap="none"
            hx-target-error="#alert-container"
            class="w-full max-w-md"
        {
            button type="submit" class=(BUTTON_SECONDARY_STYLE)
            {
                "Clear Loaded Data"
            }
        }
    }
}
