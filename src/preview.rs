//! A table of the first few transactions, shown on the home and exploratory pages.

use maud::{Markup, html};

use crate::{
    analysis::aggregation::month_abbreviation,
    html::{
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, UNDEFINED_VALUE, format_count,
        format_currency,
    },
    transaction::TransactionRecord,
};

/// The number of rows shown in a preview.
pub const PREVIEW_ROWS: usize = 10;

/// Renders `records` as a table, along with how many rows there are in total.
pub fn preview_table<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
    total_rows: usize,
) -> Markup {
    html! {
        div class="w-full" {
            div class="flex justify-between items-baseline mb-4" {
                h3 class="text-xl font-semibold" { "Preview" }
                span class="text-sm text-gray-600 dark:text-gray-400" {
                    (format_count(total_rows)) " rows"
                }
            }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Year" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Month" }
                        }
                    }
                    tbody {
                        @for record in records {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) {
                                    @match record.date() {
                                        Some(date) => (date),
                                        None => (UNDEFINED_VALUE),
                                    }
                                }
                                td class={(TABLE_CELL_STYLE) " text-right"} {
                                    (format_currency(record.amount()))
                                }
                                td class=(TABLE_CELL_STYLE) {
                                    @match record.year() {
                                        Some(year) => (year),
                                        None => (UNDEFINED_VALUE),
                                    }
                                }
                                td class=(TABLE_CELL_STYLE) {
                                    @match record.month_bucket() {
                                        Some(month) => {
                                            (month_abbreviation(month.month())) " " (month.year())
                                        }
                                        None => (UNDEFINED_VALUE),
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
