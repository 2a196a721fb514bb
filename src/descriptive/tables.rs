//! The statistical summary table and cards of the descriptive page.

use maud::{Markup, html};

use crate::{
    analysis::DistributionSummary,
    html::{
        TABLE_CELL_STYLE, TABLE_ROW_STYLE, format_count, format_optional_currency,
        format_optional_number,
    },
};

const TABLE_HEADER_CELL_STYLE: &str = "px-3 py-3 text-center min-w-[100px]";
const TABLE_STICKY_CELL_STYLE: &str = "px-3 py-4 font-medium text-gray-900 dark:text-white sticky left-0 bg-white dark:bg-gray-800 z-10";
const TABLE_DATA_CELL_STYLE: &str = "text-center whitespace-nowrap";

/// Renders a count, mean, standard deviation, min, quartiles and max for
/// each of `columns`, one column per summary.
pub(super) fn describe_table(columns: &[(&str, &DistributionSummary)]) -> Markup {
    let rows: [(&str, fn(&DistributionSummary) -> String); 8] = [
        ("count", |summary| format_count(summary.count)),
        ("mean", |summary| format_optional_number(summary.mean)),
        ("std", |summary| format_optional_number(summary.std_dev)),
        ("min", |summary| format_optional_number(summary.min)),
        ("25%", |summary| format_optional_number(summary.q1)),
        ("50%", |summary| format_optional_number(summary.median)),
        ("75%", |summary| format_optional_number(summary.q3)),
        ("max", |summary| format_optional_number(summary.max)),
    ];

    html! {
        div id="summary-statistics" class="w-full mb-8" {
            h3 class="text-xl font-semibold mb-4" { "Summary Statistics" }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class="text-xs text-gray-900 uppercase bg-gray-100 dark:bg-gray-700 dark:text-gray-400" {
                        tr {
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "" }
                            @for (name, _) in columns {
                                th scope="col" class={(TABLE_HEADER_CELL_STYLE) " font-semibold"} {
                                    (name)
                                }
                            }
                        }
                    }
                    tbody {
                        @for (label, format) in rows {
                            tr class=(TABLE_ROW_STYLE) {
                                th scope="row" class={(TABLE_STICKY_CELL_STYLE) " text-left"} {
                                    (label)
                                }
                                @for (_, summary) in columns {
                                    td class={(TABLE_CELL_STYLE) " " (TABLE_DATA_CELL_STYLE)} {
                                        (format(summary))
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

/// Cards with the mean, median and standard deviation of the amounts.
pub(super) fn amount_cards(summary: &DistributionSummary) -> Markup {
    html! {
        section id="amount-statistics" class="w-full mb-8" {
            div class="grid grid-cols-1 sm:grid-cols-3 gap-4" {
                (stat_card("Mean Amount", format_optional_currency(summary.mean)))
                (stat_card("Median Amount", format_optional_currency(summary.median)))
                (stat_card("Standard Deviation", format_optional_currency(summary.std_dev)))
            }
        }
    }
}

fn stat_card(label: &str, value: String) -> Markup {
    html! {
        div class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
        {
            h4 class="text-sm text-gray-600 dark:text-gray-400 mb-1" { (label) }
            div class="text-3xl font-bold" { (value) }
        }
    }
}
