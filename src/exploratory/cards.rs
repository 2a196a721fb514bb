//! Headline figures of the filtered transactions.

use maud::{Markup, html};

use crate::{
    analysis::Kpis,
    html::{format_count, format_currency},
};

/// Renders the KPI cards. Amounts are rounded to cents before display.
pub(super) fn kpi_cards_view(kpis: &Kpis) -> Markup {
    let kpis = kpis.rounded();

    html! {
        section id="kpis" class="w-full mx-auto mb-8" {
            div class="flex justify-between items-baseline mb-4" {
                h3 class="text-xl font-semibold" { "Key Performance Indicators" }
            }

            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4" {
                (kpi_card("Total Balance", format_currency(kpis.total_balance), amount_color(kpis.total_balance)))
                (kpi_card("Total Income", format_currency(kpis.total_income), "text-green-600 dark:text-green-400"))
                (kpi_card("Total Expenses", format_currency(kpis.total_expenses), "text-red-600 dark:text-red-400"))
                (kpi_card("Transactions", format_count(kpis.transaction_count), ""))
            }
        }
    }
}

fn amount_color(amount: f64) -> &'static str {
    if amount < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    }
}

fn kpi_card(label: &str, value: String, value_style: &str) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
            aria-label=(format!("{label}: {value}"))
        {
            h4 class="text-sm text-gray-600 dark:text-gray-400 mb-1" { (label) }
            div class={"text-3xl font-bold " (value_style)} { (value) }
        }
    }
}
