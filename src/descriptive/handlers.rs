use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    analysis::{AmountSubset, DistributionSummary},
    charts::{PageChart, chart_head_elements, charts_view},
    descriptive::{
        charts::histogram_chart,
        tables::{amount_cards, describe_table},
    },
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, no_data_view},
    navigation::NavBar,
    session::SessionState,
    transaction::TransactionTable,
};

const PAGE_TITLE: &str = "Descriptive Analysis";

/// Display summary statistics and distributions of the loaded transactions.
pub async fn get_descriptive_page(State(state): State<SessionState>) -> Result<Response, Error> {
    let nav_bar = NavBar::new(endpoints::DESCRIPTIVE_VIEW).into_html();

    let page = match state.current_table()? {
        Some(table) => descriptive_view(nav_bar, &table),
        None => base(
            PAGE_TITLE,
            &[],
            &html!((nav_bar) (no_data_view("descriptive analysis"))),
        ),
    };

    Ok(page.into_response())
}

fn descriptive_view(nav_bar: Markup, table: &TransactionTable) -> Markup {
    let records = table.records();
    let amounts = DistributionSummary::of_amounts(records, AmountSubset::All);
    let years: Vec<f64> = records
        .iter()
        .filter_map(|record| record.year())
        .map(f64::from)
        .collect();
    let years = DistributionSummary::from_values(&years);

    let income = AmountSubset::Income.select(records);
    let expenses = AmountSubset::Expenses.select(records);

    let charts = [
        PageChart {
            id: "income-histogram",
            options: histogram_chart(
                "Income Distribution",
                &income,
                &DistributionSummary::from_values(&income),
            )
            .to_string(),
        },
        PageChart {
            id: "expenses-histogram",
            options: histogram_chart(
                "Expense Distribution",
                &expenses,
                &DistributionSummary::from_values(&expenses),
            )
            .to_string(),
        },
    ];

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-2xl font-bold mb-6 self-start" { (PAGE_TITLE) }

            (describe_table(&[("Amount", &amounts), ("Year", &years)]))
            (amount_cards(&amounts))
            (charts_view(&charts))
        }
    );

    base(PAGE_TITLE, &chart_head_elements(&charts), &content)
}
