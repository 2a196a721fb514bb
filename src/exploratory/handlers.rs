use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};

use crate::{
    Error,
    analysis::{AnalysisReport, FilterQuery, FilteredView, Selection},
    charts::{PageChart, chart_head_elements, charts_view},
    endpoints,
    exploratory::{
        cards::kpi_cards_view,
        charts::{
            best_months_chart, cumulative_balance_chart, monthly_by_year_chart,
            monthly_trend_chart, period_comparison_chart,
        },
        filter_form::filter_form_view,
        tables::{period_comparison_table, yearly_totals_table},
    },
    html::{PAGE_CONTAINER_STYLE, base, no_data_view},
    navigation::NavBar,
    preview::{PREVIEW_ROWS, preview_table},
    session::SessionState,
    transaction::TransactionTable,
};

const PAGE_TITLE: &str = "Exploratory Analysis";

/// Display KPIs, trends and a period comparison of the loaded transactions,
/// filtered by the query string.
pub async fn get_exploratory_page(
    State(state): State<SessionState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let nav_bar = NavBar::new(endpoints::EXPLORATORY_VIEW).into_html();

    let Some(table) = state.current_table()? else {
        return Ok(base(
            PAGE_TITLE,
            &[],
            &html!((nav_bar) (no_data_view("exploratory analysis"))),
        )
        .into_response());
    };

    let selection = query.resolve(&table);
    let view = selection.filter.apply(&table);
    tracing::debug!(
        "Filtered {} of {} transactions with {:?}",
        view.len(),
        table.len(),
        selection.filter
    );

    Ok(exploratory_view(nav_bar, &table, &view, &selection).into_response())
}

fn exploratory_view(
    nav_bar: Markup,
    table: &TransactionTable,
    view: &FilteredView,
    selection: &Selection,
) -> Markup {
    let form = filter_form_view(&table.years(), selection);

    if view.is_empty() {
        let content = html!(
            (nav_bar)

            div class=(PAGE_CONTAINER_STYLE)
            {
                h2 class="text-2xl font-bold mb-6 self-start" { (PAGE_TITLE) }

                (form)

                p id="no-matches" class="text-gray-600 dark:text-gray-400" {
                    "No transactions match the selected filters."
                }
            }
        );

        return base(PAGE_TITLE, &[], &content);
    }

    let report = AnalysisReport::from_view(table, view, selection);
    let charts = report_charts(&report);

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-2xl font-bold mb-6 self-start" { (PAGE_TITLE) }

            (form)

            div class="w-full mb-8" {
                (preview_table(view.head(PREVIEW_ROWS).iter().copied(), view.len()))
            }

            (kpi_cards_view(&report.kpis))
            (charts_view(&charts))
            (yearly_totals_table(&report.yearly_totals))

            @if !report.periods.is_empty() {
                (period_comparison_table(&report.periods))
            }
        }
    );

    base(PAGE_TITLE, &chart_head_elements(&charts), &content)
}

fn report_charts(report: &AnalysisReport) -> Vec<PageChart> {
    let mut charts = vec![
        PageChart {
            id: "cumulative-balance-chart",
            options: cumulative_balance_chart(&report.cumulative_balance).to_string(),
        },
        PageChart {
            id: "monthly-trend-chart",
            options: monthly_trend_chart(&report.monthly_totals).to_string(),
        },
    ];

    if report.monthly_totals_by_year.len() > 1 {
        charts.push(PageChart {
            id: "monthly-by-year-chart",
            options: monthly_by_year_chart(&report.monthly_totals_by_year).to_string(),
        });
    }

    charts.push(PageChart {
        id: "best-months-chart",
        options: best_months_chart(&report.best_months).to_string(),
    });

    if !report.periods.is_empty() {
        charts.push(PageChart {
            id: "period-comparison-chart",
            options: period_comparison_chart(&report.periods).to_string(),
        });
    }

    charts
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::Query;
    use scraper::{Html, Selector};

    use crate::{
        analysis::FilterQuery,
        endpoints,
        session::{Session, SessionState},
        test_utils::{
            assert_form_input_with_value, assert_hx_endpoint, assert_valid_html,
            must_get_form_by_id, parse_html_document,
        },
    };

    use super::get_exploratory_page;

    const FILE: &[u8] = b"Date,Amount\n\
        2022-11-05,500\n\
        2023-01-05,100\n\
        2023-01-20,-30\n\
        2023-02-10,50\n";

    fn get_test_state(file: Option<&[u8]>) -> SessionState {
        let mut session = Session::new();

        if let Some(bytes) = file {
            session.load("transactions.csv", bytes).unwrap();
        }

        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    fn year_query(year: &str) -> FilterQuery {
        FilterQuery {
            year: Some(year.to_owned()),
            ..Default::default()
        }
    }

    async fn get_page(state: SessionState, query: FilterQuery) -> Html {
        let response = get_exploratory_page(State(state), Query(query))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        html
    }

    fn kpi_values(html: &Html) -> Vec<String> {
        html.select(&Selector::parse("#kpis div.text-3xl").unwrap())
            .map(|value| value.text().collect())
            .collect()
    }

    fn element_exists(html: &Html, selector: &str) -> bool {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .is_some()
    }

    #[tokio::test]
    async fn shows_kpis_of_every_year_by_default() {
        let html = get_page(get_test_state(Some(FILE)), FilterQuery::default()).await;

        assert_eq!(kpi_values(&html), vec!["$620.00", "$650.00", "-$30.00", "4"]);
        assert!(element_exists(&html, "#cumulative-balance-chart"));
        assert!(element_exists(&html, "#monthly-trend-chart"));
        assert!(element_exists(&html, "#monthly-by-year-chart"));
        assert!(element_exists(&html, "#best-months-chart"));
        assert!(element_exists(&html, "#period-comparison-chart"));
        assert!(element_exists(&html, "#yearly-totals table"));
        assert!(element_exists(&html, "#period-comparison table"));

        let form = must_get_form_by_id(&html, "filter-form");
        assert_hx_endpoint(&form, endpoints::EXPLORATORY_VIEW, "action");
        assert_form_input_with_value(&form, "start", "date", "2022-11-05");
        assert_form_input_with_value(&form, "end", "date", "2023-02-10");
        assert_form_input_with_value(&form, "period1_start", "date", "2022-11-05");
        assert_form_input_with_value(&form, "period2_start", "date", "2023-02-05");
    }

    #[tokio::test]
    async fn filters_by_year() {
        let html = get_page(get_test_state(Some(FILE)), year_query("2023")).await;

        assert_eq!(kpi_values(&html), vec!["$120.00", "$150.00", "-$30.00", "3"]);
        assert!(
            !element_exists(&html, "#monthly-by-year-chart"),
            "A single year should not get a by-year chart"
        );

        let selected = html
            .select(&Selector::parse("select[name='year'] option[selected]").unwrap())
            .next()
            .expect("No selected year");
        assert_eq!(selected.value().attr("value"), Some("2023"));
    }

    #[tokio::test]
    async fn invalid_year_falls_back_to_all_years() {
        let html = get_page(get_test_state(Some(FILE)), year_query("twenty")).await;

        assert_eq!(kpi_values(&html)[3], "4");
    }

    #[tokio::test]
    async fn says_when_filters_match_nothing() {
        let html = get_page(get_test_state(Some(FILE)), year_query("1999")).await;

        assert!(element_exists(&html, "#no-matches"));
        assert!(element_exists(&html, "#filter-form"));
        assert!(!element_exists(&html, "#kpis"));
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let html = get_page(get_test_state(None), FilterQuery::default()).await;

        let heading = html
            .select(&Selector::parse("h2").unwrap())
            .next()
            .expect("No heading found");
        assert_eq!(heading.text().collect::<String>(), "Nothing here yet...");
        assert!(!element_exists(&html, "#filter-form"));
    }
}
