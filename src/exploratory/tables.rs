use maud::{Markup, html};

use crate::{
    analysis::{PeriodSummary, YearlyTotal, selection::format_query_date},
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_count, format_currency},
};

/// The total of each year in the filtered transactions.
pub(super) fn yearly_totals_table(totals: &[YearlyTotal]) -> Markup {
    html! {
        section id="yearly-totals" class="w-full mb-8" {
            h3 class="text-xl font-semibold mb-4" { "Totals by Year" }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Year" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Total Amount" }
                        }
                    }
                    tbody {
                        @for total in totals {
                            tr class=(TABLE_ROW_STYLE) {
                                th scope="row" class=(TABLE_CELL_STYLE) { (total.year) }
                                td class={(TABLE_CELL_STYLE) " text-right"} {
                                    (format_currency(total.amount))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The total and transaction count of each comparison period.
pub(super) fn period_comparison_table(periods: &[PeriodSummary]) -> Markup {
    html! {
        section id="period-comparison" class="w-full mb-8" {
            h3 class="text-xl font-semibold mb-4" { "Period Comparison" }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Period" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Dates" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Total Amount" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Transactions" }
                        }
                    }
                    tbody {
                        @for period in periods {
                            tr class=(TABLE_ROW_STYLE) {
                                th scope="row" class=(TABLE_CELL_STYLE) { (period.label) }
                                td class=(TABLE_CELL_STYLE) {
                                    (format_query_date(period.range.start))
                                    " to "
                                    (format_query_date(period.range.end))
                                }
                                td class={(TABLE_CELL_STYLE) " text-right"} {
                                    (format_currency(period.total_amount))
                                }
                                td class={(TABLE_CELL_STYLE) " text-right"} {
                                    (format_count(period.transactions))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::analysis::{DateRange, PeriodSummary, YearlyTotal};

    use super::{period_comparison_table, yearly_totals_table};

    fn row_text(html: &Html) -> Vec<Vec<String>> {
        let row_selector = Selector::parse("tbody tr").unwrap();
        let cell_selector = Selector::parse("th, td").unwrap();

        html.select(&row_selector)
            .map(|row| {
                row.select(&cell_selector)
                    .map(|cell| cell.text().collect::<String>().trim().to_owned())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn yearly_totals_have_a_row_per_year() {
        let totals = [
            YearlyTotal {
                year: 2022,
                amount: 500.0,
            },
            YearlyTotal {
                year: 2023,
                amount: 120.0,
            },
        ];

        let html = Html::parse_fragment(&yearly_totals_table(&totals).into_string());

        assert_eq!(
            row_text(&html),
            vec![vec!["2022", "$500.00"], vec!["2023", "$120.00"]]
        );
    }

    #[test]
    fn periods_show_dates_totals_and_counts() {
        let periods = [PeriodSummary {
            label: "Period 1".to_owned(),
            range: DateRange::new(date!(2023 - 01 - 01), date!(2023 - 01 - 31)),
            total_amount: 70.0,
            transactions: 2,
        }];

        let html = Html::parse_fragment(&period_comparison_table(&periods).into_string());

        assert_eq!(
            row_text(&html),
            vec![vec!["Period 1", "2023-01-01 to 2023-01-31", "$70.00", "2"]]
        );
    }
}
