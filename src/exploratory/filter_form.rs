use maud::{Markup, html};
use time::Date;

use crate::{
    analysis::{
        DateRange, Selection, YearSelection,
        selection::{ALL_YEARS, format_query_date},
    },
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The filter form, prefilled with `selection`. `years` are the years
/// available in the loaded table.
pub(super) fn filter_form_view(years: &[i32], selection: &Selection) -> Markup {
    let (period1, period2) = selection.periods.unzip();

    html! {
        form
            id="filter-form"
            method="get"
            action=(endpoints::EXPLORATORY_VIEW)
            class="w-full mb-8 p-4 bg-gray-50 dark:bg-gray-800 rounded-lg space-y-4"
        {
            h3 class="text-xl font-semibold" { "Filter Data" }

            div class="grid grid-cols-1 md:grid-cols-3 gap-4"
            {
                div
                {
                    label for="year" class=(FORM_LABEL_STYLE) { "Year" }

                    select id="year" name="year" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option
                            value=(ALL_YEARS)
                            selected[selection.filter.year == YearSelection::AllYears]
                        {
                            "All"
                        }

                        @for year in years {
                            option
                                value=(year)
                                selected[selection.filter.year == YearSelection::SpecificYear(*year)]
                            {
                                (year)
                            }
                        }
                    }
                }

                (date_range_inputs("Date range", "start", "end", selection.filter.date_range))
            }

            div class="grid grid-cols-1 md:grid-cols-2 gap-4"
            {
                (date_range_inputs("Period 1", "period1_start", "period1_end", period1))
                (date_range_inputs("Period 2", "period2_start", "period2_end", period2))
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply Filters" }
        }
    }
}

fn date_range_inputs(
    label: &str,
    start_name: &str,
    end_name: &str,
    range: Option<DateRange>,
) -> Markup {
    let value = |date: Option<Date>| date.map(format_query_date).unwrap_or_default();

    html! {
        fieldset class="md:col-span-1"
        {
            legend class=(FORM_LABEL_STYLE) { (label) }

            div class="flex gap-2"
            {
                input
                    type="date"
                    id=(start_name)
                    name=(start_name)
                    aria-label={(label) " start"}
                    value=(value(range.map(|range| range.start)))
                    class=(FORM_TEXT_INPUT_STYLE);

                input
                    type="date"
                    id=(end_name)
                    name=(end_name)
                    aria-label={(label) " end"}
                    value=(value(range.map(|range| range.end)))
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    }
}
