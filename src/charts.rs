//! ECharts visualizations for the dashboard and the annual report.
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with a matching HTML container and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, JsFunction,
        Tooltip, Trigger,
    },
    series::{Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    aggregation::MonthlyTotals,
    html::HeadElement,
    period::month_name,
    transaction::Category,
};

/// A chart with its HTML container ID and ECharts configuration.
pub struct PageChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for `charts` in a grid.
pub fn charts_view(charts: &[PageChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// The scripts needed to draw `charts`: the ECharts library and the code
/// that initializes each chart with dark mode support and responsive resizing.
pub fn charts_scripts(charts: &[PageChart]) -> [HeadElement; 2] {
    [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(charts),
    ]
}

fn charts_script(charts: &[PageChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// A donut chart of the share of each category in `breakdown`.
pub fn category_pie_chart(title: &str, subtitle: &str, breakdown: &[(Category, i64)]) -> Chart {
    let data = breakdown
        .iter()
        .map(|(category, total)| (*total as f64, category.label()))
        .collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text(title).subtext(subtitle))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("2%"))
        .series(
            Pie::new()
                .name(title)
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

/// A grouped bar chart of the income and expenses of each month of `year`.
pub fn annual_bar_chart(year: i32, totals: &[MonthlyTotals]) -> Chart {
    let labels = totals
        .iter()
        .map(|total| month_name(total.month).to_owned())
        .collect::<Vec<_>>();
    let income = totals
        .iter()
        .map(|total| total.balance.income as f64)
        .collect::<Vec<_>>();
    let expense = totals
        .iter()
        .map(|total| total.balance.expense as f64)
        .collect::<Vec<_>>();

    Chart::new()
        .title(
            Title::new()
                .text(format!("Pemasukan vs Pengeluaran {year}"))
                .left(20)
                .top("1%"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .legend(Legend::new().right("4%").top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(70)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            bar::Bar::new()
                .name("Pemasukan")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(income),
        )
        .series(
            bar::Bar::new()
                .name("Pengeluaran")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(expense),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('id-ID', {
              style: 'currency',
              currency: 'IDR',
              maximumFractionDigits: 0
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

#[cfg(test)]
mod tests {
    use time::Month;

    use crate::{
        aggregation::{Balance, MonthlyTotals},
        html::HeadElement,
        transaction::Category,
    };

    use super::{PageChart, annual_bar_chart, category_pie_chart, charts_scripts};

    #[test]
    fn pie_chart_labels_slices_with_categories() {
        let chart = category_pie_chart(
            "Pengeluaran",
            "Agustus 2025",
            &[
                (Category::HouseholdNeeds, 150_000),
                (Category::TruckRepair, 750_000),
            ],
        );

        let options = chart.to_string();

        assert!(options.contains("Kebutuhan Rumah"), "got {options}");
        assert!(options.contains("Perbaikan Truck"), "got {options}");
        assert!(options.contains("\"pie\""), "got {options}");
    }

    #[test]
    fn bar_chart_has_income_and_expense_series() {
        let mut month = Month::January;
        let totals = (0..12)
            .map(|index| {
                let total = MonthlyTotals {
                    month,
                    balance: Balance {
                        income: index * 1000,
                        expense: 500,
                    },
                };
                month = month.next();
                total
            })
            .collect::<Vec<_>>();

        let options = annual_bar_chart(2025, &totals).to_string();

        assert!(options.contains("Pemasukan"), "got {options}");
        assert!(options.contains("Pengeluaran"), "got {options}");
        assert!(options.contains("Januari"), "got {options}");
        assert!(options.contains("Desember"), "got {options}");
    }

    #[test]
    fn script_initializes_every_chart() {
        let charts = [
            PageChart {
                id: "first-chart",
                options: "{}".to_owned(),
            },
            PageChart {
                id: "second-chart",
                options: "{}".to_owned(),
            },
        ];

        let [library, script] = charts_scripts(&charts);

        assert!(matches!(library, HeadElement::ScriptLink(path) if path.contains("echarts")));
        let HeadElement::ScriptSource(script) = script else {
            panic!("want script source");
        };
        assert!(script.0.contains("getElementById(\"first-chart\")"));
        assert!(script.0.contains("getElementById(\"second-chart\")"));
    }
}
