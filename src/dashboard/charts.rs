//! The spending by category chart.
//!
//! The chart is configured with charming and drawn in the browser by ECharts.
//! The initialisation script is rendered next to the chart container so that
//! the chart is redrawn whenever htmx swaps in new dashboard content.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::bar,
};
use maud::{Markup, PreEscaped, html};

use crate::aggregation::CategoryTotal;

/// The HTML element ID of the category chart.
pub(super) const CATEGORY_CHART_ID: &str = "category-chart";

/// Build the bar chart of the total spent in each category.
pub(super) fn category_chart(category_totals: &[CategoryTotal]) -> Chart {
    let labels: Vec<String> = category_totals
        .iter()
        .map(|total| total.label().to_owned())
        .collect();
    let values: Vec<f64> = category_totals.iter().map(|total| total.total).collect();

    Chart::new()
        .title(Title::new().text("Spending by Category"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name("Spending").data(values))
}

/// Render the chart container followed by the script that draws `chart` in it.
pub(super) fn chart_view(id: &str, chart: &Chart) -> Markup {
    let script = format!(
        r#"(function() {{
            const chartDom = document.getElementById("{id}");
            const previous = echarts.getInstanceByDom(chartDom);
            if (previous) {{
                previous.dispose();
            }}

            const chart = echarts.init(chartDom);
            chart.setOption({options});

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }};
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }})();"#,
        options = chart
    );

    html! {
        section class="w-full mx-auto mb-4"
        {
            div id=(id) class="min-h-[380px] rounded dark:bg-gray-100" {}
            script { (PreEscaped(script)) }
        }
    }
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"$0.00\";",
    )
}

fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
