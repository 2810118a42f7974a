//! Chart generation and rendering for the overview and analytics pages.
//!
//! This module creates ECharts visualizations of a user's transactions:
//! - **Expense breakdown**: a donut chart of expenses per category
//! - **Income vs expenses**: a grouped bar chart of the last seven days with transactions
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use std::collections::HashMap;

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, Tooltip,
        Trigger,
    },
    series::{Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    aggregation::{DailyTotal, percentage},
    category::Category,
    html::{
        HeadElement, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
        format_percentage,
    },
};

const INCOME_COLOR: &str = "#10b981";
const EXPENSE_COLOR: &str = "#ef4444";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string, or `None` if there is
    /// nothing to plot.
    pub options: Option<String>,
    /// The message shown instead of the chart when there is nothing to plot.
    pub empty_message: &'static str,
}

/// Renders the HTML containers for dashboard charts.
///
/// Charts without data get a placeholder message instead of a container.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    @if chart.options.is_some() {
                        div
                            id=(chart.id)
                            class="min-h-[380px] rounded dark:bg-gray-100"
                        {}
                    } @else {
                        div
                            id=(chart.id)
                            data-chart-placeholder="true"
                            class="min-h-[380px] rounded flex items-center justify-center
                                bg-white dark:bg-gray-800 text-gray-500 dark:text-gray-400"
                        {
                            p { (chart.empty_message) }
                        }
                    }
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing. Charts without data are skipped.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .filter_map(|chart| chart.options.as_ref().map(|options| (chart.id, options)))
        .map(|(id, options)| {
            // Category labels are user input and must not close the script tag.
            let options = options.replace("</", "<\\/");
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{id}");
                    const chart = echarts.init(chartDom);
                    const option = {options};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#
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

/// The expense breakdown chart, or a placeholder if there are no expenses.
pub(super) fn expense_breakdown_chart(category_totals: &HashMap<Category, f64>) -> DashboardChart {
    DashboardChart {
        id: "expense-breakdown-chart",
        options: (!category_totals.is_empty())
            .then(|| expense_pie_chart(category_totals).to_string()),
        empty_message: "No expense data available",
    }
}

/// The income vs expenses chart, or a placeholder if there are no transactions.
pub(super) fn income_vs_expense_chart(daily_totals: &[DailyTotal]) -> DashboardChart {
    DashboardChart {
        id: "income-vs-expense-chart",
        options: (!daily_totals.is_empty()).then(|| daily_bar_chart(daily_totals).to_string()),
        empty_message: "No transaction data available",
    }
}

fn expense_pie_chart(category_totals: &HashMap<Category, f64>) -> Chart {
    let data: Vec<(f64, &str)> = sorted_by_amount(category_totals)
        .into_iter()
        .map(|(category, amount)| (amount, category.as_str()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Expense Breakdown")
                .subtext("By category"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom(0))
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["40%", "70%"])
                .item_style(ItemStyle::new().border_radius(4))
                .data(data),
        )
}

fn daily_bar_chart(daily_totals: &[DailyTotal]) -> Chart {
    let labels: Vec<String> = daily_totals
        .iter()
        .map(|total| total.date.to_string())
        .collect();
    let income: Vec<f64> = daily_totals.iter().map(|total| total.income).collect();
    let expenses: Vec<f64> = daily_totals.iter().map(|total| total.expense).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Income vs Expenses")
                .subtext("Last seven days with transactions"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().bottom(0))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("10%")
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
                .name("Income")
                .item_style(ItemStyle::new().color(INCOME_COLOR))
                .data(income),
        )
        .series(
            bar::Bar::new()
                .name("Expenses")
                .item_style(ItemStyle::new().color(EXPENSE_COLOR))
                .data(expenses),
        )
}

/// Categories ordered by amount, largest first, with ties ordered by label.
fn sorted_by_amount(category_totals: &HashMap<Category, f64>) -> Vec<(&Category, f64)> {
    let mut totals: Vec<(&Category, f64)> = category_totals
        .iter()
        .map(|(category, amount)| (category, *amount))
        .collect();

    totals.sort_by(|(a_category, a_amount), (b_category, b_amount)| {
        b_amount
            .total_cmp(a_amount)
            .then_with(|| a_category.as_str().cmp(b_category.as_str()))
    });

    totals
}

/// A table listing each category's expenses and its share of all expenses.
pub(super) fn category_breakdown_view(category_totals: &HashMap<Category, f64>) -> Markup {
    let total_expenses: f64 = category_totals.values().sum();
    let rows = sorted_by_amount(category_totals);

    html! {
        section id="category-breakdown" class="w-full mx-auto mb-4"
        {
            h3 class="text-xl font-semibold mb-4" { "Category Breakdown" }

            @if rows.is_empty() {
                p class="text-gray-500 dark:text-gray-400" { "No expense data available" }
            } @else {
                div class="relative overflow-x-auto shadow-md sm:rounded-lg"
                {
                    table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                                th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Share" }
                            }
                        }

                        tbody
                        {
                            @for (category, amount) in rows {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td class=(TABLE_CELL_STYLE) { (category) }
                                    td class={ (TABLE_CELL_STYLE) " text-right tabular-nums" }
                                    {
                                        (format_currency(amount))
                                    }
                                    td class={ (TABLE_CELL_STYLE) " text-right tabular-nums" }
                                    {
                                        (format_percentage(percentage(amount, total_expenses)))
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

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
