//! Route handlers and views for the overview and analytics pages.

use std::sync::Arc;

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    aggregation::{category_totals, recent_daily_totals, summarize},
    dashboard::{
        cards::summary_cards_view,
        charts::{
            DashboardChart, category_breakdown_view, charts_script, charts_view,
            expense_breakdown_chart, income_vs_expense_chart,
        },
    },
    endpoints,
    html::{HeadElement, LINK_STYLE, base, link},
    navigation::NavBar,
    timezone::get_local_today,
    transaction::{Transaction, TransactionStore, sort_by_date_descending, transaction_table},
    user::UserID,
};

/// How many days the income vs expenses chart covers.
const CHART_DAYS: usize = 7;
/// How many transactions the overview page lists.
const RECENT_TRANSACTION_COUNT: usize = 5;

/// The state needed for the overview and analytics pages.
#[derive(Clone)]
pub struct DashboardState {
    /// Where transactions are saved.
    pub transaction_store: Arc<dyn TransactionStore>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

fn build_charts(transactions: &[Transaction]) -> [DashboardChart; 2] {
    [
        expense_breakdown_chart(&category_totals(transactions)),
        income_vs_expense_chart(&recent_daily_totals(transactions, CHART_DAYS)),
    ]
}

fn chart_scripts(charts: &[DashboardChart]) -> [HeadElement; 2] {
    [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(charts),
    ]
}

/// Display the summary cards, charts and most recent transactions.
pub async fn get_overview_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let transactions = state
        .transaction_store
        .list(user_id)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;
    let today = get_local_today(&state.local_timezone)?;

    Ok(overview_view(&transactions, today).into_response())
}

fn overview_view(transactions: &[Transaction], today: time::Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::OVERVIEW_VIEW).into_html();
    let summary = summarize(transactions, today);
    let charts = build_charts(transactions);
    let mut recent = sort_by_date_descending(transactions.iter().collect());
    recent.truncate(RECENT_TRANSACTION_COUNT);
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "adding one");

    let content = html!(
        (nav_bar)

        div
            id="overview-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (summary_cards_view(&summary))

            (charts_view(&charts))

            section id="recent-transactions" class="w-full mx-auto mb-4"
            {
                div class="flex justify-between items-baseline mb-4"
                {
                    h3 class="text-xl font-semibold" { "Recent Transactions" }

                    a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "View all" }
                }

                @if recent.is_empty() {
                    p
                    {
                        "No transactions yet. Get started by " (new_transaction_link) "."
                    }
                } @else {
                    (transaction_table(&recent, ""))
                }
            }
        }
    );

    base("Overview", &chart_scripts(&charts), &content)
}

/// Display the expense breakdown, the income vs expenses chart and the
/// per-category table.
pub async fn get_analytics_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let transactions = state
        .transaction_store
        .list(user_id)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    Ok(analytics_view(&transactions).into_response())
}

fn analytics_view(transactions: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::ANALYTICS_VIEW).into_html();
    let charts = build_charts(transactions);
    let totals_by_category = category_totals(transactions);

    let content = html!(
        (nav_bar)

        div
            id="analytics-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold mb-4 self-start" { "Analytics" }

            (charts_view(&charts))

            (category_breakdown_view(&totals_by_category))
        }
    );

    base("Analytics", &chart_scripts(&charts), &content)
}
