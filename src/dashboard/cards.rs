//! The summary cards at the top of the overview page.

use maud::{Markup, html};

use crate::{
    aggregation::FinancialSummary,
    html::{EXPENSE_TEXT_STYLE, INCOME_TEXT_STYLE, format_currency},
};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md flex flex-col gap-1";

fn signed_style(amount: f64) -> &'static str {
    if amount < 0.0 {
        EXPENSE_TEXT_STYLE
    } else {
        INCOME_TEXT_STYLE
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn card(id: &str, title: &str, value: &str, value_style: &str, subtitle: &str) -> Markup {
    html! {
        div id=(id) class=(CARD_STYLE)
        {
            h4 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }
            p class={ "text-2xl font-bold tabular-nums " (value_style) } data-card-value="true"
            {
                (value)
            }
            p class="text-xs text-gray-500 dark:text-gray-400" { (subtitle) }
        }
    }
}

/// Total income, total expenses, the current balance and this month's net.
pub(super) fn summary_cards_view(summary: &FinancialSummary) -> Markup {
    let balance = summary.total.balance();
    let month_net = summary.this_month.balance();
    let month_breakdown = format!(
        "Income {} / Expenses {}",
        format_currency(summary.this_month.income),
        format_currency(summary.this_month.expense)
    );

    html! {
        section class="w-full mx-auto mb-8"
        {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4"
            {
                (card(
                    "total-income-card",
                    "Total Income",
                    &format_currency(summary.total.income),
                    INCOME_TEXT_STYLE,
                    &plural(summary.income_count, "transaction"),
                ))
                (card(
                    "total-expenses-card",
                    "Total Expenses",
                    &format_currency(summary.total.expense),
                    EXPENSE_TEXT_STYLE,
                    &plural(summary.expense_count, "transaction"),
                ))
                (card(
                    "balance-card",
                    "Current Balance",
                    &format_currency(balance),
                    signed_style(balance),
                    "Income minus expenses",
                ))
                (card(
                    "this-month-card",
                    "This Month",
                    &format_currency(month_net),
                    signed_style(month_net),
                    &month_breakdown,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::aggregation::{FinancialSummary, Totals};

    use super::summary_cards_view;

    #[track_caller]
    fn card_text(html: &Html, card_id: &str) -> (String, String) {
        let card = html
            .select(&Selector::parse(&format!("#{card_id}")).unwrap())
            .next()
            .unwrap_or_else(|| panic!("could not find card {card_id}"));
        let paragraphs: Vec<String> = card
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<String>().trim().to_owned())
            .collect();

        (paragraphs[0].clone(), paragraphs[1].clone())
    }

    #[test]
    fn shows_totals_balance_and_month() {
        let summary = FinancialSummary {
            total: Totals {
                income: 100.0,
                expense: 50.0,
            },
            this_month: Totals {
                income: 0.0,
                expense: 12.0,
            },
            income_count: 1,
            expense_count: 2,
        };

        let html = Html::parse_fragment(&summary_cards_view(&summary).into_string());

        assert_eq!(
            card_text(&html, "total-income-card"),
            ("$100.00".to_owned(), "1 transaction".to_owned())
        );
        assert_eq!(
            card_text(&html, "total-expenses-card"),
            ("$50.00".to_owned(), "2 transactions".to_owned())
        );
        assert_eq!(card_text(&html, "balance-card").0, "$50.00");
        assert_eq!(
            card_text(&html, "this-month-card"),
            (
                "-$12.00".to_owned(),
                "Income $0.00 / Expenses $12.00".to_owned()
            )
        );
    }

    #[test]
    fn empty_summary_shows_zeroes() {
        let html =
            Html::parse_fragment(&summary_cards_view(&FinancialSummary::default()).into_string());

        for card_id in [
            "total-income-card",
            "total-expenses-card",
            "balance-card",
            "this-month-card",
        ] {
            assert_eq!(card_text(&html, card_id).0, "$0.00");
        }
    }
}
