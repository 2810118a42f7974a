//! HTML rendering for lists of transactions.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, EXPENSE_TEXT_STYLE, INCOME_TEXT_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
    },
    transaction::{Transaction, TransactionType},
};

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
const MAX_TITLE_GRAPHEMES: usize = 32;

/// The amount with a sign for its type, e.g. "+$12.00" for income and
/// "-$12.00" for an expense.
pub(crate) fn signed_amount(transaction: &Transaction) -> String {
    match transaction.transaction_type {
        TransactionType::Income => format!("+{}", format_currency(transaction.amount)),
        TransactionType::Expense => format!("-{}", format_currency(transaction.amount)),
    }
}

fn amount_class(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Income => INCOME_TEXT_STYLE,
        TransactionType::Expense => EXPENSE_TEXT_STYLE,
    }
}

fn format_title(title: &str) -> (String, Option<&str>) {
    let title_length = title.graphemes(true).count();

    if title_length <= MAX_TITLE_GRAPHEMES {
        (title.to_owned(), None)
    } else {
        let truncated: String = title
            .graphemes(true)
            .take(MAX_TITLE_GRAPHEMES - 3)
            .collect();
        let truncated = truncated + "...";
        (truncated, Some(title))
    }
}

fn transaction_row_view(transaction: &Transaction) -> Markup {
    let (title, tooltip) = format_title(&transaction.title);
    let delete_url = format_endpoint(endpoints::TRANSACTION, transaction.id);
    let confirm_message = format!(
        "Are you sure you want to delete the transaction '{}'? This cannot be undone.",
        transaction.title
    );

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(transaction.date) { (transaction.date) }
            }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (title) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
            }
            td class={ (TABLE_CELL_STYLE) " text-right tabular-nums " (amount_class(transaction.transaction_type)) }
            {
                (signed_amount(transaction))
            }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    hx-delete=(delete_url)
                    hx-confirm=(confirm_message)
                    hx-target="closest tr"
                    hx-target-error="#alert-container"
                    hx-swap="delete"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

/// A table of `transactions` in the given order, or `empty_message` when
/// there are none.
pub(crate) fn transaction_table(transactions: &[&Transaction], empty_message: &str) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md sm:rounded-lg w-full"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (transaction_row_view(transaction))
                    }

                    @if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE) data-empty-row="true"
                        {
                            td colspan="5" class={ (TABLE_CELL_STYLE) " text-center" }
                            {
                                (empty_message)
                            }
                        }
                    }
                }
            }
        }
    }
}
