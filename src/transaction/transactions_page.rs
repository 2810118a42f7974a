//! Defines the route handler for the history page, which lists a user's
//! transactions with search and filters.

use std::sync::Arc;

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    category::Category,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, base,
    },
    navigation::NavBar,
    transaction::{
        Transaction, TransactionStore, TransactionType,
        filter::{
            CategoryFilter, TransactionFilter, TransactionFilterQuery, TypeFilter,
            distinct_categories, filter_transactions, sort_by_date_descending,
        },
        view::transaction_table,
    },
    user::UserID,
};

/// The state needed for the history page.
#[derive(Clone)]
pub struct TransactionsViewState {
    /// Where transactions are saved.
    pub transaction_store: Arc<dyn TransactionStore>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// Render the user's transactions that match the query string filters,
/// newest first.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<TransactionFilterQuery>,
) -> Result<Response, Error> {
    let transactions = state
        .transaction_store
        .list(user_id)
        .inspect_err(|error| tracing::error!("Could not get transactions: {error}"))?;
    let filter = TransactionFilter::from(query);

    let categories = distinct_categories(&transactions);
    let matching = sort_by_date_descending(filter_transactions(&transactions, &filter));

    Ok(transactions_view(&filter, &categories, &matching, transactions.len()).into_response())
}

fn transactions_view(
    filter: &TransactionFilter,
    categories: &[&Category],
    matching: &[&Transaction],
    total_count: usize,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let empty_message = if total_count == 0 {
        "No transactions yet. Add one to get started."
    } else {
        "No transactions match your filters."
    };

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-4"
            {
                div class="flex items-center justify-between"
                {
                    h2 class="text-xl font-bold" { "Transaction History" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }

                (filter_form(filter, categories))

                p class="text-sm text-gray-500 dark:text-gray-400" data-result-count="true"
                {
                    "Showing " (matching.len()) " of " (total_count) " transactions"
                }

                (transaction_table(matching, empty_message))
            }
        }
    };

    base("Transaction History", &[], &content)
}

fn filter_form(filter: &TransactionFilter, categories: &[&Category]) -> Markup {
    let selected_category = match &filter.category {
        CategoryFilter::All => None,
        CategoryFilter::Only(category) => Some(category),
    };
    // Keep a category chosen via the URL selectable even if no transaction uses it.
    let missing_selected = selected_category.filter(|selected| !categories.contains(selected));
    let type_options = [
        (TypeFilter::All, "All types"),
        (TypeFilter::Only(TransactionType::Income), "Income"),
        (TypeFilter::Only(TransactionType::Expense), "Expense"),
    ];

    html! {
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="grid gap-4 md:grid-cols-4 items-end"
        {
            div class="md:col-span-2"
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search" }

                input
                    type="search"
                    name="search"
                    id="search"
                    placeholder="Search by title or category"
                    value=(filter.search)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="all" selected[selected_category.is_none()] { "All categories" }

                    @for category in categories {
                        option
                            value=(category)
                            selected[selected_category == Some(*category)]
                        {
                            (category)
                        }
                    }

                    @if let Some(category) = missing_selected {
                        option value=(category) selected { (category) }
                    }
                }
            }

            div
            {
                label for="type" class=(FORM_LABEL_STYLE) { "Type" }

                select name="type" id="type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (type_filter, label) in type_options {
                        option
                            value=(type_filter.as_query_value())
                            selected[type_filter == filter.transaction_type]
                        {
                            (label)
                        }
                    }
                }
            }

            div class="md:col-span-4 flex items-center gap-4"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply filters" }

                a href=(endpoints::TRANSACTIONS_VIEW) class={ (LINK_STYLE) " whitespace-nowrap" }
                {
                    "Clear"
                }
            }
        }
    }
}
