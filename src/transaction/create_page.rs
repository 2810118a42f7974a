//! Defines the route handler for the page for recording a new transaction.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{FORM_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    transaction::form::{TransactionForm, transaction_form_view},
};

fn new_transaction_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let form = transaction_form_view(&TransactionForm::default(), None);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full max-w-md space-y-4"
            {
                h2 class="text-xl font-bold" { "Add Transaction" }

                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "New transactions are dated today."
                }

                (form)
            }
        }
    };

    base("Add Transaction", &[dollar_input_styles()], &content)
}

/// Renders the page for recording a transaction.
pub async fn get_new_transaction_page() -> Response {
    new_transaction_view().into_response()
}
