//! Defines the endpoint for creating a new transaction.

use std::sync::Arc;

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use maud::html;

use crate::{
    AppState,
    alert::Alert,
    html::format_currency,
    timezone::get_local_today,
    transaction::{
        TransactionStore,
        form::{TransactionForm, transaction_form_view},
    },
    user::UserID,
};

/// The state needed to create a transaction.
#[derive(Clone)]
pub struct CreateTransactionState {
    /// Where transactions are saved.
    pub transaction_store: Arc<dyn TransactionStore>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new transaction dated today.
///
/// Responds with the form: cleared plus a success alert if the transaction
/// was saved, or as submitted with an error message if it was invalid.
/// Storage errors are returned as an alert and leave the form untouched.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let today = match get_local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let new_transaction = match form.validate(today) {
        Ok(new_transaction) => new_transaction,
        Err(error) => {
            tracing::debug!("Rejected transaction form: {error}");
            return transaction_form_view(&form, Some(&error)).into_response();
        }
    };

    let transaction = match state.transaction_store.create(user_id, new_transaction) {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            return error.into_alert_response();
        }
    };

    let cleared_form = TransactionForm {
        transaction_type: form.transaction_type,
        ..Default::default()
    };
    let alert = Alert::success(
        "Transaction added",
        &format!(
            "{} {} of {} was saved.",
            transaction.title,
            transaction.transaction_type,
            format_currency(transaction.amount)
        ),
    );

    html! {
        (transaction_form_view(&cleared_form, None))
        (alert.into_oob_html())
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Extension, extract::State, http::StatusCode, response::Response};
    use axum_extra::extract::Form;
    use scraper::{Html, Selector};

    use crate::{
        Category,
        transaction::{
            TransactionType,
            create_endpoint::{CreateTransactionState, create_transaction_endpoint},
            form::{FormError, TransactionForm},
            store::fake::FakeTransactionStore,
        },
        user::UserID,
    };

    fn get_state(store: Arc<FakeTransactionStore>) -> CreateTransactionState {
        CreateTransactionState {
            transaction_store: store,
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn form(title: &str, amount: &str, category: &str) -> TransactionForm {
        TransactionForm {
            title: title.to_owned(),
            amount: amount.to_owned(),
            category: category.to_owned(),
            transaction_type: TransactionType::Expense,
        }
    }

    async fn parse_html(response: Response) -> Html {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_fragment(&text)
    }

    #[track_caller]
    fn input_value(html: &Html, selector: &str) -> Option<String> {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .and_then(|input| input.value().attr("value"))
            .map(str::to_owned)
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let store = Arc::new(FakeTransactionStore::default());

        let response = create_transaction_endpoint(
            State(get_state(store.clone())),
            Extension(UserID::new(1)),
            Form(form("Groceries", "42.50", "Food & Dining")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let transactions = store.transactions.lock().unwrap().clone();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].title, "Groceries");
        assert_eq!(transactions[0].amount, 42.5);
        assert_eq!(transactions[0].category, Category::FoodAndDining);
        assert_eq!(transactions[0].user_id, UserID::new(1));
    }

    #[tokio::test]
    async fn success_clears_form_and_shows_alert() {
        let store = Arc::new(FakeTransactionStore::default());

        let response = create_transaction_endpoint(
            State(get_state(store)),
            Extension(UserID::new(1)),
            Form(form("Groceries", "42.50", "Food & Dining")),
        )
        .await;

        let html = parse_html(response).await;
        assert_eq!(input_value(&html, "input#title"), Some(String::new()));
        assert_eq!(input_value(&html, "input#amount"), Some(String::new()));
        let alert = html
            .select(&Selector::parse("#alert-container [role=alert]").unwrap())
            .next()
            .expect("Could not find success alert");
        assert!(alert.text().collect::<String>().contains("Transaction added"));
    }

    #[tokio::test]
    async fn blank_amount_never_reaches_store() {
        let store = Arc::new(FakeTransactionStore::default());

        let response = create_transaction_endpoint(
            State(get_state(store.clone())),
            Extension(UserID::new(1)),
            Form(form("Groceries", "", "Food & Dining")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.create_calls(), 0);

        let html = parse_html(response).await;
        assert_eq!(
            input_value(&html, "input#title"),
            Some("Groceries".to_owned())
        );
        let error_text: String = html
            .select(&Selector::parse("form p").unwrap())
            .flat_map(|element| element.text())
            .collect();
        assert!(error_text.contains(&FormError::MissingAmount.to_string()));
    }

    #[tokio::test]
    async fn store_failure_returns_error_alert() {
        let store = Arc::new(FakeTransactionStore::failing());

        let response = create_transaction_endpoint(
            State(get_state(store.clone())),
            Extension(UserID::new(1)),
            Form(form("Groceries", "12", "Food & Dining")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.create_calls(), 1);
        let html = parse_html(response).await;
        assert!(
            html.select(&Selector::parse("form").unwrap())
                .next()
                .is_none(),
            "an error response should not replace the form"
        );
    }

    #[tokio::test]
    async fn invalid_timezone_returns_error_alert() {
        let store = Arc::new(FakeTransactionStore::default());
        let state = CreateTransactionState {
            transaction_store: store.clone(),
            local_timezone: "Not/A_Timezone".to_owned(),
        };

        let response = create_transaction_endpoint(
            State(state),
            Extension(UserID::new(1)),
            Form(form("Groceries", "12", "Food & Dining")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.create_calls(), 0);
    }
}
