//! Defines the endpoint that returns a user's transactions as JSON.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{FromRef, State},
};

use crate::{
    AppState, Error,
    transaction::{Transaction, TransactionStore},
    user::UserID,
};

/// The state needed to list transactions.
#[derive(Clone)]
pub struct ListTransactionsState {
    /// Where transactions are saved.
    pub transaction_store: Arc<dyn TransactionStore>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// A route handler that returns all of the user's transactions, newest first.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<Transaction>>, Error> {
    state
        .transaction_store
        .list(user_id)
        .inspect_err(|error| tracing::error!("Could not list transactions: {error}"))
        .map(Json)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Extension, extract::State};
    use serde_json::json;
    use time::macros::date;

    use crate::{
        Category,
        transaction::{Transaction, TransactionType, store::fake::FakeTransactionStore},
        user::UserID,
    };

    use super::{ListTransactionsState, list_transactions_endpoint};

    #[tokio::test]
    async fn returns_only_the_users_transactions() {
        let own = Transaction {
            id: 1,
            user_id: UserID::new(1),
            title: "Groceries".to_owned(),
            amount: 42.5,
            category: Category::FoodAndDining,
            transaction_type: TransactionType::Expense,
            date: date!(2025 - 01 - 02),
        };
        let other = Transaction {
            id: 2,
            user_id: UserID::new(2),
            ..own.clone()
        };
        let state = ListTransactionsState {
            transaction_store: Arc::new(FakeTransactionStore::with_transactions(vec![
                own.clone(),
                other,
            ])),
        };

        let response = list_transactions_endpoint(State(state), Extension(UserID::new(1)))
            .await
            .unwrap();

        assert_eq!(response.0, vec![own]);
    }

    #[test]
    fn transaction_serializes_with_labels_and_iso_date() {
        let transaction = Transaction {
            id: 1,
            user_id: UserID::new(1),
            title: "Pay".to_owned(),
            amount: 100.0,
            category: Category::Salary,
            transaction_type: TransactionType::Income,
            date: date!(2024 - 01 - 01),
        };

        let got = serde_json::to_value(&transaction).unwrap();

        assert_eq!(got["category"], json!("Salary"));
        assert_eq!(got["type"], json!("income"));
        assert_eq!(got["amount"], json!(100.0));
        assert_eq!(got["date"], json!("2024-01-01"));
    }
}
