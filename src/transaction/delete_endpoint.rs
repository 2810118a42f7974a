//! Defines the endpoint for deleting a transaction.

use std::sync::Arc;

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    alert::Alert,
    transaction::{TransactionId, TransactionStore},
    user::UserID,
};

/// The state needed to delete a transaction.
#[derive(Clone)]
pub struct DeleteTransactionState {
    /// Where transactions are saved.
    pub transaction_store: Arc<dyn TransactionStore>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// A route handler for deleting one of the user's transactions.
///
/// On success the response body is empty apart from an out-of-band alert, so
/// the row that sent the request is swapped out of the page. The status code
/// has to be 200 OK or HTMX will not remove the row.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.transaction_store.delete(user_id, transaction_id) {
        Ok(()) => Alert::success("Transaction deleted", "")
            .into_oob_html()
            .into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Extension,
        extract::{Path, State},
        http::StatusCode,
    };
    use time::macros::date;

    use crate::{
        Category,
        transaction::{
            Transaction, TransactionType,
            delete_endpoint::{DeleteTransactionState, delete_transaction_endpoint},
            store::fake::FakeTransactionStore,
        },
        user::UserID,
    };

    fn transaction(id: i64, user_id: UserID) -> Transaction {
        Transaction {
            id,
            user_id,
            title: "Coffee".to_owned(),
            amount: 4.5,
            category: Category::FoodAndDining,
            transaction_type: TransactionType::Expense,
            date: date!(2025 - 10 - 26),
        }
    }

    #[tokio::test]
    async fn deletes_transaction() {
        let user_id = UserID::new(1);
        let store = Arc::new(FakeTransactionStore::with_transactions(vec![
            transaction(1, user_id),
            transaction(2, user_id),
        ]));
        let state = DeleteTransactionState {
            transaction_store: store.clone(),
        };

        let response =
            delete_transaction_endpoint(State(state), Extension(user_id), Path(1)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let remaining: Vec<i64> = store
            .transactions
            .lock()
            .unwrap()
            .iter()
            .map(|transaction| transaction.id)
            .collect();
        assert_eq!(remaining, vec![2]);
    }

    #[tokio::test]
    async fn missing_transaction_returns_not_found() {
        let store = Arc::new(FakeTransactionStore::default());
        let state = DeleteTransactionState {
            transaction_store: store,
        };

        let response =
            delete_transaction_endpoint(State(state), Extension(UserID::new(1)), Path(42)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cannot_delete_another_users_transaction() {
        let owner = UserID::new(1);
        let store = Arc::new(FakeTransactionStore::with_transactions(vec![transaction(
            1, owner,
        )]));
        let state = DeleteTransactionState {
            transaction_store: store.clone(),
        };

        let response =
            delete_transaction_endpoint(State(state), Extension(UserID::new(2)), Path(1)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(store.transactions.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn store_failure_returns_server_error() {
        let store = Arc::new(FakeTransactionStore::failing());
        let state = DeleteTransactionState {
            transaction_store: store,
        };

        let response =
            delete_transaction_endpoint(State(state), Extension(UserID::new(1)), Path(1)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
