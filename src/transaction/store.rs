//! The data-access seam between the web handlers and the database.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    transaction::{
        NewTransaction, Transaction, TransactionId,
        core::{create_transaction, delete_transaction, get_transactions},
    },
    user::UserID,
};

/// Handles the creation, retrieval and deletion of a user's transactions.
///
/// Every operation is scoped to one user: a user can never see or delete
/// another user's transactions.
pub trait TransactionStore: Send + Sync {
    /// All of the user's transactions ordered by date, newest first.
    fn list(&self, user_id: UserID) -> Result<Vec<Transaction>, Error>;

    /// Store `transaction` and return it with its assigned ID.
    fn create(&self, user_id: UserID, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Delete the transaction `id`.
    ///
    /// Implementers should return [Error::DeleteMissingTransaction] if `id`
    /// does not exist or belongs to another user.
    fn delete(&self, user_id: UserID, id: TransactionId) -> Result<(), Error>;
}

/// Stores transactions in a SQLite database.
///
/// The user and transaction tables must exist, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn with_connection<T>(
        &self,
        operation: impl FnOnce(&Connection) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let connection = self
            .connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        operation(&connection)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    fn list(&self, user_id: UserID) -> Result<Vec<Transaction>, Error> {
        self.with_connection(|connection| get_transactions(user_id, connection))
    }

    fn create(&self, user_id: UserID, transaction: NewTransaction) -> Result<Transaction, Error> {
        self.with_connection(|connection| create_transaction(user_id, transaction, connection))
    }

    fn delete(&self, user_id: UserID, id: TransactionId) -> Result<(), Error> {
        self.with_connection(|connection| delete_transaction(user_id, id, connection))
    }
}
