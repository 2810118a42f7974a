//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use rusqlite::Connection;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{
    Error,
    auth::DEFAULT_COOKIE_DURATION,
    db::initialize,
    transaction::{SQLiteTransactionStore, TransactionStore},
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The database connection, used directly for user accounts.
    pub db_connection: Arc<Mutex<Connection>>,

    /// Where transactions are saved.
    pub transaction_store: Arc<dyn TransactionStore>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        cookie_secret: &str,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            local_timezone: local_timezone.to_owned(),
            transaction_store: Arc::new(SQLiteTransactionStore::new(connection.clone())),
            db_connection: connection,
        })
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        PasswordHash,
        transaction::test_utils::new_income,
        user::{UserID, create_user},
    };

    use super::{AppState, create_cookie_key};

    #[test]
    fn new_initializes_database_and_store() {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            "secret",
            "Etc/UTC",
        )
        .unwrap();
        let user = create_user(
            "test@test.com".parse().unwrap(),
            PasswordHash::new_unchecked("hunter2"),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let created = state
            .transaction_store
            .create(
                user.id,
                new_income("Pay", 100.0, time::macros::date!(2025 - 01 - 01)),
            )
            .unwrap();

        assert_eq!(state.transaction_store.list(user.id).unwrap(), vec![created]);
        assert!(
            state
                .transaction_store
                .list(UserID::new(user.id.as_i64() + 1))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn cookie_key_is_deterministic() {
        assert_eq!(create_cookie_key("secret"), create_cookie_key("secret"));
        assert_ne!(create_cookie_key("secret"), create_cookie_key("other"));
    }
}
