//! Defines the core data models and database queries for transactions.

use std::fmt::Display;

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, category::Category, user::UserID};

// ============================================================================
// MODELS
// ============================================================================

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// The database ID of a transaction.
pub type TransactionId = i64;

/// Whether money was earned or spent.
///
/// The type, not the sign of the amount, decides whether a transaction adds
/// to income or to expenses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned.
    Income,
    /// Money spent.
    #[default]
    Expense,
}

impl TransactionType {
    /// The lowercase name used in forms, query strings and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user that recorded the transaction.
    pub user_id: UserID,
    /// A short description of what the transaction was for.
    pub title: String,
    /// How much money was spent or earned. Never negative.
    pub amount: f64,
    /// What the money was spent on or where it came from.
    pub category: Category,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
}

/// A validated transaction that has not been stored yet.
///
/// Produced by [crate::TransactionForm::validate].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A short description of what the transaction was for.
    pub title: String,
    /// How much money was spent or earned. Never negative.
    pub amount: f64,
    /// What the money was spent on or where it came from.
    pub category: Category,
    /// Whether the money was earned or spent.
    pub transaction_type: TransactionType,
    /// When the transaction happened.
    pub date: Date,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert `transaction` for `user_id` and return the stored row.
///
/// # Errors
/// Returns [Error::SqlError] if `user_id` does not refer to a user, or for
/// any other SQL error.
pub fn create_transaction(
    user_id: UserID,
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, title, amount, category, type, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, user_id, title, amount, category, type, date",
        )?
        .query_row(
            (
                user_id.as_i64(),
                transaction.title,
                transaction.amount,
                transaction.category,
                transaction.transaction_type,
                transaction.date,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Get all of a user's transactions, newest first.
///
/// Transactions on the same date are ordered by descending ID so the most
/// recently recorded one comes first.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_transactions(user_id: UserID, connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, title, amount, category, type, date
             FROM \"transaction\"
             WHERE user_id = :user_id
             ORDER BY date DESC, id DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Delete the transaction `id` if it belongs to `user_id`.
///
/// # Errors
/// Returns [Error::DeleteMissingTransaction] if no transaction with `id`
/// belongs to `user_id`, or [Error::SqlError] for any other SQL error.
pub fn delete_transaction(
    user_id: UserID,
    id: TransactionId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount >= 0),
                category TEXT NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                date TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Index used by the history page and dashboard queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        title: row.get(2)?,
        amount: row.get(3)?,
        category: row.get(4)?,
        transaction_type: row.get(5)?,
        date: row.get(6)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
