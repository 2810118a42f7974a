//! Everything related to a user's transactions.
//!
//! This module contains:
//! - The `Transaction` model and the database functions for it
//! - The `TransactionStore` seam that the route handlers use
//! - Searching, filtering and sorting for the history page
//! - The transaction form and its validation
//! - The route handlers for the add transaction and history pages

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod filter;
mod form;
mod list_endpoint;
mod store;
mod transactions_page;
mod view;

pub use core::{
    NewTransaction, Transaction, TransactionId, TransactionType, create_transaction_table,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_new_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use filter::{
    CategoryFilter, TransactionFilter, TypeFilter, filter_transactions, sort_by_date_descending,
};
pub use form::{FormError, TransactionForm};
pub use list_endpoint::list_transactions_endpoint;
pub use store::{SQLiteTransactionStore, TransactionStore};
pub use transactions_page::get_transactions_page;

pub(crate) use view::transaction_table;

#[cfg(test)]
pub(crate) use core::test_utils;
#[cfg(test)]
pub(crate) use store::fake::FakeTransactionStore;
