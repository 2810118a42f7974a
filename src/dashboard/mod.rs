//! The overview and analytics pages.
//!
//! Both pages are derived from the user's full transaction list on every
//! request: summary cards, an expense breakdown chart, an income vs expenses
//! chart and, on the analytics page, a per-category table.

mod cards;
mod charts;
mod handlers;

pub use handlers::{get_analytics_page, get_overview_page};
