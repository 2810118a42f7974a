//! Summaries of a user's transactions for the dashboard cards and charts.
//!
//! Every function here is a single pass over a borrowed slice or iterator of
//! transactions and never modifies them. Empty input gives zero totals and
//! empty collections.

use std::collections::HashMap;

use time::{Date, Month};

use crate::{
    category::Category,
    transaction::{Transaction, TransactionType},
};

// ============================================================================
// MODELS
// ============================================================================

/// The sum of income and the sum of expenses over some transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    /// The sum of the amounts of income transactions.
    pub income: f64,
    /// The sum of the amounts of expense transactions.
    pub expense: f64,
}

impl Totals {
    /// Income minus expenses.
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }

    fn add(&mut self, transaction: &Transaction) {
        match transaction.transaction_type {
            TransactionType::Income => self.income += transaction.amount,
            TransactionType::Expense => self.expense += transaction.amount,
        }
    }
}

/// The income and expenses for a single day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTotal {
    /// The day the totals are for.
    pub date: Date,
    /// The income earned on `date`.
    pub income: f64,
    /// The money spent on `date`.
    pub expense: f64,
}

/// The figures shown on the overview cards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FinancialSummary {
    /// Totals over all of the user's transactions.
    pub total: Totals,
    /// Totals over the transactions in the current calendar month.
    pub this_month: Totals,
    /// How many income transactions there are.
    pub income_count: usize,
    /// How many expense transactions there are.
    pub expense_count: usize,
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Sum the income and the expenses in `transactions`.
pub fn totals_by_type<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Totals {
    let mut totals = Totals::default();

    for transaction in transactions {
        totals.add(transaction);
    }

    totals
}

/// Sum the expenses in `transactions` per category. Income is ignored.
pub fn category_totals<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> HashMap<Category, f64> {
    let mut totals = HashMap::new();

    for transaction in transactions
        .into_iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Expense)
    {
        *totals.entry(transaction.category.clone()).or_insert(0.0) += transaction.amount;
    }

    totals
}

/// Sum income and expenses per day.
///
/// Days appear in the order they are first seen in `transactions`, not in
/// date order. Use [recent_daily_totals] when chronological order matters.
pub fn daily_totals<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Vec<DailyTotal> {
    let mut days: Vec<DailyTotal> = Vec::new();
    let mut index_by_date: HashMap<Date, usize> = HashMap::new();

    for transaction in transactions {
        let index = *index_by_date.entry(transaction.date).or_insert_with(|| {
            days.push(DailyTotal {
                date: transaction.date,
                income: 0.0,
                expense: 0.0,
            });
            days.len() - 1
        });

        let day = &mut days[index];
        match transaction.transaction_type {
            TransactionType::Income => day.income += transaction.amount,
            TransactionType::Expense => day.expense += transaction.amount,
        }
    }

    days
}

/// The daily totals for the latest `days` days that have transactions,
/// oldest first.
pub fn recent_daily_totals<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    days: usize,
) -> Vec<DailyTotal> {
    let mut totals = daily_totals(transactions);
    totals.sort_by_key(|total| total.date);

    let skip = totals.len().saturating_sub(days);
    totals.split_off(skip)
}

/// The transactions dated in `month` of `year`.
pub fn month_scoped<'a, I>(
    transactions: I,
    month: Month,
    year: i32,
) -> impl Iterator<Item = &'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(move |transaction| {
            transaction.date.month() == month && transaction.date.year() == year
        })
}

/// Compute the overview figures, treating the month containing `today` as
/// the current month.
pub fn summarize(transactions: &[Transaction], today: Date) -> FinancialSummary {
    let income_count = transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Income)
        .count();

    FinancialSummary {
        total: totals_by_type(transactions),
        this_month: totals_by_type(month_scoped(transactions, today.month(), today.year())),
        income_count,
        expense_count: transactions.len() - income_count,
    }
}

/// `part` as a percentage of `whole`, or zero if `whole` is zero.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }

    part / whole * 100.0
}
