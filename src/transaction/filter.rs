//! Search, filter and sort transactions for the history page.

use serde::{Deserialize, Serialize};

use crate::{
    category::Category,
    transaction::{Transaction, TransactionType},
};

/// Restricts transactions to one category, or lets all through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Keep every category.
    #[default]
    All,
    /// Keep transactions with exactly this category.
    Only(Category),
}

impl CategoryFilter {
    fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    /// The value used for this filter in query strings.
    pub fn as_query_value(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

impl From<&str> for CategoryFilter {
    /// `"all"` and the empty string mean [CategoryFilter::All], anything else
    /// selects that category label.
    ///
    /// A custom category labelled "all" is therefore never selected on its
    /// own, although search still finds it.
    fn from(value: &str) -> Self {
        match value.trim() {
            "" | "all" => CategoryFilter::All,
            label => CategoryFilter::Only(Category::from(label)),
        }
    }
}

/// Restricts transactions to income or expenses, or lets both through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    /// Keep income and expenses.
    #[default]
    All,
    /// Keep transactions of this type.
    Only(TransactionType),
}

impl TypeFilter {
    fn matches(&self, transaction_type: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => *wanted == transaction_type,
        }
    }

    /// The value used for this filter in query strings.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Only(transaction_type) => transaction_type.as_str(),
        }
    }
}

impl From<&str> for TypeFilter {
    /// Unknown values fall back to [TypeFilter::All].
    fn from(value: &str) -> Self {
        match value.trim() {
            "income" => TypeFilter::Only(TransactionType::Income),
            "expense" => TypeFilter::Only(TransactionType::Expense),
            _ => TypeFilter::All,
        }
    }
}

/// The query string of the history page, e.g. `?search=food&category=all&type=expense`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TransactionFilterQuery {
    /// Free text to look for in titles and categories.
    pub search: Option<String>,
    /// A category label or `"all"`.
    pub category: Option<String>,
    /// `"income"`, `"expense"` or `"all"`.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

/// Decides which transactions are shown in the history list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Text to search for. Surrounding whitespace is ignored.
    pub search: String,
    /// Which category to show.
    pub category: CategoryFilter,
    /// Which type of transaction to show.
    pub transaction_type: TypeFilter,
}

impl TransactionFilter {
    /// Whether `transaction` passes all three conditions.
    ///
    /// The search is a case-insensitive substring match against the title or
    /// the category label. An empty search matches everything.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.matches_search(transaction)
            && self.category.matches(&transaction.category)
            && self.transaction_type.matches(transaction.transaction_type)
    }

    fn matches_search(&self, transaction: &Transaction) -> bool {
        let needle = self.search.trim().to_lowercase();

        needle.is_empty()
            || transaction.title.to_lowercase().contains(&needle)
            || transaction
                .category
                .as_str()
                .to_lowercase()
                .contains(&needle)
    }
}

impl From<TransactionFilterQuery> for TransactionFilter {
    fn from(query: TransactionFilterQuery) -> Self {
        Self {
            search: query.search.unwrap_or_default().trim().to_owned(),
            category: query
                .category
                .as_deref()
                .map(CategoryFilter::from)
                .unwrap_or_default(),
            transaction_type: query
                .transaction_type
                .as_deref()
                .map(TypeFilter::from)
                .unwrap_or_default(),
        }
    }
}

/// Keep the transactions that match `filter`, in their original order.
///
/// Filtering is idempotent: applying the same filter to the output gives the
/// same output.
pub fn filter_transactions<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    transactions
        .into_iter()
        .filter(|transaction| filter.matches(transaction))
        .collect()
}

/// Sort transactions so the newest date comes first.
///
/// The sort is stable, so transactions on the same date keep their relative order.
pub fn sort_by_date_descending(mut transactions: Vec<&Transaction>) -> Vec<&Transaction> {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions
}

/// The distinct categories in `transactions`, in the order they first appear.
pub fn distinct_categories<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Vec<&'a Category> {
    let mut categories: Vec<&Category> = Vec::new();

    for transaction in transactions {
        if !categories.contains(&&transaction.category) {
            categories.push(&transaction.category);
        }
    }

    categories
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        category::Category,
        transaction::{
            Transaction, TransactionType,
            filter::{
                CategoryFilter, TransactionFilter, TransactionFilterQuery, TypeFilter,
                distinct_categories, filter_transactions, sort_by_date_descending,
            },
        },
        user::UserID,
    };

    fn transaction(
        id: i64,
        title: &str,
        category: Category,
        transaction_type: TransactionType,
        date: Date,
    ) -> Transaction {
        Transaction {
            id,
            user_id: UserID::new(1),
            title: title.to_owned(),
            amount: 10.0,
            category,
            transaction_type,
            date,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            transaction(
                1,
                "Groceries",
                Category::FoodAndDining,
                TransactionType::Expense,
                date!(2024 - 01 - 01),
            ),
            transaction(
                2,
                "Monthly pay",
                Category::Salary,
                TransactionType::Income,
                date!(2024 - 01 - 02),
            ),
            transaction(
                3,
                "Bus fare",
                Category::Transportation,
                TransactionType::Expense,
                date!(2024 - 01 - 02),
            ),
            transaction(
                4,
                "Takeaway food",
                Category::Other,
                TransactionType::Expense,
                date!(2024 - 01 - 03),
            ),
        ]
    }

    fn ids(transactions: &[&Transaction]) -> Vec<i64> {
        transactions.iter().map(|transaction| transaction.id).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let transactions = sample();

        let got = filter_transactions(&transactions, &TransactionFilter::default());

        assert_eq!(ids(&got), vec![1, 2, 3, 4]);
    }

    #[test]
    fn search_matches_category_label() {
        let transactions = sample();
        let filter = TransactionFilter {
            search: "food".to_owned(),
            ..Default::default()
        };

        let got = filter_transactions(&transactions, &filter);

        // "Groceries" matches through its category, "Takeaway food" through its title.
        assert_eq!(ids(&got), vec![1, 4]);
    }

    #[test]
    fn search_is_case_insensitive_and_trimmed() {
        let transactions = sample();
        let filter = TransactionFilter {
            search: "  BUS ".to_owned(),
            ..Default::default()
        };

        let got = filter_transactions(&transactions, &filter);

        assert_eq!(ids(&got), vec![3]);
    }

    #[test]
    fn whitespace_search_matches_everything() {
        let transactions = sample();
        let filter = TransactionFilter {
            search: "   ".to_owned(),
            ..Default::default()
        };

        let got = filter_transactions(&transactions, &filter);

        assert_eq!(got.len(), transactions.len());
    }

    #[test]
    fn category_filter_requires_exact_match() {
        let transactions = sample();
        let filter = TransactionFilter {
            category: CategoryFilter::Only(Category::Transportation),
            ..Default::default()
        };

        let got = filter_transactions(&transactions, &filter);

        assert_eq!(ids(&got), vec![3]);
    }

    #[test]
    fn type_filter_keeps_only_that_type() {
        let transactions = sample();
        let filter = TransactionFilter {
            transaction_type: TypeFilter::Only(TransactionType::Income),
            ..Default::default()
        };

        let got = filter_transactions(&transactions, &filter);

        assert_eq!(ids(&got), vec![2]);
    }

    #[test]
    fn conditions_are_combined() {
        let transactions = sample();
        let filter = TransactionFilter {
            search: "food".to_owned(),
            category: CategoryFilter::Only(Category::Other),
            transaction_type: TypeFilter::Only(TransactionType::Expense),
        };

        let got = filter_transactions(&transactions, &filter);

        assert_eq!(ids(&got), vec![4]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let transactions = sample();
        let filter = TransactionFilter {
            search: "o".to_owned(),
            category: CategoryFilter::All,
            transaction_type: TypeFilter::Only(TransactionType::Expense),
        };

        let once = filter_transactions(&transactions, &filter);
        let twice = filter_transactions(once.iter().copied(), &filter);

        assert_eq!(once, twice);
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let transactions = sample();

        let got = sort_by_date_descending(transactions.iter().collect());

        // Transactions 2 and 3 share a date and keep their input order.
        assert_eq!(ids(&got), vec![4, 2, 3, 1]);
    }

    #[test]
    fn sort_keeps_reversed_input_order_for_ties() {
        let transactions = sample();

        let got = sort_by_date_descending(transactions.iter().rev().collect());

        assert_eq!(ids(&got), vec![4, 3, 2, 1]);
    }

    #[test]
    fn query_parses_all_and_empty_as_no_filter() {
        let query = TransactionFilterQuery {
            search: Some(" ".to_owned()),
            category: Some("all".to_owned()),
            transaction_type: Some(String::new()),
        };

        assert_eq!(TransactionFilter::from(query), TransactionFilter::default());
    }

    #[test]
    fn custom_category_named_all_is_found_by_search_not_by_filter() {
        let mut transactions = sample();
        transactions.push(transaction(
            5,
            "Misc",
            Category::Custom("all".to_owned()),
            TransactionType::Expense,
            date!(2024 - 01 - 05),
        ));

        assert_eq!(CategoryFilter::from("all"), CategoryFilter::All);
        let by_category = TransactionFilter {
            category: CategoryFilter::from("all"),
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_transactions(&transactions, &by_category)),
            vec![1, 2, 3, 4, 5]
        );

        let by_search = TransactionFilter {
            search: "misc".to_owned(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_transactions(&transactions, &by_search)), vec![5]);
    }

    #[test]
    fn query_parses_concrete_values() {
        let query: TransactionFilterQuery =
            serde_urlencoded::from_str("search=rent&category=Bills+%26+Utilities&type=expense")
                .unwrap();

        let filter = TransactionFilter::from(query);

        assert_eq!(
            filter,
            TransactionFilter {
                search: "rent".to_owned(),
                category: CategoryFilter::Only(Category::BillsAndUtilities),
                transaction_type: TypeFilter::Only(TransactionType::Expense),
            }
        );
    }

    #[test]
    fn distinct_categories_keeps_first_occurrence_order() {
        let mut transactions = sample();
        transactions.push(transaction(
            5,
            "Dinner",
            Category::FoodAndDining,
            TransactionType::Expense,
            date!(2024 - 01 - 04),
        ));

        let got = distinct_categories(&transactions);

        assert_eq!(
            got,
            vec![
                &Category::FoodAndDining,
                &Category::Salary,
                &Category::Transportation,
                &Category::Other,
            ]
        );
    }
}
