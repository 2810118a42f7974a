//! Transaction categories.
//!
//! The form offers a fixed list of categories, but storage accepts any label.
//! Labels outside the fixed list are kept as [Category::Custom] so they still
//! round-trip through the database unchanged.

use std::fmt::Display;

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// The category of a transaction, e.g. "Food & Dining" or "Salary".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Groceries, restaurants and takeaways.
    FoodAndDining,
    /// Public transport, fuel, parking.
    Transportation,
    /// General purchases.
    Shopping,
    /// Movies, games, events.
    Entertainment,
    /// Rent, power, internet, phone.
    BillsAndUtilities,
    /// Doctor, dentist, pharmacy.
    Healthcare,
    /// Flights, accommodation.
    Travel,
    /// Courses, books, tuition.
    Education,
    /// Regular employment income.
    Salary,
    /// Contract and gig income.
    Freelance,
    /// Dividends, interest, capital gains.
    Investment,
    /// Anything that does not fit the other categories.
    Other,
    /// A label outside the fixed list.
    Custom(String),
}

impl Category {
    /// The categories offered by the transaction form, in display order.
    pub const PRESETS: [Category; 12] = [
        Category::FoodAndDining,
        Category::Transportation,
        Category::Shopping,
        Category::Entertainment,
        Category::BillsAndUtilities,
        Category::Healthcare,
        Category::Travel,
        Category::Education,
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Other,
    ];

    /// The display label, which is also the value stored in the database.
    pub fn as_str(&self) -> &str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::BillsAndUtilities => "Bills & Utilities",
            Category::Healthcare => "Healthcare",
            Category::Travel => "Travel",
            Category::Education => "Education",
            Category::Salary => "Salary",
            Category::Freelance => "Freelance",
            Category::Investment => "Investment",
            Category::Other => "Other",
            Category::Custom(label) => label,
        }
    }
}

impl From<&str> for Category {
    /// Matches `label` against the preset labels exactly, falling back to
    /// [Category::Custom].
    fn from(label: &str) -> Self {
        Category::PRESETS
            .iter()
            .find(|category| category.as_str() == label)
            .cloned()
            .unwrap_or_else(|| Category::Custom(label.to_owned()))
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from(label.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(label) => label,
            preset => preset.as_str().to_owned(),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(Category::from)
    }
}
