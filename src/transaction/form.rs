//! The form for recording a transaction and its validation.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    category::Category,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    transaction::{NewTransaction, TransactionType},
};

/// The raw values submitted with the transaction form.
///
/// Everything except the type is kept as text so that the form can be shown
/// again exactly as the user typed it when validation fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionForm {
    /// What the transaction was for.
    #[serde(default)]
    pub title: String,
    /// The amount in dollars, e.g. "12.50".
    #[serde(default)]
    pub amount: String,
    /// A category label, see [Category::PRESETS].
    #[serde(default)]
    pub category: String,
    /// Income or expense, defaults to expense.
    #[serde(default, rename = "type")]
    pub transaction_type: TransactionType,
}

/// Why the transaction form was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    /// The title was empty or only whitespace.
    #[error("Please enter a title.")]
    MissingTitle,

    /// The amount was empty or only whitespace.
    #[error("Please enter an amount.")]
    MissingAmount,

    /// The amount is not a finite number.
    #[error("\"{0}\" is not a valid amount.")]
    InvalidAmount(String),

    /// The amount is less than zero.
    #[error("The amount cannot be negative.")]
    NegativeAmount,

    /// No category was chosen.
    #[error("Please choose a category.")]
    MissingCategory,
}

impl FormError {
    /// The name of the form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            FormError::MissingTitle => "title",
            FormError::MissingAmount | FormError::InvalidAmount(_) | FormError::NegativeAmount => {
                "amount"
            }
            FormError::MissingCategory => "category",
        }
    }
}

impl TransactionForm {
    /// Check the submitted values and build a transaction dated `today`.
    ///
    /// Fields are trimmed before they are checked, so whitespace-only values
    /// count as empty.
    ///
    /// # Errors
    /// Returns the first [FormError] found, checking title, then amount, then
    /// category.
    pub fn validate(&self, today: Date) -> Result<NewTransaction, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }

        let raw_amount = self.amount.trim();
        if raw_amount.is_empty() {
            return Err(FormError::MissingAmount);
        }

        let amount: f64 = raw_amount
            .parse()
            .ok()
            .filter(|amount: &f64| amount.is_finite())
            .ok_or_else(|| FormError::InvalidAmount(raw_amount.to_owned()))?;

        if amount < 0.0 {
            return Err(FormError::NegativeAmount);
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(FormError::MissingCategory);
        }

        Ok(NewTransaction {
            title: title.to_owned(),
            // Avoid storing negative zero.
            amount: amount.abs(),
            category: Category::from(category),
            transaction_type: self.transaction_type,
            date: today,
        })
    }
}

/// Render the transaction form filled in with `form`, showing `error` next
/// to the field it belongs to.
///
/// The form replaces itself with the server's response, so a rejected
/// submission keeps the user's input and a successful one clears it.
pub fn transaction_form_view(form: &TransactionForm, error: Option<&FormError>) -> Markup {
    let error_for = |field: &str| {
        error
            .filter(|error| error.field() == field)
            .map(|error| error.to_string())
    };
    let is_expense = form.transaction_type == TransactionType::Expense;
    let selected_category = form.category.trim();
    let has_custom_category = !selected_category.is_empty()
        && matches!(Category::from(selected_category), Category::Custom(_));

    html! {
        form
            id="transaction-form"
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    div class="flex items-center gap-3"
                    {
                        input
                            name="type"
                            id="transaction-type-expense"
                            type="radio"
                            value="expense"
                            checked[is_expense]
                            class=(FORM_RADIO_INPUT_STYLE);

                        label
                            for="transaction-type-expense"
                            class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Expense"
                        }
                    }

                    div class="flex items-center gap-3"
                    {
                        input
                            name="type"
                            id="transaction-type-income"
                            type="radio"
                            value="income"
                            checked[!is_expense]
                            class=(FORM_RADIO_INPUT_STYLE);

                        label
                            for="transaction-type-income"
                            class=(FORM_RADIO_LABEL_STYLE)
                        {
                            "Income"
                        }
                    }
                }
            }

            div
            {
                label for="title" class=(FORM_LABEL_STYLE) { "Title" }

                input
                    name="title"
                    id="title"
                    type="text"
                    placeholder="e.g. Groceries"
                    value=(form.title)
                    class=(FORM_TEXT_INPUT_STYLE);

                @if let Some(message) = error_for("title") {
                    p class=(FORM_ERROR_STYLE) { (message) }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0"
                        placeholder="0.00"
                        value=(form.amount)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                @if let Some(message) = error_for("amount") {
                    p class=(FORM_ERROR_STYLE) { (message) }
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    name="category"
                    id="category"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[selected_category.is_empty()] { "Select a category" }

                    @for category in Category::PRESETS.iter() {
                        option
                            value=(category)
                            selected[category.as_str() == selected_category]
                        {
                            (category)
                        }
                    }

                    @if has_custom_category {
                        option value=(selected_category) selected { (selected_category) }
                    }
                }

                @if let Some(message) = error_for("category") {
                    p class=(FORM_ERROR_STYLE) { (message) }
                }
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator" { (loading_spinner()) }
                " Add Transaction"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        category::Category,
        transaction::{NewTransaction, TransactionType},
    };

    use super::{FormError, TransactionForm, transaction_form_view};

    fn form(title: &str, amount: &str, category: &str) -> TransactionForm {
        TransactionForm {
            title: title.to_owned(),
            amount: amount.to_owned(),
            category: category.to_owned(),
            transaction_type: TransactionType::Expense,
        }
    }

    #[test]
    fn valid_form_builds_transaction_dated_today() {
        let today = date!(2025 - 06 - 15);

        let got = form("  Groceries ", "42.5", "Food & Dining").validate(today);

        assert_eq!(
            got,
            Ok(NewTransaction {
                title: "Groceries".to_owned(),
                amount: 42.5,
                category: Category::FoodAndDining,
                transaction_type: TransactionType::Expense,
                date: today,
            })
        );
    }

    #[test]
    fn blank_amount_is_rejected() {
        let got = form("Groceries", "", "Food & Dining").validate(date!(2025 - 06 - 15));

        assert_eq!(got, Err(FormError::MissingAmount));
    }

    #[test]
    fn whitespace_only_fields_are_rejected() {
        let today = date!(2025 - 06 - 15);

        assert_eq!(
            form("   ", "1", "Other").validate(today),
            Err(FormError::MissingTitle)
        );
        assert_eq!(
            form("Bus", " \t", "Other").validate(today),
            Err(FormError::MissingAmount)
        );
        assert_eq!(
            form("Bus", "1", "  ").validate(today),
            Err(FormError::MissingCategory)
        );
    }

    #[test]
    fn invalid_amounts_are_rejected() {
        let today = date!(2025 - 06 - 15);

        for amount in ["abc", "NaN", "inf", "1.2.3"] {
            assert!(
                matches!(
                    form("Bus", amount, "Other").validate(today),
                    Err(FormError::InvalidAmount(_))
                ),
                "want {amount:?} to be rejected as an invalid amount"
            );
        }

        assert_eq!(
            form("Bus", "-3", "Other").validate(today),
            Err(FormError::NegativeAmount)
        );
    }

    #[test]
    fn zero_amount_is_accepted() {
        let got = form("Freebie", "0", "Other").validate(date!(2025 - 06 - 15));

        assert_eq!(got.map(|transaction| transaction.amount), Ok(0.0));
    }

    #[test]
    fn unknown_category_becomes_custom() {
        let got = form("Vet", "80", "Pets").validate(date!(2025 - 06 - 15));

        assert_eq!(
            got.map(|transaction| transaction.category),
            Ok(Category::Custom("Pets".to_owned()))
        );
    }

    #[test]
    fn form_decodes_from_urlencoded_body() {
        let got: TransactionForm =
            serde_html_form::from_str("title=Pay&amount=100&category=Salary&type=income").unwrap();

        assert_eq!(
            got,
            TransactionForm {
                title: "Pay".to_owned(),
                amount: "100".to_owned(),
                category: "Salary".to_owned(),
                transaction_type: TransactionType::Income,
            }
        );
    }

    #[test]
    fn missing_type_defaults_to_expense() {
        let got: TransactionForm =
            serde_html_form::from_str("title=Bus&amount=3&category=Transportation").unwrap();

        assert_eq!(got.transaction_type, TransactionType::Expense);
    }

    #[test]
    fn view_shows_error_next_to_field_and_keeps_input() {
        let submitted = form("Groceries", "", "Food & Dining");
        let error = submitted.validate(date!(2025 - 06 - 15)).unwrap_err();

        let html = transaction_form_view(&submitted, Some(&error)).into_string();
        let fragment = Html::parse_fragment(&html);

        let title = fragment
            .select(&Selector::parse("input#title").unwrap())
            .next()
            .unwrap();
        assert_eq!(title.value().attr("value"), Some("Groceries"));

        let selected = fragment
            .select(&Selector::parse("select#category option[selected]").unwrap())
            .next()
            .unwrap();
        assert_eq!(selected.value().attr("value"), Some("Food & Dining"));

        let errors: Vec<String> = fragment
            .select(&Selector::parse("p.text-red-500").unwrap())
            .map(|element| element.text().collect())
            .collect();
        assert_eq!(errors, vec![FormError::MissingAmount.to_string()]);
    }

    #[test]
    fn empty_view_lists_preset_categories() {
        let html = transaction_form_view(&TransactionForm::default(), None).into_string();
        let fragment = Html::parse_fragment(&html);

        let options = fragment
            .select(&Selector::parse("select#category option").unwrap())
            .count();
        let checked = fragment
            .select(&Selector::parse("input[name=type][checked]").unwrap())
            .next()
            .and_then(|input| input.value().attr("value"));

        assert_eq!(options, Category::PRESETS.len() + 1);
        assert_eq!(checked, Some("expense"));
    }
}
