//! Transient success and error notifications.
//!
//! Alerts are rendered into the page's `#alert-container`, either as the
//! target of an HTMX error response or as an out-of-band swap next to a
//! successful response.

use maud::{Markup, html};

/// A notification shown to the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action worked.
    Success {
        /// A short headline.
        message: String,
        /// A longer explanation, may be empty.
        details: String,
    },
    /// The action failed.
    Error {
        /// A short headline.
        message: String,
        /// What went wrong and how to fix it, may be empty.
        details: String,
    },
}

impl Alert {
    /// Create a success alert.
    pub fn success(message: &str, details: &str) -> Self {
        Alert::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create an error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Alert::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert for swapping into `#alert-container`.
    pub fn into_html(self) -> Markup {
        let (container_style, icon, message, details) = match &self {
            Alert::Success { message, details } => (
                "flex items-start gap-3 p-4 text-sm text-green-800 rounded-lg \
                bg-green-50 dark:bg-gray-800 dark:text-green-400 shadow-lg",
                "✓",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "flex items-start gap-3 p-4 text-sm text-red-800 rounded-lg \
                bg-red-50 dark:bg-gray-800 dark:text-red-400 shadow-lg",
                "!",
                message,
                details,
            ),
        };

        html! {
            div
                role="alert"
                class=(container_style)
            {
                span class="font-bold" aria-hidden="true" { (icon) }

                div class="flex-1"
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty() {
                        p { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="ms-auto font-bold"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }

    /// Render the alert as an out-of-band swap that replaces the contents of
    /// `#alert-container`, for responses whose main target is elsewhere.
    pub fn into_oob_html(self) -> Markup {
        html! {
            div
                id="alert-container"
                hx-swap-oob="innerHTML"
            {
                (self.into_html())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_shows_message_and_details() {
        let html = Alert::error("Could not save", "Try again later.")
            .into_html()
            .into_string();
        let fragment = Html::parse_fragment(&html);

        let alert = fragment
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("Could not find alert");
        let text = alert.text().collect::<String>();

        assert!(text.contains("Could not save"));
        assert!(text.contains("Try again later."));
        assert!(alert.value().attr("class").unwrap().contains("text-red-800"));
    }

    #[test]
    fn empty_details_are_omitted() {
        let html = Alert::success("Saved", "").into_html().into_string();
        let fragment = Html::parse_fragment(&html);

        let paragraphs = fragment.select(&Selector::parse("p").unwrap()).count();

        assert_eq!(paragraphs, 1);
    }

    #[test]
    fn oob_alert_targets_alert_container() {
        let html = Alert::success("Saved", "").into_oob_html().into_string();
        let fragment = Html::parse_fragment(&html);

        let container = fragment
            .select(&Selector::parse("#alert-container").unwrap())
            .next()
            .expect("Could not find alert container");

        assert_eq!(container.value().attr("hx-swap-oob"), Some("innerHTML"));
    }
}
