//! Alert messages shown in the alert container at the bottom of the page.
//!
//! Output requests target the container with `hx-target-error`, so an alert
//! replaces nothing but the container while the outputs keep their content.

use maud::{Markup, html};

/// An alert to display to the user.
#[derive(Debug, Clone)]
pub enum Alert {
    /// Something the user asked for could not be done.
    Error {
        /// A short summary of the problem.
        message: String,
        /// How the user can fix the problem.
        details: String,
    },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        match self {
            Alert::Error { message, details } => html!(
                div
                    role="alert"
                    class="flex flex-col p-4 mb-4 text-sm text-red-800 rounded-lg
                        bg-red-50 dark:bg-gray-800 dark:text-red-400 shadow"
                {
                    div class="flex justify-between items-center"
                    {
                        span class="font-semibold" { (message) }

                        button
                            type="button"
                            aria-label="Close"
                            class="ms-4 text-red-500 hover:text-red-700"
                            onclick="document.getElementById('alert-container').classList.add('hidden')"
                        {
                            "×"
                        }
                    }

                    @if !details.is_empty() {
                        p class="mt-1" { (details) }
                    }
                }

                script
                {
                    "document.getElementById('alert-container').classList.remove('hidden');"
                }
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_shows_message_and_details() {
        let alert = Alert::Error {
            message: "Invalid bin count".to_owned(),
            details: "Choose a number between 1 and 1000.".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_html().into_string());

        let selector = Selector::parse("div[role='alert']").unwrap();
        let text = html
            .select(&selector)
            .next()
            .expect("alert not found")
            .text()
            .collect::<String>();
        assert!(text.contains("Invalid bin count"));
        assert!(text.contains("Choose a number between 1 and 1000."));
    }
}
