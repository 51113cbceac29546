//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::{HxReswap, SwapOption};

use crate::{
    alert::Alert, controls::MAX_BIN_COUNT, filter::NotReady,
    internal_server_error::InternalServerError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The dataset could not be read or parsed.
    ///
    /// Only happens at startup, the server does not start without a dataset.
    #[error("could not load the dataset: {0}")]
    DatasetLoad(String),

    /// The dataset was parsed but contains no rows.
    #[error("the dataset has no rows")]
    EmptyDataset,

    /// A histogram bin count outside of the accepted range was requested.
    #[error("{0:?} is not a valid bin count")]
    InvalidBinCount(String),

    /// The filter stage has no rows to render yet.
    ///
    /// This is not a failure. Responses for this error tell the client to
    /// keep showing the last good output.
    #[error("not ready: {0}")]
    NotReady(#[from] NotReady),

    /// Could not acquire the filter cache lock
    #[error("could not acquire the filter cache lock")]
    FilterCacheLock,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotReady(_) => not_ready_response(),
            Error::InvalidBinCount(_) => self.into_alert_response(),
            Error::FilterCacheLock => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    ///
    /// [Error::NotReady] has no alert, the response leaves the page as it is.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::NotReady(_) => return not_ready_response(),
            Error::InvalidBinCount(count) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid bin count".to_owned(),
                    details: format!(
                        "\"{count}\" is not a valid number of bins. \
                        Choose a whole number between 1 and {MAX_BIN_COUNT}."
                    ),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

/// An empty response that tells htmx not to swap, so the output keeps its
/// last good content.
fn not_ready_response() -> Response {
    (StatusCode::NO_CONTENT, HxReswap(SwapOption::None), ()).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::filter::NotReady;

    use super::Error;

    #[test]
    fn not_ready_does_not_swap() {
        let response = Error::NotReady(NotReady::NoSpeciesSelected).into_alert_response();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers().get("hx-reswap").unwrap(), "none");
    }

    #[test]
    fn not_ready_response_is_empty_no_content() {
        let response = Error::NotReady(NotReady::NoMatchingRows).into_response();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers().get("hx-reswap").unwrap(), "none");
    }

    #[test]
    fn invalid_bin_count_is_bad_request() {
        let response = Error::InvalidBinCount("0".to_owned()).into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn lock_error_is_internal_server_error() {
        let response = Error::FilterCacheLock.into_alert_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
