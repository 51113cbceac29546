use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// Fallback handler for routes that do not exist.
pub async fn get_404_not_found() -> Response {
    let page = error_view(
        "Not Found",
        "404",
        "Page not found.",
        "The dashboard lives at the root of this site.",
    );

    (StatusCode::NOT_FOUND, Html(page.into_string())).into_response()
}
