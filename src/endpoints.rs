//! The API endpoints URIs.

/// The dashboard page.
pub const ROOT: &str = "/";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The plain table of the filtered rows.
pub const DATA_TABLE: &str = "/api/outputs/data-table";
/// The sortable, paginated grid of the filtered rows.
pub const DATA_GRID: &str = "/api/outputs/data-grid";
/// The ECharts histogram.
pub const INTERACTIVE_HISTOGRAM: &str = "/api/outputs/interactive-histogram";
/// The server-rendered SVG histogram.
pub const STATIC_HISTOGRAM: &str = "/api/outputs/static-histogram";
/// The ECharts scatterplot.
pub const SCATTERPLOT: &str = "/api/outputs/scatterplot";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
        assert_endpoint_is_valid_uri(endpoints::DATA_TABLE);
        assert_endpoint_is_valid_uri(endpoints::DATA_GRID);
        assert_endpoint_is_valid_uri(endpoints::INTERACTIVE_HISTOGRAM);
        assert_endpoint_is_valid_uri(endpoints::STATIC_HISTOGRAM);
        assert_endpoint_is_valid_uri(endpoints::SCATTERPLOT);
    }
}
