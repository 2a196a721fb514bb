//! The API endpoints URIs.

/// The home page with the upload form and an overview of the loaded file.
pub const ROOT: &str = "/";
/// The page with summary statistics and distributions of the amounts.
pub const DESCRIPTIVE_VIEW: &str = "/descriptive";
/// The page with filters, KPIs and trend charts.
pub const EXPLORATORY_VIEW: &str = "/exploratory";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to upload a spreadsheet of transactions.
pub const UPLOAD: &str = "/api/upload";
/// The route to drop the loaded transactions.
pub const CLEAR_SESSION: &str = "/api/session/clear";
/// The route for the filtered analysis as JSON.
pub const ANALYSIS_API: &str = "/api/analysis";

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
        assert_endpoint_is_valid_uri(endpoints::DESCRIPTIVE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EXPLORATORY_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);

        assert_endpoint_is_valid_uri(endpoints::UPLOAD);
        assert_endpoint_is_valid_uri(endpoints::CLEAR_SESSION);
        assert_endpoint_is_valid_uri(endpoints::ANALYSIS_API);
    }
}
