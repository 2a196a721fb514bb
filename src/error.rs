//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The uploaded file contained no bytes.
    #[error("the uploaded file is empty")]
    EmptyUpload,

    /// The upload form was submitted without a file.
    #[error("no file was included in the upload")]
    MissingFile,

    /// The upload exceeded the configured request body limit.
    #[error("the upload is larger than the limit of {0} bytes")]
    UploadTooLarge(usize),

    /// The multipart form could not be parsed.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The workbook could not be opened or its worksheet could not be read.
    #[error("Could not read the spreadsheet: {0}")]
    InvalidSpreadsheet(String),

    /// The CSV had issues that prevented it from being parsed.
    #[error("Could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// The workbook does not contain any worksheets.
    #[error("the workbook does not contain any worksheets")]
    NoWorksheet,

    /// The header row is missing one or more required columns.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Could not acquire the session lock
    #[error("could not acquire the session lock")]
    SessionLockError,

    /// An analysis was requested before a file was uploaded.
    #[error("no transactions have been loaded, upload a file first")]
    NoDataLoaded,
}

impl Error {
    /// Whether the error was caused by the uploaded file rather than the server.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyUpload
                | Error::MissingFile
                | Error::UploadTooLarge(_)
                | Error::MultipartError(_)
                | Error::InvalidSpreadsheet(_)
                | Error::InvalidCSV(_)
                | Error::NoWorksheet
                | Error::MissingColumns(_)
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NoDataLoaded => (
                StatusCode::CONFLICT,
                Json(json!({ "error": Error::NoDataLoaded.to_string() })),
            )
                .into_response(),
            Error::SessionLockError => InternalServerError {
                description: "Session unavailable",
                fix: "The session state could not be read. Restart the server and upload your file again.",
            }
            .into_response(),
            error if error.is_load_error() => error.into_alert_response(),
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
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::EmptyUpload => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "The file is empty".to_owned(),
                    details: "Choose a spreadsheet with a Date and an Amount column.".to_owned(),
                },
            ),
            Error::MissingFile => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Choose a file to upload.".to_owned(),
                },
            ),
            Error::UploadTooLarge(limit) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Alert::Error {
                    message: "The file is too large".to_owned(),
                    details: format!("Uploads are limited to {limit} bytes."),
                },
            ),
            Error::MultipartError(details) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Upload failed".to_owned(),
                    details,
                },
            ),
            Error::InvalidSpreadsheet(_) | Error::InvalidCSV(_) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not read the file".to_owned(),
                    details: "Check that the file is an Excel workbook (.xlsx, .xls) or a CSV file."
                        .to_owned(),
                },
            ),
            Error::NoWorksheet => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not read the file".to_owned(),
                    details: "The workbook does not contain any worksheets.".to_owned(),
                },
            ),
            Error::MissingColumns(columns) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Missing required columns".to_owned(),
                    details: format!(
                        "The first row must name the columns Date and Amount. Missing: {}.",
                        columns.join(", ")
                    ),
                },
            ),
            Error::NoDataLoaded => (
                StatusCode::CONFLICT,
                Alert::ErrorSimple {
                    message: "Upload a file first.".to_owned(),
                },
            ),
            Error::SessionLockError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::test_utils::{assert_content_type, parse_html_fragment};

    use super::Error;

    #[test]
    fn missing_columns_message_lists_columns() {
        let error = Error::MissingColumns(vec!["Date".to_owned(), "Amount".to_owned()]);

        assert_eq!(error.to_string(), "missing required columns: Date, Amount");
    }

    #[tokio::test]
    async fn load_errors_render_bad_request_alerts() {
        let response = Error::MissingColumns(vec!["Amount".to_owned()]).into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_fragment(response).await;
        let details = html
            .select(&Selector::parse("#alert-container p.opacity-80").unwrap())
            .next()
            .expect("No alert details found")
            .text()
            .collect::<String>();
        assert!(details.contains("Missing: Amount."), "got {details:?}");
    }

    #[tokio::test]
    async fn no_data_loaded_is_a_json_conflict() {
        let response = Error::NoDataLoaded.into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_content_type(&response, "application/json");
    }

    #[tokio::test]
    async fn session_lock_error_is_an_internal_server_error() {
        let response = Error::SessionLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
