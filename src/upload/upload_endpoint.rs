use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{FromRef, Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints,
    loader::CacheStatus,
    session::Session,
};

/// The name of the multipart field holding the spreadsheet.
const FILE_FIELD: &str = "file";
/// Used when the browser does not send a file name.
const DEFAULT_FILE_NAME: &str = "upload";

/// The state needed for uploading a spreadsheet.
#[derive(Debug, Clone)]
pub struct UploadState {
    /// The session the loaded table is stored in.
    pub session: Arc<Mutex<Session>>,
    /// The largest upload, in bytes, the server accepts.
    pub max_upload_bytes: usize,
}

impl FromRef<AppState> for UploadState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
            max_upload_bytes: state.max_upload_bytes,
        }
    }
}

/// An uploaded file read from the multipart form.
struct Upload {
    file_name: String,
    bytes: Bytes,
}

/// Route handler for uploading a spreadsheet of transactions.
///
/// A successful upload replaces the loaded table and redirects to the home
/// page. Uploading the file that is already loaded leaves the session as it
/// is. Any error is returned as an alert and keeps the previous table.
pub async fn upload_endpoint(State(state): State<UploadState>, multipart: Multipart) -> Response {
    let upload = match read_upload(multipart, state.max_upload_bytes).await {
        Ok(upload) => upload,
        Err(error) => {
            tracing::warn!("Rejected upload: {error}");
            return error.into_alert_response();
        }
    };

    let mut session = match state.session.lock() {
        Ok(session) => session,
        Err(error) => {
            tracing::error!("could not acquire session lock: {error}");
            return Error::SessionLockError.into_alert_response();
        }
    };

    match session.load(&upload.file_name, &upload.bytes) {
        Ok((table, CacheStatus::Hit)) => Alert::Success {
            message: "File already loaded".to_owned(),
            details: format!(
                "'{}' matches the {} transactions that are already loaded.",
                upload.file_name,
                table.len()
            ),
        }
        .into_response(),
        Ok((_, CacheStatus::Miss)) => (
            HxRedirect(endpoints::ROOT.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::warn!("Could not load '{}': {error}", upload.file_name);
            error.into_alert_response()
        }
    }
}

async fn read_upload(mut multipart: Multipart, max_upload_bytes: usize) -> Result<Upload, Error> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| map_multipart_error(error, max_upload_bytes))?
    {
        if field.name() != Some(FILE_FIELD) {
            tracing::debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|file_name| !file_name.is_empty())
            .map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|error| map_multipart_error(error, max_upload_bytes))?;

        // Browsers send an unnamed, empty part when no file was chosen.
        let Some(file_name) = file_name.or_else(|| {
            (!bytes.is_empty()).then(|| DEFAULT_FILE_NAME.to_owned())
        }) else {
            return Err(Error::MissingFile);
        };

        tracing::debug!("Received file '{}' that is {} bytes", file_name, bytes.len());

        return Ok(Upload { file_name, bytes });
    }

    Err(Error::MissingFile)
}

fn map_multipart_error(error: MultipartError, max_upload_bytes: usize) -> Error {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::UploadTooLarge(max_upload_bytes)
    } else {
        Error::MultipartError(error.body_text())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{FromRequest, Multipart, State},
        http::{Request, StatusCode},
    };
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        app_state::DEFAULT_MAX_UPLOAD_BYTES,
        endpoints,
        session::Session,
        test_utils::{WorkbookBuilder, assert_hx_redirect, multipart_body, parse_html_fragment},
    };

    use super::{UploadState, upload_endpoint};

    const CSV: &[u8] = b"Date,Amount\n2023-01-05,100\n2023-01-20,-30\n2023-02-10,50\n";

    fn get_test_state() -> UploadState {
        UploadState {
            session: Arc::new(Mutex::new(Session::new())),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    async fn must_make_multipart(field_name: &str, file_name: &str, bytes: &[u8]) -> Multipart {
        let (content_type, body) = multipart_body(field_name, file_name, bytes);

        let request = Request::builder()
            .method("POST")
            .uri(endpoints::UPLOAD)
            .header("Content-Type", content_type)
            .body(body.into())
            .unwrap();

        Multipart::from_request(request, &()).await.unwrap()
    }

    async fn alert_details(response: axum::response::Response) -> String {
        let html = parse_html_fragment(response).await;

        html.select(&Selector::parse("#alert-container").unwrap())
            .next()
            .expect("No alert found")
            .text()
            .collect()
    }

    #[tokio::test]
    async fn upload_csv_loads_table_and_redirects() {
        let state = get_test_state();

        let response = upload_endpoint(
            State(state.clone()),
            must_make_multipart("file", "transactions.csv", CSV).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::ROOT);

        let table = state.session.lock().unwrap().table().expect("no table loaded");
        assert_eq!(table.file_name(), "transactions.csv");
        assert_eq!(table.len(), 3);
    }

    #[tokio::test]
    async fn upload_xlsx_loads_table() {
        let state = get_test_state();
        let workbook = WorkbookBuilder::with_headers(&["Date", "Amount"])
            .date_row(date!(2023 - 01 - 05), 100.0)
            .date_row(date!(2023 - 02 - 10), 50.0)
            .to_bytes();

        let response = upload_endpoint(
            State(state.clone()),
            must_make_multipart("file", "transactions.xlsx", &workbook).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let table = state.session.lock().unwrap().table().expect("no table loaded");
        assert_eq!(table.years(), vec![2023]);
    }

    #[tokio::test]
    async fn uploading_the_same_file_again_is_a_cache_hit() {
        let state = get_test_state();
        upload_endpoint(
            State(state.clone()),
            must_make_multipart("file", "transactions.csv", CSV).await,
        )
        .await;

        let response = upload_endpoint(
            State(state.clone()),
            must_make_multipart("file", "copy.csv", CSV).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(alert_details(response).await.contains("File already loaded"));
    }

    #[tokio::test]
    async fn missing_column_is_rejected_and_keeps_previous_table() {
        let state = get_test_state();
        upload_endpoint(
            State(state.clone()),
            must_make_multipart("file", "transactions.csv", CSV).await,
        )
        .await;

        let response = upload_endpoint(
            State(state.clone()),
            must_make_multipart("file", "bad.csv", b"Date,Total\n2023-01-05,1\n").await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(alert_details(response).await.contains("Missing: Amount."));

        let table = state.session.lock().unwrap().table().expect("table was dropped");
        assert_eq!(table.file_name(), "transactions.csv");
    }

    #[tokio::test]
    async fn form_without_file_is_rejected() {
        let response = upload_endpoint(
            State(get_test_state()),
            must_make_multipart("notes", "notes.txt", b"hello").await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(alert_details(response).await.contains("Choose a file to upload."));
    }

    #[tokio::test]
    async fn empty_file_is_rejected() {
        let response = upload_endpoint(
            State(get_test_state()),
            must_make_multipart("file", "empty.csv", b"").await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(alert_details(response).await.contains("The file is empty"));
    }
}
