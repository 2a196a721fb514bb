//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use crate::session::Session;

/// The default limit on the size of an uploaded file, 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transactions loaded by the user and the load cache.
    pub session: Arc<Mutex<Session>>,

    /// The largest upload, in bytes, the server accepts.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create a new [AppState] with an empty session.
    pub fn new(max_upload_bytes: usize) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            max_upload_bytes,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_BYTES)
    }
}
