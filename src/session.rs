//! The transactions the user is currently analysing.
//!
//! A session holds at most one table. Uploading a file replaces it wholesale
//! and clearing the session drops it along with the load cache.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;

use crate::{
    AppState, Error,
    loader::{CacheStatus, LoadCache},
    transaction::TransactionTable,
};

/// The loaded table and the cache used to load it.
#[derive(Debug, Default)]
pub struct Session {
    table: Option<Arc<TransactionTable>>,
    cache: LoadCache,
}

impl Session {
    /// Create a session with no data loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an uploaded file and make it the current table.
    ///
    /// On error the current table, if any, is kept.
    ///
    /// # Errors
    /// Returns the load error if the file cannot be parsed.
    pub fn load(
        &mut self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<(Arc<TransactionTable>, CacheStatus), Error> {
        let (table, status) = self.cache.load(file_name, bytes)?;
        self.table = Some(table.clone());

        Ok((table, status))
    }

    /// Drop the current table and invalidate the load cache.
    pub fn clear(&mut self) {
        self.table = None;
        self.cache.invalidate();
    }

    /// The current table, `None` until a file has been uploaded.
    pub fn table(&self) -> Option<Arc<TransactionTable>> {
        self.table.clone()
    }
}

/// The state needed by handlers that read or change the session.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The session shared by all requests.
    pub session: Arc<Mutex<Session>>,
}

impl FromRef<AppState> for SessionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
        }
    }
}

impl SessionState {
    /// Get the current table without holding the lock afterwards.
    ///
    /// # Errors
    /// Returns [Error::SessionLockError] if the lock is poisoned.
    pub fn current_table(&self) -> Result<Option<Arc<TransactionTable>>, Error> {
        let session = self
            .session
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire session lock: {error}"))
            .map_err(|_| Error::SessionLockError)?;

        Ok(session.table())
    }
}
