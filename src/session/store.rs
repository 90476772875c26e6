//! Session Store
//!
//! Owns the [`SessionState`] and writes it through a [`SessionBackend`] on
//! every change. The active session is only ever set or cleared as a unit.

use thiserror::Error;

use super::state::{ActiveSession, SessionState};

/// Errors that can occur while loading or saving the session record
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Platform storage refused the operation (quota, privacy mode, ...)
    #[error("Storage unavailable: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

/// Result type alias for session store operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Durable slot holding the serialized session record
pub trait SessionBackend {
    /// Raw record, or `None` if nothing was ever saved
    fn load(&self) -> SessionResult<Option<String>>;

    /// Replace the stored record
    fn save(&mut self, record: &str) -> SessionResult<()>;
}

/// Backend keeping the record in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    record: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
        }
    }

    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }
}

impl SessionBackend for MemoryBackend {
    fn load(&self) -> SessionResult<Option<String>> {
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &str) -> SessionResult<()> {
        self.record = Some(record.to_string());
        Ok(())
    }
}

/// Persisted session container
///
/// Mutations update memory first and then persist; a failed save leaves the
/// in-memory state changed and reports the error to the caller.
#[derive(Debug)]
pub struct SessionStore<B: SessionBackend> {
    backend: B,
    state: SessionState,
}

impl<B: SessionBackend> SessionStore<B> {
    /// Start empty without reading the backend
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: SessionState::default(),
        }
    }

    /// Rehydrate from the backend
    ///
    /// A missing record starts empty. An unreadable record is logged and
    /// replaced by the empty state on the next write.
    pub fn open(backend: B) -> SessionResult<Self> {
        let state = match backend.load()? {
            None => SessionState::default(),
            Some(raw) => match SessionState::decode(&raw) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unreadable session record");
                    SessionState::default()
                }
            },
        };

        if let Some(active) = &state.active {
            tracing::debug!(log_id = %active.log_id, "Resumed active session");
        }

        Ok(Self { backend, state })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn person_name(&self) -> &str {
        &self.state.person_name
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.state.active.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Record a started work log; all four fields are set together
    pub fn start_session(
        &mut self,
        log_id: impl Into<String>,
        start_time: impl Into<String>,
        process_id: impl Into<String>,
        process_name: impl Into<String>,
    ) -> SessionResult<()> {
        let session = ActiveSession {
            log_id: log_id.into(),
            start_time: start_time.into(),
            process_id: process_id.into(),
            process_name: process_name.into(),
        };
        tracing::info!(
            log_id = %session.log_id,
            process_id = %session.process_id,
            "Session started"
        );
        self.state.active = Some(session);
        self.persist()
    }

    /// Clear the active session; a no-op when already idle
    pub fn end_session(&mut self) -> SessionResult<()> {
        match self.state.active.take() {
            Some(session) => {
                tracing::info!(log_id = %session.log_id, "Session ended");
                self.persist()
            }
            None => Ok(()),
        }
    }

    /// Set the operator; the empty string means no operator is selected
    ///
    /// The active session is left untouched.
    pub fn set_person_name(&mut self, name: impl Into<String>) -> SessionResult<()> {
        let name = name.into();
        if name == self.state.person_name {
            return Ok(());
        }
        self.state.person_name = name;
        self.persist()
    }

    fn persist(&mut self) -> SessionResult<()> {
        let record = self.state.encode()?;
        self.backend.save(&record).map_err(|e| {
            tracing::error!(error = %e, "Failed to persist session");
            e
        })
    }
}
