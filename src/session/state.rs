//! Session State
//!
//! The operator name plus the in-progress work session. The four session
//! fields live in one `Option<ActiveSession>`, so they are either all set or
//! all unset.

use serde::{Deserialize, Serialize};

/// Key under which the session record is persisted
pub const STORE_KEY: &str = "wabash-process-store";

/// Version written into the persisted record envelope
pub const STORE_VERSION: u32 = 0;

/// Work log the operator is currently clocked into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub log_id: String,
    /// Server-issued ISO-8601 start timestamp
    pub start_time: String,
    pub process_id: String,
    pub process_name: String,
}

/// Client-local session state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Empty when no operator is selected
    pub person_name: String,
    pub active: Option<ActiveSession>,
}

impl SessionState {
    pub fn has_operator(&self) -> bool {
        !self.person_name.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Serialize into the persisted record format
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&PersistedRecord {
            state: SessionFields::from(self),
            version: STORE_VERSION,
        })
    }

    /// Parse a persisted record; a half-set session is dropped
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        let record: PersistedRecord = serde_json::from_str(raw)?;
        Ok(record.state.into())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedRecord {
    state: SessionFields,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionFields {
    #[serde(default)]
    active_log_id: Option<String>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    person_name: String,
    #[serde(default)]
    active_process_id: Option<String>,
    #[serde(default)]
    active_process_name: Option<String>,
}

impl From<&SessionState> for SessionFields {
    fn from(state: &SessionState) -> Self {
        let active = state.active.as_ref();
        Self {
            active_log_id: active.map(|s| s.log_id.clone()),
            start_time: active.map(|s| s.start_time.clone()),
            person_name: state.person_name.clone(),
            active_process_id: active.map(|s| s.process_id.clone()),
            active_process_name: active.map(|s| s.process_name.clone()),
        }
    }
}

impl From<SessionFields> for SessionState {
    fn from(fields: SessionFields) -> Self {
        let active = match (
            fields.active_log_id,
            fields.start_time,
            fields.active_process_id,
            fields.active_process_name,
        ) {
            (Some(log_id), Some(start_time), Some(process_id), Some(process_name)) => {
                Some(ActiveSession {
                    log_id,
                    start_time,
                    process_id,
                    process_name,
                })
            }
            (None, None, None, None) => None,
            _ => {
                tracing::warn!("Discarding partially persisted session");
                None
            }
        };

        Self {
            person_name: fields.person_name,
            active,
        }
    }
}
