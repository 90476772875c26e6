//! Persisted Session
//!
//! Durable client-local state: who is working and which work log they are
//! clocked into.
//!
//! - [`SessionState`]: operator name + optional [`ActiveSession`]
//! - [`SessionStore`]: the only way to mutate it; persists on every change
//! - [`SessionBackend`]: where the record lives (memory, file, browser storage)

mod state;
mod store;

#[cfg(feature = "native")]
mod file;

pub use state::{ActiveSession, SessionState, STORE_KEY, STORE_VERSION};
pub use store::{MemoryBackend, SessionBackend, SessionError, SessionResult, SessionStore};

#[cfg(feature = "native")]
pub use file::FileBackend;
