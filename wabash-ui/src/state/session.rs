//! Session Context
//!
//! The persisted session store bound to localStorage, mirrored into a signal
//! so every screen re-renders when it changes.

use leptos::*;

use wabash::{
    ActiveSession, SessionBackend, SessionError, SessionResult, SessionState, SessionStore,
    STORE_KEY,
};

/// Session record kept in the browser's localStorage
#[derive(Debug, Clone)]
pub struct LocalStorageBackend {
    key: &'static str,
}

impl LocalStorageBackend {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn storage() -> SessionResult<web_sys::Storage> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| SessionError::Storage("localStorage is unavailable".to_string()))
    }
}

impl Default for LocalStorageBackend {
    fn default() -> Self {
        Self::new(STORE_KEY)
    }
}

impl SessionBackend for LocalStorageBackend {
    fn load(&self) -> SessionResult<Option<String>> {
        Self::storage()?
            .get_item(self.key)
            .map_err(|e| SessionError::Storage(format!("{:?}", e)))
    }

    fn save(&mut self, record: &str) -> SessionResult<()> {
        Self::storage()?
            .set_item(self.key, record)
            .map_err(|e| SessionError::Storage(format!("{:?}", e)))
    }
}

/// Session store shared by all components
#[derive(Clone, Copy)]
pub struct SessionContext {
    store: StoredValue<SessionStore<LocalStorageBackend>>,
    /// Snapshot of the store, updated after every mutation
    pub state: RwSignal<SessionState>,
}

impl SessionContext {
    fn new(store: SessionStore<LocalStorageBackend>) -> Self {
        let state = create_rw_signal(store.state().clone());
        Self {
            store: store_value(store),
            state,
        }
    }

    pub fn set_person_name(&self, name: String) {
        self.apply(|store| store.set_person_name(name));
    }

    /// Back to name entry; the running session is kept
    pub fn change_operator(&self) {
        self.apply(|store| store.set_person_name(""));
    }

    pub fn start_session(&self, session: ActiveSession) {
        self.apply(|store| {
            store.start_session(
                session.log_id,
                session.start_time,
                session.process_id,
                session.process_name,
            )
        });
    }

    pub fn end_session(&self) {
        self.apply(|store| store.end_session());
    }

    fn apply<F>(&self, mutate: F)
    where
        F: FnOnce(&mut SessionStore<LocalStorageBackend>) -> SessionResult<()>,
    {
        let outcome = self.store.try_update_value(|store| {
            let result = mutate(store);
            (store.state().clone(), result)
        });

        if let Some((state, result)) = outcome {
            self.state.set(state);
            if let Err(e) = result {
                web_sys::console::error_1(&format!("Failed to save session: {}", e).into());
            }
        }
    }
}

/// Rehydrate the session and provide it to the component tree
pub fn provide_session() {
    let store = match SessionStore::open(LocalStorageBackend::default()) {
        Ok(store) => store,
        Err(e) => {
            // Private browsing may deny storage; run without a saved session
            web_sys::console::error_1(&format!("Failed to load session: {}", e).into());
            SessionStore::new(LocalStorageBackend::default())
        }
    };

    provide_context(SessionContext::new(store));
}
