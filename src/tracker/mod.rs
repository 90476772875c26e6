//! Time Tracker
//!
//! The operator's state machine:
//!
//! ```text
//! NoOperator --name--> Idle --start ok--> Running --stop ok--> Idle
//!      ^                                     |
//!      +-------------- change ---------------+
//! ```
//!
//! Transitions that need the backend are fail-closed: the session store is
//! only touched after the server confirmed, so a failed call leaves the
//! state exactly where it was.

mod clock;

#[cfg(feature = "native")]
mod ticker;

pub use clock::{elapsed_display, format_elapsed, parse_start_time, ZERO_ELAPSED};

#[cfg(feature = "native")]
pub use ticker::{Ticker, TICK_PERIOD};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::api::{ApiError, TrackerApi};
use crate::models::{Process, WorkLog, UNKNOWN_PROCESS_NAME};
use crate::session::{
    ActiveSession, SessionBackend, SessionError, SessionState, SessionStore,
};

/// Errors surfaced by tracker transitions
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("No operator selected")]
    NoOperator,

    #[error("No process selected")]
    NoProcessSelected,

    #[error("Already tracking {0}")]
    AlreadyRunning(String),

    #[error("Error starting work. Check connection.")]
    Start(#[source] ApiError),

    #[error("Error stopping work. Try again.")]
    Stop(#[source] ApiError),

    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),
}

/// Which screen the tracker shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    /// Name entry
    NoOperator,
    /// Process picker and Start
    Idle,
    /// Running timer and Stop
    Running,
}

impl TrackerPhase {
    pub fn of(state: &SessionState) -> Self {
        if !state.has_operator() {
            TrackerPhase::NoOperator
        } else if state.is_running() {
            TrackerPhase::Running
        } else {
            TrackerPhase::Idle
        }
    }
}

/// Normalize operator name input; blank input selects nobody
pub fn operator_name(input: &str) -> Option<String> {
    let name = input.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Display name for a process id, falling back to "Unknown"
pub fn process_name<'a>(processes: &'a [Process], process_id: &str) -> &'a str {
    processes
        .iter()
        .find(|p| p.id == process_id)
        .map(|p| p.name.as_str())
        .unwrap_or(UNKNOWN_PROCESS_NAME)
}

/// Ask the backend to open a work log for the selected process
///
/// Returns the session to record, built from the server's log id and start
/// timestamp. Does not touch any store.
pub async fn begin_work<A: TrackerApi + ?Sized>(
    api: &A,
    state: &SessionState,
    processes: &[Process],
    process_id: &str,
) -> Result<ActiveSession, TrackerError> {
    if !state.has_operator() {
        return Err(TrackerError::NoOperator);
    }
    if let Some(active) = &state.active {
        return Err(TrackerError::AlreadyRunning(active.process_name.clone()));
    }
    if process_id.is_empty() {
        return Err(TrackerError::NoProcessSelected);
    }

    let name = process_name(processes, process_id);
    let log = api
        .start_work(&state.person_name, process_id, name)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, process_id, "Start work failed");
            TrackerError::Start(e)
        })?;

    Ok(ActiveSession {
        log_id: log.id,
        start_time: log.start_timestamp,
        process_id: process_id.to_string(),
        process_name: name.to_string(),
    })
}

/// Ask the backend to close the active work log
///
/// `Ok(None)` when nothing is running.
pub async fn finish_work<A: TrackerApi + ?Sized>(
    api: &A,
    state: &SessionState,
) -> Result<Option<WorkLog>, TrackerError> {
    let Some(active) = &state.active else {
        return Ok(None);
    };

    let log = api
        .stop_work(&active.log_id, &state.person_name)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, log_id = %active.log_id, "Stop work failed");
            TrackerError::Stop(e)
        })?;

    tracing::info!(log_id = %log.id, duration = ?log.duration, "Work stopped");
    Ok(Some(log))
}

/// Tracker view model bound to a session store
pub struct TimeTracker<'a, A: TrackerApi + ?Sized, B: SessionBackend> {
    api: &'a A,
    store: &'a mut SessionStore<B>,
    processes: Vec<Process>,
}

impl<'a, A: TrackerApi + ?Sized, B: SessionBackend> TimeTracker<'a, A, B> {
    pub fn new(api: &'a A, store: &'a mut SessionStore<B>) -> Self {
        Self {
            api,
            store,
            processes: Vec::new(),
        }
    }

    /// Fetch the process list; a failure is logged and leaves it unchanged
    pub async fn load_processes(&mut self) -> &[Process] {
        match self.api.list_processes().await {
            Ok(processes) => self.processes = processes,
            Err(e) => tracing::error!(error = %e, "Failed to fetch processes"),
        }
        &self.processes
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn state(&self) -> &SessionState {
        self.store.state()
    }

    pub fn phase(&self) -> TrackerPhase {
        TrackerPhase::of(self.store.state())
    }

    /// Elapsed display at `now` (00:00:00 unless running)
    pub fn elapsed(&self, now: DateTime<Utc>) -> String {
        elapsed_display(self.store.active(), now)
    }

    /// Accept a name from the entry screen; returns false for blank input
    pub fn submit_operator(&mut self, input: &str) -> Result<bool, TrackerError> {
        match operator_name(input) {
            Some(name) => {
                self.store.set_person_name(name)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// "Change": back to name entry; a running session stays persisted
    pub fn change_operator(&mut self) -> Result<(), TrackerError> {
        self.store.set_person_name("")?;
        Ok(())
    }

    /// Idle -> Running
    pub async fn start(&mut self, process_id: &str) -> Result<ActiveSession, TrackerError> {
        let session =
            begin_work(self.api, self.store.state(), &self.processes, process_id).await?;
        self.store.start_session(
            session.log_id.clone(),
            session.start_time.clone(),
            session.process_id.clone(),
            session.process_name.clone(),
        )?;
        Ok(session)
    }

    /// Running -> Idle; a no-op when idle
    pub async fn stop(&mut self) -> Result<Option<WorkLog>, TrackerError> {
        let log = finish_work(self.api, self.store.state()).await?;
        if log.is_some() {
            self.store.end_session()?;
        }
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Operation;
    use crate::session::MemoryBackend;
    use crate::testing::{process, FakeApi, START_TIME};

    fn store_with_operator() -> SessionStore<MemoryBackend> {
        let mut store = SessionStore::open(MemoryBackend::new()).unwrap();
        store.set_person_name("Ada").unwrap();
        store
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = SessionState::default();
        assert_eq!(TrackerPhase::of(&state), TrackerPhase::NoOperator);

        state.person_name = "Ada".to_string();
        assert_eq!(TrackerPhase::of(&state), TrackerPhase::Idle);

        state.active = Some(ActiveSession {
            log_id: "log-1".to_string(),
            start_time: START_TIME.to_string(),
            process_id: "p1".to_string(),
            process_name: "Sand".to_string(),
        });
        assert_eq!(TrackerPhase::of(&state), TrackerPhase::Running);

        state.person_name.clear();
        assert_eq!(TrackerPhase::of(&state), TrackerPhase::NoOperator);
    }

    #[test]
    fn test_operator_name_input() {
        assert_eq!(operator_name("  Ada "), Some("Ada".to_string()));
        assert_eq!(operator_name("   "), None);
    }

    #[tokio::test]
    async fn test_start_uses_server_log_and_timestamp() {
        let api = FakeApi::with_catalog(vec![process("p1", "Sand")]);
        let mut store = store_with_operator();
        let mut tracker = TimeTracker::new(&api, &mut store);
        tracker.load_processes().await;

        let session = tracker.start("p1").await.unwrap();
        assert_eq!(session.log_id, "log-1");
        assert_eq!(session.start_time, START_TIME);
        assert_eq!(session.process_name, "Sand");
        assert_eq!(tracker.phase(), TrackerPhase::Running);
    }

    #[tokio::test]
    async fn test_start_failure_stays_idle() {
        let api = FakeApi::with_catalog(vec![process("p1", "Sand")]);
        api.fail_on(Operation::StartWork);
        let mut store = store_with_operator();
        let record_before = store.backend().record().map(str::to_string);

        {
            let mut tracker = TimeTracker::new(&api, &mut store);
            tracker.load_processes().await;
            let err = tracker.start("p1").await.unwrap_err();
            assert!(matches!(err, TrackerError::Start(_)));
            assert_eq!(err.to_string(), "Error starting work. Check connection.");
            assert_eq!(tracker.phase(), TrackerPhase::Idle);
        }

        assert!(store.active().is_none());
        assert_eq!(store.backend().record().map(str::to_string), record_before);
    }

    #[tokio::test]
    async fn test_unknown_process_name() {
        let api = FakeApi::default();
        let mut store = store_with_operator();
        let mut tracker = TimeTracker::new(&api, &mut store);

        let session = tracker.start("p9").await.unwrap();
        assert_eq!(session.process_name, "Unknown");
    }

    #[tokio::test]
    async fn test_start_requires_operator_and_selection() {
        let api = FakeApi::default();
        let mut store = SessionStore::open(MemoryBackend::new()).unwrap();
        let mut tracker = TimeTracker::new(&api, &mut store);

        assert!(matches!(tracker.start("p1").await, Err(TrackerError::NoOperator)));

        tracker.submit_operator("Ada").unwrap();
        assert!(matches!(
            tracker.start("").await,
            Err(TrackerError::NoProcessSelected)
        ));
        assert_eq!(api.count(Operation::StartWork), 0);
    }

    #[tokio::test]
    async fn test_stop_failure_keeps_session() {
        let api = FakeApi::with_catalog(vec![process("p1", "Sand")]);
        let mut store = store_with_operator();
        let mut tracker = TimeTracker::new(&api, &mut store);
        tracker.start("p1").await.unwrap();

        api.fail_on(Operation::StopWork);
        let err = tracker.stop().await.unwrap_err();
        assert_eq!(err.to_string(), "Error stopping work. Try again.");
        assert_eq!(tracker.phase(), TrackerPhase::Running);

        api.heal();
        let log = tracker.stop().await.unwrap().unwrap();
        assert_eq!(log.id, "log-1");
        assert_eq!(tracker.phase(), TrackerPhase::Idle);
        assert_eq!(tracker.elapsed(Utc::now()), "00:00:00");
    }

    #[tokio::test]
    async fn test_stop_when_idle_is_noop() {
        let api = FakeApi::default();
        let mut store = store_with_operator();
        let mut tracker = TimeTracker::new(&api, &mut store);

        assert!(tracker.stop().await.unwrap().is_none());
        assert_eq!(api.count(Operation::StopWork), 0);
    }

    #[tokio::test]
    async fn test_change_operator_resumes_running_session() {
        let api = FakeApi::with_catalog(vec![process("p1", "Sand")]);
        let mut store = store_with_operator();
        let mut tracker = TimeTracker::new(&api, &mut store);
        tracker.start("p1").await.unwrap();

        tracker.change_operator().unwrap();
        assert_eq!(tracker.phase(), TrackerPhase::NoOperator);

        assert!(tracker.submit_operator("Grace").unwrap());
        assert_eq!(tracker.phase(), TrackerPhase::Running);
        assert_eq!(tracker.state().active.as_ref().unwrap().log_id, "log-1");
    }

    #[tokio::test]
    async fn test_process_list_failure_is_not_fatal() {
        let api = FakeApi::with_catalog(vec![process("p1", "Sand")]);
        api.fail_on(Operation::ListProcesses);
        let mut store = store_with_operator();
        let mut tracker = TimeTracker::new(&api, &mut store);

        assert!(tracker.load_processes().await.is_empty());
        assert_eq!(tracker.phase(), TrackerPhase::Idle);
    }
}
