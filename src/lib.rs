//! # Wabash
//!
//! Shop-floor time tracking: an operator picks a process, starts a timer,
//! stops it; an administrator maintains the catalog of processes. The
//! backend persisting work logs is remote; this crate is the client side.
//!
//! ## Modules
//!
//! - [`models`]: processes and work logs as the backend sends them
//! - [`api`]: the backend contract ([`TrackerApi`]) and, natively, its HTTP client
//! - [`session`]: the persisted operator/session state
//! - [`tracker`]: the NoOperator → Idle → Running state machine and timer display
//! - [`admin`]: the password-gated catalog dashboard
//! - [`connectivity`]: online/offline banner state
//! - [`config`]: TOML + environment configuration (native)
//!
//! Without the default `native` feature the crate builds for `wasm32` and is
//! shared with the browser front end.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wabash::{FileBackend, HttpClient, SessionStore, TimeTracker};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpClient::new("http://localhost:7071/api");
//!     let mut store = SessionStore::open(FileBackend::new("session.json"))?;
//!
//!     let mut tracker = TimeTracker::new(&api, &mut store);
//!     tracker.submit_operator("Ada")?;
//!     tracker.load_processes().await;
//!
//!     let session = tracker.start("p1").await?;
//!     println!("Tracking {} since {}", session.process_name, session.start_time);
//!
//!     tracker.stop().await?;
//!     Ok(())
//! }
//! ```

pub mod admin;
pub mod api;
pub mod connectivity;
pub mod models;
pub mod session;
pub mod tracker;

#[cfg(feature = "native")]
pub mod config;

#[cfg(test)]
mod testing;

pub use admin::{
    apply_listing, fetch_catalog, remove_process, submit_process, AdminDashboard, AdminError,
    AdminGate, ProcessCatalog, DEFAULT_ADMIN_PASSWORD,
};

pub use api::{ApiError, ApiResult, Endpoints, Operation, TrackerApi, DEFAULT_API_BASE};

pub use connectivity::{Connectivity, ConnectivityMonitor, OFFLINE_BANNER};

pub use models::{Process, ProcessDraft, WorkLog, WorkStatus};

pub use session::{
    ActiveSession, MemoryBackend, SessionBackend, SessionError, SessionResult, SessionState,
    SessionStore, STORE_KEY,
};

pub use tracker::{
    begin_work, elapsed_display, finish_work, format_elapsed, TimeTracker, TrackerError,
    TrackerPhase, ZERO_ELAPSED,
};

#[cfg(feature = "native")]
pub use api::HttpClient;

#[cfg(feature = "native")]
pub use session::FileBackend;

#[cfg(feature = "native")]
pub use tracker::Ticker;

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};
