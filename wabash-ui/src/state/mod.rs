//! State Management
//!
//! Persisted operator session and platform connectivity, provided as context.

pub mod connectivity;
pub mod in_flight;
pub mod session;

pub use connectivity::ConnectivityState;
pub use in_flight::spawn_guarded;
pub use session::SessionContext;
