//! Page Components
//!
//! Top-level routes.

pub mod admin;
pub mod tracker;

pub use admin::AdminDashboard;
pub use tracker::TimeTracker;
