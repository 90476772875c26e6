//! UI Components
//!
//! Reusable Leptos components shared by the tracker and admin screens.

pub mod dialog;
pub mod loading;
pub mod nav;
pub mod offline_banner;

pub use loading::{InlineLoading, Loading};
pub use nav::Nav;
pub use offline_banner::OfflineBanner;
