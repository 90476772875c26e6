//! Wabash Tracker
//!
//! Shop-floor time tracking built with Leptos (WASM).
//!
//! # Features
//!
//! - Operator name entry and process picker
//! - Start/stop work with a live elapsed timer that survives reloads
//! - Password-gated process catalog administration
//! - Offline banner
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The state machine and session record come from the `wabash`
//! crate; this crate binds them to signals, localStorage and fetch.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
