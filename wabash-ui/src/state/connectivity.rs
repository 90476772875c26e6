//! Connectivity
//!
//! Mirrors the browser's online/offline events into a signal. Purely
//! presentational: nothing is queued or blocked while offline.

use leptos::*;

use wabash::{Connectivity, ConnectivityMonitor};

#[derive(Clone, Copy)]
pub struct ConnectivityState {
    pub monitor: RwSignal<ConnectivityMonitor>,
}

impl ConnectivityState {
    pub fn banner(&self) -> Option<&'static str> {
        self.monitor.with(|m| m.banner())
    }

    fn observe(&self, status: Connectivity) {
        self.monitor.update(|m| {
            m.observe(status);
        });
    }
}

fn navigator_online() -> bool {
    web_sys::window()
        .map(|window| window.navigator().on_line())
        .unwrap_or(true)
}

/// Subscribe to online/offline events and provide the state
pub fn provide_connectivity() {
    let state = ConnectivityState {
        monitor: create_rw_signal(ConnectivityMonitor::new(Connectivity::from_online(
            navigator_online(),
        ))),
    };

    let online = window_event_listener_untyped("online", move |_| {
        state.observe(Connectivity::Online)
    });
    let offline = window_event_listener_untyped("offline", move |_| {
        state.observe(Connectivity::Offline)
    });

    on_cleanup(move || {
        online.remove();
        offline.remove();
    });

    provide_context(state);
}
