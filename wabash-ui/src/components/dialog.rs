//! Blocking browser dialogs used for failure alerts and confirmations

/// Show a modal alert
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(message) {
            web_sys::console::error_1(&e);
        }
    }
}

/// Ask a yes/no question; false when no window is available
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
