//! Loading Component
//!
//! Loading spinners.

use leptos::*;

/// Block loading placeholder
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="p-8 text-center text-gray-500">"Loading..."</div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}
