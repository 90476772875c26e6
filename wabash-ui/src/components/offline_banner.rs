//! Offline Banner
//!
//! Fixed banner shown while the browser reports no network.

use leptos::*;

use crate::state::ConnectivityState;

#[component]
pub fn OfflineBanner() -> impl IntoView {
    let connectivity = use_context::<ConnectivityState>().expect("ConnectivityState not found");

    move || {
        connectivity.banner().map(|text| view! {
            <div class="fixed top-0 left-0 right-0 bg-red-600 text-white p-2 flex justify-center items-center gap-2 z-50 shadow-md">
                <span class="text-xs font-bold uppercase tracking-wider">{text}</span>
            </div>
        })
    }
}
