//! Navigation Component
//!
//! Bottom tab bar switching between the tracker and the admin screen.

use leptos::*;
use leptos_router::*;

/// Bottom navigation bar
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="fixed bottom-0 w-full bg-white border-t border-gray-200 pb-safe">
            <div class="flex justify-around items-center p-3">
                <NavLink href="/" label="Tracker" />
                <NavLink href="/admin" label="Admin" />
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            exact=true
            class="flex flex-col items-center p-2 rounded-lg text-gray-500 hover:text-gray-700"
            active_class="text-primary bg-purple-50"
        >
            <span class="text-xs font-medium">{label}</span>
        </A>
    }
}
