//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{Nav, OfflineBanner};
use crate::pages::{AdminDashboard, TimeTracker};
use crate::state::connectivity::provide_connectivity;
use crate::state::session::provide_session;

/// Shown in the corner of every screen
pub const VERSION_LABEL: &str = "V0.2";

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_session();
    provide_connectivity();

    view! {
        <Router>
            <div class="min-h-dvh bg-gray-100 text-gray-900 font-sans pb-32">
                <OfflineBanner />

                <main>
                    <Routes>
                        <Route path="/" view=TimeTracker />
                        <Route path="/admin" view=AdminDashboard />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Nav />

                <span class="fixed bottom-16 right-4 text-xs text-gray-400 bg-white/80 px-2 py-1 rounded shadow">
                    {VERSION_LABEL}
                </span>
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <A
                href="/"
                class="px-6 py-3 bg-primary text-white rounded-lg font-medium transition-colors"
            >
                "Go to Tracker"
            </A>
        </div>
    }
}
