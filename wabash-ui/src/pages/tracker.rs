//! Time Tracker Page
//!
//! Name entry, process picker and the running timer.

use gloo_timers::callback::Interval;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use wabash::tracker::operator_name;
use wabash::{
    begin_work, elapsed_display, finish_work, Process, TrackerApi, TrackerPhase, ZERO_ELAPSED,
};

use crate::api::GlooApi;
use crate::components::dialog::alert;
use crate::state::{spawn_guarded, SessionContext};

/// Timer refresh period in milliseconds
const TICK_MS: u32 = 1_000;

/// Tracker page component
#[component]
pub fn TimeTracker() -> impl IntoView {
    let session = use_context::<SessionContext>().expect("SessionContext not found");

    let processes = create_rw_signal(Vec::<Process>::new());
    let elapsed = create_rw_signal(ZERO_ELAPSED.to_string());
    // Survives the Idle/Running switch that unmounts the buttons
    let busy = create_rw_signal(false);

    // Fetch processes on mount
    spawn_local(async move {
        match GlooApi::default().list_processes().await {
            Ok(list) => {
                processes.try_set(list);
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to fetch processes: {}", e).into());
            }
        }
    });

    // One interval at most, alive only while a session runs
    let ticker: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
    let ticker_for_effect = ticker.clone();
    create_effect(move |_| {
        let active = session.state.with(|s| s.active.clone());

        // Dropping an Interval clears it
        ticker_for_effect.borrow_mut().take();

        match active {
            Some(active) => {
                let tick = move || elapsed.set(elapsed_display(Some(&active), chrono::Utc::now()));
                tick();
                *ticker_for_effect.borrow_mut() = Some(Interval::new(TICK_MS, tick));
            }
            None => elapsed.set(ZERO_ELAPSED.to_string()),
        }
    });
    on_cleanup(move || {
        ticker.borrow_mut().take();
    });

    move || match TrackerPhase::of(&session.state.get()) {
        TrackerPhase::NoOperator => view! { <NameEntry /> }.into_view(),
        TrackerPhase::Idle => view! {
            <div class="flex flex-col p-4 max-w-md mx-auto h-[85vh] safe-area-bottom">
                <OperatorHeader />
                <ProcessPicker processes=processes busy=busy />
            </div>
        }
        .into_view(),
        TrackerPhase::Running => view! {
            <div class="flex flex-col p-4 max-w-md mx-auto h-[85vh] safe-area-bottom">
                <OperatorHeader />
                <RunningTimer elapsed=elapsed busy=busy />
            </div>
        }
        .into_view(),
    }
}

/// "Who is working?" screen
#[component]
fn NameEntry() -> impl IntoView {
    let session = use_context::<SessionContext>().expect("SessionContext not found");

    let submit = move |value: String| {
        if let Some(name) = operator_name(&value) {
            session.set_person_name(name);
        }
    };

    view! {
        <div class="flex flex-col items-center justify-center p-8 h-[80vh]">
            <div class="bg-white p-8 rounded-2xl shadow-xl w-full max-w-sm text-center">
                <h2 class="text-2xl font-bold mb-6 text-gray-800">"Who is working?"</h2>
                <form on:submit=|ev| ev.prevent_default()>
                    <label class="block text-left text-sm font-medium text-gray-600 mb-1">
                        "Enter your name"
                    </label>
                    <input
                        type="text"
                        placeholder="e.g., John Doe"
                        class="w-full p-4 border border-gray-300 rounded-xl mb-6 text-lg outline-none"
                        on:blur=move |ev| submit(event_target_value(&ev))
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                submit(event_target_value(&ev));
                            }
                        }
                    />
                </form>
                <p class="text-sm text-gray-400">"Press Enter or click outside to save"</p>
            </div>
        </div>
    }
}

/// Operator name with the "Change" control
#[component]
fn OperatorHeader() -> impl IntoView {
    let session = use_context::<SessionContext>().expect("SessionContext not found");

    view! {
        <div class="flex justify-between items-center mb-8 bg-white p-4 rounded-xl shadow-sm">
            <div>
                <p class="text-xs text-gray-500 uppercase font-bold tracking-wider">"Employee"</p>
                <p class="font-semibold text-gray-900">
                    {move || session.state.with(|s| s.person_name.clone())}
                </p>
            </div>
            <button
                on:click=move |_| session.change_operator()
                class="text-sm text-primary font-medium"
            >
                "Change"
            </button>
        </div>
    }
}

/// Idle screen: choose a process and start
#[component]
fn ProcessPicker(processes: RwSignal<Vec<Process>>, busy: RwSignal<bool>) -> impl IntoView {
    let session = use_context::<SessionContext>().expect("SessionContext not found");

    let (selected, set_selected) = create_signal(String::new());

    let start = move |_| {
        let process_id = selected.get_untracked();
        if process_id.is_empty() {
            return;
        }
        let state = session.state.get_untracked();
        let list = processes.get_untracked();

        spawn_guarded(busy, async move {
            match begin_work(&GlooApi::default(), &state, &list, &process_id).await {
                Ok(active) => session.start_session(active),
                Err(e) => alert(&e.to_string()),
            }
        });
    };

    let disabled = move || selected.with(String::is_empty) || busy.get();

    view! {
        <div class="flex-1 flex flex-col justify-center space-y-6">
            <div>
                <label class="block text-lg font-medium text-gray-700 mb-2">"Select Process"</label>
                <select
                    class="w-full p-4 text-lg border-2 border-gray-200 rounded-xl bg-white"
                    prop:value=move || selected.get()
                    on:change=move |ev| set_selected.set(event_target_value(&ev))
                >
                    <option value="">"-- Choose Task --"</option>
                    <For
                        each=move || processes.get()
                        key=|p| p.id.clone()
                        children=|p| view! { <option value=p.id>{p.name}</option> }
                    />
                </select>
            </div>

            <div class="flex-1 flex items-end pb-8">
                <button
                    on:click=start
                    disabled=disabled
                    class=move || {
                        if disabled() {
                            "btn-success opacity-50 cursor-not-allowed"
                        } else {
                            "btn-success"
                        }
                    }
                >
                    "START WORK"
                </button>
            </div>
        </div>
    }
}

/// Running screen: process name, live timer and Stop
#[component]
fn RunningTimer(elapsed: RwSignal<String>, busy: RwSignal<bool>) -> impl IntoView {
    let session = use_context::<SessionContext>().expect("SessionContext not found");

    let stop = move |_| {
        let state = session.state.get_untracked();
        if state.active.is_none() {
            return;
        }

        spawn_guarded(busy, async move {
            match finish_work(&GlooApi::default(), &state).await {
                Ok(Some(_)) => session.end_session(),
                Ok(None) => {}
                Err(e) => alert(&e.to_string()),
            }
        });
    };

    let process_name = move || {
        session
            .state
            .with(|s| s.active.as_ref().map(|a| a.process_name.clone()))
            .unwrap_or_default()
    };

    view! {
        <div class="flex-1 flex flex-col items-center justify-center space-y-8">
            <div class="text-center space-y-2 animate-pulse">
                <p class="text-gray-500 font-medium">"currently tracking"</p>
                <h2 class="text-3xl font-bold text-gray-800">{process_name}</h2>
            </div>

            <div class="w-64 h-64 rounded-full border-8 border-purple-100 flex items-center justify-center bg-white shadow-inner">
                <span class="text-5xl font-mono font-bold text-gray-700 tracking-wider">
                    {move || elapsed.get()}
                </span>
            </div>

            <button
                on:click=stop
                disabled=move || busy.get()
                class="btn-danger mt-8"
            >
                "STOP WORK"
            </button>
        </div>
    }
}
