//! Admin Dashboard Page
//!
//! Password gate, process creation form and the process list.

use leptos::*;

use wabash::{
    apply_listing, fetch_catalog, remove_process, submit_process, AdminGate, Process,
    ProcessCatalog, ProcessDraft, DEFAULT_ADMIN_PASSWORD,
};

use crate::api::GlooApi;
use crate::components::dialog::{alert, confirm};
use crate::components::{InlineLoading, Loading};

const DELETE_PROMPT: &str = "Are you sure you want to delete this process?";

/// Shared password, baked in at build time
fn admin_gate() -> AdminGate {
    AdminGate::new(option_env!("WABASH_ADMIN_PASSWORD").unwrap_or(DEFAULT_ADMIN_PASSWORD))
}

/// Admin page component
#[component]
pub fn AdminDashboard() -> impl IntoView {
    let (unlocked, set_unlocked) = create_signal(false);
    let catalog = create_rw_signal(ProcessCatalog::new());

    view! {
        {move || {
            if unlocked.get() {
                view! { <Catalog catalog=catalog /> }.into_view()
            } else {
                view! {
                    <Login on_unlock=move || {
                        set_unlocked.set(true);
                        refresh(catalog);
                    } />
                }
                .into_view()
            }
        }}
    }
}

/// Replace the catalog with the server listing
fn refresh(catalog: RwSignal<ProcessCatalog>) {
    spawn_local(async move {
        let listing = fetch_catalog(&GlooApi::default()).await;
        if let Some(Err(e)) = catalog.try_update(|c| apply_listing(c, listing)) {
            web_sys::console::error_1(&e.to_string().into());
        }
    });
}

/// Password screen
#[component]
fn Login<F>(on_unlock: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let gate = admin_gate();
    let (password, set_password) = create_signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match gate.verify(&password.get_untracked()) {
            Ok(()) => on_unlock(),
            Err(e) => alert(&e.to_string()),
        }
    };

    view! {
        <div class="flex items-center justify-center min-h-[60vh] p-4">
            <div class="bg-white p-8 rounded-xl shadow-md w-full max-w-md">
                <h2 class="text-2xl font-bold mb-6 text-center text-gray-800">"Admin Access"</h2>
                <form on:submit=on_submit class="space-y-4">
                    <div>
                        <label class="block text-sm font-medium text-gray-700">"Password"</label>
                        <input
                            type="password"
                            autofocus=true
                            class="mt-1 block w-full rounded-lg border-gray-300 shadow-sm p-3 border"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" class="btn-primary w-full">"Sign In"</button>
                </form>
            </div>
        </div>
    }
}

/// Unlocked dashboard
#[component]
fn Catalog(catalog: RwSignal<ProcessCatalog>) -> impl IntoView {
    view! {
        <div class="p-4 max-w-4xl mx-auto">
            <h1 class="text-3xl font-bold mb-6 text-gray-800">"Process Definitions"</h1>
            <CreateForm catalog=catalog />
            <ProcessList catalog=catalog />
        </div>
    }
}

/// "Add New Process" form
#[component]
fn CreateForm(catalog: RwSignal<ProcessCatalog>) -> impl IntoView {
    let form = create_rw_signal(ProcessDraft::default());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.get_untracked();

        set_submitting.set(true);
        spawn_local(async move {
            match submit_process(&GlooApi::default(), &draft).await {
                Ok(created) => {
                    // Appended as returned; a re-fetch may lag behind the write
                    catalog.try_update(|c| c.append(created));
                    form.try_set(ProcessDraft::default());
                }
                Err(e) => alert(&e.to_string()),
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <div class="bg-white p-6 rounded-xl shadow-md mb-8">
            <h2 class="text-xl font-semibold mb-4">"Add New Process"</h2>
            <form on:submit=on_submit class="space-y-4">
                <TextField
                    label="Process Name"
                    required=true
                    value=Signal::derive(move || form.with(|f| f.name.clone()))
                    on_input=move |v| form.update(|f| f.name = v)
                />
                <TextField
                    label="Description"
                    value=Signal::derive(move || form.with(|f| f.description.clone()))
                    on_input=move |v| form.update(|f| f.description = v)
                />
                <div class="grid grid-cols-2 gap-4">
                    <TextField
                        label="Category"
                        value=Signal::derive(move || form.with(|f| f.category.clone()))
                        on_input=move |v| form.update(|f| f.category = v)
                    />
                    <div>
                        <label class="block text-sm font-medium text-gray-700">"Est. Duration (min)"</label>
                        <input
                            type="number"
                            min="0"
                            class="mt-1 block w-full rounded-lg border-gray-300 shadow-sm p-3 border"
                            prop:value=move || form.with(|f| f.estimated_duration.to_string())
                            on:input=move |ev| {
                                let minutes = event_target_value(&ev).parse().unwrap_or(0);
                                form.update(|f| f.estimated_duration = minutes);
                            }
                        />
                    </div>
                </div>
                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="btn-primary w-full flex justify-center items-center gap-2"
                >
                    {move || {
                        if submitting.get() {
                            view! { <InlineLoading /> }.into_view()
                        } else {
                            "Create Definition".into_view()
                        }
                    }}
                </button>
            </form>
        </div>
    }
}

#[component]
fn TextField<F>(
    label: &'static str,
    #[prop(optional)]
    required: bool,
    value: Signal<String>,
    on_input: F,
) -> impl IntoView
where
    F: Fn(String) + 'static,
{
    view! {
        <div>
            <label class="block text-sm font-medium text-gray-700">{label}</label>
            <input
                type="text"
                required=required
                class="mt-1 block w-full rounded-lg border-gray-300 shadow-sm p-3 border"
                prop:value=move || value.get()
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        </div>
    }
}

/// "Existing Processes" list with delete buttons
#[component]
fn ProcessList(catalog: RwSignal<ProcessCatalog>) -> impl IntoView {
    let delete = move |id: String| {
        if !confirm(DELETE_PROMPT) {
            return;
        }

        // Optimistic: gone from the list before the server answers
        catalog.update(|c| {
            c.remove(&id);
        });

        spawn_local(async move {
            if let Err(e) = remove_process(&GlooApi::default(), &id).await {
                alert(&e.to_string());
                refresh(catalog);
            }
        });
    };

    view! {
        <div class="bg-white rounded-xl shadow-md overflow-hidden">
            <h2 class="text-xl font-semibold p-6 bg-gray-50 border-b">"Existing Processes"</h2>
            {move || {
                if catalog.with(ProcessCatalog::is_loading) {
                    return view! { <Loading /> }.into_view();
                }

                view! {
                    <ul class="divide-y divide-gray-200">
                        <For
                            each=move || catalog.with(|c| c.processes().to_vec())
                            key=|p| p.id.clone()
                            children=move |p| view! { <ProcessRow process=p on_delete=delete /> }
                        />
                        <Show when=move || catalog.with(ProcessCatalog::is_empty)>
                            <li class="p-8 text-center text-gray-500">"No processes defined yet."</li>
                        </Show>
                    </ul>
                }
                .into_view()
            }}
        </div>
    }
}

#[component]
fn ProcessRow<F>(process: Process, on_delete: F) -> impl IntoView
where
    F: Fn(String) + 'static,
{
    let id = process.id.clone();

    view! {
        <li class="p-4 hover:bg-gray-50 transition-colors">
            <div class="flex justify-between items-center">
                <div>
                    <h3 class="text-lg font-medium text-gray-900">{process.name}</h3>
                    <p class="text-sm text-gray-500">{process.description}</p>
                </div>
                <div class="flex items-center gap-3">
                    <span class="inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium bg-purple-100 text-primary">
                        {process.category}
                    </span>
                    <button
                        on:click=move |_| on_delete(id.clone())
                        class="text-red-500 hover:text-red-700 p-1 rounded-full"
                        title="Delete Process"
                    >
                        "Delete"
                    </button>
                </div>
            </div>
        </li>
    }
}
