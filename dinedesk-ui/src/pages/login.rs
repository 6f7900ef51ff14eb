//! Login Page
//!
//! Tokens are issued by the DineDesk backend; staff paste theirs here.

use leptos::*;
use leptos_router::use_navigate;

use crate::state::global::GlobalState;

#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let token = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = token.get();
        if value.trim().is_empty() {
            error.set(Some("Paste your access token".to_string()));
            return;
        }
        error.set(None);
        set_submitting.set(true);

        let state = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match state.sign_in(&value).await {
                Ok(profile) => {
                    state.show_success(&format!("Welcome, {}", profile.display_name()));
                    navigate("/", Default::default());
                }
                Err(e) => {
                    error.try_set(Some(e));
                }
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-900 text-gray-100 p-4">
            <div class="w-full max-w-md bg-gray-800 rounded-xl p-8 border border-gray-700">
                <div class="text-center mb-6">
                    <div class="text-4xl mb-2">"🍽"</div>
                    <h1 class="text-2xl font-bold">"DineDesk"</h1>
                    <p class="text-gray-400 mt-1">"Sign in to your restaurant dashboard"</p>
                </div>
                <form on:submit=on_submit class="space-y-4">
                    <textarea
                        rows="3"
                        placeholder="Access token"
                        class="w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2 font-mono text-sm"
                        prop:value=move || token.get()
                        on:input=move |ev| token.set(event_target_value(&ev))
                    />
                    <Show when=move || error.get().is_some()>
                        <p class="text-sm text-red-400">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 rounded-lg py-3 font-semibold"
                    >
                        {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
