//! Header Bar

use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// Top bar with the signed-in user and a logout button
#[component]
pub fn Header() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let user = state.user;
    let account_id = state.account_id;
    let navigate = use_navigate();

    let state_for_logout = state.clone();
    let logout = move |_| {
        state_for_logout.sign_out();
        navigate("/login", Default::default());
    };

    view! {
        <header class="h-16 bg-gray-800 border-b border-gray-700 px-6 flex items-center justify-between">
            <div class="text-sm text-gray-400">
                {move || {
                    account_id
                        .get()
                        .map(|id| format!("Account {}", id))
                        .unwrap_or_else(|| "No account selected".to_string())
                }}
            </div>

            <div class="flex items-center space-x-4">
                {move || {
                    user.get().map(|u| view! {
                        <div class="text-right">
                            <div class="text-sm font-medium">{u.display_name().to_string()}</div>
                            <div class="text-xs text-gray-400 capitalize">{format!("{:?}", u.role).to_lowercase()}</div>
                        </div>
                    })
                }}
                <button
                    on:click=logout
                    class="px-3 py-2 text-sm bg-gray-700 hover:bg-gray-600 rounded-lg transition-colors"
                >
                    "Log out"
                </button>
            </div>
        </header>
    }
}
