//! Error State

use leptos::*;

/// Load failure with a retry button
#[component]
pub fn ErrorState(
    #[prop(into)]
    message: String,
    #[prop(into)]
    on_retry: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12 text-center">
            <div class="text-4xl mb-3">"⚠"</div>
            <p class="text-gray-300 mb-4">{message}</p>
            <button
                on:click=move |_| on_retry.call(())
                class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Retry"
            </button>
        </div>
    }
}

/// Empty result placeholder
#[component]
pub fn EmptyState(
    #[prop(into)]
    message: String,
    #[prop(default = "📭")]
    icon: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12 text-center text-gray-400">
            <div class="text-4xl mb-3">{icon}</div>
            <p>{message}</p>
        </div>
    }
}
