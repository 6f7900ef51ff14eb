//! Modal Dialog

use leptos::*;

/// Centered dialog over a dimmed backdrop. Clicking the backdrop closes it.
#[component]
pub fn Modal(
    #[prop(into)]
    title: String,
    #[prop(into)]
    on_close: Callback<()>,
    #[prop(default = "max-w-lg")]
    width: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="fixed inset-0 z-40 flex items-center justify-center p-4">
            <div
                class="absolute inset-0 bg-black/60"
                on:click=move |_| on_close.call(())
            />
            <div class=format!(
                "relative w-full {} bg-gray-800 rounded-xl shadow-xl border border-gray-700 max-h-[90vh] overflow-y-auto",
                width
            )>
                <div class="flex items-center justify-between px-6 py-4 border-b border-gray-700">
                    <h2 class="text-lg font-semibold">{title}</h2>
                    <button
                        on:click=move |_| on_close.call(())
                        class="text-gray-400 hover:text-white text-xl leading-none"
                    >
                        "×"
                    </button>
                </div>
                <div class="p-6">{children()}</div>
            </div>
        </div>
    }
}
