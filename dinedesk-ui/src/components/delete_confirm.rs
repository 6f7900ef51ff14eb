//! Delete Confirm Button
//!
//! Inline delete with a confirm/cancel step.

use leptos::*;

#[component]
pub fn DeleteConfirmButton(
    #[prop(into)]
    on_confirm: Callback<()>,
    #[prop(default = "Delete")]
    label: &'static str,
) -> impl IntoView {
    let (confirming, set_confirming) = create_signal(false);

    view! {
        <Show
            when=move || confirming.get()
            fallback=move || view! {
                <button
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(true);
                    }
                    class="px-2 py-1 text-sm text-red-400 hover:text-red-300"
                >
                    {label}
                </button>
            }
        >
            <span class="inline-flex items-center space-x-2 text-sm">
                <span class="text-gray-300">"Delete?"</span>
                <button
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                        on_confirm.call(());
                    }
                    class="px-2 py-1 bg-red-600 hover:bg-red-700 rounded"
                >
                    "Yes"
                </button>
                <button
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                    class="px-2 py-1 bg-gray-600 hover:bg-gray-500 rounded"
                >
                    "No"
                </button>
            </span>
        </Show>
    }
}
