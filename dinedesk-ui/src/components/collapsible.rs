//! Collapsible Panel

use leptos::*;

/// Section with a clickable title that hides or shows its body
#[component]
pub fn Collapsible(
    #[prop(into)]
    title: String,
    #[prop(default = true)]
    open: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let (is_open, set_open) = create_signal(open);

    view! {
        <section class="bg-gray-800 rounded-xl">
            <button
                on:click=move |_| set_open.update(|o| *o = !*o)
                class="w-full flex items-center justify-between px-6 py-4 text-left"
            >
                <h2 class="text-xl font-semibold">{title}</h2>
                <span class="text-gray-400">{move || if is_open.get() { "▾" } else { "▸" }}</span>
            </button>
            <Show when=move || is_open.get()>
                <div class="px-6 pb-6">{children()}</div>
            </Show>
        </section>
    }
}
