//! Stat Card Component
//!
//! One headline number with a label and optional caption.

use leptos::*;

#[component]
pub fn StatCard(
    /// Card title
    #[prop(into)]
    label: String,
    /// Formatted value
    #[prop(into)]
    value: Signal<String>,
    /// Small text under the value
    #[prop(optional, into)]
    caption: Option<Signal<String>>,
    #[prop(default = "📊")]
    icon: &'static str,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <div class="flex items-center justify-between">
                <span class="text-gray-400 text-sm">{label}</span>
                <span class="text-xl">{icon}</span>
            </div>
            <div class="text-3xl font-bold mt-2">{move || value.get()}</div>
            {caption.map(|c| view! {
                <div class="mt-2 text-sm text-gray-400">{move || c.get()}</div>
            })}
        </div>
    }
}
