//! Toast Notification Component
//!
//! Renders the toaster's queue, newest last.

use dinedesk::toast::{Toast, ToastKind};
use leptos::*;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn ToastStack() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let toasts = state.toasts;

    view! {
        <div class="fixed bottom-4 right-4 z-50 space-y-2 w-80">
            <For
                each=move || toasts.get()
                key=|toast| (toast.id, toast.kind)
                children=move |toast: Toast| view! { <ToastMessage toast=toast /> }
            />
        </div>
    }
}

fn kind_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "bg-green-600",
        ToastKind::Error => "bg-red-600",
        ToastKind::Warning => "bg-yellow-600",
        ToastKind::Info => "bg-blue-600",
        ToastKind::Loading => "bg-gray-700",
    }
}

#[component]
fn ToastMessage(toast: Toast) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let id = toast.id;
    let dismissible = toast.dismissible;
    let toaster = state.toaster.clone();

    view! {
        <div class=format!(
            "flex items-start space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg \
             transform transition-all duration-300 ease-out animate-slide-in",
            kind_class(toast.kind)
        )>
            <span class="text-lg">
                {if toast.kind == ToastKind::Loading {
                    view! { <span class="inline-block loading-spinner w-4 h-4" /> }.into_view()
                } else {
                    toast.kind.icon().into_view()
                }}
            </span>
            <div class="flex-1">
                {toast.title.clone().map(|t| view! { <div class="text-sm font-semibold">{t}</div> })}
                <div class="text-sm font-medium">{toast.message.clone()}</div>
            </div>
            <Show when=move || dismissible>
                <button
                    on:click={
                        let toaster = toaster.clone();
                        move |_| toaster.dismiss(id)
                    }
                    class="text-white/70 hover:text-white"
                >
                    "×"
                </button>
            </Show>
        </div>
    }
}
