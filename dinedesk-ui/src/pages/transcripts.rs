//! Transcripts Page
//!
//! Call and SMS conversations handled by the ordering assistant.

use chrono::Utc;
use dinedesk::cache::{QueryKey, Resource};
use dinedesk::format::{format_duration, format_phone, format_relative};
use dinedesk::models::{Transcript, TranscriptKind};
use leptos::*;

use crate::components::{EmptyState, ErrorState, RowsSkeleton, Spinner};
use crate::state::global::GlobalState;
use crate::state::use_query;

#[component]
pub fn Transcripts() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let account_id = state.account_id;
    let kind = create_rw_signal(None::<TranscriptKind>);
    let selected = create_rw_signal(None::<String>);

    let list = use_query(
        Resource::Transcripts,
        move || {
            account_id.get().map(|id| {
                QueryKey::new(Resource::Transcripts.name())
                    .param("account_id", id)
                    .opt_param("type", kind.get().map(|k| k.as_str()))
            })
        },
        move |api| {
            let id = account_id.get_untracked().unwrap_or_default();
            let kind = kind.get_untracked();
            async move { api.list_transcripts(&id, kind).await }
        },
    );
    let (data, error) = (list.data, list.error);

    let detail = use_query(
        Resource::Transcripts,
        move || {
            selected
                .get()
                .map(|id| QueryKey::new(Resource::Transcripts.name()).param("id", id))
        },
        move |api| {
            let id = selected.get_untracked().unwrap_or_default();
            async move { api.get_transcript(&id).await }
        },
    );
    let detail_data = detail.data;

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Transcripts"</h1>
                <p class="text-gray-400 mt-1">"Conversations handled by your assistant"</p>
            </div>

            <div class="flex space-x-2">
                <KindTab label="All" value=None current=kind />
                <KindTab label=TranscriptKind::Sms.label() value=Some(TranscriptKind::Sms) current=kind />
                <KindTab label=TranscriptKind::Voice.label() value=Some(TranscriptKind::Voice) current=kind />
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                <section class="bg-gray-800 rounded-xl p-4 lg:col-span-1 max-h-[70vh] overflow-y-auto">
                    {move || {
                        if let Some(message) = error.get() {
                            let list = list.clone();
                            return view! { <ErrorState message=message on_retry=move |_| list.refetch() /> }.into_view();
                        }
                        match data.get() {
                            None => view! { <RowsSkeleton count=5 /> }.into_view(),
                            Some(items) if items.is_empty() => {
                                view! { <EmptyState message="No conversations yet" icon="💬" /> }.into_view()
                            }
                            Some(items) => {
                                let now = Utc::now();
                                items
                                    .into_iter()
                                    .map(|t| {
                                        let id = t.id.clone();
                                        let is_selected = {
                                            let id = id.clone();
                                            move || selected.get().as_deref() == Some(id.as_str())
                                        };
                                        view! {
                                            <button
                                                on:click=move |_| selected.set(Some(id.clone()))
                                                class=move || if is_selected() {
                                                    "w-full text-left p-3 rounded-lg bg-gray-700"
                                                } else {
                                                    "w-full text-left p-3 rounded-lg hover:bg-gray-700/50"
                                                }
                                            >
                                                <div class="flex items-center justify-between text-sm">
                                                    <span class="font-medium">
                                                        {t.customer_phone.as_deref().map(format_phone).unwrap_or_else(|| "Unknown".to_string())}
                                                    </span>
                                                    <span class="text-gray-500">
                                                        {t.created_at.map(|at| format_relative(at, now)).unwrap_or_default()}
                                                    </span>
                                                </div>
                                                <div class="text-xs text-gray-400 mt-1">
                                                    {t.kind.label()}
                                                    {t.outcome.clone().map(|o| format!(" · {}", o))}
                                                </div>
                                                <p class="text-sm text-gray-300 mt-1 line-clamp-2">{t.preview()}</p>
                                            </button>
                                        }
                                    })
                                    .collect_view()
                            }
                        }
                    }}
                </section>

                <section class="bg-gray-800 rounded-xl p-6 lg:col-span-2">
                    {move || match (selected.get(), detail_data.get()) {
                        (None, _) => view! { <EmptyState message="Select a conversation" icon="👈" /> }.into_view(),
                        (Some(_), None) => view! { <Spinner label="Loading conversation" /> }.into_view(),
                        (Some(_), Some(t)) => view! { <Conversation transcript=t /> }.into_view(),
                    }}
                </section>
            </div>
        </div>
    }
}

#[component]
fn KindTab(
    label: &'static str,
    value: Option<TranscriptKind>,
    current: RwSignal<Option<TranscriptKind>>,
) -> impl IntoView {
    view! {
        <button
            on:click=move |_| current.set(value)
            class=move || {
                let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                if current.get() == value {
                    format!("{} bg-primary-600 text-white", base)
                } else {
                    format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                }
            }
        >
            {label}
        </button>
    }
}

#[component]
fn Conversation(transcript: Transcript) -> impl IntoView {
    let header = match transcript.duration_seconds {
        Some(secs) => format!("{} call · {}", transcript.kind.label(), format_duration(secs)),
        None => format!("{} conversation", transcript.kind.label()),
    };

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-semibold">{header}</h2>
                {transcript.order_id.clone().map(|id| view! {
                    <span class="text-sm text-primary-400">{format!("Order {}", id)}</span>
                })}
            </div>
            {transcript.summary.clone().map(|s| view! {
                <p class="p-3 bg-gray-900/50 rounded-lg text-sm text-gray-300">{s}</p>
            })}
            <div class="space-y-3">
                {transcript
                    .ordered_messages()
                    .into_iter()
                    .filter(|m| m.role != "system")
                    .map(|m| {
                        let (align, bubble) = if m.is_customer() {
                            ("flex justify-start", "bg-gray-700")
                        } else {
                            ("flex justify-end", "bg-primary-600/80")
                        };
                        view! {
                            <div class=align>
                                <div class=format!("max-w-[75%] px-4 py-2 rounded-2xl text-sm {}", bubble)>
                                    {m.content.clone()}
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
