//! Analytics Page
//!
//! Revenue and order volume over a selectable window.

use dinedesk::cache::{QueryKey, Resource};
use dinedesk::format::format_cents;
use dinedesk::models::{AnalyticsRange, AnalyticsSummary};
use leptos::*;

use crate::components::{
    ErrorState, RevenueChart, RevenueChartSkeleton, StatCard, StatGridSkeleton,
};
use crate::state::global::GlobalState;
use crate::state::use_query;

#[component]
pub fn Analytics() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let account_id = state.account_id;
    let range = create_rw_signal(AnalyticsRange::default());

    let summary = use_query(
        Resource::Analytics,
        move || {
            account_id.get().map(|id| {
                QueryKey::new(Resource::Analytics.name())
                    .param("account_id", id)
                    .param("range", range.get().as_param())
            })
        },
        move |api| {
            let id = account_id.get_untracked().unwrap_or_default();
            let range = range.get_untracked();
            async move { api.get_analytics(&id, range).await }
        },
    );
    let (data, error) = (summary.data, summary.error);

    let field = move |f: fn(&AnalyticsSummary) -> String| {
        Signal::derive(move || data.with(|d| d.as_ref().map(f).unwrap_or_default()))
    };

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Analytics"</h1>
                    <p class="text-gray-400 mt-1">"Orders, revenue and conversations"</p>
                </div>
                <div class="flex space-x-2">
                    {AnalyticsRange::ALL
                        .iter()
                        .map(|&r| view! {
                            <button
                                on:click=move |_| range.set(r)
                                class=move || {
                                    let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                                    if range.get() == r {
                                        format!("{} bg-primary-600 text-white", base)
                                    } else {
                                        format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                                    }
                                }
                            >
                                {r.label()}
                            </button>
                        })
                        .collect_view()}
                </div>
            </div>

            {move || {
                if let Some(message) = error.get() {
                    let summary = summary.clone();
                    return view! { <ErrorState message=message on_retry=move |_| summary.refetch() /> }.into_view();
                }
                if data.with(Option::is_none) {
                    return view! {
                        <StatGridSkeleton />
                        <RevenueChartSkeleton />
                    }
                    .into_view();
                }
                view! {
                    <section class="grid grid-cols-1 md:grid-cols-4 gap-4">
                        <StatCard label="Revenue" icon="💵" value=field(|s| format_cents(s.total_revenue)) />
                        <StatCard
                            label="Orders"
                            icon="🧾"
                            value=field(|s| s.total_orders.to_string())
                            caption=field(|s| format!("avg {}", format_cents(s.average_order_value)))
                        />
                        <StatCard label="Calls" icon="📞" value=field(|s| s.total_calls.to_string()) />
                        <StatCard
                            label="SMS"
                            icon="💬"
                            value=field(|s| s.total_sms.to_string())
                            caption=field(|s| {
                                s.conversion_rate
                                    .map(|r| format!("{:.1}% converted", r))
                                    .unwrap_or_default()
                            })
                        />
                    </section>

                    <section class="bg-gray-800 rounded-xl p-6">
                        <div class="flex items-center justify-between mb-4">
                            <h2 class="text-xl font-semibold">"Daily Revenue"</h2>
                            <span class="text-sm text-gray-400">
                                {move || data.with(|d| {
                                    d.as_ref()
                                        .and_then(|s| s.peak_day())
                                        .map(|p| format!("Best day {} ({})", p.date, format_cents(p.revenue)))
                                        .unwrap_or_default()
                                })}
                            </span>
                        </div>
                        <RevenueChart points=Signal::derive(move || {
                            data.with(|d| d.as_ref().map(|s| s.daily.clone()).unwrap_or_default())
                        }) />
                    </section>

                    <section class="bg-gray-800 rounded-xl p-6">
                        <h2 class="text-xl font-semibold mb-4">"Top Items"</h2>
                        <table class="w-full text-sm">
                            <thead class="text-gray-400 text-left">
                                <tr>
                                    <th class="py-2">"Item"</th>
                                    <th class="py-2 text-right">"Sold"</th>
                                    <th class="py-2 text-right">"Revenue"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || data.with(|d| {
                                    d.as_ref()
                                        .map(|s| s.top_items.clone())
                                        .unwrap_or_default()
                                        .into_iter()
                                        .map(|item| view! {
                                            <tr class="border-t border-gray-700">
                                                <td class="py-2">{item.name}</td>
                                                <td class="py-2 text-right">{item.quantity}</td>
                                                <td class="py-2 text-right">{format_cents(item.revenue)}</td>
                                            </tr>
                                        })
                                        .collect_view()
                                })}
                            </tbody>
                        </table>
                    </section>
                }
                .into_view()
            }}
        </div>
    }
}
