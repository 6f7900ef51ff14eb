//! Platform Admin Page
//!
//! Platform-wide numbers and every restaurant account. Admins can switch the
//! dashboard to any account from here.

use dinedesk::cache::{QueryKey, Resource};
use dinedesk::format::{format_cents, format_phone};
use dinedesk::models::AdminAccount;
use leptos::*;
use leptos_router::use_navigate;

use crate::components::{EmptyState, ErrorState, RowsSkeleton, StatCard};
use crate::state::global::GlobalState;
use crate::state::use_query;

#[component]
pub fn Admin() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let user = state.user;
    let is_admin = move || user.with(|u| u.as_ref().map(|u| u.is_admin()).unwrap_or(false));

    view! {
        <Show when=is_admin fallback=|| view! {
            <EmptyState message="Only platform admins can view this page" icon="🔒" />
        }>
            <AdminContent />
        </Show>
    }
}

#[component]
fn AdminContent() -> impl IntoView {
    let stats = use_query(
        Resource::Admin,
        || Some(QueryKey::new(Resource::Admin.name()).param("view", "stats")),
        |api| async move { api.admin_platform_stats().await },
    );
    let accounts = use_query(
        Resource::Admin,
        || Some(QueryKey::new(Resource::Admin.name()).param("view", "accounts")),
        |api| async move { api.admin_list_accounts().await },
    );
    let stats_data = stats.data;
    let (accounts_data, accounts_error) = (accounts.data, accounts.error);

    let stat = move |f: fn(&dinedesk::models::PlatformStats) -> String| {
        Signal::derive(move || stats_data.with(|s| s.as_ref().map(f).unwrap_or_else(|| "–".to_string())))
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Platform"</h1>
                <p class="text-gray-400 mt-1">"All restaurants on DineDesk"</p>
            </div>

            <section class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
                <StatCard
                    label="Accounts"
                    icon="🏪"
                    value=stat(|s| s.total_accounts.to_string())
                    caption=stat(|s| format!("{} active", s.active_accounts))
                />
                <StatCard label="Orders today" icon="🧾" value=stat(|s| s.orders_today.to_string()) />
                <StatCard label="Revenue today" icon="💵" value=stat(|s| format_cents(s.revenue_today)) />
                <StatCard label="Calls today" icon="📞" value=stat(|s| s.calls_today.to_string()) />
            </section>

            <section class="bg-gray-800 rounded-xl overflow-hidden">
                {move || {
                    if let Some(message) = accounts_error.get() {
                        let accounts = accounts.clone();
                        return view! { <ErrorState message=message on_retry=move |_| accounts.refetch() /> }.into_view();
                    }
                    match accounts_data.get() {
                        None => view! { <div class="p-6"><RowsSkeleton count=5 /></div> }.into_view(),
                        Some(list) if list.is_empty() => view! { <EmptyState message="No accounts yet" /> }.into_view(),
                        Some(list) => view! { <AccountsTable accounts=list /> }.into_view(),
                    }
                }}
            </section>
        </div>
    }
}

#[component]
fn AccountsTable(accounts: Vec<AdminAccount>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let current = state.account_id;

    view! {
        <table class="w-full text-sm">
            <thead class="bg-gray-900/50 text-gray-400 text-left">
                <tr>
                    <th class="px-4 py-3">"Restaurant"</th>
                    <th class="px-4 py-3">"Plan"</th>
                    <th class="px-4 py-3">"Phone"</th>
                    <th class="px-4 py-3 text-right">"Orders"</th>
                    <th class="px-4 py-3">"Status"</th>
                    <th class="px-4 py-3"></th>
                </tr>
            </thead>
            <tbody>
                {accounts
                    .into_iter()
                    .map(|acc| {
                        let state = state.clone();
                        let navigate = navigate.clone();
                        let id = acc.id.clone();
                        let is_current = {
                            let id = id.clone();
                            move || current.get().as_deref() == Some(id.as_str())
                        };
                        view! {
                            <tr class="border-t border-gray-700">
                                <td class="px-4 py-3">
                                    <div class="font-medium">{acc.business_name.clone()}</div>
                                    <div class="text-gray-400">{acc.email.clone().unwrap_or_default()}</div>
                                </td>
                                <td class="px-4 py-3">{acc.plan.clone().unwrap_or_else(|| "–".to_string())}</td>
                                <td class="px-4 py-3">
                                    {acc.twilio_phone_number.as_deref().map(format_phone).unwrap_or_default()}
                                </td>
                                <td class="px-4 py-3 text-right">{acc.order_count}</td>
                                <td class="px-4 py-3">
                                    {if acc.is_active {
                                        view! { <span class="text-green-400">"Active"</span> }
                                    } else {
                                        view! { <span class="text-gray-500">"Inactive"</span> }
                                    }}
                                </td>
                                <td class="px-4 py-3 text-right">
                                    <button
                                        disabled=is_current
                                        on:click=move |_| {
                                            state.cache.clear();
                                            state.select_account(&id);
                                            navigate("/", Default::default());
                                        }
                                        class="px-3 py-1 bg-gray-700 hover:bg-gray-600 disabled:opacity-40 rounded"
                                    >
                                        "Open"
                                    </button>
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
