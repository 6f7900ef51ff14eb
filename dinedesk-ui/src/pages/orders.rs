//! Orders Page
//!
//! Filterable order table. Clicking a row opens the detail modal.

use chrono::Utc;
use dinedesk::cache::{QueryKey, Resource};
use dinedesk::format::{format_cents, format_relative};
use dinedesk::models::{Order, OrderFilter, OrderStatus};
use leptos::*;

use crate::components::{
    EmptyState, ErrorState, OrderDetail, OrderStatusBadge, OrderTableSkeleton, PaymentBadge,
    ORDER_COLUMNS,
};
use crate::state::global::GlobalState;
use crate::state::{use_order_alerts, use_query};

#[component]
pub fn Orders() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let account_id = state.account_id;

    let _alerts = use_order_alerts();

    let status = create_rw_signal(None::<OrderStatus>);
    let date_from = create_rw_signal(String::new());
    let date_to = create_rw_signal(String::new());
    let search = create_rw_signal(String::new());
    let selected = create_rw_signal(None::<Order>);

    let filter = create_memo(move |_| {
        let filter = OrderFilter::default().with_dates(Some(date_from.get()), Some(date_to.get()));
        match status.get() {
            Some(s) => filter.with_status(s),
            None => filter,
        }
    });

    let orders = use_query(
        Resource::Orders,
        move || {
            let id = account_id.get()?;
            let key = filter.with(|f| {
                f.to_params()
                    .into_iter()
                    .fold(QueryKey::new(Resource::Orders.name()).param("account_id", &id), |k, (name, value)| {
                        k.param(name, value)
                    })
            });
            Some(key)
        },
        move |api| {
            let id = account_id.get_untracked().unwrap_or_default();
            let filter = filter.get_untracked();
            async move { api.list_orders(&id, &filter).await }
        },
    );
    let (data, error) = (orders.data, orders.error);

    let visible = create_memo(move |_| {
        let query = search.get();
        data.with(|list| {
            list.as_ref().map(|list| {
                let mut rows: Vec<Order> = list.iter().filter(|o| o.matches_search(&query)).cloned().collect();
                rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                rows
            })
        })
    });

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Orders"</h1>
                <p class="text-gray-400 mt-1">"Phone, SMS and web orders"</p>
            </div>

            <div class="flex flex-wrap gap-2">
                <StatusTab label="All" value=None current=status />
                {OrderStatus::ALL
                    .iter()
                    .map(|s| view! { <StatusTab label=s.label() value=Some(*s) current=status /> })
                    .collect_view()}
            </div>

            <div class="flex flex-wrap items-end gap-4">
                <label class="block">
                    <span class="block text-sm text-gray-400 mb-1">"From"</span>
                    <input
                        type="date"
                        class="bg-gray-800 border border-gray-700 rounded-lg px-3 py-2"
                        prop:value=move || date_from.get()
                        on:change=move |ev| date_from.set(event_target_value(&ev))
                    />
                </label>
                <label class="block">
                    <span class="block text-sm text-gray-400 mb-1">"To"</span>
                    <input
                        type="date"
                        class="bg-gray-800 border border-gray-700 rounded-lg px-3 py-2"
                        prop:value=move || date_to.get()
                        on:change=move |ev| date_to.set(event_target_value(&ev))
                    />
                </label>
                <input
                    type="search"
                    placeholder="Search name, phone or order #"
                    class="flex-1 min-w-[16rem] bg-gray-800 border border-gray-700 rounded-lg px-3 py-2"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
            </div>

            <section class="bg-gray-800 rounded-xl overflow-hidden">
                {move || {
                    if let Some(message) = error.get() {
                        let orders = orders.clone();
                        return view! {
                            <ErrorState message=message on_retry=move |_| orders.refetch() />
                        }
                        .into_view();
                    }
                    match visible.get() {
                        None => view! { <OrderTableSkeleton rows=6 /> }.into_view(),
                        Some(rows) if rows.is_empty() => {
                            view! { <EmptyState message="No orders match these filters" /> }.into_view()
                        }
                        Some(rows) => view! { <OrderTable rows=rows selected=selected /> }.into_view(),
                    }
                }}
            </section>

            {move || selected.get().map(|order| view! {
                <OrderDetail order=order on_close=move |_| selected.set(None) />
            })}
        </div>
    }
}

#[component]
fn StatusTab(
    label: &'static str,
    value: Option<OrderStatus>,
    current: RwSignal<Option<OrderStatus>>,
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
fn OrderTable(rows: Vec<Order>, selected: RwSignal<Option<Order>>) -> impl IntoView {
    let now = Utc::now();
    view! {
        <table class="w-full text-sm">
            <thead class="bg-gray-900/50 text-gray-400 text-left">
                <tr>
                    {ORDER_COLUMNS.iter().map(|c| view! { <th class="px-4 py-3">{*c}</th> }).collect_view()}
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|order| {
                        let row = order.clone();
                        view! {
                            <tr
                                class="border-t border-gray-700 hover:bg-gray-700/50 cursor-pointer"
                                on:click=move |_| selected.set(Some(row.clone()))
                            >
                                <td class="px-4 py-3 font-mono">{order.display_number()}</td>
                                <td class="px-4 py-3">{order.customer_label().to_string()}</td>
                                <td class="px-4 py-3 text-gray-400 max-w-xs truncate">{order.items.summary()}</td>
                                <td class="px-4 py-3">{format_cents(order.total)}</td>
                                <td class="px-4 py-3"><OrderStatusBadge status=order.status /></td>
                                <td class="px-4 py-3"><PaymentBadge status=order.payment_status /></td>
                                <td class="px-4 py-3 text-gray-400">{format_relative(order.created_at, now)}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
