//! Dashboard Page
//!
//! Today's orders at a glance, upcoming reservations, and the new-order
//! chime.

use chrono::{Local, Utc};
use dinedesk::cache::{QueryKey, Resource};
use dinedesk::format::{format_cents, format_relative};
use dinedesk::models::{expected_covers, Booking, OrderFilter, OrderStats};
use leptos::*;
use leptos_router::A;

use crate::components::{
    BookingStatusBadge, EmptyState, ErrorState, OrderStatusBadge, RowsSkeleton, StatCard,
    StatCardSkeleton,
};
use crate::state::global::GlobalState;
use crate::state::{use_order_alerts, use_query};

const RECENT_ORDERS: usize = 5;

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let account_id = state.account_id;
    let today = Local::now().format("%Y-%m-%d").to_string();

    let _alerts = use_order_alerts();

    let orders = {
        let today = today.clone();
        let today_for_fetch = today.clone();
        use_query(
            Resource::Dashboard,
            move || {
                account_id.get().map(|id| {
                    QueryKey::new(Resource::Dashboard.name())
                        .param("account_id", id)
                        .param("date", &today)
                })
            },
            move |api| {
                let id = account_id.get_untracked().unwrap_or_default();
                let filter = OrderFilter::default()
                    .with_dates(Some(today_for_fetch.clone()), Some(today_for_fetch.clone()));
                async move { api.list_orders(&id, &filter).await }
            },
        )
    };

    let bookings = {
        let today = today.clone();
        let today_for_fetch = today.clone();
        use_query(
            Resource::Bookings,
            move || {
                account_id.get().map(|id| {
                    QueryKey::new(Resource::Bookings.name())
                        .param("account_id", id)
                        .param("date", &today)
                })
            },
            move |api| {
                let id = account_id.get_untracked().unwrap_or_default();
                let date = today_for_fetch.clone();
                async move { api.list_bookings(&id, Some(&date), None).await }
            },
        )
    };

    let (orders_data, orders_loading, orders_error) = (orders.data, orders.loading, orders.error);
    let (bookings_data, bookings_error) = (bookings.data, bookings.error);

    let stats = create_memo(move |_| {
        orders_data.with(|o| o.as_deref().map(OrderStats::from_orders).unwrap_or_default())
    });

    let orders_for_retry = orders;
    let bookings_for_retry = bookings;

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="text-gray-400 mt-1">"Today's service at a glance"</p>
                </div>
                <div class="text-sm text-gray-400">{today}</div>
            </div>

            <Show when=move || account_id.get().is_some() fallback=|| view! {
                <EmptyState message="No restaurant account selected" icon="🏪" />
            }>
                <section class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
                    {move || if orders_data.with(Option::is_none) && orders_loading.get() {
                        (0..4).map(|_| view! { <StatCardSkeleton /> }).collect_view()
                    } else {
                        view! {
                            <StatCard
                                label="Orders today"
                                icon="🧾"
                                value=Signal::derive(move || stats.get().total_orders.to_string())
                                caption=Signal::derive(move || format!("{} cancelled", stats.get().cancelled))
                            />
                            <StatCard
                                label="Active"
                                icon="🔥"
                                value=Signal::derive(move || stats.get().active().to_string())
                                caption=Signal::derive(move || {
                                    let s = stats.get();
                                    format!("{} pending · {} preparing · {} ready", s.pending, s.preparing, s.ready)
                                })
                            />
                            <StatCard
                                label="Revenue"
                                icon="💵"
                                value=Signal::derive(move || format_cents(stats.get().revenue))
                            />
                            <StatCard
                                label="Avg order"
                                icon="📈"
                                value=Signal::derive(move || format_cents(stats.get().average_order_value()))
                            />
                        }
                        .into_view()
                    }}
                </section>

                <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
                    <section class="bg-gray-800 rounded-xl p-6">
                        <div class="flex items-center justify-between mb-4">
                            <h2 class="text-xl font-semibold">"Recent Orders"</h2>
                            <A href="/orders" class="text-sm text-primary-400 hover:text-primary-300">"View all"</A>
                        </div>
                        {
                            let retry = orders_for_retry.clone();
                            move || {
                                if let Some(message) = orders_error.get() {
                                    let retry = retry.clone();
                                    return view! {
                                        <ErrorState message=message on_retry=move |_| retry.refetch() />
                                    }
                                    .into_view();
                                }
                                match orders_data.get() {
                                    None => view! { <RowsSkeleton count=RECENT_ORDERS /> }.into_view(),
                                    Some(list) if list.is_empty() => {
                                        view! { <EmptyState message="No orders yet today" /> }.into_view()
                                    }
                                    Some(mut list) => {
                                        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                                        let now = Utc::now();
                                        list.into_iter()
                                            .take(RECENT_ORDERS)
                                            .map(|o| view! {
                                                <div class="flex items-center justify-between py-3 border-b border-gray-700 last:border-0">
                                                    <div>
                                                        <div class="font-medium">
                                                            {o.display_number()} " · " {o.customer_label().to_string()}
                                                        </div>
                                                        <div class="text-sm text-gray-400">{o.items.summary()}</div>
                                                    </div>
                                                    <div class="text-right space-y-1">
                                                        <OrderStatusBadge status=o.status />
                                                        <div class="text-xs text-gray-500">
                                                            {format_cents(o.total)} " · " {format_relative(o.created_at, now)}
                                                        </div>
                                                    </div>
                                                </div>
                                            })
                                            .collect_view()
                                    }
                                }
                            }
                        }
                    </section>

                    <section class="bg-gray-800 rounded-xl p-6">
                        <div class="flex items-center justify-between mb-4">
                            <h2 class="text-xl font-semibold">"Today's Reservations"</h2>
                            <A href="/reservations" class="text-sm text-primary-400 hover:text-primary-300">"Manage"</A>
                        </div>
                        {
                            let retry = bookings_for_retry.clone();
                            move || {
                                if let Some(message) = bookings_error.get() {
                                    let retry = retry.clone();
                                    return view! {
                                        <ErrorState message=message on_retry=move |_| retry.refetch() />
                                    }
                                    .into_view();
                                }
                                match bookings_data.get() {
                                    None => view! { <RowsSkeleton /> }.into_view(),
                                    Some(list) if list.is_empty() => {
                                        view! { <EmptyState message="No reservations today" icon="📅" /> }.into_view()
                                    }
                                    Some(list) => view! { <BookingSummary bookings=list /> }.into_view(),
                                }
                            }
                        }
                    </section>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn BookingSummary(mut bookings: Vec<Booking>) -> impl IntoView {
    bookings.sort_by(|a, b| a.slot().cmp(&b.slot()));
    let covers = expected_covers(&bookings);

    view! {
        <p class="text-sm text-gray-400 mb-3">{format!("{} covers expected", covers)}</p>
        {bookings
            .into_iter()
            .map(|b| view! {
                <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                    <div>
                        <span class="font-mono mr-3">{b.time.clone()}</span>
                        <span>{b.customer_name.clone().unwrap_or_else(|| "Guest".to_string())}</span>
                        <span class="text-gray-400 text-sm ml-2">{format!("party of {}", b.party_size)}</span>
                    </div>
                    <BookingStatusBadge status=b.status />
                </div>
            })
            .collect_view()}
    }
}
