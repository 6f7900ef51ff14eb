//! Reservations Page

use chrono::Local;
use dinedesk::cache::{QueryKey, Resource};
use dinedesk::format::format_phone;
use dinedesk::models::{expected_covers, Booking, BookingStatus};
use leptos::*;

use crate::components::{BookingStatusBadge, EmptyState, ErrorState, RowsSkeleton};
use crate::state::global::GlobalState;
use crate::state::use_query;

#[component]
pub fn Reservations() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let account_id = state.account_id;

    let date = create_rw_signal(Local::now().format("%Y-%m-%d").to_string());
    let status = create_rw_signal(None::<BookingStatus>);

    let bookings = use_query(
        Resource::Bookings,
        move || {
            account_id.get().map(|id| {
                QueryKey::new(Resource::Bookings.name())
                    .param("account_id", id)
                    .opt_param("date", Some(date.get()).filter(|d| !d.is_empty()))
                    .opt_param("status", status.get().map(|s| s.as_str()))
            })
        },
        move |api| {
            let id = account_id.get_untracked().unwrap_or_default();
            let date = date.get_untracked();
            let status = status.get_untracked();
            async move {
                let date = Some(date.as_str()).filter(|d| !d.is_empty());
                api.list_bookings(&id, date, status).await
            }
        },
    );
    let (data, error) = (bookings.data, bookings.error);

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Reservations"</h1>
                    <p class="text-gray-400 mt-1">
                        {move || data.with(|b| match b {
                            Some(list) => format!("{} bookings · {} covers expected", list.len(), expected_covers(list)),
                            None => "Table bookings".to_string(),
                        })}
                    </p>
                </div>
            </div>

            <div class="flex flex-wrap items-end gap-4">
                <input
                    type="date"
                    class="bg-gray-800 border border-gray-700 rounded-lg px-3 py-2"
                    prop:value=move || date.get()
                    on:change=move |ev| date.set(event_target_value(&ev))
                />
                <select
                    class="bg-gray-800 border border-gray-700 rounded-lg px-3 py-2"
                    on:change=move |ev| status.set(BookingStatus::parse(&event_target_value(&ev)))
                >
                    <option value="">"All statuses"</option>
                    {BookingStatus::ALL
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                        .collect_view()}
                </select>
            </div>

            <section class="bg-gray-800 rounded-xl p-6">
                {move || {
                    if let Some(message) = error.get() {
                        let bookings = bookings.clone();
                        return view! { <ErrorState message=message on_retry=move |_| bookings.refetch() /> }.into_view();
                    }
                    match data.get() {
                        None => view! { <RowsSkeleton count=4 /> }.into_view(),
                        Some(list) if list.is_empty() => {
                            view! { <EmptyState message="No reservations for this day" icon="📅" /> }.into_view()
                        }
                        Some(mut list) => {
                            list.sort_by(|a, b| a.slot().cmp(&b.slot()));
                            list.into_iter().map(|b| view! { <BookingRow booking=b /> }).collect_view()
                        }
                    }
                }}
            </section>
        </div>
    }
}

#[component]
fn BookingRow(booking: Booking) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (saving, set_saving) = create_signal(false);
    let booking_id = store_value(booking.id.clone());

    let change_status = move |next: BookingStatus| {
        let state = state.clone();
        set_saving.set(true);
        let id = booking_id.get_value();
        spawn_local(async move {
            match state.api.update_booking_status(&id, next).await {
                Ok(_) => {
                    state.cache.invalidate_resource(Resource::Bookings.name());
                    state.show_success(&format!("Booking {}", next.label().to_lowercase()));
                }
                Err(e) => state.show_error(&e.user_message()),
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <div class="flex flex-wrap items-center justify-between gap-3 py-3 border-b border-gray-700 last:border-0">
            <div>
                <div class="font-medium">
                    <span class="font-mono mr-3">{booking.time.clone()}</span>
                    {booking.customer_name.clone().unwrap_or_else(|| "Guest".to_string())}
                    <span class="text-gray-400 text-sm ml-2">{format!("party of {}", booking.party_size)}</span>
                </div>
                <div class="text-sm text-gray-400">
                    {booking.customer_phone.as_deref().map(format_phone).unwrap_or_default()}
                    {booking.table_id.clone().map(|t| format!(" · table {}", t))}
                </div>
                {booking.special_requests.clone().map(|r| view! {
                    <div class="text-sm text-yellow-300/80">{r}</div>
                })}
            </div>
            <div class="flex items-center gap-2">
                <BookingStatusBadge status=booking.status />
                {booking
                    .status
                    .next_actions()
                    .iter()
                    .map(|&next| {
                        let change_status = change_status.clone();
                        view! {
                            <button
                                disabled=move || saving.get()
                                on:click=move |_| change_status(next)
                                class="px-3 py-1 text-sm bg-gray-700 hover:bg-gray-600 rounded disabled:opacity-50"
                            >
                                {next.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
