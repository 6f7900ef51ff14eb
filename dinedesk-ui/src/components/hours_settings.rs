//! Operating Hours Settings

use dinedesk::cache::Resource;
use dinedesk::models::{Account, OperatingDays, OperatingHoursUpdate, WEEKDAY_LABELS};
use dinedesk::validation::validate_operating_hours;
use leptos::*;

use crate::state::global::GlobalState;

/// Opening/closing time plus the days of the week the restaurant is open
#[component]
pub fn HoursSettings(account: Account) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let account_id = account.id.clone();
    let opening = create_rw_signal(account.opening_time.clone().unwrap_or_default());
    let closing = create_rw_signal(account.closing_time.clone().unwrap_or_default());
    let days = create_rw_signal(account.operating_days);
    let error = create_rw_signal(None::<String>);
    let saved = create_rw_signal(false);
    let (saving, set_saving) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        saved.set(false);

        let (opening_time, closing_time) = match validate_operating_hours(&opening.get(), &closing.get()) {
            Ok(hours) => hours,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);

        let update = OperatingHoursUpdate {
            opening_time,
            closing_time,
            operating_days: days.get(),
        };

        set_saving.set(true);
        let state = state.clone();
        let account_id = account_id.clone();
        spawn_local(async move {
            match state.api.update_operating_hours(&account_id, &update).await {
                Ok(_) => {
                    state.cache.invalidate_resource(Resource::Settings.name());
                    saved.try_set(true);
                    state.show_success("Hours updated");
                }
                Err(e) => state.show_error(&e.user_message()),
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-1">"Operating Hours"</h2>
            <p class="text-sm text-gray-400 mb-4">
                {move || days.with(OperatingDays::describe)}
            </p>
            <form on:submit=on_submit class="space-y-4">
                <div class="grid grid-cols-2 gap-4">
                    <label class="block">
                        <span class="block text-sm text-gray-400 mb-1">"Opens"</span>
                        <input
                            type="text"
                            placeholder="09:00"
                            class="w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2"
                            prop:value=move || opening.get()
                            on:input=move |ev| opening.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="block">
                        <span class="block text-sm text-gray-400 mb-1">"Closes"</span>
                        <input
                            type="text"
                            placeholder="22:00"
                            class="w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2"
                            prop:value=move || closing.get()
                            on:input=move |ev| closing.set(event_target_value(&ev))
                        />
                    </label>
                </div>

                <div class="flex flex-wrap gap-2">
                    {WEEKDAY_LABELS
                        .iter()
                        .enumerate()
                        .map(|(day, &label)| {
                            let day = day as u8;
                            view! {
                                <button
                                    type="button"
                                    on:click=move |_| days.update(|d| d.toggle(day))
                                    class=move || if days.with(|d| d.contains(day)) {
                                        "w-12 py-2 rounded-lg text-sm bg-primary-600"
                                    } else {
                                        "w-12 py-2 rounded-lg text-sm bg-gray-700 text-gray-400"
                                    }
                                >
                                    {label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <Show when=move || error.get().is_some()>
                    <p class="text-sm text-red-400">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || saved.get()>
                    <p class="text-sm text-green-400">"Saved"</p>
                </Show>

                <button
                    type="submit"
                    disabled=move || saving.get()
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 rounded-lg font-medium"
                >
                    "Save hours"
                </button>
            </form>
        </section>
    }
}
