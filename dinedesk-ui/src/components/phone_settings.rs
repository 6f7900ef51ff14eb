//! Phone Number Settings
//!
//! The number customers call or text to reach the ordering assistant.

use dinedesk::cache::Resource;
use dinedesk::format::format_phone;
use dinedesk::models::PhoneNumberUpdate;
use dinedesk::validation::validate_phone_number;
use leptos::*;

use crate::state::global::GlobalState;

#[component]
pub fn PhoneSettings(account_id: String, current: Option<String>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let number = create_rw_signal(current.clone().unwrap_or_default());
    let error = create_rw_signal(None::<String>);
    let saved = create_rw_signal(false);
    let (saving, set_saving) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        saved.set(false);

        let phone = match validate_phone_number(&number.get()) {
            Ok(phone) => phone,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);

        set_saving.set(true);
        let state = state.clone();
        let account_id = account_id.clone();
        spawn_local(async move {
            let update = PhoneNumberUpdate {
                twilio_phone_number: phone,
            };
            match state.api.update_phone_number(&account_id, &update).await {
                Ok(_) => {
                    state.cache.invalidate_resource(Resource::Settings.name());
                    saved.try_set(true);
                    state.show_success("Phone number updated");
                }
                Err(e) => state.show_error(&e.user_message()),
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-1">"Phone Number"</h2>
            <p class="text-sm text-gray-400 mb-4">
                {match current.as_deref() {
                    Some(n) if !n.is_empty() => format!("Currently {}", format_phone(n)),
                    _ => "No number assigned".to_string(),
                }}
            </p>
            <form on:submit=on_submit class="flex flex-wrap items-start gap-3">
                <div class="flex-1 min-w-[14rem]">
                    <input
                        type="tel"
                        placeholder="+15551234567"
                        class="w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2"
                        prop:value=move || number.get()
                        on:input=move |ev| number.set(event_target_value(&ev))
                    />
                    <Show when=move || error.get().is_some()>
                        <p class="text-sm text-red-400 mt-1">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <Show when=move || saved.get()>
                        <p class="text-sm text-green-400 mt-1">"Saved"</p>
                    </Show>
                </div>
                <button
                    type="submit"
                    disabled=move || saving.get()
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 rounded-lg font-medium"
                >
                    "Update"
                </button>
            </form>
        </section>
    }
}
