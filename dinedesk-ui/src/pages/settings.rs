//! Settings Page
//!
//! Business profile, phone number, hours and local preferences.

use chrono::Utc;
use dinedesk::cache::{QueryKey, Resource};
use dinedesk::models::{Account, ProfileUpdate};
use dinedesk::notify::{ChimePlayer, NOTIFICATION_CHIME};
use dinedesk::validation::{validate_required, validate_tax_rate};
use leptos::*;

use crate::api;
use crate::audio::WebAudioChime;
use crate::components::{ErrorState, HoursSettings, PhoneSettings, RowsSkeleton};
use crate::state::global::GlobalState;
use crate::state::use_query;

#[component]
pub fn Settings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let account_id = state.account_id;

    let account = use_query(
        Resource::Settings,
        move || {
            account_id
                .get()
                .map(|id| QueryKey::new(Resource::Settings.name()).param("account_id", id))
        },
        move |api| {
            let id = account_id.get_untracked().unwrap_or_default();
            async move { api.get_account(&id).await }
        },
    );
    let (data, error) = (account.data, account.error);

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"Configure your restaurant and this dashboard"</p>
            </div>

            {move || {
                if let Some(message) = error.get() {
                    let account = account.clone();
                    return view! { <ErrorState message=message on_retry=move |_| account.refetch() /> }.into_view();
                }
                match data.get() {
                    None if account_id.get().is_some() => view! { <RowsSkeleton count=3 /> }.into_view(),
                    None => ().into_view(),
                    Some(acc) => view! {
                        <TrialBanner account=acc.clone() />
                        <ProfileSettings account=acc.clone() />
                        <PhoneSettings account_id=acc.id.clone() current=acc.twilio_phone_number.clone() />
                        <HoursSettings account=acc />
                    }
                    .into_view(),
                }
            }}

            <NotificationSettings />
            <ApiSettings />
        </div>
    }
}

#[component]
fn TrialBanner(account: Account) -> impl IntoView {
    account.trial_days_left(Utc::now()).map(|days| {
        view! {
            <div class="p-4 rounded-xl bg-primary-600/20 border border-primary-600/40 text-sm">
                {format!(
                    "{} plan trial: {} day{} left",
                    account.plan.clone().unwrap_or_else(|| "Starter".to_string()),
                    days,
                    if days == 1 { "" } else { "s" },
                )}
            </div>
        }
    })
}

/// Business profile form
#[component]
fn ProfileSettings(account: Account) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let account_id = account.id.clone();

    let text = |v: &Option<String>| create_rw_signal(v.clone().unwrap_or_default());
    let business_name = create_rw_signal(account.business_name.clone());
    let email = text(&account.email);
    let phone = text(&account.phone);
    let address = text(&account.address);
    let cuisine = text(&account.cuisine);
    let tax_rate = create_rw_signal(account.tax_rate.map(|r| r.to_string()).unwrap_or_default());
    let error = create_rw_signal(None::<String>);
    let saved = create_rw_signal(false);
    let (saving, set_saving) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        saved.set(false);

        let validated = validate_required("Business name", &business_name.get())
            .and_then(|name| validate_tax_rate(&tax_rate.get()).map(|rate| (name, rate)));
        let (name, rate) = match validated {
            Ok(v) => v,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);

        let optional = |s: RwSignal<String>| Some(s.get()).filter(|v| !v.trim().is_empty());
        let update = ProfileUpdate {
            business_name: name,
            email: optional(email),
            phone: optional(phone),
            address: optional(address),
            cuisine: optional(cuisine),
            tax_rate: rate,
        };

        set_saving.set(true);
        let state = state.clone();
        let account_id = account_id.clone();
        spawn_local(async move {
            match state.api.update_profile(&account_id, &update).await {
                Ok(_) => {
                    state.cache.invalidate_resource(Resource::Settings.name());
                    saved.try_set(true);
                    state.show_success("Profile saved");
                }
                Err(e) => state.show_error(&e.user_message()),
            }
            set_saving.try_set(false);
        });
    };

    let input = move |label: &'static str, value: RwSignal<String>| {
        view! {
            <label class="block">
                <span class="block text-sm text-gray-400 mb-1">{label}</span>
                <input
                    type="text"
                    class="w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </label>
        }
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Business Profile"</h2>
            <form on:submit=on_submit class="space-y-4">
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    {input("Business name", business_name)}
                    {input("Email", email)}
                    {input("Phone", phone)}
                    {input("Cuisine", cuisine)}
                    {input("Address", address)}
                    {input("Tax rate (%)", tax_rate)}
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
                    {move || if saving.get() { "Saving..." } else { "Save profile" }}
                </button>
            </form>
        </section>
    }
}

/// New-order chime toggle
#[component]
fn NotificationSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let sound_enabled = state.sound_enabled;

    let test_chime = move |_| {
        let mut chime = WebAudioChime::new();
        if let Err(e) = chime.play(&NOTIFICATION_CHIME) {
            web_sys::console::warn_1(&format!("Chime failed: {}", e).into());
        }
        // Let the tones finish before releasing the context
        let ms = (NOTIFICATION_CHIME.total_duration_s() * 1000.0) as u32 + 200;
        gloo_timers::callback::Timeout::new(ms, move || chime.close()).forget();
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Notifications"</h2>
            <div class="flex items-center justify-between">
                <div>
                    <div class="font-medium">"New order sound"</div>
                    <div class="text-sm text-gray-400">"Chime when a pending order arrives"</div>
                </div>
                <div class="flex items-center gap-3">
                    <button
                        on:click=test_chime
                        class="px-3 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm"
                    >
                        "Test"
                    </button>
                    <button
                        on:click=move |_| state.set_sound_enabled(!sound_enabled.get_untracked())
                        class=move || if sound_enabled.get() {
                            "px-4 py-2 rounded-lg text-sm font-medium bg-primary-600"
                        } else {
                            "px-4 py-2 rounded-lg text-sm font-medium bg-gray-700 text-gray-400"
                        }
                    >
                        {move || if sound_enabled.get() { "On" } else { "Off" }}
                    </button>
                </div>
            </div>
        </section>
    }
}

fn default_api_hint() -> String {
    format!("Default: {}", api::DEFAULT_API_BASE)
}

/// Backend base URL; stored locally and applied on reload
#[component]
fn ApiSettings() -> impl IntoView {
    let (api_url, set_api_url) = create_signal(api::get_api_base());

    let save_url = move |_| {
        api::set_api_base(&api_url.get());
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"API Connection"</h2>
            <label class="block text-sm text-gray-400 mb-2">"DineDesk API URL"</label>
            <div class="flex space-x-2">
                <input
                    type="text"
                    prop:value=move || api_url.get()
                    on:input=move |ev| set_api_url.set(event_target_value(&ev))
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <button
                    on:click=save_url
                    class="px-4 py-3 bg-primary-600 hover:bg-primary-700
                           rounded-lg font-medium transition-colors"
                >
                    "Save & reload"
                </button>
            </div>
            <p class="text-xs text-gray-500 mt-2">{default_api_hint()}</p>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_hint() {
        assert_eq!(default_api_hint(), "Default: http://localhost:3000/api");
    }
}
