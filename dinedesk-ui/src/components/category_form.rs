//! Category Form

use dinedesk::cache::Resource;
use dinedesk::models::{CategoryInput, MenuCategory};
use dinedesk::validation::validate_required;
use leptos::*;

use crate::components::menu_item_form::Field;
use crate::components::modal::Modal;
use crate::state::global::GlobalState;

/// Create or rename a menu category
#[component]
pub fn CategoryForm(
    account_id: String,
    #[prop(optional)]
    existing: Option<MenuCategory>,
    #[prop(into)]
    on_close: Callback<()>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let category_id = existing.as_ref().map(|c| c.id.clone());
    let title = if existing.is_some() { "Edit category" } else { "New category" };
    let name = create_rw_signal(existing.as_ref().map(|c| c.name.clone()).unwrap_or_default());
    let description = create_rw_signal(
        existing
            .as_ref()
            .and_then(|c| c.description.clone())
            .unwrap_or_default(),
    );
    let error = create_rw_signal(None::<String>);
    let (saving, set_saving) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let name = match validate_required("Name", &name.get()) {
            Ok(name) => name,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);

        let input = CategoryInput {
            name,
            description: Some(description.get()).filter(|d| !d.trim().is_empty()),
        };

        set_saving.set(true);
        let state = state.clone();
        let account_id = account_id.clone();
        let category_id = category_id.clone();
        spawn_local(async move {
            let result = match &category_id {
                Some(id) => state.api.update_category(&account_id, id, &input).await,
                None => state.api.create_category(&account_id, &input).await,
            };
            match result {
                Ok(category) => {
                    state.cache.invalidate_resource(Resource::Menu.name());
                    state.show_success(&format!("Saved {}", category.name));
                    on_close.call(());
                }
                Err(e) => state.show_error(&e.user_message()),
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <Modal title=title on_close=on_close>
            <form on:submit=on_submit class="space-y-4">
                <Field label="Name">
                    <input
                        type="text"
                        class="w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </Field>
                <Field label="Description">
                    <input
                        type="text"
                        class="w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    />
                </Field>
                <Show when=move || error.get().is_some()>
                    <p class="text-sm text-red-400">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="flex justify-end">
                    <button
                        type="submit"
                        disabled=move || saving.get()
                        class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 rounded-lg font-medium"
                    >
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
