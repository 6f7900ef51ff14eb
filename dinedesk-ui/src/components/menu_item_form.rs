//! Menu Item Form
//!
//! Create or edit a menu item. Name and price are validated before anything
//! is sent.

use dinedesk::cache::Resource;
use dinedesk::models::{MenuCategory, MenuItem, MenuItemInput, DIETARY_TAGS};
use dinedesk::validation::validate_menu_item;
use leptos::*;

use crate::components::modal::Modal;
use crate::state::global::GlobalState;

#[component]
pub fn MenuItemForm(
    account_id: String,
    categories: Vec<MenuCategory>,
    /// Item being edited; `None` creates a new one
    #[prop(optional)]
    existing: Option<MenuItem>,
    /// Category preselected for new items
    #[prop(optional)]
    category_id: Option<String>,
    #[prop(into)]
    on_close: Callback<()>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let item_id = existing.as_ref().map(|i| i.id.clone());
    let title = if existing.is_some() { "Edit item" } else { "New item" };

    let initial_category = existing
        .as_ref()
        .and_then(|i| i.category_id.clone())
        .or(category_id)
        .or_else(|| categories.first().map(|c| c.id.clone()))
        .unwrap_or_default();

    let name = create_rw_signal(existing.as_ref().map(|i| i.name.clone()).unwrap_or_default());
    let description = create_rw_signal(
        existing
            .as_ref()
            .and_then(|i| i.description.clone())
            .unwrap_or_default(),
    );
    let price = create_rw_signal(
        existing
            .as_ref()
            .map(|i| format!("{:.2}", i.price as f64 / 100.0))
            .unwrap_or_default(),
    );
    let category = create_rw_signal(initial_category);
    let available = create_rw_signal(existing.as_ref().map(|i| i.is_available).unwrap_or(true));
    let tags = create_rw_signal(
        existing
            .as_ref()
            .map(|i| i.dietary_tags.clone())
            .unwrap_or_default(),
    );
    let error = create_rw_signal(None::<String>);
    let (saving, set_saving) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let (name, price) = match validate_menu_item(&name.get(), &price.get()) {
            Ok(valid) => valid,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        if category.get().is_empty() {
            error.set(Some("Category is required".to_string()));
            return;
        }
        error.set(None);

        let input = MenuItemInput {
            category_id: category.get(),
            name,
            description: Some(description.get()).filter(|d| !d.trim().is_empty()),
            price,
            is_available: available.get(),
            dietary_tags: tags.get(),
        };

        set_saving.set(true);
        let state = state.clone();
        let account_id = account_id.clone();
        let item_id = item_id.clone();
        spawn_local(async move {
            let result = match &item_id {
                Some(id) => state.api.update_menu_item(&account_id, id, &input).await,
                None => state.api.create_menu_item(&account_id, &input).await,
            };
            match result {
                Ok(item) => {
                    state.cache.invalidate_resource(Resource::Menu.name());
                    state.show_success(&format!("Saved {}", item.name));
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
                    <textarea
                        rows="2"
                        class="w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    />
                </Field>
                <div class="grid grid-cols-2 gap-4">
                    <Field label="Price">
                        <input
                            type="text"
                            inputmode="decimal"
                            placeholder="12.50"
                            class="w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2"
                            prop:value=move || price.get()
                            on:input=move |ev| price.set(event_target_value(&ev))
                        />
                    </Field>
                    <Field label="Category">
                        <select
                            class="w-full bg-gray-700 border border-gray-600 rounded-lg px-3 py-2"
                            on:change=move |ev| category.set(event_target_value(&ev))
                        >
                            {categories
                                .into_iter()
                                .map(|c| {
                                    let id = c.id.clone();
                                    view! {
                                        <option value=c.id selected=move || category.get() == id>{c.name}</option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </Field>
                </div>

                <div>
                    <div class="text-sm text-gray-400 mb-2">"Dietary tags"</div>
                    <div class="flex flex-wrap gap-2">
                        {DIETARY_TAGS
                            .iter()
                            .map(|&tag| {
                                let active = move || tags.with(|t| t.iter().any(|x| x == tag));
                                view! {
                                    <button
                                        type="button"
                                        on:click=move |_| tags.update(|t| {
                                            if let Some(pos) = t.iter().position(|x| x == tag) {
                                                t.remove(pos);
                                            } else {
                                                t.push(tag.to_string());
                                            }
                                        })
                                        class=move || if active() {
                                            "px-3 py-1 rounded-full text-xs bg-primary-600"
                                        } else {
                                            "px-3 py-1 rounded-full text-xs bg-gray-700 text-gray-300"
                                        }
                                    >
                                        {tag}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>

                <label class="flex items-center gap-2 text-sm">
                    <input
                        type="checkbox"
                        prop:checked=move || available.get()
                        on:change=move |ev| available.set(event_target_checked(&ev))
                    />
                    "Available"
                </label>

                <Show when=move || error.get().is_some()>
                    <p class="text-sm text-red-400">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <div class="flex justify-end gap-2">
                    <button
                        type="button"
                        on:click=move |_| on_close.call(())
                        class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg"
                    >
                        "Cancel"
                    </button>
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

/// Labelled form row
#[component]
pub fn Field(label: &'static str, children: Children) -> impl IntoView {
    view! {
        <label class="block">
            <span class="block text-sm text-gray-400 mb-1">{label}</span>
            {children()}
        </label>
    }
}
