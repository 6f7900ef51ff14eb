//! Menu Page
//!
//! Categories and items with availability toggles, editors and delete.

use dinedesk::cache::{QueryKey, Resource};
use dinedesk::format::format_cents;
use dinedesk::models::{Menu, MenuCategory, MenuItem};
use leptos::*;

use crate::components::{
    CategoryForm, Collapsible, DeleteConfirmButton, EmptyState, ErrorState, RowsSkeleton,
    MenuItemForm,
};
use crate::state::global::GlobalState;
use crate::state::use_query;

/// Which editor modal is open
#[derive(Clone, PartialEq)]
enum Editor {
    NewCategory,
    EditCategory(MenuCategory),
    NewItem(String),
    EditItem(MenuItem),
}

#[component]
pub fn MenuPage() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let account_id = state.account_id;

    let menu = use_query(
        Resource::Menu,
        move || {
            account_id
                .get()
                .map(|id| QueryKey::new(Resource::Menu.name()).param("account_id", id))
        },
        move |api| {
            let id = account_id.get_untracked().unwrap_or_default();
            async move { api.get_menu(&id).await }
        },
    );
    let (data, error) = (menu.data, menu.error);
    let search = create_rw_signal(String::new());
    let editor = create_rw_signal(None::<Editor>);

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Menu"</h1>
                    <p class="text-gray-400 mt-1">
                        {move || data.with(|m| match m {
                            Some(m) => format!("{} items · {} unavailable", m.item_count(), m.unavailable_count()),
                            None => "What the assistant can sell".to_string(),
                        })}
                    </p>
                </div>
                <button
                    on:click=move |_| editor.set(Some(Editor::NewCategory))
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium"
                >
                    "+ Category"
                </button>
            </div>

            <input
                type="search"
                placeholder="Search items"
                class="w-full bg-gray-800 border border-gray-700 rounded-lg px-3 py-2"
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />

            {move || {
                if let Some(message) = error.get() {
                    let menu = menu.clone();
                    return view! { <ErrorState message=message on_retry=move |_| menu.refetch() /> }.into_view();
                }
                match data.get() {
                    None => view! { <RowsSkeleton count=4 /> }.into_view(),
                    Some(m) if m.categories.is_empty() => {
                        view! { <EmptyState message="No categories yet" icon="🍽" /> }.into_view()
                    }
                    Some(m) => m
                        .categories
                        .into_iter()
                        .map(|category| view! { <CategoryPanel category=category search=search editor=editor /> })
                        .collect_view(),
                }
            }}

            {move || {
                let id = account_id.get()?;
                let categories = data.with(|m| m.as_ref().map(|m: &Menu| m.categories.clone()).unwrap_or_default());
                let close = move |_: ()| editor.set(None);
                Some(match editor.get()? {
                    Editor::NewCategory => view! { <CategoryForm account_id=id on_close=close /> }.into_view(),
                    Editor::EditCategory(c) => {
                        view! { <CategoryForm account_id=id existing=c on_close=close /> }.into_view()
                    }
                    Editor::NewItem(category_id) => view! {
                        <MenuItemForm account_id=id categories=categories category_id=category_id on_close=close />
                    }
                    .into_view(),
                    Editor::EditItem(item) => view! {
                        <MenuItemForm account_id=id categories=categories existing=item on_close=close />
                    }
                    .into_view(),
                })
            }}
        </div>
    }
}

#[component]
fn CategoryPanel(
    category: MenuCategory,
    search: RwSignal<String>,
    editor: RwSignal<Option<Editor>>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let title = format!("{} ({})", category.name, category.items.len());
    let category_id = store_value(category.id.clone());
    let for_edit = store_value(category.clone());

    let delete_category = Callback::new(move |_: ()| {
        let state = state.clone();
        let Some(account_id) = state.account_id.get_untracked() else {
            return;
        };
        let category_id = category_id.get_value();
        spawn_local(async move {
            match state.api.delete_category(&account_id, &category_id).await {
                Ok(()) => {
                    state.cache.invalidate_resource(Resource::Menu.name());
                    state.show_success("Category deleted");
                }
                Err(e) => state.show_error(&e.user_message()),
            }
        });
    });

    view! {
        <Collapsible title=title>
            <div class="flex items-center gap-3 mb-3 text-sm">
                <button
                    on:click=move |_| editor.set(Some(Editor::NewItem(category_id.get_value())))
                    class="text-primary-400 hover:text-primary-300"
                >
                    "+ Item"
                </button>
                <button
                    on:click=move |_| editor.set(Some(Editor::EditCategory(for_edit.get_value())))
                    class="text-gray-300 hover:text-white"
                >
                    "Rename"
                </button>
                <DeleteConfirmButton on_confirm=delete_category label="Delete category" />
            </div>
            {
                let category = category.clone();
                move || {
                    let query = search.get();
                    let items = category.search(&query);
                    if items.is_empty() {
                        return view! { <p class="text-sm text-gray-500">"No items"</p> }.into_view();
                    }
                    items
                        .into_iter()
                        .cloned()
                        .map(|item| view! { <ItemRow item=item editor=editor /> })
                        .collect_view()
                }
            }
        </Collapsible>
    }
}

#[component]
fn ItemRow(item: MenuItem, editor: RwSignal<Option<Editor>>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let item_id = item.id.clone();
    let available = item.is_available;
    let for_edit = item.clone();

    let toggle = {
        let state = state.clone();
        let item_id = item_id.clone();
        move |_: web_sys::Event| {
            let state = state.clone();
            let item_id = item_id.clone();
            let Some(account_id) = state.account_id.get_untracked() else {
                return;
            };
            spawn_local(async move {
                match state.api.set_item_availability(&account_id, &item_id, !available).await {
                    Ok(_) => state.cache.invalidate_resource(Resource::Menu.name()),
                    Err(e) => state.show_error(&e.user_message()),
                }
            });
        }
    };

    let delete = move |_: ()| {
        let state = state.clone();
        let item_id = item_id.clone();
        let Some(account_id) = state.account_id.get_untracked() else {
            return;
        };
        spawn_local(async move {
            let deleted = state
                .toaster
                .promise(
                    state.api.delete_menu_item(&account_id, &item_id),
                    "Deleting item...",
                    "Item deleted",
                )
                .await;
            if deleted.is_ok() {
                state.cache.invalidate_resource(Resource::Menu.name());
            }
        });
    };

    view! {
        <div class="flex items-center justify-between py-3 border-b border-gray-700 last:border-0">
            <div class=if available { "" } else { "opacity-50" }>
                <div class="font-medium">
                    {item.name.clone()}
                    <span class="ml-2 text-gray-400">{format_cents(item.price)}</span>
                </div>
                {item.description.clone().map(|d| view! { <div class="text-sm text-gray-400">{d}</div> })}
                <div class="flex flex-wrap gap-1 mt-1">
                    {item
                        .dietary_tags
                        .iter()
                        .map(|t| view! { <span class="px-2 py-0.5 rounded-full bg-gray-700 text-xs">{t.clone()}</span> })
                        .collect_view()}
                </div>
            </div>
            <div class="flex items-center gap-3 text-sm">
                <label class="flex items-center gap-1 cursor-pointer">
                    <input type="checkbox" prop:checked=available on:change=toggle />
                    "Available"
                </label>
                <button
                    on:click=move |_| editor.set(Some(Editor::EditItem(for_edit.clone())))
                    class="text-gray-300 hover:text-white"
                >
                    "Edit"
                </button>
                <DeleteConfirmButton on_confirm=delete />
            </div>
        </div>
    }
}
