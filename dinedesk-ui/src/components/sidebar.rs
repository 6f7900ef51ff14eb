//! Sidebar Navigation
//!
//! Collapsible left-hand navigation with route-based highlighting.

use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// Navigation entries: (href, icon, label)
const NAV_ITEMS: &[(&str, &str, &str)] = &[
    ("/", "🏠", "Dashboard"),
    ("/orders", "🧾", "Orders"),
    ("/menu", "🍽", "Menu"),
    ("/reservations", "📅", "Reservations"),
    ("/transcripts", "💬", "Transcripts"),
    ("/analytics", "📈", "Analytics"),
    ("/settings", "⚙", "Settings"),
];

/// `/` only matches itself; other entries also match their sub-paths
pub fn is_active_route(pathname: &str, href: &str) -> bool {
    if href == "/" {
        return pathname == "/" || pathname.is_empty();
    }
    pathname == href
        || pathname
            .strip_prefix(href)
            .map(|rest| rest.starts_with('/'))
            .unwrap_or(false)
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let collapsed = state.sidebar_collapsed;
    let show_admin = {
        let state = state.clone();
        move || state.is_admin()
    };

    view! {
        <aside class=move || {
            let width = if collapsed.get() { "w-16" } else { "w-60" };
            format!("{} bg-gray-800 border-r border-gray-700 flex flex-col transition-all duration-200", width)
        }>
            // Brand and collapse toggle
            <div class="flex items-center justify-between h-16 px-4 border-b border-gray-700">
                <Show when=move || !collapsed.get()>
                    <A href="/" class="flex items-center space-x-2">
                        <span class="text-2xl">"🍴"</span>
                        <span class="text-lg font-bold text-white">"DineDesk"</span>
                    </A>
                </Show>
                <button
                    on:click=move |_| collapsed.update(|c| *c = !*c)
                    class="p-2 rounded-lg text-gray-400 hover:text-white hover:bg-gray-700"
                    title="Toggle sidebar"
                >
                    {move || if collapsed.get() { "»" } else { "«" }}
                </button>
            </div>

            <nav class="flex-1 py-4 space-y-1 px-2">
                {NAV_ITEMS
                    .iter()
                    .map(|&(href, icon, label)| view! { <NavLink href=href icon=icon label=label /> })
                    .collect_view()}

                <Show when=show_admin>
                    <NavLink href="/admin" icon="🛡" label="Admin" />
                </Show>
            </nav>
        </aside>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    icon: &'static str,
    label: &'static str,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let collapsed = state.sidebar_collapsed;
    let location = use_location();
    let active = move || location.pathname.with(|path| is_active_route(path, href));

    view! {
        <A
            href=href
            class=move || {
                let base = "flex items-center space-x-3 px-3 py-2 rounded-lg transition-colors";
                if active() {
                    format!("{} bg-gray-700 text-white", base)
                } else {
                    format!("{} text-gray-300 hover:text-white hover:bg-gray-700", base)
                }
            }
        >
            <span class="text-lg w-6 text-center">{icon}</span>
            <Show when=move || !collapsed.get()>
                <span>{label}</span>
            </Show>
        </A>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_matches_exactly() {
        assert!(is_active_route("/", "/"));
        assert!(!is_active_route("/orders", "/"));
    }

    #[test]
    fn test_nested_paths() {
        assert!(is_active_route("/orders", "/orders"));
        assert!(is_active_route("/orders/abc", "/orders"));
        assert!(!is_active_route("/ordersx", "/orders"));
        assert!(!is_active_route("/menu", "/orders"));
    }
}
