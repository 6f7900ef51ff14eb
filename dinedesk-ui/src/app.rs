//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{Header, Sidebar, ToastStack};
use crate::pages::{
    Admin, Analytics, Dashboard, Login, MenuPage, Orders, Reservations, Settings, Transcripts,
};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <Router>
            <Routes>
                <Route path="/login" view=Login />
                <Route path="/" view=Layout>
                    <Route path="" view=Dashboard />
                    <Route path="orders" view=Orders />
                    <Route path="menu" view=MenuPage />
                    <Route path="analytics" view=Analytics />
                    <Route path="reservations" view=Reservations />
                    <Route path="transcripts" view=Transcripts />
                    <Route path="settings" view=Settings />
                    <Route path="admin" view=Admin />
                    <Route path="*any" view=NotFound />
                </Route>
            </Routes>

            // Toast notifications
            <ToastStack />
        </Router>
    }
}

/// Sidebar and header around the routed page; unauthenticated visitors go
/// to the login screen
#[component]
fn Layout() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let authenticated = state.authenticated;

    view! {
        <Show when=move || authenticated.get() fallback=|| view! { <Redirect path="/login" /> }>
            <div class="min-h-screen bg-gray-900 text-white flex">
                <Sidebar />
                <div class="flex-1 flex flex-col min-w-0">
                    <Header />
                    <main class="flex-1 px-6 py-8 overflow-y-auto">
                        <Outlet />
                    </main>
                </div>
            </div>
        </Show>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
