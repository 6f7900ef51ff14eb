//! Global Application State
//!
//! Reactive state management using Leptos signals. The non-reactive pieces
//! (API client, query cache, toaster) come from the core crate and are
//! bridged into signals here.

use std::rc::Rc;

use dinedesk::cache::QueryCache;
use dinedesk::client::{ApiClient, Session};
use dinedesk::config::PollingConfig;
use dinedesk::models::UserProfile;
use dinedesk::toast::{Scheduler, Toast, Toaster};
use leptos::*;

use crate::api::{self, Api, GlooTransport, LocalStorageTokenStore};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// REST client shared by every page
    pub api: Rc<Api>,
    /// Cached query results
    pub cache: QueryCache,
    /// Bumped whenever the cache is invalidated or patched
    pub cache_version: RwSignal<u64>,
    pub toaster: Toaster,
    /// Current toasts, in display order
    pub toasts: RwSignal<Vec<Toast>>,
    /// Whether a bearer token is present; cleared on 401
    pub authenticated: RwSignal<bool>,
    pub user: RwSignal<Option<UserProfile>>,
    /// Restaurant account the dashboard shows
    pub account_id: RwSignal<Option<String>>,
    /// New-order chime toggle
    pub sound_enabled: RwSignal<bool>,
    pub sidebar_collapsed: RwSignal<bool>,
    pub polling: PollingConfig,
}

/// Toast timers on `gloo-timers`
struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        gloo_timers::callback::Timeout::new(delay_ms, task).forget();
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let session = Rc::new(Session::new(Box::new(LocalStorageTokenStore)));

    let authenticated = create_rw_signal(session.is_authenticated());
    let user = create_rw_signal(session.user());
    let account_id = create_rw_signal(
        session
            .user()
            .and_then(|u| u.account_id)
            .or_else(api::load_account_id),
    );

    let client = ApiClient::new(api::get_api_base(), GlooTransport, session).on_unauthorized(move || {
        web_sys::console::log_1(&"Session expired, redirecting to login".into());
        authenticated.set(false);
        user.set(None);
    });

    let cache = QueryCache::new();
    let cache_version = create_rw_signal(cache.version());
    cache.subscribe(move |version| cache_version.set(version));

    let toasts = create_rw_signal(Vec::new());
    let toaster = Toaster::new(Rc::new(GlooScheduler))
        .with_listener(move |current: &[Toast]| toasts.set(current.to_vec()));

    let state = GlobalState {
        api: Rc::new(client),
        cache,
        cache_version,
        toaster,
        toasts,
        authenticated,
        user,
        account_id,
        sound_enabled: create_rw_signal(api::load_sound_enabled()),
        sidebar_collapsed: create_rw_signal(false),
        polling: PollingConfig::default(),
    };

    provide_context(state);
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.toaster.success(message);
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.toaster.error(message);
    }

    /// Store a pasted token and load the profile behind it
    pub async fn sign_in(&self, token: &str) -> Result<UserProfile, String> {
        self.api.session().set_token(token.trim());
        match self.api.current_user().await {
            Ok(profile) => {
                if let Some(id) = &profile.account_id {
                    api::save_account_id(id);
                    self.account_id.set(Some(id.clone()));
                }
                self.user.set(Some(profile.clone()));
                self.authenticated.set(true);
                Ok(profile)
            }
            Err(e) => {
                self.api.session().clear();
                Err(e.to_string())
            }
        }
    }

    pub fn sign_out(&self) {
        self.api.session().clear();
        self.cache.clear();
        self.user.set(None);
        self.authenticated.set(false);
    }

    /// Switch the dashboard to another account (admin)
    pub fn select_account(&self, account_id: &str) {
        api::save_account_id(account_id);
        self.account_id.set(Some(account_id.to_string()));
    }

    pub fn set_sound_enabled(&self, enabled: bool) {
        api::save_sound_enabled(enabled);
        self.sound_enabled.set(enabled);
    }

    pub fn is_admin(&self) -> bool {
        self.user.with(|u| u.as_ref().map(|u| u.is_admin()).unwrap_or(false))
    }
}
