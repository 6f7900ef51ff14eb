//! localStorage Persistence
//!
//! API base URL, session token, cached user, selected account and the
//! notification-sound preference all live in the browser's localStorage.

use dinedesk::client::{TokenStore, TOKEN_KEY, USER_KEY};
use dinedesk::models::UserProfile;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

const API_URL_KEY: &str = "dinedesk_api_url";
const ACCOUNT_KEY: &str = "dinedesk_account_id";
const SOUND_KEY: &str = "dinedesk_sound_enabled";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn get_item(key: &str) -> Option<String> {
    storage()?.get_item(key).ok().flatten()
}

fn set_item(key: &str, value: &str) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(key, value);
    }
}

fn remove_item(key: &str) {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(key);
    }
}

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = get_item(API_URL_KEY).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    set_item(API_URL_KEY, url.trim());
}

pub fn load_account_id() -> Option<String> {
    get_item(ACCOUNT_KEY).filter(|id| !id.is_empty())
}

pub fn save_account_id(account_id: &str) {
    set_item(ACCOUNT_KEY, account_id);
}

/// Sound is on unless explicitly turned off
pub fn load_sound_enabled() -> bool {
    get_item(SOUND_KEY).as_deref() != Some("false")
}

pub fn save_sound_enabled(enabled: bool) {
    set_item(SOUND_KEY, if enabled { "true" } else { "false" });
}

/// Session persistence under the `auth_token` / `user` keys
#[derive(Default)]
pub struct LocalStorageTokenStore;

impl TokenStore for LocalStorageTokenStore {
    fn load_token(&self) -> Option<String> {
        get_item(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    fn save_token(&self, token: &str) {
        set_item(TOKEN_KEY, token);
    }

    fn load_user(&self) -> Option<UserProfile> {
        get_item(USER_KEY).and_then(|json| serde_json::from_str(&json).ok())
    }

    fn save_user(&self, user: &UserProfile) {
        if let Ok(json) = serde_json::to_string(user) {
            set_item(USER_KEY, &json);
        }
    }

    fn clear(&self) {
        remove_item(TOKEN_KEY);
        remove_item(USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn api_base_trailing_slash_trimmed() {
        set_api_base("https://api.example.test/v1/ ");
        assert_eq!(get_api_base(), "https://api.example.test/v1");
        remove_item(API_URL_KEY);
        assert_eq!(get_api_base(), DEFAULT_API_BASE);
    }

    #[wasm_bindgen_test]
    fn sound_defaults_on() {
        remove_item(SOUND_KEY);
        assert!(load_sound_enabled());
        save_sound_enabled(false);
        assert!(!load_sound_enabled());
        remove_item(SOUND_KEY);
    }

    #[wasm_bindgen_test]
    fn token_store_round_trip_and_clear() {
        let store = LocalStorageTokenStore;
        store.save_token("tok_1");
        assert_eq!(store.load_token().as_deref(), Some("tok_1"));
        store.clear();
        assert_eq!(store.load_token(), None);
        assert_eq!(store.load_user(), None);
    }
}
