//! API Access
//!
//! Browser plumbing for the core `ApiClient`: the `gloo-net` transport and
//! localStorage-backed settings.

pub mod storage;
pub mod transport;

pub use storage::{
    get_api_base, load_account_id, load_sound_enabled, save_account_id, save_sound_enabled,
    set_api_base, LocalStorageTokenStore, DEFAULT_API_BASE,
};
pub use transport::GlooTransport;

use dinedesk::client::ApiClient;

/// The client type every page talks to
pub type Api = ApiClient<GlooTransport>;
