//! Cached Query Hook
//!
//! `use_query` turns a `QueryCache` entry into `data / loading / error`
//! signals. It refetches when its key changes, when the entry is
//! invalidated, and on the resource's polling interval until unmount.

use std::future::Future;
use std::rc::Rc;

use dinedesk::cache::{QueryKey, Resource};
use dinedesk::client::ApiResult;
use gloo_timers::callback::Interval;
use leptos::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::Api;
use crate::state::global::GlobalState;

/// Reactive view of one cached query
pub struct QueryState<T: 'static> {
    pub data: RwSignal<Option<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    refetch: Rc<dyn Fn()>,
}

impl<T: 'static> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            loading: self.loading,
            error: self.error,
            refetch: self.refetch.clone(),
        }
    }
}

impl<T: 'static> QueryState<T> {
    /// Bypass the stale window and fetch again
    pub fn refetch(&self) {
        (self.refetch)()
    }
}

/// Subscribe to a cached query.
///
/// `key` is reactive; returning `None` disables the query (e.g. no account
/// selected yet). `fetcher` receives the shared client and should read any
/// signals it needs untracked.
pub fn use_query<T, K, F, Fut>(resource: Resource, key: K, fetcher: F) -> QueryState<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
    K: Fn() -> Option<QueryKey> + 'static,
    F: Fn(Rc<Api>) -> Fut + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let policy = resource.policy(&state.polling);

    let data = create_rw_signal(None::<T>);
    let loading = create_rw_signal(false);
    let error = create_rw_signal(None::<String>);
    let current = store_value(None::<QueryKey>);

    let load: Rc<dyn Fn(QueryKey, bool)> = {
        let cache = state.cache.clone();
        let api = state.api.clone();
        let fetcher = Rc::new(fetcher);
        Rc::new(move |key: QueryKey, force: bool| {
            let cache = cache.clone();
            let api = api.clone();
            let fetcher = fetcher.clone();
            let stale_time = if force {
                chrono::Duration::zero()
            } else {
                policy.stale_time
            };
            if data.get_untracked().is_none() {
                loading.set(true);
            }

            spawn_local(async move {
                let result = cache
                    .fetch_as(&key, stale_time, move || fetcher(api))
                    .await;

                // The key may have moved on while this request was in flight
                let superseded = current
                    .try_with_value(|k| k.as_ref() != Some(&key))
                    .unwrap_or(true);
                if superseded {
                    return;
                }

                match result {
                    Ok(value) => {
                        data.try_set(Some(value));
                        error.try_set(None);
                    }
                    Err(e) => {
                        web_sys::console::error_1(&format!("Query {} failed: {}", key, e).into());
                        error.try_set(Some(e.user_message()));
                    }
                }
                loading.try_set(false);
            });
        })
    };

    // Key changes and invalidations
    {
        let load = load.clone();
        let cache = state.cache.clone();
        let cache_version = state.cache_version;
        create_effect(move |prev: Option<Option<QueryKey>>| {
            let next = key();
            cache_version.get();

            match &next {
                None => {
                    current.set_value(None);
                    data.set(None);
                    loading.set(false);
                }
                Some(k) if prev.as_ref().and_then(|p| p.as_ref()) == Some(k) => {
                    if cache.is_invalidated(k) {
                        load(k.clone(), false);
                    }
                }
                Some(k) => {
                    current.set_value(Some(k.clone()));
                    data.set(cache.peek_as(k));
                    error.set(None);
                    load(k.clone(), false);
                }
            }
            next
        });
    }

    // Polling
    if let Some(every) = policy.poll_interval {
        let load = load.clone();
        let millis = every.num_milliseconds().clamp(1_000, u32::MAX as i64) as u32;
        let interval = Interval::new(millis, move || {
            if let Some(key) = current.get_value() {
                load(key, false);
            }
        });
        on_cleanup(move || drop(interval));
    }

    let refetch: Rc<dyn Fn()> = Rc::new(move || {
        if let Some(key) = current.get_value() {
            load(key, true);
        }
    });

    QueryState {
        data,
        loading,
        error,
        refetch,
    }
}
