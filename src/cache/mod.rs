//! Shared Query Cache
//!
//! One cache for every page. Entries are keyed by [`QueryKey`] and hold raw
//! JSON so one cache can serve every DTO. Identical in-flight fetches share a
//! single future; errors are never stored.

mod key;
mod policy;

pub use key::QueryKey;
pub use policy::{QueryPolicy, Resource};

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Duration, Utc};
use futures_util::future::{FutureExt, LocalBoxFuture, Shared};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::{ApiError, ApiResult};

type Clock = Rc<dyn Fn() -> DateTime<Utc>>;
type InFlight = Shared<LocalBoxFuture<'static, ApiResult<Value>>>;
type Listener = Rc<dyn Fn(u64)>;

struct Entry {
    value: Value,
    fetched_at: DateTime<Utc>,
    /// Cache version the fetch that produced this value started at
    fetched_at_version: u64,
    invalidated: bool,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<QueryKey, Entry>,
    /// Pending fetches and the cache version each one started at
    in_flight: HashMap<QueryKey, (u64, InFlight)>,
    version: u64,
    listeners: Vec<Listener>,
}

/// Cheap-to-clone handle; all clones see the same entries
#[derive(Clone)]
pub struct QueryCache {
    inner: Rc<RefCell<Inner>>,
    clock: Clock,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner::default())),
            clock: Rc::new(clock),
        }
    }

    /// Cached value if younger than `stale_time`, otherwise run `fetcher`.
    ///
    /// A caller arriving while the same key is already being fetched awaits
    /// that fetch instead of starting another, unless an invalidation has
    /// happened since it started.
    pub async fn fetch<F, Fut>(&self, key: &QueryKey, stale_time: Duration, fetcher: F) -> ApiResult<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<Value>> + 'static,
    {
        if let Some(value) = self.fresh(key, stale_time) {
            debug!(key = %key, "cache hit");
            return Ok(value);
        }

        let version = self.version();
        let existing = self.inner.borrow().in_flight.get(key).cloned();
        if let Some((started_at, shared)) = existing {
            if started_at == version {
                debug!(key = %key, "joining in-flight fetch");
                return shared.await;
            }
            debug!(key = %key, "in-flight fetch predates invalidation, refetching");
        }

        let shared = self.spawn_fetch(key.clone(), version, fetcher());
        self.inner
            .borrow_mut()
            .in_flight
            .insert(key.clone(), (version, shared.clone()));
        shared.await
    }

    /// Typed wrapper over [`fetch`](Self::fetch)
    pub async fn fetch_as<T, F, Fut>(&self, key: &QueryKey, stale_time: Duration, fetcher: F) -> ApiResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>> + 'static,
    {
        let value = self
            .fetch(key, stale_time, move || {
                let fut = fetcher();
                async move {
                    let data = fut.await?;
                    serde_json::to_value(&data).map_err(|e| ApiError::Encode(e.to_string()))
                }
            })
            .await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn spawn_fetch<Fut>(&self, key: QueryKey, started_at_version: u64, fut: Fut) -> InFlight
    where
        Fut: Future<Output = ApiResult<Value>> + 'static,
    {
        let weak: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
        let clock = self.clock.clone();
        async move {
            let result = fut.await;
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.borrow_mut();
                // A newer fetch for the same key may have replaced this one
                if matches!(inner.in_flight.get(&key), Some((v, _)) if *v == started_at_version) {
                    inner.in_flight.remove(&key);
                }
                match &result {
                    Ok(value) => {
                        let superseded = inner
                            .entries
                            .get(&key)
                            .is_some_and(|e| !e.invalidated && e.fetched_at_version > started_at_version);
                        if !superseded {
                            // An invalidation raced this fetch; keep the data but refetch next time
                            let invalidated = inner.version != started_at_version;
                            inner.entries.insert(
                                key,
                                Entry {
                                    value: value.clone(),
                                    fetched_at: clock(),
                                    fetched_at_version: started_at_version,
                                    invalidated,
                                },
                            );
                        }
                    }
                    Err(e) => warn!(key = %key, error = %e, "query fetch failed"),
                }
            }
            result
        }
        .boxed_local()
        .shared()
    }

    fn fresh(&self, key: &QueryKey, stale_time: Duration) -> Option<Value> {
        let inner = self.inner.borrow();
        let entry = inner.entries.get(key)?;
        let age = (self.clock)() - entry.fetched_at;
        if entry.invalidated || age >= stale_time {
            None
        } else {
            Some(entry.value.clone())
        }
    }

    /// True when an entry exists and has been invalidated since it was stored
    pub fn is_invalidated(&self, key: &QueryKey) -> bool {
        self.inner
            .borrow()
            .entries
            .get(key)
            .map(|e| e.invalidated)
            .unwrap_or(false)
    }

    /// Last stored value regardless of freshness
    pub fn peek(&self, key: &QueryKey) -> Option<Value> {
        self.inner.borrow().entries.get(key).map(|e| e.value.clone())
    }

    pub fn peek_as<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        self.peek(key).and_then(|v| serde_json::from_value(v).ok())
    }

    /// Replace an entry in place, e.g. after a mutation returned the new record
    pub fn set<T: Serialize>(&self, key: &QueryKey, value: &T) -> ApiResult<()> {
        let value = serde_json::to_value(value).map_err(|e| ApiError::Encode(e.to_string()))?;
        let fetched_at = (self.clock)();
        let mut inner = self.inner.borrow_mut();
        // Counts as newer than any fetch already in flight
        let fetched_at_version = inner.version + 1;
        inner.entries.insert(
            key.clone(),
            Entry {
                value,
                fetched_at,
                fetched_at_version,
                invalidated: false,
            },
        );
        drop(inner);
        self.notify();
        Ok(())
    }

    pub fn invalidate(&self, key: &QueryKey) {
        {
            let mut inner = self.inner.borrow_mut();
            if let Some(entry) = inner.entries.get_mut(key) {
                entry.invalidated = true;
            }
        }
        self.notify();
    }

    /// Mark every entry of `resource` stale, whatever its params
    pub fn invalidate_resource(&self, resource: &str) {
        {
            let mut inner = self.inner.borrow_mut();
            for (key, entry) in inner.entries.iter_mut() {
                if key.resource() == resource {
                    entry.invalidated = true;
                }
            }
        }
        self.notify();
    }

    /// Bumped on every invalidation or `set`
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    pub fn subscribe(&self, listener: impl Fn(u64) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
        self.notify();
    }

    fn notify(&self) {
        let (version, listeners) = {
            let mut inner = self.inner.borrow_mut();
            inner.version += 1;
            (inner.version, inner.listeners.clone())
        };
        for listener in listeners {
            listener(version);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::TransportError;
    use serde_json::json;
    use std::cell::Cell;
    use tokio::sync::oneshot;

    fn manual_clock() -> (Rc<Cell<i64>>, QueryCache) {
        let secs = Rc::new(Cell::new(0i64));
        let handle = secs.clone();
        let base = DateTime::parse_from_rfc3339("2024-03-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let cache = QueryCache::with_clock(move || base + Duration::seconds(handle.get()));
        (secs, cache)
    }

    fn counting_fetcher(
        calls: &Rc<Cell<u32>>,
        value: Value,
    ) -> impl FnOnce() -> LocalBoxFuture<'static, ApiResult<Value>> {
        let calls = calls.clone();
        move || {
            calls.set(calls.get() + 1);
            async move { Ok(value) }.boxed_local()
        }
    }

    #[tokio::test]
    async fn test_fresh_entries_are_reused() {
        let (clock, cache) = manual_clock();
        let key = QueryKey::new("menu").param("account_id", "a1");
        let calls = Rc::new(Cell::new(0));

        cache
            .fetch(&key, Duration::minutes(5), counting_fetcher(&calls, json!(1)))
            .await
            .unwrap();
        clock.set(60);
        let hit = cache
            .fetch(&key, Duration::minutes(5), counting_fetcher(&calls, json!(2)))
            .await
            .unwrap();
        assert_eq!(hit, json!(1));
        assert_eq!(calls.get(), 1);

        clock.set(301);
        let refreshed = cache
            .fetch(&key, Duration::minutes(5), counting_fetcher(&calls, json!(3)))
            .await
            .unwrap();
        assert_eq!(refreshed, json!(3));
        assert_eq!(calls.get(), 2);
    }

    /// Fetcher that stays pending until the returned sender fires
    fn gated_fetcher(
        calls: &Rc<Cell<u32>>,
    ) -> (
        oneshot::Sender<Value>,
        impl FnOnce() -> LocalBoxFuture<'static, ApiResult<Value>>,
    ) {
        let (tx, rx) = oneshot::channel::<Value>();
        let calls = calls.clone();
        let fetcher = move || {
            calls.set(calls.get() + 1);
            async move {
                rx.await.map_err(|e| ApiError::Transport(TransportError::Network(e.to_string())))
            }
            .boxed_local()
        };
        (tx, fetcher)
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_one_request() {
        let cache = QueryCache::new();
        let key = QueryKey::new("orders").param("account_id", "a1");
        let calls = Rc::new(Cell::new(0));
        let (tx, first) = gated_fetcher(&calls);

        let release = async move {
            tokio::task::yield_now().await;
            tx.send(json!(["o1"])).unwrap();
        };
        let (a, b, ()) = futures_util::join!(
            cache.fetch(&key, Duration::zero(), first),
            cache.fetch(&key, Duration::zero(), counting_fetcher(&calls, json!(["o2"]))),
            release,
        );
        assert_eq!(calls.get(), 1);
        assert_eq!(a.unwrap(), json!(["o1"]));
        assert_eq!(b.unwrap(), json!(["o1"]));
    }

    #[tokio::test]
    async fn test_fetch_after_invalidation_does_not_join_older_request() {
        let cache = QueryCache::new();
        let key = QueryKey::new("menu").param("account_id", "a1");
        let calls = Rc::new(Cell::new(0));
        let (tx, before) = gated_fetcher(&calls);

        let stale = cache.fetch(&key, Duration::minutes(5), before);
        let mutate_then_fetch = async {
            tokio::task::yield_now().await;
            cache.invalidate_resource("menu");
            let fresh = cache
                .fetch(&key, Duration::minutes(5), counting_fetcher(&calls, json!("after")))
                .await;
            tx.send(json!("before")).unwrap();
            fresh
        };
        let (stale, fresh) = futures_util::join!(stale, mutate_then_fetch);

        assert_eq!(calls.get(), 2);
        assert_eq!(stale.unwrap(), json!("before"));
        assert_eq!(fresh.unwrap(), json!("after"));
        // The older response landed last but must not overwrite the newer one
        assert_eq!(cache.peek(&key), Some(json!("after")));
        assert!(!cache.is_invalidated(&key));
    }

    #[tokio::test]
    async fn test_set_wins_over_older_in_flight_fetch() {
        let cache = QueryCache::new();
        let key = QueryKey::new("settings").param("account_id", "a1");
        let calls = Rc::new(Cell::new(0));
        let (tx, fetcher) = gated_fetcher(&calls);

        let pending = cache.fetch(&key, Duration::minutes(5), fetcher);
        let write = async {
            tokio::task::yield_now().await;
            cache.set(&key, &json!({"name": "new"})).unwrap();
            tx.send(json!({"name": "old"})).unwrap();
        };
        let (result, ()) = futures_util::join!(pending, write);

        assert_eq!(result.unwrap(), json!({"name": "old"}));
        assert_eq!(cache.peek(&key), Some(json!({"name": "new"})));
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = QueryCache::new();
        let key = QueryKey::new("analytics");
        let result = cache
            .fetch(&key, Duration::minutes(1), || async {
                Err(ApiError::Status {
                    status: 500,
                    message: String::new(),
                })
            })
            .await;
        assert!(result.is_err());
        assert!(cache.peek(&key).is_none());

        let value = cache
            .fetch(&key, Duration::minutes(1), || async { Ok(json!({"ok": true})) })
            .await
            .unwrap();
        assert_eq!(value, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_invalidate_resource() {
        let cache = QueryCache::new();
        let pending = QueryKey::new("orders").param("status", "pending");
        let all = QueryKey::new("orders");
        let menu = QueryKey::new("menu");
        let calls = Rc::new(Cell::new(0));
        for key in [&pending, &all, &menu] {
            cache
                .fetch(key, Duration::minutes(5), counting_fetcher(&calls, json!(0)))
                .await
                .unwrap();
        }
        assert_eq!(calls.get(), 3);

        let seen = Rc::new(Cell::new(0u64));
        let observer = seen.clone();
        cache.subscribe(move |v| observer.set(v));
        let before = cache.version();
        cache.invalidate_resource("orders");
        assert_eq!(cache.version(), before + 1);
        assert!(cache.is_invalidated(&pending));
        assert!(!cache.is_invalidated(&menu));
        assert_eq!(seen.get(), before + 1);

        for key in [&pending, &all, &menu] {
            cache
                .fetch(key, Duration::minutes(5), counting_fetcher(&calls, json!(0)))
                .await
                .unwrap();
        }
        // Only the two order keys refetched
        assert_eq!(calls.get(), 5);
        assert_eq!(cache.peek(&menu), Some(json!(0)));
    }

    #[tokio::test]
    async fn test_typed_helpers_and_set() {
        let cache = QueryCache::new();
        let key = QueryKey::new("order").param("id", "o1");
        let names: Vec<String> = cache
            .fetch_as(&key, Duration::minutes(1), || async {
                Ok(vec!["a".to_string()])
            })
            .await
            .unwrap();
        assert_eq!(names, vec!["a"]);

        cache.set(&key, &vec!["b".to_string()]).unwrap();
        assert_eq!(cache.peek_as::<Vec<String>>(&key), Some(vec!["b".into()]));
        assert_eq!(cache.len(), 1);
    }
}
