//! Toast Notifications
//!
//! In-memory queue of transient messages. Display order is insertion order;
//! there is no dedup or priority. Removal timers go through a [`Scheduler`]
//! so the browser build can use real timeouts while tests drive a virtual
//! clock.

mod queue;

pub use queue::{Toast, ToastId, ToastKind, ToastOptions, ToastQueue};

use std::cell::RefCell;
use std::fmt::Display;
use std::future::Future;
use std::rc::Rc;

/// Runs a task after a delay on the UI thread
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

type Listener = Rc<dyn Fn(&[Toast])>;

/// Cheap-to-clone handle to the shared toast queue
#[derive(Clone)]
pub struct Toaster {
    queue: Rc<RefCell<ToastQueue>>,
    scheduler: Rc<dyn Scheduler>,
    listener: Option<Listener>,
}

impl Toaster {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            queue: Rc::new(RefCell::new(ToastQueue::default())),
            scheduler,
            listener: None,
        }
    }

    /// Called with the full list after every change
    pub fn with_listener(mut self, listener: impl Fn(&[Toast]) + 'static) -> Self {
        self.listener = Some(Rc::new(listener));
        self
    }

    pub fn add(&self, message: impl Into<String>, kind: ToastKind, options: ToastOptions) -> ToastId {
        let duration = options.duration_ms.unwrap_or_else(|| kind.default_duration_ms());
        let id = self.queue.borrow_mut().push(message.into(), kind, &options, now_ms());
        self.schedule_removal(id, duration);
        self.notify();
        id
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.add(message, ToastKind::Success, ToastOptions::default())
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.add(message, ToastKind::Error, ToastOptions::default())
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.add(message, ToastKind::Info, ToastOptions::default())
    }

    pub fn warning(&self, message: impl Into<String>) -> ToastId {
        self.add(message, ToastKind::Warning, ToastOptions::default())
    }

    /// Sticky toast that must be resolved through the returned handle
    pub fn loading(&self, message: impl Into<String>) -> LoadingToast {
        let id = self.add(message, ToastKind::Loading, ToastOptions::default());
        LoadingToast {
            id,
            toaster: self.clone(),
        }
    }

    pub fn dismiss(&self, id: ToastId) {
        if self.queue.borrow_mut().remove(id) {
            self.notify();
        }
    }

    pub fn clear(&self) {
        self.queue.borrow_mut().clear();
        self.notify();
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.queue.borrow().toasts().to_vec()
    }

    pub fn contains(&self, id: ToastId) -> bool {
        self.queue.borrow().get(id).is_some()
    }

    /// Track an async operation: loading toast, then success or error.
    /// The original error is handed back to the caller after being reported.
    pub async fn promise<T, E, F>(
        &self,
        operation: F,
        loading: impl Into<String>,
        success: impl Into<String>,
    ) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        let pending = self.loading(loading);
        match operation.await {
            Ok(value) => {
                pending.success(success);
                Ok(value)
            }
            Err(e) => {
                pending.error(e.to_string());
                Err(e)
            }
        }
    }

    fn resolve(&self, id: ToastId, kind: ToastKind, message: String) {
        let replaced = self.queue.borrow_mut().replace(id, kind, message);
        if replaced {
            self.schedule_removal(id, kind.default_duration_ms());
            self.notify();
        }
    }

    fn schedule_removal(&self, id: ToastId, duration_ms: u32) {
        if duration_ms == 0 {
            return;
        }
        let toaster = self.clone();
        self.scheduler.schedule(
            duration_ms,
            Box::new(move || toaster.expire(id)),
        );
    }

    /// Timer callback; a toast that turned back into a loading toast keeps living
    fn expire(&self, id: ToastId) {
        let removed = {
            let mut queue = self.queue.borrow_mut();
            match queue.get(id) {
                Some(t) if t.kind != ToastKind::Loading => queue.remove(id),
                _ => false,
            }
        };
        if removed {
            self.notify();
        }
    }

    fn notify(&self) {
        if let Some(listener) = &self.listener {
            let snapshot = self.queue.borrow().toasts().to_vec();
            listener(&snapshot);
        }
    }
}

/// Handle to a sticky loading toast
pub struct LoadingToast {
    id: ToastId,
    toaster: Toaster,
}

impl LoadingToast {
    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn success(self, message: impl Into<String>) {
        self.toaster.resolve(self.id, ToastKind::Success, message.into());
    }

    pub fn error(self, message: impl Into<String>) {
        self.toaster.resolve(self.id, ToastKind::Error, message.into());
    }

    pub fn dismiss(self) {
        self.toaster.dismiss(self.id);
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Scheduler;
    use std::cell::{Cell, RefCell};

    /// Virtual-time scheduler: tasks run only when `advance` passes their deadline
    #[derive(Default)]
    pub struct ManualScheduler {
        now: Cell<u64>,
        tasks: RefCell<Vec<(u64, Box<dyn FnOnce()>)>>,
    }

    impl ManualScheduler {
        pub fn advance(&self, ms: u64) {
            let target = self.now.get() + ms;
            self.now.set(target);
            loop {
                let due = {
                    let mut tasks = self.tasks.borrow_mut();
                    match tasks.iter().position(|(at, _)| *at <= target) {
                        Some(idx) => tasks.remove(idx).1,
                        None => break,
                    }
                };
                due();
            }
        }

        pub fn pending(&self) -> usize {
            self.tasks.borrow().len()
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            let at = self.now.get() + delay_ms as u64;
            self.tasks.borrow_mut().push((at, task));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ManualScheduler;
    use super::*;
    use std::cell::Cell;

    fn toaster() -> (Toaster, Rc<ManualScheduler>) {
        let scheduler = Rc::new(ManualScheduler::default());
        (Toaster::new(scheduler.clone()), scheduler)
    }

    #[test]
    fn test_toast_expires_after_duration() {
        let (toaster, clock) = toaster();
        let id = toaster.add(
            "Saved",
            ToastKind::Success,
            ToastOptions::default().duration(3000),
        );
        assert!(toaster.contains(id));
        clock.advance(2999);
        assert!(toaster.contains(id));
        clock.advance(1);
        assert!(!toaster.contains(id));
    }

    #[test]
    fn test_default_durations() {
        let (toaster, clock) = toaster();
        let ok = toaster.success("ok");
        let err = toaster.error("boom");
        clock.advance(5000);
        assert!(!toaster.contains(ok));
        assert!(toaster.contains(err));
        clock.advance(2000);
        assert!(!toaster.contains(err));
    }

    #[test]
    fn test_zero_duration_is_sticky() {
        let (toaster, clock) = toaster();
        let id = toaster.add("Pinned", ToastKind::Info, ToastOptions::default().duration(0));
        assert_eq!(clock.pending(), 0);
        clock.advance(60_000);
        assert!(toaster.contains(id));
        toaster.dismiss(id);
        assert!(toaster.toasts().is_empty());
    }

    #[test]
    fn test_ids_increase_and_order_is_insertion() {
        let (toaster, _clock) = toaster();
        let a = toaster.info("a");
        let b = toaster.warning("b");
        let c = toaster.info("a");
        assert!(a < b && b < c);
        let messages: Vec<_> = toaster.toasts().into_iter().map(|t| t.message).collect();
        assert_eq!(messages, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_loading_resolves_in_place() {
        let (toaster, clock) = toaster();
        toaster.info("before");
        let pending = toaster.loading("Saving…");
        let id = pending.id();
        toaster.info("after");
        clock.advance(60_000);
        // info toasts expired, loading stays
        assert_eq!(toaster.toasts().len(), 1);

        pending.success("Saved");
        let toasts = toaster.toasts();
        assert_eq!(toasts[0].id, id);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[0].message, "Saved");
        clock.advance(5000);
        assert!(toaster.toasts().is_empty());
    }

    #[test]
    fn test_listener_sees_changes() {
        let calls = Rc::new(Cell::new(0usize));
        let last_len = Rc::new(Cell::new(0usize));
        let scheduler = Rc::new(ManualScheduler::default());
        let toaster = {
            let calls = calls.clone();
            let last_len = last_len.clone();
            Toaster::new(scheduler.clone()).with_listener(move |list| {
                calls.set(calls.get() + 1);
                last_len.set(list.len());
            })
        };
        toaster.success("one");
        toaster.success("two");
        assert_eq!(last_len.get(), 2);
        scheduler.advance(5000);
        assert_eq!(last_len.get(), 0);
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test]
    async fn test_promise_success() {
        let (toaster, _clock) = toaster();
        let result: Result<u32, String> = toaster
            .promise(async { Ok(7) }, "Loading", "Done")
            .await;
        assert_eq!(result, Ok(7));
        let toasts = toaster.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[0].message, "Done");
    }

    #[tokio::test]
    async fn test_promise_error_is_returned() {
        let (toaster, _clock) = toaster();
        let result: Result<u32, String> = toaster
            .promise(async { Err("network down".to_string()) }, "Loading", "Done")
            .await;
        assert_eq!(result, Err("network down".to_string()));
        let toasts = toaster.toasts();
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].message, "network down");
    }
}
