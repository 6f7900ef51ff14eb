//! Toast records and the backing list

use serde::{Deserialize, Serialize};

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
    Loading,
}

impl ToastKind {
    /// Errors linger longer; loading toasts never expire on their own
    pub fn default_duration_ms(&self) -> u32 {
        match self {
            ToastKind::Error => 7000,
            ToastKind::Loading => 0,
            _ => 5000,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Error => "✕",
            ToastKind::Info => "ℹ",
            ToastKind::Warning => "⚠",
            ToastKind::Loading => "…",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub title: Option<String>,
    pub kind: ToastKind,
    pub dismissible: bool,
    /// Unix millis
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastOptions {
    pub title: Option<String>,
    /// `None` uses the kind's default; `Some(0)` never expires
    pub duration_ms: Option<u32>,
    pub dismissible: bool,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            title: None,
            duration_ms: None,
            dismissible: true,
        }
    }
}

impl ToastOptions {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn duration(mut self, ms: u32) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    pub fn sticky(mut self) -> Self {
        self.dismissible = false;
        self
    }
}

/// Ordered list with monotonically increasing ids
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: ToastId,
}

impl ToastQueue {
    pub fn push(
        &mut self,
        message: String,
        kind: ToastKind,
        options: &ToastOptions,
        created_at: i64,
    ) -> ToastId {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            message,
            title: options.title.clone(),
            kind,
            dismissible: options.dismissible,
            created_at,
        });
        id
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    /// Swap kind and message keeping id and position
    pub fn replace(&mut self, id: ToastId, kind: ToastKind, message: String) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) => {
                toast.kind = kind;
                toast.message = message;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_and_remove() {
        let mut queue = ToastQueue::default();
        let id = queue.push("Saving".into(), ToastKind::Loading, &ToastOptions::default(), 0);
        assert!(queue.replace(id, ToastKind::Success, "Saved".into()));
        assert_eq!(queue.get(id).unwrap().kind, ToastKind::Success);
        assert!(queue.remove(id));
        assert!(!queue.remove(id));
        assert!(!queue.replace(id, ToastKind::Error, "x".into()));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_options_carry_title() {
        let mut queue = ToastQueue::default();
        let opts = ToastOptions::default().title("Order #12").sticky();
        let id = queue.push("Ready".into(), ToastKind::Info, &opts, 42);
        let toast = queue.get(id).unwrap();
        assert_eq!(toast.title.as_deref(), Some("Order #12"));
        assert!(!toast.dismissible);
        assert_eq!(toast.created_at, 42);
    }
}
