//! Seen-set bookkeeping for order alerts

use std::collections::HashSet;

use crate::models::{Order, OrderStatus};

/// Outcome of one poll check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertDecision {
    /// First poll of the session; ids recorded, no sound
    Suppressed,
    /// Nothing new and pending
    Quiet,
    /// One chime for the whole batch of new pending orders
    Chime { new_order_ids: Vec<String> },
}

impl AlertDecision {
    pub fn should_chime(&self) -> bool {
        matches!(self, AlertDecision::Chime { .. })
    }
}

/// Remembers which order ids have been observed during this view's lifetime
#[derive(Debug, Default)]
pub struct OrderAlertTracker {
    seen: HashSet<String>,
    first_load_done: bool,
}

impl OrderAlertTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare the latest order list against the seen-set.
    ///
    /// Every incoming id is recorded regardless of status, so an order first
    /// observed in a non-pending state never chimes later.
    pub fn check(&mut self, orders: &[Order]) -> AlertDecision {
        if !self.first_load_done {
            self.first_load_done = true;
            self.record(orders);
            return AlertDecision::Suppressed;
        }

        let new_order_ids: Vec<String> = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending && !self.seen.contains(&o.id))
            .map(|o| o.id.clone())
            .collect();

        self.record(orders);

        if new_order_ids.is_empty() {
            AlertDecision::Quiet
        } else {
            AlertDecision::Chime { new_order_ids }
        }
    }

    fn record(&mut self, orders: &[Order]) {
        self.seen.extend(orders.iter().map(|o| o.id.clone()));
    }

    pub fn has_seen(&self, order_id: &str) -> bool {
        self.seen.contains(order_id)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn is_first_load(&self) -> bool {
        !self.first_load_done
    }

    /// Forget everything, as on a full reload
    pub fn reset(&mut self) {
        self.seen.clear();
        self.first_load_done = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::fixtures::order;

    #[test]
    fn test_first_load_records_all_without_chime() {
        let mut tracker = OrderAlertTracker::new();
        let orders = vec![
            order("1", OrderStatus::Pending),
            order("2", OrderStatus::Completed),
            order("3", OrderStatus::Cancelled),
        ];
        assert_eq!(tracker.check(&orders), AlertDecision::Suppressed);
        assert_eq!(tracker.seen_count(), 3);
        assert!(!tracker.is_first_load());
    }

    #[test]
    fn test_new_pending_order_chimes_once() {
        let mut tracker = OrderAlertTracker::new();
        tracker.check(&[order("1", OrderStatus::Ready)]);

        let orders = vec![order("1", OrderStatus::Ready), order("2", OrderStatus::Pending)];
        assert_eq!(
            tracker.check(&orders),
            AlertDecision::Chime {
                new_order_ids: vec!["2".to_string()]
            }
        );
        assert!(tracker.has_seen("2"));
    }

    #[test]
    fn test_identical_list_does_not_realert() {
        let mut tracker = OrderAlertTracker::new();
        tracker.check(&[]);
        let orders = vec![order("9", OrderStatus::Pending)];
        assert!(tracker.check(&orders).should_chime());
        assert_eq!(tracker.check(&orders), AlertDecision::Quiet);
    }

    #[test]
    fn test_non_pending_new_orders_are_seen_but_silent() {
        let mut tracker = OrderAlertTracker::new();
        tracker.check(&[]);
        let orders = vec![
            order("5", OrderStatus::Preparing),
            order("6", OrderStatus::Completed),
        ];
        assert_eq!(tracker.check(&orders), AlertDecision::Quiet);
        assert!(tracker.has_seen("5"));
        assert!(tracker.has_seen("6"));
    }

    #[test]
    fn test_seen_order_reverting_to_pending_stays_quiet() {
        let mut tracker = OrderAlertTracker::new();
        tracker.check(&[]);
        tracker.check(&[order("7", OrderStatus::Preparing)]);
        assert_eq!(
            tracker.check(&[order("7", OrderStatus::Pending)]),
            AlertDecision::Quiet
        );
    }

    #[test]
    fn test_batch_reports_every_new_id() {
        let mut tracker = OrderAlertTracker::new();
        tracker.check(&[order("1", OrderStatus::Pending)]);
        let decision = tracker.check(&[
            order("1", OrderStatus::Pending),
            order("2", OrderStatus::Pending),
            order("3", OrderStatus::Pending),
        ]);
        assert_eq!(
            decision,
            AlertDecision::Chime {
                new_order_ids: vec!["2".to_string(), "3".to_string()]
            }
        );
    }

    #[test]
    fn test_reset_restores_first_load() {
        let mut tracker = OrderAlertTracker::new();
        tracker.check(&[order("1", OrderStatus::Pending)]);
        tracker.reset();
        assert!(tracker.is_first_load());
        assert_eq!(
            tracker.check(&[order("2", OrderStatus::Pending)]),
            AlertDecision::Suppressed
        );
    }
}
