//! New-Order Notifications
//!
//! Audible alert when a new pending order shows up in a poll, without
//! re-alerting for orders already seen and without alerting on the first
//! load of a session.

#[cfg(not(target_arch = "wasm32"))]
mod bell;
mod chime;
mod tracker;

#[cfg(not(target_arch = "wasm32"))]
pub use bell::TerminalBell;
pub use chime::{ChimeError, ChimePlayer, ChimeSpec, Tone, NOTIFICATION_CHIME};
pub use tracker::{AlertDecision, OrderAlertTracker};

use crate::models::Order;

/// Tracker plus audio output, owned by whichever view polls orders
pub struct OrderAlert<P: ChimePlayer> {
    tracker: OrderAlertTracker,
    player: P,
    spec: ChimeSpec,
    enabled: bool,
    chimes_played: u64,
}

impl<P: ChimePlayer> OrderAlert<P> {
    pub fn new(player: P) -> Self {
        Self {
            tracker: OrderAlertTracker::new(),
            player,
            spec: NOTIFICATION_CHIME,
            enabled: true,
            chimes_played: 0,
        }
    }

    pub fn with_spec(mut self, spec: ChimeSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Muting still records ids, so un-muting never replays a backlog
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Feed the latest poll result. Plays at most one chime per call.
    pub fn check(&mut self, orders: &[Order]) -> AlertDecision {
        let decision = self.tracker.check(orders);
        if let AlertDecision::Chime { new_order_ids } = &decision {
            tracing::info!(count = new_order_ids.len(), "new pending orders");
            if self.enabled {
                self.play();
            }
        }
        decision
    }

    /// Play the chime once; failures are logged and dropped
    pub fn play(&mut self) {
        match self.player.play(&self.spec) {
            Ok(()) => self.chimes_played += 1,
            Err(e) => tracing::warn!("notification sound failed: {}", e),
        }
    }

    pub fn chimes_played(&self) -> u64 {
        self.chimes_played
    }

    pub fn tracker(&self) -> &OrderAlertTracker {
        &self.tracker
    }

    /// Release the audio output
    pub fn close(&mut self) {
        self.player.close();
    }
}

impl<P: ChimePlayer> Drop for OrderAlert<P> {
    fn drop(&mut self) {
        self.player.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::fixtures::order;
    use crate::models::OrderStatus;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        plays: u32,
        closes: u32,
    }

    struct FakePlayer {
        log: Rc<RefCell<Log>>,
        fail: bool,
    }

    impl ChimePlayer for FakePlayer {
        fn play(&mut self, spec: &ChimeSpec) -> Result<(), ChimeError> {
            assert_eq!(spec.tones.len(), 2);
            if self.fail {
                return Err(ChimeError::Unavailable("blocked".into()));
            }
            self.log.borrow_mut().plays += 1;
            Ok(())
        }

        fn close(&mut self) {
            self.log.borrow_mut().closes += 1;
        }
    }

    fn alert(fail: bool) -> (OrderAlert<FakePlayer>, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let player = FakePlayer {
            log: Rc::clone(&log),
            fail,
        };
        (OrderAlert::new(player), log)
    }

    #[test]
    fn test_first_load_is_silent() {
        let (mut alert, log) = alert(false);
        let orders = vec![
            order("a", OrderStatus::Pending),
            order("b", OrderStatus::Pending),
            order("c", OrderStatus::Ready),
        ];
        assert_eq!(alert.check(&orders), AlertDecision::Suppressed);
        assert_eq!(log.borrow().plays, 0);
        assert_eq!(alert.tracker().seen_count(), 3);
    }

    #[test]
    fn test_one_chime_per_batch() {
        let (mut alert, log) = alert(false);
        alert.check(&[]);
        let orders = vec![
            order("a", OrderStatus::Pending),
            order("b", OrderStatus::Pending),
        ];
        alert.check(&orders);
        alert.check(&orders);
        assert_eq!(log.borrow().plays, 1);
        assert_eq!(alert.chimes_played(), 1);
    }

    #[test]
    fn test_audio_failure_is_swallowed() {
        let (mut alert, log) = alert(true);
        alert.check(&[]);
        let decision = alert.check(&[order("a", OrderStatus::Pending)]);
        assert!(matches!(decision, AlertDecision::Chime { .. }));
        assert_eq!(log.borrow().plays, 0);
        assert_eq!(alert.chimes_played(), 0);
    }

    #[test]
    fn test_muted_still_tracks() {
        let (mut alert, log) = alert(false);
        alert.check(&[]);
        alert.set_enabled(false);
        alert.check(&[order("a", OrderStatus::Pending)]);
        alert.set_enabled(true);
        alert.check(&[order("a", OrderStatus::Pending)]);
        assert_eq!(log.borrow().plays, 0);
    }

    #[test]
    fn test_drop_closes_player() {
        let (alert, log) = alert(false);
        drop(alert);
        assert_eq!(log.borrow().closes, 1);
    }
}
