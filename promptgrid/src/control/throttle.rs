//! Trailing-edge coalescing for outbound change notifications.
//!
//! The throttle only owns the timing contract; the payload is read by the
//! caller at fire time so a burst of edits always broadcasts the state after
//! the last one. Time is passed in by the caller, which keeps the window
//! independently testable without sleeping.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Throttle {
    window: Duration,
    deadline: Option<Instant>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedules a delivery at `now + window` unless one is already pending.
    /// Requests arriving before the deadline coalesce into it.
    pub fn request(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.window);
        }
    }

    /// Reports a due deadline exactly once and clears it.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Releases a pending delivery. Teardown must not leak a scheduled
    /// notification past the surface's lifetime.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(100);

    #[test]
    fn test_lone_request_fires_once_after_window() {
        let start = Instant::now();
        let mut throttle = Throttle::new(WINDOW);

        throttle.request(start);
        assert!(!throttle.fire(start + WINDOW / 2));
        assert!(throttle.fire(start + WINDOW));
        assert!(!throttle.fire(start + WINDOW * 2));
        assert!(!throttle.pending());
    }

    #[test]
    fn test_burst_coalesces_to_single_fire() {
        let start = Instant::now();
        let mut throttle = Throttle::new(WINDOW);

        throttle.request(start);
        throttle.request(start + Duration::from_millis(10));
        throttle.request(start + Duration::from_millis(90));

        // Deadline is anchored to the first request, not the last.
        assert_eq!(throttle.deadline(), Some(start + WINDOW));
        assert!(throttle.fire(start + WINDOW));
        assert!(!throttle.fire(start + WINDOW));
    }

    #[test]
    fn test_request_after_fire_opens_a_new_window() {
        let start = Instant::now();
        let mut throttle = Throttle::new(WINDOW);

        throttle.request(start);
        assert!(throttle.fire(start + WINDOW));

        let later = start + WINDOW * 3;
        throttle.request(later);
        assert!(!throttle.fire(later));
        assert!(throttle.fire(later + WINDOW));
    }

    #[test]
    fn test_cancel_releases_pending_delivery() {
        let start = Instant::now();
        let mut throttle = Throttle::new(WINDOW);

        throttle.request(start);
        throttle.cancel();
        assert!(!throttle.pending());
        assert!(!throttle.fire(start + WINDOW * 2));
    }
}
