//! Activation debouncing.

use std::time::{Duration, Instant};

/// Drops repeated activations that arrive inside a guard window.
///
/// Only an admitted trigger moves the window; a dropped one does not extend
/// it. There is no way to clear the state other than letting time pass.
#[derive(Debug, Clone)]
pub struct ActivationDebouncer {
    window: Duration,
    last_trigger: Option<Instant>,
}

impl ActivationDebouncer {
    /// Create a debouncer with the given guard window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_trigger: None,
        }
    }

    /// Guard window length.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Time of the last admitted trigger.
    pub fn last_trigger(&self) -> Option<Instant> {
        self.last_trigger
    }

    /// Decide whether a trigger at `now` goes through.
    pub fn admit(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_trigger
            && now.saturating_duration_since(last) < self.window
        {
            return false;
        }
        self.last_trigger = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_trigger_inside_window_dropped() {
        let start = Instant::now();
        let mut debouncer = ActivationDebouncer::new(Duration::from_secs(1));

        assert!(debouncer.admit(start));
        assert!(!debouncer.admit(start + Duration::from_millis(200)));
        assert!(!debouncer.admit(start + Duration::from_millis(999)));
        assert!(debouncer.admit(start + Duration::from_millis(1000)));
    }

    #[test]
    fn test_dropped_trigger_does_not_extend_window() {
        let start = Instant::now();
        let mut debouncer = ActivationDebouncer::new(Duration::from_millis(500));

        assert!(debouncer.admit(start));
        assert!(!debouncer.admit(start + Duration::from_millis(400)));
        assert!(debouncer.admit(start + Duration::from_millis(600)));
        assert_eq!(debouncer.last_trigger(), Some(start + Duration::from_millis(600)));
    }

    #[test]
    fn test_zero_window_admits_everything() {
        let now = Instant::now();
        let mut debouncer = ActivationDebouncer::new(Duration::ZERO);
        assert!(debouncer.admit(now));
        assert!(debouncer.admit(now));
    }
}
