use std::time::{Duration, Instant};

/// Trailing-edge debounce timer driven by an explicit clock.
///
/// Every `trigger` pushes the deadline out by `delay`; `poll` fires once the
/// deadline has passed and disarms the timer.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Returns true exactly once per burst of triggers, when the delay elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_fires_once_after_last_trigger() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        for i in 0..10 {
            debouncer.trigger(start + Duration::from_millis(i * 25));
        }

        assert!(!debouncer.poll(start + Duration::from_millis(400)));
        assert!(debouncer.poll(start + Duration::from_millis(525)));
        assert!(!debouncer.poll(start + Duration::from_millis(900)));
    }

    #[test]
    fn test_cancel_disarms() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        debouncer.trigger(start);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert!(!debouncer.poll(start + Duration::from_secs(1)));
    }
}
