//! Periodic refresh timing

use std::time::{Duration, Instant};

/// Decides when the next periodic refresh is due.
///
/// The first check is always due (initial load); afterwards one refresh per
/// interval. A failed cycle does not change the schedule.
#[derive(Debug, Clone)]
pub struct RefreshSchedule {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RefreshSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true (and arms the next deadline) when a refresh is due
    pub fn poll_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now < due => false,
            _ => {
                self.next_due = Some(now + self.interval);
                true
            }
        }
    }

    /// Restart the interval after a manual refresh
    pub fn reset(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Time left until the next refresh
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_poll_is_due() {
        let mut schedule = RefreshSchedule::new(Duration::from_secs(300));
        let start = Instant::now();
        assert!(schedule.poll_due(start));
        assert!(!schedule.poll_due(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_due_every_interval() {
        let mut schedule = RefreshSchedule::new(Duration::from_secs(300));
        let start = Instant::now();
        assert!(schedule.poll_due(start));
        assert!(!schedule.poll_due(start + Duration::from_secs(299)));
        assert!(schedule.poll_due(start + Duration::from_secs(300)));
        assert_eq!(
            schedule.remaining(start + Duration::from_secs(300)),
            Duration::from_secs(300)
        );
    }

    #[test]
    fn test_reset_pushes_deadline() {
        let mut schedule = RefreshSchedule::new(Duration::from_secs(60));
        let start = Instant::now();
        schedule.poll_due(start);

        schedule.reset(start + Duration::from_secs(50));
        assert!(!schedule.poll_due(start + Duration::from_secs(60)));
        assert!(schedule.poll_due(start + Duration::from_secs(110)));
    }
}
