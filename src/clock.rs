use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Shared virtual clock used to emulate the passage of time.
///
/// `now()` is the wall clock plus an accumulated shift. Tests move time
/// forward with [`VirtualClock::time_travel`] instead of sleeping; cloned
/// handles share the same shift.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    shift_nanos: Arc<AtomicU64>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> DateTime<Utc> {
        let wall = Utc::now();
        TimeDelta::from_std(self.shift())
            .ok()
            .and_then(|delta| wall.checked_add_signed(delta))
            .unwrap_or(wall)
    }

    /// Total amount of time this clock has been moved forward.
    pub fn shift(&self) -> Duration {
        Duration::from_nanos(self.shift_nanos.load(Ordering::Acquire))
    }

    /// Moves the clock forward by `amount`, saturating at the largest
    /// representable shift.
    pub fn time_travel(&self, amount: Duration) {
        let nanos = u64::try_from(amount.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .shift_nanos
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_add(nanos))
            });
    }

    /// Returns true when both handles share the same underlying shift.
    pub fn same_clock(&self, other: &VirtualClock) -> bool {
        Arc::ptr_eq(&self.shift_nanos, &other.shift_nanos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_travel_accumulates() {
        let clock = VirtualClock::new();
        assert_eq!(clock.shift(), Duration::ZERO);

        clock.time_travel(Duration::from_millis(50));
        clock.time_travel(Duration::from_secs(2));
        assert_eq!(clock.shift(), Duration::from_millis(2050));
    }

    #[test]
    fn test_clones_share_shift() {
        let clock = VirtualClock::new();
        let other = clock.clone();
        other.time_travel(Duration::from_secs(60));

        assert_eq!(clock.shift(), Duration::from_secs(60));
        assert!(clock.same_clock(&other));
        assert!(!clock.same_clock(&VirtualClock::new()));
    }

    #[test]
    fn test_now_includes_shift() {
        let clock = VirtualClock::new();
        let before = Utc::now();
        clock.time_travel(Duration::from_secs(3600));

        assert!(clock.now() >= before + TimeDelta::seconds(3600));
    }
}
