//! Phase timers for graph building, clique search and extraction.
//!
//! With the `profiling` feature every [`Timer`] records its lifetime under a
//! static label; [`report`] logs the accumulated totals. Without the feature
//! the timer is a zero-sized no-op.

/// Accumulated timings for one label.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseStats {
    /// Timer label, e.g. `"clique::search"`.
    pub label: &'static str,
    /// Number of completed timers.
    pub calls: u64,
    /// Total wall-clock time in nanoseconds.
    pub total_nanos: u128,
}

impl PhaseStats {
    /// Mean nanoseconds per call.
    pub fn mean_nanos(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.total_nanos as f64 / self.calls as f64
        }
    }
}

#[cfg(feature = "profiling")]
mod enabled {
    use std::sync::OnceLock;
    use std::time::{Duration, Instant};

    use dashmap::DashMap;
    use tracing::info;

    use super::PhaseStats;

    static STATS: OnceLock<DashMap<&'static str, (u64, u128)>> = OnceLock::new();

    #[inline]
    fn stats() -> &'static DashMap<&'static str, (u64, u128)> {
        STATS.get_or_init(DashMap::new)
    }

    /// Records its own lifetime under `label` when dropped.
    pub struct Timer {
        label: &'static str,
        start: Instant,
    }

    impl Timer {
        #[inline]
        pub fn new(label: &'static str) -> Self {
            Self {
                label,
                start: Instant::now(),
            }
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            record(self.label, self.start.elapsed());
        }
    }

    pub fn record(label: &'static str, dur: Duration) {
        let mut entry = stats().entry(label).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += dur.as_nanos();
    }

    /// All labels, most expensive first.
    pub fn snapshot() -> Vec<PhaseStats> {
        let mut rows: Vec<PhaseStats> = stats()
            .iter()
            .map(|kv| PhaseStats {
                label: *kv.key(),
                calls: kv.value().0,
                total_nanos: kv.value().1,
            })
            .collect();
        rows.sort_by(|a, b| b.total_nanos.cmp(&a.total_nanos));
        rows
    }

    pub fn reset() {
        stats().clear();
    }

    pub fn report() {
        for row in snapshot() {
            info!(
                "profile {:<24} calls={:<10} total={:>9.3} ms avg={:>12.1} ns",
                row.label,
                row.calls,
                row.total_nanos as f64 / 1_000_000.0,
                row.mean_nanos()
            );
        }
    }
}

#[cfg(not(feature = "profiling"))]
mod disabled {
    use std::time::Duration;

    use super::PhaseStats;

    #[derive(Clone, Copy)]
    pub struct Timer;

    impl Timer {
        #[inline]
        pub fn new(_: &'static str) -> Self {
            Self
        }
    }

    pub fn record(_: &'static str, _: Duration) {}
    pub fn snapshot() -> Vec<PhaseStats> {
        Vec::new()
    }
    pub fn reset() {}
    pub fn report() {}
}

#[cfg(feature = "profiling")]
pub use enabled::*;

#[cfg(not(feature = "profiling"))]
pub use disabled::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_row_is_zero() {
        let row = PhaseStats {
            label: "x",
            calls: 0,
            total_nanos: 0,
        };
        assert_eq!(row.mean_nanos(), 0.0);
    }

    #[cfg(feature = "profiling")]
    #[test]
    fn timer_records_on_drop() {
        {
            let _t = Timer::new("test::timer");
        }
        assert!(
            snapshot()
                .iter()
                .any(|row| row.label == "test::timer" && row.calls >= 1)
        );
    }

    #[cfg(not(feature = "profiling"))]
    #[test]
    fn disabled_timer_records_nothing() {
        let _t = Timer::new("test::timer");
        record("test::timer", std::time::Duration::from_millis(1));
        assert!(snapshot().is_empty());
    }
}
