//! Step and time budgets plus cooperative cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::McsError;

/// Shared flag a caller can raise to stop a running search.
///
/// Clones share the same flag, so one token can be handed to several
/// searches and cancelled once.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// True once [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Counts expansions and checks limits.
#[derive(Debug)]
pub(crate) struct Budget<'t> {
    steps: u64,
    step_limit: Option<u64>,
    time_limit: Option<Duration>,
    started: Instant,
    token: Option<&'t CancellationToken>,
}

impl<'t> Budget<'t> {
    pub(crate) fn new(
        step_limit: Option<u64>,
        time_limit: Option<Duration>,
        token: Option<&'t CancellationToken>,
    ) -> Self {
        Self {
            steps: 0,
            step_limit,
            time_limit,
            started: Instant::now(),
            token,
        }
    }

    /// Expansions so far.
    pub(crate) const fn steps(&self) -> u64 {
        self.steps
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Account for one expansion. `best_size` is reported if a limit trips.
    pub(crate) fn tick(&mut self, best_size: usize) -> Result<(), McsError> {
        self.steps += 1;

        if self.token.is_some_and(CancellationToken::is_cancelled) {
            return Err(McsError::Cancelled { steps: self.steps });
        }

        let over_steps = self.step_limit.is_some_and(|limit| self.steps > limit);
        let over_time = self
            .time_limit
            .is_some_and(|limit| self.started.elapsed() > limit);
        if over_steps || over_time {
            return Err(McsError::BudgetExceeded {
                steps: self.steps,
                elapsed: self.elapsed(),
                best_size,
            });
        }
        Ok(())
    }
}
