//! Clock-driven implementation of the one-shot finalize timer.

use std::time::{Duration, Instant};

use trail_traits::clock::{Clock, MonotonicClock};
use trail_traits::timer::{Timer, TimerHandle};

/// Single-deadline timer read from a [`Clock`].
///
/// At most one deadline is live: arming replaces it. A handle expires once the
/// clock reads strictly past its deadline.
#[derive(Debug)]
pub struct DeadlineTimer<C: Clock = MonotonicClock> {
    clock: C,
    next_id: u64,
    live: Option<(TimerHandle, Instant)>,
}

impl Default for DeadlineTimer<MonotonicClock> {
    fn default() -> Self {
        Self::new(MonotonicClock::new())
    }
}

impl<C: Clock> DeadlineTimer<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            next_id: 1,
            live: None,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Time left on the live deadline, if `handle` is it.
    pub fn remaining(&self, handle: TimerHandle) -> Option<Duration> {
        match self.live {
            Some((h, deadline)) if h == handle => {
                Some(deadline.saturating_duration_since(self.clock.now()))
            }
            _ => None,
        }
    }
}

impl<C: Clock> Timer for DeadlineTimer<C> {
    fn arm(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let deadline = self.clock.now() + delay;
        if let Some((prev, _)) = self.live.replace((handle, deadline)) {
            tracing::trace!(replaced = prev.id(), "timer re-armed");
        }
        tracing::trace!(id = handle.id(), delay_ms = delay.as_millis() as u64, "timer armed");
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if matches!(self.live, Some((h, _)) if h == handle) {
            self.live = None;
            tracing::trace!(id = handle.id(), "timer cancelled");
        }
    }

    fn is_expired(&self, handle: TimerHandle) -> bool {
        match self.live {
            Some((h, deadline)) if h == handle => self.clock.now() > deadline,
            _ => false,
        }
    }
}
