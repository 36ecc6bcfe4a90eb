//! Helper timers for trail_core

use std::time::Duration;

use trail_traits::timer::{Timer, TimerHandle};

/// A timer that never fires. Strokes then close only through the idle-gap
/// and max-duration rules or `stop()`; useful for batch fitting.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTimer;

impl Timer for NoopTimer {
    fn arm(&mut self, _delay: Duration) -> TimerHandle {
        TimerHandle::new(0)
    }

    fn cancel(&mut self, _handle: TimerHandle) {}

    fn is_expired(&self, _handle: TimerHandle) -> bool {
        false
    }
}
