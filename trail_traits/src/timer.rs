use std::time::Duration;

/// Identity of one armed timer. Handles are never reused by an implementation,
/// so a stale handle can always be told apart from the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Cancellable one-shot timer.
///
/// There is no callback: the owner asks `is_expired` for the handle it holds
/// and runs its own continuation. A cancelled or unknown handle never expires.
pub trait Timer {
    fn arm(&mut self, delay: Duration) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
    fn is_expired(&self, handle: TimerHandle) -> bool;
}

impl<T: Timer + ?Sized> Timer for Box<T> {
    fn arm(&mut self, delay: Duration) -> TimerHandle {
        (**self).arm(delay)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        (**self).cancel(handle);
    }

    fn is_expired(&self, handle: TimerHandle) -> bool {
        (**self).is_expired(handle)
    }
}
