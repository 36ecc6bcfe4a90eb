//! Outcomes reported by the recorder for each fed event and each finalization.

use crate::error::TrailError;

/// How a stroke finalization ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FinalizeOutcome {
    /// A segment was fitted and appended at this store index.
    Emitted(usize),
    /// Fewer than two samples; nothing was emitted.
    Discarded { samples: usize },
    /// Fitting or appending failed; the stroke was dropped.
    Faulted(TrailError),
}

/// Public status of a single `Recorder::feed` call.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedStatus {
    /// Sample appended to the current stroke; the finalize timer is armed.
    Buffered,
    /// A stroke was closed and its segment stored at this index.
    Emitted(usize),
    /// A stroke was closed without a segment because it was too short.
    Discarded,
    /// A stroke was closed but fitting or appending it failed.
    Faulted(TrailError),
    /// The event was refused; recording continues unaffected.
    Rejected(TrailError),
    /// The recorder is not running.
    Inactive,
}

impl From<FinalizeOutcome> for FeedStatus {
    fn from(o: FinalizeOutcome) -> Self {
        match o {
            FinalizeOutcome::Emitted(i) => FeedStatus::Emitted(i),
            FinalizeOutcome::Discarded { .. } => FeedStatus::Discarded,
            FinalizeOutcome::Faulted(e) => FeedStatus::Faulted(e),
        }
    }
}
