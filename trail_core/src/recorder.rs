//! Stroke segmentation state machine.
//!
//! The recorder buffers accepted samples into the current stroke and closes it
//! when one of these fires, checked in order on every sample:
//!
//! - **idle gap**: the new sample arrived more than `idle_ms` after the previous
//!   one. The buffered stroke is closed first; the new sample opens the next.
//! - **max duration**: the stroke now spans more than `max_stroke_ms`. It is
//!   closed including the new sample.
//! - **finalize timer**: otherwise the timer is re-armed for `idle_ms`. If it
//!   expires before the next sample, `poll()` closes the stroke.
//!
//! Closing a stroke with fewer than two samples discards it. Longer strokes are
//! fitted and appended to the store.

use std::time::Duration;

use trail_traits::timer::{Timer, TimerHandle};

use crate::builder::RecorderBuilder;
use crate::config::{FitCfg, RecorderCfg};
use crate::error::TrailError;
use crate::fitter::fit_stroke;
use crate::mocks::NoopTimer;
use crate::sample::{MotionEvent, Sample};
use crate::status::{FeedStatus, FinalizeOutcome};
use crate::store::{SegmentStore, Track};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Never started.
    Idle,
    Recording,
    Stopped,
}

/// Running counters for one recorder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecorderStats {
    pub accepted: u64,
    pub rejected: u64,
    pub emitted: u64,
    pub discarded: u64,
    pub faulted: u64,
}

pub struct Recorder<T: Timer = NoopTimer> {
    cfg: RecorderCfg,
    fit: FitCfg,
    timer: T,
    phase: Phase,
    stroke: Vec<Sample>,
    last: Option<Sample>,
    pending: Option<TimerHandle>,
    store: SegmentStore,
    stats: RecorderStats,
}

impl<T: Timer> core::fmt::Debug for Recorder<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Recorder")
            .field("phase", &self.phase)
            .field("buffered", &self.stroke.len())
            .field("segments", &self.store.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Recorder<NoopTimer> {
    /// Start building a recorder.
    pub fn builder() -> RecorderBuilder<NoopTimer> {
        RecorderBuilder::default()
    }
}

impl<T: Timer> Recorder<T> {
    /// Assemble from already-validated parts; see [`RecorderBuilder::build`].
    pub(crate) fn from_parts(cfg: RecorderCfg, fit: FitCfg, timer: T) -> Self {
        Self {
            cfg,
            fit,
            timer,
            phase: Phase::Idle,
            stroke: Vec::new(),
            last: None,
            pending: None,
            store: SegmentStore::new(),
            stats: RecorderStats::default(),
        }
    }

    pub fn recorder_cfg(&self) -> &RecorderCfg {
        &self.cfg
    }

    pub fn fit_cfg(&self) -> &FitCfg {
        &self.fit
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn stats(&self) -> RecorderStats {
        self.stats
    }

    pub fn is_recording(&self) -> bool {
        self.phase == Phase::Recording
    }

    /// Samples in the stroke that is still open.
    pub fn buffered(&self) -> usize {
        self.stroke.len()
    }

    /// Handle of the armed finalize timer, if any.
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Begin (or resume) accepting events. Segments from earlier runs are kept
    /// and timestamps must keep increasing across runs.
    pub fn start(&mut self) {
        if self.phase != Phase::Recording {
            tracing::info!(segments = self.store.len(), "recording start");
            self.phase = Phase::Recording;
        }
    }

    /// Stop accepting events and flush the open stroke.
    pub fn stop(&mut self) -> Option<FinalizeOutcome> {
        if self.phase != Phase::Recording {
            return None;
        }
        self.disarm();
        let outcome = self.close_open_stroke();
        self.phase = Phase::Stopped;
        tracing::info!(
            segments = self.store.len(),
            accepted = self.stats.accepted,
            rejected = self.stats.rejected,
            "recording stopped"
        );
        outcome
    }

    /// Close the open stroke if its finalize timer has expired.
    pub fn poll(&mut self) -> Option<FinalizeOutcome> {
        if self.phase != Phase::Recording {
            return None;
        }
        let handle = self.pending?;
        if !self.timer.is_expired(handle) {
            return None;
        }
        self.disarm();
        tracing::trace!(id = handle.id(), "finalize timer expired");
        self.close_open_stroke()
    }

    /// Offer one motion event.
    pub fn feed(&mut self, ev: &MotionEvent) -> FeedStatus {
        if self.phase != Phase::Recording {
            return FeedStatus::Inactive;
        }
        if let Err(e) = self.check(ev) {
            self.stats.rejected += 1;
            tracing::warn!(error = %e, "sample rejected");
            return FeedStatus::Rejected(e);
        }

        // A timer that ran out before this event arrived closes the stroke first.
        let mut closed = self.poll();

        let sample = Sample::from_event(ev, self.last.as_ref());
        self.last = Some(sample);
        self.stats.accepted += 1;
        self.disarm();

        // A lone buffered sample is closed too; it is discarded as degenerate.
        if let Some(dt) = sample.dt
            && dt > self.idle_ms()
            && !self.stroke.is_empty()
        {
            closed = self.close_open_stroke();
        }

        self.stroke.push(sample);

        let span = sample.t.saturating_sub(self.stroke[0].t);
        if span > self.max_stroke_ms() {
            closed = self.close_open_stroke();
        } else {
            let handle = self.timer.arm(Duration::from_millis(self.cfg.idle_ms));
            self.pending = Some(handle);
        }

        match closed {
            Some(outcome) => outcome.into(),
            None => FeedStatus::Buffered,
        }
    }

    /// Finalized segments; available only once recording has stopped.
    pub fn segments(&self) -> Result<&SegmentStore, TrailError> {
        match self.phase {
            Phase::Stopped => Ok(&self.store),
            _ => Err(TrailError::State(
                "segments are available only after stop()".into(),
            )),
        }
    }

    /// Hand the finalized segments over to playback.
    pub fn into_track(self) -> Result<Track, TrailError> {
        match self.phase {
            Phase::Stopped => Ok(self.store.freeze()),
            _ => Err(TrailError::State(
                "recorder must be stopped before taking its track".into(),
            )),
        }
    }

    fn idle_ms(&self) -> i64 {
        i64::try_from(self.cfg.idle_ms).unwrap_or(i64::MAX)
    }

    fn max_stroke_ms(&self) -> i64 {
        i64::try_from(self.cfg.max_stroke_ms).unwrap_or(i64::MAX)
    }

    fn check(&self, ev: &MotionEvent) -> Result<(), TrailError> {
        if !(ev.x.is_finite() && ev.y.is_finite()) {
            return Err(TrailError::InvalidSample {
                t: ev.t,
                reason: "non-finite position",
            });
        }
        if !(ev.dx.is_finite() && ev.dy.is_finite()) {
            return Err(TrailError::InvalidSample {
                t: ev.t,
                reason: "non-finite delta",
            });
        }
        if let Some(last) = &self.last
            && ev.t <= last.t
        {
            return Err(TrailError::InvalidSample {
                t: ev.t,
                reason: "timestamp not after previous sample",
            });
        }
        Ok(())
    }

    fn disarm(&mut self) {
        if let Some(h) = self.pending.take() {
            self.timer.cancel(h);
        }
    }

    fn close_open_stroke(&mut self) -> Option<FinalizeOutcome> {
        if self.stroke.is_empty() {
            return None;
        }
        let stroke = std::mem::take(&mut self.stroke);
        Some(self.finalize(&stroke))
    }

    fn finalize(&mut self, stroke: &[Sample]) -> FinalizeOutcome {
        if stroke.len() < 2 {
            self.stats.discarded += 1;
            tracing::warn!(
                samples = stroke.len(),
                t = stroke.first().map(|s| s.t),
                "degenerate stroke dropped"
            );
            return FinalizeOutcome::Discarded {
                samples: stroke.len(),
            };
        }
        let appended = fit_stroke(stroke, &self.fit).and_then(|seg| self.store.append(seg));
        match appended {
            Ok(index) => {
                self.stats.emitted += 1;
                if let Some(seg) = self.store.get(index) {
                    tracing::debug!(
                        index,
                        samples = stroke.len(),
                        start_t = seg.start().t,
                        end_t = seg.end().t,
                        "stroke finalized"
                    );
                }
                FinalizeOutcome::Emitted(index)
            }
            Err(e) => {
                self.stats.faulted += 1;
                tracing::error!(error = %e, samples = stroke.len(), "stroke dropped");
                FinalizeOutcome::Faulted(e)
            }
        }
    }
}
