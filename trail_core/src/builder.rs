//! Builder for `Recorder`.
//!
//! The timer type is part of the recorder's type; `with_timer` swaps it.
//! Configuration is validated once in `build()`.

use trail_traits::timer::Timer;

use crate::config::{FitCfg, RecorderCfg};
use crate::error::{BuildError, Result};
use crate::mocks::NoopTimer;
use crate::recorder::Recorder;

#[derive(Debug, Default)]
pub struct RecorderBuilder<T: Timer = NoopTimer> {
    recorder: Option<RecorderCfg>,
    fit: Option<FitCfg>,
    timer: T,
}

fn invalid(msg: &'static str) -> eyre::Report {
    eyre::Report::new(BuildError::InvalidConfig(msg))
}

fn validate(rec: &RecorderCfg, fit: &FitCfg) -> Result<()> {
    if rec.idle_ms == 0 {
        return Err(invalid("idle_ms must be >= 1"));
    }
    if rec.max_stroke_ms == 0 {
        return Err(invalid("max_stroke_ms must be >= 1"));
    }
    if rec.max_stroke_ms < rec.idle_ms {
        return Err(invalid("max_stroke_ms must be >= idle_ms"));
    }
    if !fit.tension.is_finite() || fit.tension <= 0.0 {
        return Err(invalid("tension must be finite and > 0"));
    }
    if fit.ref_divisor == 0 {
        return Err(invalid("ref_divisor must be >= 1"));
    }
    Ok(())
}

impl<T: Timer> RecorderBuilder<T> {
    pub fn with_recorder_cfg(mut self, cfg: RecorderCfg) -> Self {
        self.recorder = Some(cfg);
        self
    }

    pub fn with_fit_cfg(mut self, cfg: FitCfg) -> Self {
        self.fit = Some(cfg);
        self
    }

    /// Use `timer` for the finalize deadline instead of the current one.
    pub fn with_timer<U: Timer>(self, timer: U) -> RecorderBuilder<U> {
        RecorderBuilder {
            recorder: self.recorder,
            fit: self.fit,
            timer,
        }
    }

    /// Validate and build. The recorder starts stopped; call `start()`.
    pub fn build(self) -> Result<Recorder<T>> {
        let rec = self.recorder.unwrap_or_default();
        let fit = self.fit.unwrap_or_default();
        validate(&rec, &fit)?;
        Ok(Recorder::from_parts(rec, fit, self.timer))
    }
}
