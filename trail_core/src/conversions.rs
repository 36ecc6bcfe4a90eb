//! `From` implementations bridging `trail_config` types to `trail_core` types.

use crate::config::{FitCfg, PlaybackCfg, RecorderCfg};
use crate::sample::MotionEvent;

// ── RecorderCfg ──────────────────────────────────────────────────────────────

impl From<&trail_config::RecorderCfg> for RecorderCfg {
    fn from(c: &trail_config::RecorderCfg) -> Self {
        Self {
            idle_ms: c.idle_ms,
            max_stroke_ms: c.max_stroke_ms,
        }
    }
}

// ── FitCfg ───────────────────────────────────────────────────────────────────

impl From<&trail_config::FitCfg> for FitCfg {
    fn from(c: &trail_config::FitCfg) -> Self {
        Self {
            tension: c.tension,
            ref_divisor: c.ref_divisor,
        }
    }
}

// ── PlaybackCfg ──────────────────────────────────────────────────────────────

impl From<&trail_config::PlaybackCfg> for PlaybackCfg {
    fn from(c: &trail_config::PlaybackCfg) -> Self {
        Self {
            scrub_range: c.scrub_range,
            fps: c.fps,
        }
    }
}

// ── MotionEvent ──────────────────────────────────────────────────────────────

impl From<&trail_config::EventRow> for MotionEvent {
    fn from(r: &trail_config::EventRow) -> Self {
        Self {
            t: r.t,
            x: r.x,
            y: r.y,
            dx: r.dx.unwrap_or(0.0),
            dy: r.dy.unwrap_or(0.0),
        }
    }
}
