//! Runtime configuration types for recording, fitting and playback.
//!
//! These are separate from the TOML-deserialized config in `trail_config`;
//! see `conversions` for the mapping.

/// Stroke segmentation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecorderCfg {
    /// A gap between samples longer than this (ms) closes the current stroke.
    /// Also the delay of the finalize timer armed after each sample.
    pub idle_ms: u64,
    /// A stroke whose span exceeds this (ms) is closed immediately.
    pub max_stroke_ms: u64,
}

impl Default for RecorderCfg {
    fn default() -> Self {
        Self {
            idle_ms: 50,
            max_stroke_ms: 160,
        }
    }
}

/// Curve fitting parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitCfg {
    /// Scales how far the interior control points reach along the tangents.
    pub tension: f64,
    /// Reference samples are taken `max(len / ref_divisor, 1)` samples in from each end.
    pub ref_divisor: usize,
}

impl Default for FitCfg {
    fn default() -> Self {
        Self {
            tension: 2.0,
            ref_divisor: 5,
        }
    }
}

/// Playback helpers configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackCfg {
    /// Scrub values span `[0, scrub_range]`.
    pub scrub_range: u32,
    /// Frame rate for `Frames`.
    pub fps: u32,
}

impl Default for PlaybackCfg {
    fn default() -> Self {
        Self {
            scrub_range: 10_000,
            fps: 60,
        }
    }
}
