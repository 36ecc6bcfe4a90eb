#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and motion-event file loaders for the trajectory recorder.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//!   Every section is optional; absent values fall back to the recorder defaults.
//! - Event loaders accept CSV (strict headers) and JSON lines, and fill in
//!   missing position deltas from the previous row.
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct RecorderCfg {
    /// Longest gap between samples (ms) before the current stroke is closed.
    pub idle_ms: u64,
    /// Longest span a single stroke may cover (ms).
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

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct FitCfg {
    /// How far control points reach along the boundary tangents.
    pub tension: f64,
    /// Reference samples sit `max(len / ref_divisor, 1)` samples in from each end.
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

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PlaybackCfg {
    /// Number of discrete scrub steps spanning the whole track.
    pub scrub_range: u32,
    /// Frame rate used when replaying a track.
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

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub recorder: RecorderCfg,
    pub fit: FitCfg,
    pub playback: PlaybackCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read and parse a TOML config; a missing file yields the defaults.
pub fn load_or_default(path: &Path) -> eyre::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Recorder
        if self.recorder.idle_ms == 0 {
            eyre::bail!("recorder.idle_ms must be >= 1");
        }
        if self.recorder.idle_ms > 60 * 1000 {
            eyre::bail!("recorder.idle_ms is unreasonably large (>60s)");
        }
        if self.recorder.max_stroke_ms == 0 {
            eyre::bail!("recorder.max_stroke_ms must be >= 1");
        }
        if self.recorder.max_stroke_ms < self.recorder.idle_ms {
            eyre::bail!("recorder.max_stroke_ms must be >= recorder.idle_ms");
        }

        // Fit
        if !self.fit.tension.is_finite() || self.fit.tension <= 0.0 {
            eyre::bail!("fit.tension must be a finite value > 0.0");
        }
        if self.fit.tension > 10.0 {
            eyre::bail!("fit.tension is unreasonably large (>10)");
        }
        if self.fit.ref_divisor == 0 {
            eyre::bail!("fit.ref_divisor must be >= 1");
        }

        // Playback
        if self.playback.scrub_range == 0 {
            eyre::bail!("playback.scrub_range must be >= 1");
        }
        if !(1..=1000).contains(&self.playback.fps) {
            eyre::bail!("playback.fps must be in [1, 1000]");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {rot:?}");
        }

        Ok(())
    }
}

/// One recorded pointer observation as stored on disk.
///
/// CSV headers: `t,x,y` or `t,x,y,dx,dy`. JSON lines use the same keys;
/// `dx`/`dy` may be omitted.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct EventRow {
    pub t: i64,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub dx: Option<f64>,
    #[serde(default)]
    pub dy: Option<f64>,
}

/// Fill absent deltas from the previous row (0 for the first row).
pub fn fill_deltas(rows: &mut [EventRow]) {
    let mut prev: Option<(f64, f64)> = None;
    for row in rows.iter_mut() {
        let (px, py) = prev.unwrap_or((row.x, row.y));
        if row.dx.is_none() {
            row.dx = Some(row.x - px);
        }
        if row.dy.is_none() {
            row.dy = Some(row.y - py);
        }
        prev = Some((row.x, row.y));
    }
}

pub fn load_events_csv(path: &Path) -> eyre::Result<Vec<EventRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open events CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != ["t", "x", "y"] && actual != ["t", "x", "y", "dx", "dy"] {
        eyre::bail!(
            "events CSV must have headers 't,x,y' or 't,x,y,dx,dy', got: {}",
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<EventRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }
    fill_deltas(&mut rows);
    Ok(rows)
}

pub fn parse_events_jsonl(text: &str) -> eyre::Result<Vec<EventRow>> {
    let mut rows = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match serde_json::from_str::<EventRow>(line) {
            Ok(row) => rows.push(row),
            Err(e) => eyre::bail!("invalid JSONL line {}: {}", idx + 1, e),
        }
    }
    fill_deltas(&mut rows);
    Ok(rows)
}

pub fn load_events_jsonl(path: &Path) -> eyre::Result<Vec<EventRow>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read events JSONL {:?}: {}", path, e))?;
    parse_events_jsonl(&text)
}

/// Load events, choosing the format from the file extension.
pub fn load_events(path: &Path) -> eyre::Result<Vec<EventRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => load_events_csv(path),
        Some("jsonl" | "ndjson" | "json") => load_events_jsonl(path),
        _ => eyre::bail!("unsupported events file {:?}: expected .csv or .jsonl", path),
    }
}
