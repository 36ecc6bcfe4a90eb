//! Command bodies: replay an event file through the recorder, then query or
//! play back the resulting track.

use std::path::Path;

use eyre::WrapErr;
use serde_json::json;
use trail_core::{
    DeadlineTimer, FeedStatus, FitCfg, Frames, MotionEvent, PlaybackCfg, Recorder, RecorderCfg,
    RecorderStats, ScrubMap, Track,
};
use trail_traits::clock::ManualClock;

/// Input the user can fix: a bad events file or config.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid events file {0}")]
    Events(String),
    #[error("invalid configuration {0}")]
    Config(String),
}

/// Load, validate and convert the config file.
pub fn load_config(path: &Path) -> eyre::Result<trail_config::Config> {
    let cfg = trail_config::load_or_default(path)
        .wrap_err_with(|| InputError::Config(path.display().to_string()))?;
    cfg.validate()
        .wrap_err_with(|| InputError::Config(path.display().to_string()))?;
    Ok(cfg)
}

/// Feed recorded events through a recorder whose finalize timer runs on a
/// manual clock set to each event's time, so replays segment exactly like the
/// live capture would have.
pub fn record_events(
    cfg: &trail_config::Config,
    events: &[MotionEvent],
) -> eyre::Result<(Track, RecorderStats)> {
    let clock = ManualClock::new();
    let mut rec = Recorder::builder()
        .with_recorder_cfg(RecorderCfg::from(&cfg.recorder))
        .with_fit_cfg(FitCfg::from(&cfg.fit))
        .with_timer(DeadlineTimer::new(clock.clone()))
        .build()?;

    let t0 = events.first().map_or(0, |e| e.t);
    rec.start();
    for ev in events {
        clock.set_ms(ev.t.saturating_sub(t0));
        rec.poll();
        if let FeedStatus::Rejected(e) = rec.feed(ev) {
            tracing::debug!(error = %e, "event skipped");
        }
    }
    rec.stop();
    let stats = rec.stats();
    let track = rec.into_track()?;
    tracing::info!(
        segments = track.len(),
        accepted = stats.accepted,
        rejected = stats.rejected,
        discarded = stats.discarded,
        "events recorded"
    );
    Ok((track, stats))
}

pub fn load_track(cfg: &trail_config::Config, input: &Path) -> eyre::Result<Track> {
    let rows = trail_config::load_events(input)
        .wrap_err_with(|| InputError::Events(input.display().to_string()))?;
    let events: Vec<MotionEvent> = rows.iter().map(MotionEvent::from).collect();
    record_events(cfg, &events).map(|(track, _)| track)
}

pub fn run_fit(
    cfg: &trail_config::Config,
    input: &Path,
    output: Option<&Path>,
    json: bool,
) -> eyre::Result<()> {
    let track = load_track(cfg, input)?;
    let text = serde_json::to_string_pretty(&track)?;
    match output {
        Some(path) => {
            std::fs::write(path, text).wrap_err_with(|| format!("write track {path:?}"))?;
            if json {
                println!(
                    "{}",
                    json!({ "segments": track.len(), "output": path.display().to_string() })
                );
            } else {
                println!("wrote {} segment(s) to {}", track.len(), path.display());
            }
        }
        None => println!("{text}"),
    }
    Ok(())
}

pub fn run_locate(
    cfg: &trail_config::Config,
    input: &Path,
    at: &[i64],
    json: bool,
) -> eyre::Result<()> {
    let track = load_track(cfg, input)?;
    for &t in at {
        let l = track.locate(t)?;
        if json {
            println!(
                "{}",
                json!({
                    "t": t,
                    "x": l.position.x,
                    "y": l.position.y,
                    "segment": l.index,
                    "progress": l.progress,
                    "held": l.held,
                })
            );
        } else {
            let hold = if l.held { " (held)" } else { "" };
            println!(
                "t={t} x={:.3} y={:.3} segment={} progress={:.4}{hold}",
                l.position.x, l.position.y, l.index, l.progress
            );
        }
    }
    Ok(())
}

pub fn run_replay(
    cfg: &trail_config::Config,
    input: &Path,
    fps: Option<u32>,
) -> eyre::Result<()> {
    let playback = PlaybackCfg::from(&cfg.playback);
    let fps = fps.unwrap_or(playback.fps);
    if fps == 0 {
        eyre::bail!(InputError::Config("--fps must be >= 1".into()));
    }
    let track = load_track(cfg, input)?;
    let frames = Frames::new(track, fps)?;
    for (t, p) in frames {
        println!("{}", json!({ "t": t, "x": p.x, "y": p.y }));
    }
    Ok(())
}

pub fn run_scrub(
    cfg: &trail_config::Config,
    input: &Path,
    value: f64,
    json: bool,
) -> eyre::Result<()> {
    let map = ScrubMap::from(&PlaybackCfg::from(&cfg.playback));
    let track = load_track(cfg, input)?;
    let (t, p) = map.position(&track, value)?;
    if json {
        println!("{}", json!({ "value": value, "t": t, "x": p.x, "y": p.y }));
    } else {
        println!("value={value} t={t} x={:.3} y={:.3}", p.x, p.y);
    }
    Ok(())
}

/// Fit a short arc and check the track reproduces its endpoints exactly.
pub fn self_check(cfg: &trail_config::Config, json: bool) -> eyre::Result<()> {
    let events = [
        MotionEvent::at(0, 0.0, 0.0),
        MotionEvent::at(5, 10.0, 5.0),
        MotionEvent::at(10, 20.0, 8.0),
        MotionEvent::at(15, 30.0, 9.0),
        MotionEvent::at(50, 40.0, 10.0),
    ];
    let (track, _) = record_events(cfg, &events)?;
    let Some(seg) = track.get(0) else {
        eyre::bail!("self-check: no segment was fitted");
    };
    let start = track.locate(seg.start().t)?.position;
    let end = track.locate(seg.end().t)?.position;
    if start != seg.start().position() || end != seg.end().position() {
        eyre::bail!("self-check: endpoints not reproduced ({start:?}, {end:?})");
    }
    if json {
        println!("{}", json!({ "status": "ok", "segments": track.len() }));
    } else {
        println!("ok: {} segment(s), endpoints exact", track.len());
    }
    Ok(())
}
