//! Playback drivers: scrub-value mapping and fixed-rate frame stepping.
//!
//! Both resolve to absolute timestamps and go through [`Track::locate`]; they
//! hold no state beyond a shared handle to the track.

use crate::config::PlaybackCfg;
use crate::error::TrailError;
use crate::geometry::Point;
use crate::store::Track;
use crate::util::period_us;

/// Linear map from a slider-like value in `[0, range]` onto a track's time span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrubMap {
    range: u32,
}

impl Default for ScrubMap {
    fn default() -> Self {
        Self::new(PlaybackCfg::default().scrub_range)
    }
}

impl From<&PlaybackCfg> for ScrubMap {
    fn from(cfg: &PlaybackCfg) -> Self {
        Self::new(cfg.scrub_range)
    }
}

impl ScrubMap {
    /// A `range` of 0 is treated as 1.
    pub fn new(range: u32) -> Self {
        Self {
            range: range.max(1),
        }
    }

    pub fn range(&self) -> u32 {
        self.range
    }

    /// Timestamp for `value`, rounded to the nearest millisecond. Values outside
    /// `[0, range]` (and NaN, as 0) are clamped.
    pub fn to_time(&self, track: &Track, value: f64) -> Result<i64, TrailError> {
        let (Some(start), Some(end)) = (track.start_t(), track.end_t()) else {
            return Err(TrailError::NoData);
        };
        let range = f64::from(self.range);
        let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, range) };
        let span = (i128::from(end) - i128::from(start)) as f64;
        let offset = (v / range * span).round() as i128;
        let t = (i128::from(start) + offset).min(i128::from(end));
        Ok(i64::try_from(t).unwrap_or(end))
    }

    /// Scrub value for timestamp `t`, clamped to `[0, range]`.
    pub fn to_value(&self, track: &Track, t: i64) -> Result<f64, TrailError> {
        let (Some(start), Some(end)) = (track.start_t(), track.end_t()) else {
            return Err(TrailError::NoData);
        };
        let num = (i128::from(t) - i128::from(start)) as f64;
        let span = (i128::from(end) - i128::from(start)) as f64;
        let frac = crate::util::clamp01(num / span);
        Ok(frac * f64::from(self.range))
    }

    /// Scrub increment that advances playback by one frame at `fps`.
    pub fn step_per_frame(&self, track: &Track, fps: u32) -> Result<f64, TrailError> {
        if track.is_empty() {
            return Err(TrailError::NoData);
        }
        let frame_ms = period_us(fps) as f64 / 1000.0;
        let frames = track.duration_ms() as f64 / frame_ms;
        Ok(f64::from(self.range) / frames.max(1.0))
    }

    /// Position shown for scrub `value`.
    pub fn position(&self, track: &Track, value: f64) -> Result<(i64, Point), TrailError> {
        let t = self.to_time(track, value)?;
        track.locate(t).map(|l| (t, l.position))
    }
}

/// Frames of a track at a fixed rate, from its first to its last timestamp.
///
/// Frame `k` is at `start + floor(k * period_us / 1000)` ms; the final frame is
/// always exactly the track's end.
#[derive(Debug, Clone)]
pub struct Frames {
    track: Track,
    start: i64,
    end: i64,
    period_us: u64,
    k: u64,
    done: bool,
}

impl Frames {
    pub fn new(track: Track, fps: u32) -> Result<Self, TrailError> {
        let (Some(start), Some(end)) = (track.start_t(), track.end_t()) else {
            return Err(TrailError::NoData);
        };
        Ok(Self {
            track,
            start,
            end,
            period_us: period_us(fps),
            k: 0,
            done: false,
        })
    }

    fn time_of(&self, k: u64) -> i64 {
        let elapsed_ms = k.saturating_mul(self.period_us) / 1000;
        let elapsed_ms = i64::try_from(elapsed_ms).unwrap_or(i64::MAX);
        self.start.saturating_add(elapsed_ms).min(self.end)
    }
}

impl Iterator for Frames {
    type Item = (i64, Point);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let t = self.time_of(self.k);
        self.k += 1;
        if t >= self.end {
            self.done = true;
        }
        self.track.locate(t).ok().map(|l| (t, l.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{Anchor, CurveSegment};
    use crate::store::SegmentStore;

    fn track(t0: i64, t1: i64) -> Track {
        let a = |x: f64, t: i64| Anchor {
            x,
            y: 0.0,
            t,
            tangent: Point::ZERO,
        };
        let seg = CurveSegment::new(
            a(0.0, t0),
            a(30.0, t1),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
        )
        .unwrap();
        let mut store = SegmentStore::new();
        store.append(seg).unwrap();
        store.freeze()
    }

    #[test]
    fn scrub_maps_ends_and_rounds() {
        let tr = track(1000, 1100);
        let map = ScrubMap::default();
        assert_eq!(map.to_time(&tr, 0.0).unwrap(), 1000);
        assert_eq!(map.to_time(&tr, 10_000.0).unwrap(), 1100);
        assert_eq!(map.to_time(&tr, 5_000.0).unwrap(), 1050);
        // 0.0149 * 100 = 1.49 -> 1
        assert_eq!(map.to_time(&tr, 149.0).unwrap(), 1001);
        assert_eq!(map.to_time(&tr, 160.0).unwrap(), 1002);
        assert_eq!(map.to_time(&tr, -5.0).unwrap(), 1000);
        assert_eq!(map.to_time(&tr, 1e9).unwrap(), 1100);
        assert_eq!(map.to_value(&tr, 1050).unwrap(), 5_000.0);
    }

    #[test]
    fn scrub_midpoint_of_full_range_track() {
        let tr = track(-i64::MAX, i64::MAX);
        let map = ScrubMap::default();
        let mid = map.to_time(&tr, 5_000.0).unwrap();
        assert!(mid.unsigned_abs() < 4096, "midpoint was {mid}");
        assert_eq!(map.to_time(&tr, 0.0).unwrap(), -i64::MAX);
        assert_eq!(map.to_time(&tr, 10_000.0).unwrap(), i64::MAX);
        assert_eq!(map.to_value(&tr, 0).unwrap(), 5_000.0);
    }

    #[test]
    fn empty_track_is_no_data() {
        let empty = SegmentStore::new().freeze();
        let map = ScrubMap::new(100);
        assert_eq!(map.to_time(&empty, 1.0).unwrap_err(), TrailError::NoData);
        assert!(Frames::new(empty, 60).is_err());
    }

    #[test]
    fn frames_end_exactly_at_track_end() {
        let frames: Vec<_> = Frames::new(track(0, 50), 60).unwrap().collect();
        let times: Vec<i64> = frames.iter().map(|(t, _)| *t).collect();
        assert_eq!(times, vec![0, 16, 33, 49, 50]);
        assert_eq!(frames.last().unwrap().1, Point::new(30.0, 0.0));
    }

    #[test]
    fn one_frame_per_scrub_step() {
        let tr = track(0, 1000);
        let step = ScrubMap::new(1000).step_per_frame(&tr, 1).unwrap();
        assert_eq!(step, 1000.0);
    }
}
