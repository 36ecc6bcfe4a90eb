//! Time-to-position lookup over a frozen track.
//!
//! Segments are searched by start time (`partition_point`, O(log n)). Ranges are
//! start-inclusive and end-exclusive. A timestamp inside an idle gap holds the
//! preceding segment at its end; timestamps before the first or after the last
//! segment clamp to the nearest boundary.

use crate::error::TrailError;
use crate::geometry::Point;
use crate::segment::CurveSegment;
use crate::store::Track;

/// Result of a lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located {
    /// Index of the selected segment.
    pub index: usize,
    /// Curve parameter in `[0, 1]`.
    pub progress: f64,
    /// The query lay outside the segment's `[start, end)` range and was clamped.
    pub held: bool,
    pub position: Point,
}

fn located(index: usize, seg: &CurveSegment, progress: f64, held: bool) -> Located {
    Located {
        index,
        progress,
        held,
        position: seg.point_at(progress),
    }
}

/// Locate `t` within an ordered, non-overlapping segment slice.
pub fn locate_in(segments: &[CurveSegment], t: i64) -> Result<Located, TrailError> {
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return Err(TrailError::NoData);
    };
    if t <= first.start().t {
        return Ok(located(0, first, 0.0, t < first.start().t));
    }
    let last_index = segments.len() - 1;
    if t >= last.end().t {
        return Ok(located(last_index, last, 1.0, true));
    }

    // first.start < t, so at least one start time is <= t
    let index = segments.partition_point(|s| s.start().t <= t) - 1;
    let seg = &segments[index];
    if t >= seg.end().t {
        return Ok(located(index, seg, 1.0, true));
    }
    Ok(located(index, seg, seg.progress_at(t), false))
}

/// Read-only query side of a recording.
///
/// Segments are attached once, either through [`Locator::new`] or a single
/// [`Locator::set_segments`] call after recording stops.
#[derive(Debug, Clone, Default)]
pub struct Locator {
    track: Option<Track>,
}

impl Locator {
    pub fn new(track: Track) -> Self {
        Self { track: Some(track) }
    }

    pub fn set_segments(&mut self, track: Track) -> Result<(), TrailError> {
        if self.track.is_some() {
            return Err(TrailError::State("locator segments already set".into()));
        }
        tracing::debug!(segments = track.len(), "locator segments set");
        self.track = Some(track);
        Ok(())
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    /// Find the segment for `t`. Fails with `NoData` when nothing is attached
    /// or the track is empty.
    pub fn locate(&self, t: i64) -> Result<Located, TrailError> {
        match &self.track {
            Some(track) => track.locate(t),
            None => Err(TrailError::NoData),
        }
    }

    pub fn position_at(&self, t: i64) -> Result<Point, TrailError> {
        self.locate(t).map(|l| l.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Anchor;
    use crate::store::SegmentStore;

    fn line(t0: i64, t1: i64, x0: f64, x1: f64) -> CurveSegment {
        let a = |x: f64, t: i64| Anchor {
            x,
            y: 0.0,
            t,
            tangent: Point::ZERO,
        };
        // evenly spaced control points: x(u) is linear in u
        let third = (x1 - x0) / 3.0;
        CurveSegment::new(
            a(x0, t0),
            a(x1, t1),
            Point::new(x0 + third, 0.0),
            Point::new(x1 - third, 0.0),
        )
        .unwrap()
    }

    fn track() -> Track {
        let mut store = SegmentStore::new();
        store.append(line(0, 10, 0.0, 10.0)).unwrap();
        store.append(line(10, 20, 10.0, 30.0)).unwrap();
        store.append(line(40, 50, 100.0, 200.0)).unwrap();
        store.freeze()
    }

    #[test]
    fn empty_and_unset_are_no_data() {
        assert_eq!(Locator::default().locate(0).unwrap_err(), TrailError::NoData);
        let empty = Locator::new(SegmentStore::new().freeze());
        assert_eq!(empty.position_at(5).unwrap_err(), TrailError::NoData);
    }

    #[test]
    fn shared_boundary_belongs_to_later_segment() {
        let loc = Locator::new(track());
        let l = loc.locate(10).unwrap();
        assert_eq!((l.index, l.progress, l.held), (1, 0.0, false));
        assert_eq!(l.position, Point::new(10.0, 0.0));
    }

    #[test]
    fn gap_holds_previous_end() {
        let loc = Locator::new(track());
        for t in [20, 21, 39] {
            let l = loc.locate(t).unwrap();
            assert_eq!((l.index, l.progress, l.held), (1, 1.0, true));
            assert_eq!(l.position, Point::new(30.0, 0.0));
        }
        let l = loc.locate(40).unwrap();
        assert_eq!((l.index, l.held), (2, false));
        assert_eq!(l.position, Point::new(100.0, 0.0));
    }

    #[test]
    fn clamps_outside_recorded_span() {
        let loc = Locator::new(track());
        let before = loc.locate(i64::MIN).unwrap();
        assert_eq!((before.index, before.progress, before.held), (0, 0.0, true));
        let after = loc.locate(i64::MAX).unwrap();
        assert_eq!((after.index, after.progress), (2, 1.0));
        assert_eq!(after.position, Point::new(200.0, 0.0));
    }

    #[test]
    fn interior_progress_is_linear_in_time() {
        let l = Locator::new(track()).locate(45).unwrap();
        assert_eq!(l.progress, 0.5);
        assert!((l.position.x - 150.0).abs() < 1e-9);
    }

    #[test]
    fn segments_can_only_be_set_once() {
        let mut loc = Locator::default();
        loc.set_segments(track()).unwrap();
        let err = loc.set_segments(track()).unwrap_err();
        assert!(matches!(err, TrailError::State(_)));
        assert_eq!(loc.track().map(Track::len), Some(3));
    }
}
