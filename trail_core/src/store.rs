//! Append-only segment storage and its frozen, shareable form.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::TrailError;
use crate::locator::{Located, locate_in};
use crate::segment::CurveSegment;

/// Ordered segments of one recording, grown by the recorder.
///
/// Appends are checked: a segment may not start before the previous one ends.
#[derive(Debug, Clone, Default)]
pub struct SegmentStore {
    segments: Vec<CurveSegment>,
}

fn check_order(prev: &CurveSegment, next: &CurveSegment) -> Result<(), TrailError> {
    if next.start().t < prev.end().t {
        return Err(TrailError::Overlap {
            prev_end: prev.end().t,
            start: next.start().t,
        });
    }
    Ok(())
}

impl SegmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment, returning its index.
    pub fn append(&mut self, segment: CurveSegment) -> Result<usize, TrailError> {
        if let Some(prev) = self.segments.last() {
            check_order(prev, &segment)?;
        }
        self.segments.push(segment);
        Ok(self.segments.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CurveSegment> {
        self.segments.get(index)
    }

    pub fn last(&self) -> Option<&CurveSegment> {
        self.segments.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CurveSegment> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[CurveSegment] {
        &self.segments
    }

    /// End the recording phase. The returned track can no longer grow.
    pub fn freeze(self) -> Track {
        Track {
            segments: self.segments.into(),
        }
    }
}

impl<'a> IntoIterator for &'a SegmentStore {
    type Item = &'a CurveSegment;
    type IntoIter = std::slice::Iter<'a, CurveSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Immutable segment sequence handed to playback.
///
/// Clones share storage. Serializes as a JSON array of segments; deserializing
/// re-checks ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<CurveSegment>", try_from = "Vec<CurveSegment>")]
pub struct Track {
    segments: Arc<[CurveSegment]>,
}

impl TryFrom<Vec<CurveSegment>> for Track {
    type Error = TrailError;

    fn try_from(segments: Vec<CurveSegment>) -> Result<Self, Self::Error> {
        for pair in segments.windows(2) {
            check_order(&pair[0], &pair[1])?;
        }
        Ok(Self {
            segments: segments.into(),
        })
    }
}

impl From<Track> for Vec<CurveSegment> {
    fn from(track: Track) -> Self {
        track.segments.to_vec()
    }
}

impl Track {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CurveSegment> {
        self.segments.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CurveSegment> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[CurveSegment] {
        &self.segments
    }

    /// Start of the first segment.
    pub fn start_t(&self) -> Option<i64> {
        self.segments.first().map(|s| s.start().t)
    }

    /// End of the last segment.
    pub fn end_t(&self) -> Option<i64> {
        self.segments.last().map(|s| s.end().t)
    }

    /// Total span including idle gaps; 0 when empty.
    pub fn duration_ms(&self) -> i64 {
        match (self.start_t(), self.end_t()) {
            (Some(a), Some(b)) => b.saturating_sub(a),
            _ => 0,
        }
    }

    pub fn locate(&self, t: i64) -> Result<Located, TrailError> {
        locate_in(&self.segments, t)
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a CurveSegment;
    type IntoIter = std::slice::Iter<'a, CurveSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::segment::Anchor;

    fn seg(t0: i64, t1: i64) -> CurveSegment {
        let a = |t: i64| Anchor {
            x: t as f64,
            y: 0.0,
            t,
            tangent: Point::new(1.0, 0.0),
        };
        CurveSegment::new(
            a(t0),
            a(t1),
            Point::new(t0 as f64, 0.0),
            Point::new(t1 as f64, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn append_returns_indices_and_allows_touching_segments() {
        let mut store = SegmentStore::new();
        assert_eq!(store.append(seg(0, 10)).unwrap(), 0);
        assert_eq!(store.append(seg(10, 20)).unwrap(), 1);
        assert_eq!(store.append(seg(50, 60)).unwrap(), 2);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn append_rejects_overlap() {
        let mut store = SegmentStore::new();
        store.append(seg(0, 10)).unwrap();
        let err = store.append(seg(9, 20)).unwrap_err();
        assert_eq!(err, TrailError::Overlap { prev_end: 10, start: 9 });
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn frozen_track_reports_span() {
        let mut store = SegmentStore::new();
        store.append(seg(5, 10)).unwrap();
        store.append(seg(40, 70)).unwrap();
        let track = store.freeze();
        assert_eq!(track.start_t(), Some(5));
        assert_eq!(track.end_t(), Some(70));
        assert_eq!(track.duration_ms(), 65);
        let shared = track.clone();
        assert_eq!(shared.len(), 2);
    }

    #[test]
    fn empty_track_has_no_span() {
        let track = SegmentStore::new().freeze();
        assert!(track.is_empty());
        assert_eq!(track.start_t(), None);
        assert_eq!(track.duration_ms(), 0);
        assert_eq!(track.locate(0).unwrap_err(), TrailError::NoData);
    }

    #[test]
    fn track_from_unordered_vec_is_rejected() {
        let err = Track::try_from(vec![seg(20, 30), seg(0, 10)]).unwrap_err();
        assert!(matches!(err, TrailError::Overlap { .. }));
    }

    #[test]
    fn track_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Track>();
    }
}
