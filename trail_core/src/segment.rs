//! Fitted cubic segments.
//!
//! A `CurveSegment` is built once by the fitter and never mutated. Its public
//! surface is read-only; deserialization re-checks the `start.t < end.t` rule.

use serde::{Deserialize, Serialize};

use crate::error::TrailError;
use crate::geometry::{Point, cubic_bezier, cubic_derivative};
use crate::util::clamp01;

/// A boundary of a segment: where and when it starts or ends, plus the
/// velocity (units per ms) estimated from the samples next to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
    pub t: i64,
    pub tangent: Point,
}

impl Anchor {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SegmentFields")]
pub struct CurveSegment {
    start: Anchor,
    end: Anchor,
    control1: Point,
    control2: Point,
}

#[derive(Deserialize)]
struct SegmentFields {
    start: Anchor,
    end: Anchor,
    control1: Point,
    control2: Point,
}

impl TryFrom<SegmentFields> for CurveSegment {
    type Error = TrailError;

    fn try_from(f: SegmentFields) -> Result<Self, Self::Error> {
        Self::new(f.start, f.end, f.control1, f.control2)
    }
}

impl CurveSegment {
    /// Assemble a segment; fails when the time range is empty or reversed.
    pub fn new(
        start: Anchor,
        end: Anchor,
        control1: Point,
        control2: Point,
    ) -> Result<Self, TrailError> {
        if start.t >= end.t {
            return Err(TrailError::ZeroDurationSegment { t: start.t });
        }
        Ok(Self {
            start,
            end,
            control1,
            control2,
        })
    }

    pub fn start(&self) -> &Anchor {
        &self.start
    }

    pub fn end(&self) -> &Anchor {
        &self.end
    }

    pub fn control1(&self) -> Point {
        self.control1
    }

    pub fn control2(&self) -> Point {
        self.control2
    }

    /// `[P0, P1, P2, P3]`.
    pub fn control_points(&self) -> [Point; 4] {
        [
            self.start.position(),
            self.control1,
            self.control2,
            self.end.position(),
        ]
    }

    /// Always > 0; saturates at `i64::MAX`.
    pub fn duration_ms(&self) -> i64 {
        self.end.t.saturating_sub(self.start.t)
    }

    /// Whether `t` lies in `[start.t, end.t)`.
    pub fn contains(&self, t: i64) -> bool {
        self.start.t <= t && t < self.end.t
    }

    /// Fraction of the time range covered at `t`, clamped to `[0, 1]`.
    pub fn progress_at(&self, t: i64) -> f64 {
        // i128 keeps the subtraction exact for any pair of i64 timestamps.
        let num = (i128::from(t) - i128::from(self.start.t)) as f64;
        let den = self.duration_ms() as f64;
        clamp01(num / den)
    }

    /// Curve point at parameter `u` (clamped to `[0, 1]`).
    pub fn point_at(&self, u: f64) -> Point {
        cubic_bezier(clamp01(u), &self.control_points())
    }

    /// Interpolated position at timestamp `t`; clamps outside the segment.
    pub fn position_at(&self, t: i64) -> Point {
        self.point_at(self.progress_at(t))
    }

    /// Curve derivative with respect to the parameter at `u`.
    pub fn tangent_at(&self, u: f64) -> Point {
        cubic_derivative(clamp01(u), &self.control_points())
    }

    /// Straight-line distance from start to end.
    pub fn chord_length(&self) -> f64 {
        (self.end.position() - self.start.position()).length()
    }

    /// Bounding box of the control polygon as `(min, max)`; contains the curve.
    pub fn bounds(&self) -> (Point, Point) {
        let p = self.control_points();
        p[1..]
            .iter()
            .fold((p[0], p[0]), |(lo, hi), q| (lo.min(*q), hi.max(*q)))
    }
}
