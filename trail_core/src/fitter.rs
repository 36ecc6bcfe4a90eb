//! Tangent-based cubic fit of one stroke.
//!
//! The curve passes exactly through the first and last samples. Interior
//! control points are pushed along the velocity estimated from a reference
//! sample near each end:
//!
//! ```text
//! tangent_start = (ref_start - start) / (ref_start.t - start.t)
//! P1 = start + tangent_start * tension * (ref_start.t - start.t)
//! P2 = end   - tangent_end   * tension * (end.t - ref_end.t)
//! ```
//!
//! Only vector differences and time deltas are divided, never a spatial
//! coordinate, so vertical or stationary motion needs no special casing.

use crate::config::FitCfg;
use crate::error::TrailError;
use crate::geometry::Point;
use crate::sample::Sample;
use crate::segment::{Anchor, CurveSegment};

/// Distance (in samples) from each end to its reference sample.
#[inline]
pub fn reference_gap(len: usize, ref_divisor: usize) -> usize {
    (len / ref_divisor.max(1)).max(1).min(len.saturating_sub(1))
}

/// Velocity between `from` and `to`, plus the time span it was measured over.
#[inline]
fn velocity(from: &Sample, to: &Sample) -> (Point, f64) {
    let span = (i128::from(to.t) - i128::from(from.t)) as f64;
    ((to.position() - from.position()) / span, span)
}

/// Fit a cubic segment to an ordered stroke of at least two samples.
///
/// When a reference sample shares its timestamp with the boundary sample the
/// search walks inward on the same side; in the limit this reaches the
/// opposite end and the chord direction is used.
pub fn fit_stroke(stroke: &[Sample], cfg: &FitCfg) -> Result<CurveSegment, TrailError> {
    let (first, last) = match stroke {
        [first, .., last] => (first, last),
        _ => {
            return Err(TrailError::DegenerateStroke {
                samples: stroke.len(),
            });
        }
    };
    if first.t >= last.t {
        return Err(TrailError::ZeroDurationSegment { t: first.t });
    }

    let gap = reference_gap(stroke.len(), cfg.ref_divisor);

    // Inward from the start; the last sample always qualifies since first.t < last.t.
    let ref_start = stroke[gap..]
        .iter()
        .find(|s| s.t != first.t)
        .unwrap_or(last);
    let ref_end = stroke[..stroke.len() - gap]
        .iter()
        .rev()
        .find(|s| s.t != last.t)
        .unwrap_or(first);

    let (tangent_start, reach_start) = velocity(first, ref_start);
    let (tangent_end, reach_end) = velocity(ref_end, last);

    let p0 = first.position();
    let p3 = last.position();
    let control1 = p0 + tangent_start * (cfg.tension * reach_start);
    let control2 = p3 - tangent_end * (cfg.tension * reach_end);

    CurveSegment::new(
        Anchor {
            x: first.x,
            y: first.y,
            t: first.t,
            tangent: tangent_start,
        },
        Anchor {
            x: last.x,
            y: last.y,
            t: last.t,
            tangent: tangent_end,
        },
        control1,
        control2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::MotionEvent;

    fn stroke(points: &[(i64, f64, f64)]) -> Vec<Sample> {
        let mut out: Vec<Sample> = Vec::with_capacity(points.len());
        for &(t, x, y) in points {
            let s = Sample::from_event(&MotionEvent::at(t, x, y), out.last());
            out.push(s);
        }
        out
    }

    #[test]
    fn reference_gap_follows_length() {
        assert_eq!(reference_gap(2, 5), 1);
        assert_eq!(reference_gap(9, 5), 1);
        assert_eq!(reference_gap(10, 5), 2);
        assert_eq!(reference_gap(23, 5), 4);
        // divisor 1 would point past the end; stays inside the stroke
        assert_eq!(reference_gap(4, 1), 3);
    }

    #[test]
    fn rejects_short_strokes() {
        let one = stroke(&[(0, 0.0, 0.0)]);
        assert_eq!(
            fit_stroke(&one, &FitCfg::default()).unwrap_err(),
            TrailError::DegenerateStroke { samples: 1 }
        );
        assert_eq!(
            fit_stroke(&[], &FitCfg::default()).unwrap_err(),
            TrailError::DegenerateStroke { samples: 0 }
        );
    }

    #[test]
    fn two_samples_use_chord_for_both_tangents() {
        let s = stroke(&[(0, 0.0, 0.0), (10, 10.0, 0.0)]);
        let seg = fit_stroke(&s, &FitCfg::default()).unwrap();
        assert_eq!(seg.start().tangent, Point::new(1.0, 0.0));
        assert_eq!(seg.end().tangent, Point::new(1.0, 0.0));
        assert_eq!(seg.control1(), Point::new(20.0, 0.0));
        assert_eq!(seg.control2(), Point::new(-10.0, 0.0));
    }

    #[test]
    fn control_points_follow_boundary_motion() {
        // up first, then right at the end
        let s = stroke(&[
            (0, 0.0, 0.0),
            (10, 0.0, 10.0),
            (20, 10.0, 20.0),
            (30, 20.0, 20.0),
        ]);
        let seg = fit_stroke(&s, &FitCfg::default()).unwrap();
        assert_eq!(seg.control1(), Point::new(0.0, 20.0));
        assert_eq!(seg.control2(), Point::new(0.0, 20.0));
        assert_eq!(seg.start().tangent, Point::new(0.0, 1.0));
        assert_eq!(seg.end().tangent, Point::new(1.0, 0.0));
    }

    #[test]
    fn tension_scales_reach() {
        let s = stroke(&[(0, 0.0, 0.0), (5, 5.0, 0.0), (10, 10.0, 0.0)]);
        let cfg = FitCfg {
            tension: 1.0,
            ..FitCfg::default()
        };
        let seg = fit_stroke(&s, &cfg).unwrap();
        assert_eq!(seg.control1(), Point::new(5.0, 0.0));
        assert_eq!(seg.control2(), Point::new(5.0, 0.0));
    }

    #[test]
    fn repeated_boundary_timestamps_walk_inward() {
        // Built directly: the recorder never produces equal timestamps.
        let mk = |t: i64, x: f64| Sample {
            t,
            x,
            y: 0.0,
            dx: 0.0,
            dy: 0.0,
            dt: None,
        };
        let s = vec![mk(0, 0.0), mk(0, 1.0), mk(10, 4.0), mk(20, 8.0), mk(20, 9.0)];
        let seg = fit_stroke(&s, &FitCfg::default()).unwrap();
        assert_eq!(seg.start().tangent, Point::new(0.4, 0.0));
        assert_eq!(seg.end().tangent, Point::new(0.5, 0.0));
    }

    #[test]
    fn equal_end_timestamps_are_zero_duration() {
        let mk = |x: f64| Sample {
            t: 7,
            x,
            y: 0.0,
            dx: 0.0,
            dy: 0.0,
            dt: None,
        };
        let err = fit_stroke(&[mk(0.0), mk(1.0)], &FitCfg::default()).unwrap_err();
        assert_eq!(err, TrailError::ZeroDurationSegment { t: 7 });
    }

    #[test]
    fn reference_gap_uses_later_samples_for_long_strokes() {
        // 10 samples -> gap 2: start reference is samples[2], end reference samples[7]
        let pts: Vec<(i64, f64, f64)> = (0..10)
            .map(|i| (i * 10, (i * i) as f64, 0.0))
            .collect();
        let s = stroke(&pts);
        let seg = fit_stroke(&s, &FitCfg::default()).unwrap();
        assert_eq!(seg.start().tangent, Point::new(4.0 / 20.0, 0.0));
        assert_eq!(seg.end().tangent, Point::new((81.0 - 49.0) / 20.0, 0.0));
    }
}
