//! Raw motion events and the immutable samples built from them.

use crate::geometry::Point;

/// One pointer observation as delivered by the host event source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionEvent {
    /// Monotonic timestamp in milliseconds.
    pub t: i64,
    /// Absolute position.
    pub x: f64,
    pub y: f64,
    /// Movement reported by the source since its previous event.
    pub dx: f64,
    pub dy: f64,
}

impl MotionEvent {
    /// Event with deltas left at zero.
    pub const fn at(t: i64, x: f64, y: f64) -> Self {
        Self {
            t,
            x,
            y,
            dx: 0.0,
            dy: 0.0,
        }
    }
}

/// An accepted observation inside a recording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t: i64,
    pub x: f64,
    pub y: f64,
    /// Position delta since the previous sample; 0 for the first one.
    pub dx: f64,
    pub dy: f64,
    /// Time since the previous sample; `None` for the first sample of a recording.
    pub dt: Option<i64>,
}

impl Sample {
    pub fn from_event(ev: &MotionEvent, prev: Option<&Sample>) -> Self {
        match prev {
            Some(p) => Self {
                t: ev.t,
                x: ev.x,
                y: ev.y,
                dx: ev.dx,
                dy: ev.dy,
                dt: Some(ev.t.saturating_sub(p.t)),
            },
            None => Self {
                t: ev.t,
                x: ev.x,
                y: ev.y,
                dx: 0.0,
                dy: 0.0,
                dt: None,
            },
        }
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Length of the step `(dx, dy)`.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Step length per millisecond; `None` without a previous sample.
    pub fn speed(&self) -> Option<f64> {
        match self.dt {
            Some(dt) if dt > 0 => Some(self.distance() / dt as f64),
            _ => None,
        }
    }

    /// Direction of the step in radians, `atan2(dy, dx)`.
    #[inline]
    pub fn heading(&self) -> f64 {
        self.dy.atan2(self.dx)
    }
}
