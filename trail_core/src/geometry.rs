//! 2D vector helpers and cubic Bézier evaluation.
//!
//! Curves are evaluated per axis with the Bernstein basis
//! `B(u) = (1-u)^3 P0 + 3(1-u)^2 u P1 + 3(1-u) u^2 P2 + u^3 P3`,
//! which reproduces `P0` at `u = 0` and `P3` at `u = 1` without round-off.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A position or a displacement in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;
    #[inline]
    fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

impl Div<f64> for Point {
    type Output = Self;
    #[inline]
    fn div(self, k: f64) -> Self {
        Self::new(self.x / k, self.y / k)
    }
}

impl Neg for Point {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// One axis of a cubic Bézier at parameter `u`.
#[inline]
pub fn cubic_bezier_1d(u: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    // Endpoints bypass the blend so overflowed control points cannot leak NaN.
    if u == 0.0 {
        return p0;
    }
    if u == 1.0 {
        return p3;
    }
    let mu = 1.0 - u;
    mu * mu * mu * p0 + 3.0 * mu * mu * u * p1 + 3.0 * mu * u * u * p2 + u * u * u * p3
}

/// Evaluate a cubic Bézier at `u` (not clamped).
#[inline]
pub fn cubic_bezier(u: f64, p: &[Point; 4]) -> Point {
    Point::new(
        cubic_bezier_1d(u, p[0].x, p[1].x, p[2].x, p[3].x),
        cubic_bezier_1d(u, p[0].y, p[1].y, p[2].y, p[3].y),
    )
}

/// First derivative `dB/du` of a cubic Bézier.
#[inline]
pub fn cubic_derivative(u: f64, p: &[Point; 4]) -> Point {
    let mu = 1.0 - u;
    (p[1] - p[0]) * (3.0 * mu * mu) + (p[2] - p[1]) * (6.0 * mu * u) + (p[3] - p[2]) * (3.0 * u * u)
}
