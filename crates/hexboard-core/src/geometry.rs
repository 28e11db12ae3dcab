//! Planar vector helpers used by the board layout.
//!
//! Everything here is pure arithmetic on `(x, y)` pairs. The board lives in
//! the z = 0 plane with `y` pointing "north", so a positive angle turns
//! counter-clockwise from the east axis.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Tolerance used when comparing resolved floating-point positions
pub const EPSILON: f64 = 1e-9;

/// A point or offset in the board plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The origin / zero offset
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Vec2) -> f64 {
        (other - self).length()
    }

    /// Whether two points coincide within [`EPSILON`]
    pub fn approx_eq(self, other: Vec2) -> bool {
        self.distance_to(other) < EPSILON
    }

    /// Four-quadrant angle of this vector in radians, in `(-π, π]`.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Midpoint between two points
    pub fn midpoint(self, other: Vec2) -> Vec2 {
        (self + other) * 0.5
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, k: f64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Sum for Vec2 {
    fn sum<I: Iterator<Item = Vec2>>(iter: I) -> Vec2 {
        iter.fold(Vec2::ZERO, Add::add)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vec2::new(x, y)
    }
}

/// Move `point` by `offset`.
pub fn translate(point: Vec2, offset: Vec2) -> Vec2 {
    point + offset
}

/// Sum an ordered sequence of offsets. An empty sequence yields [`Vec2::ZERO`].
pub fn compose_translations<I>(offsets: I) -> Vec2
where
    I: IntoIterator<Item = Vec2>,
{
    offsets.into_iter().sum()
}

/// Unit vector pointing at `angle` radians.
pub fn polar_to_cartesian(angle: f64) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of `v` computed as `atan(y / x)`.
///
/// This only distinguishes the right half-plane: a vector with negative `x`
/// gets the angle of its mirror image through the origin, so `(-1, 0)`
/// and `(1, 0)` both map to `0`. Vertical vectors map to `±π/2` by the sign
/// of `y`, with `y == 0` counted as positive.
///
/// Use [`Vec2::angle`] for the true four-quadrant angle.
pub fn cartesian_to_polar(v: Vec2) -> f64 {
    if v.x == 0.0 {
        if v.y >= 0.0 {
            FRAC_PI_2
        } else {
            -FRAC_PI_2
        }
    } else {
        (v.y / v.x).atan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_compose_empty_is_zero() {
        assert_eq!(compose_translations(Vec::new()), Vec2::ZERO);
    }

    #[test]
    fn test_compose_single_is_identity() {
        let v = Vec2::new(1.5, -0.25);
        assert_eq!(compose_translations([v]), v);
    }

    #[test]
    fn test_compose_is_order_independent() {
        let a = Vec2::new(1.5, 0.866);
        let b = Vec2::new(0.0, -1.732);
        let c = Vec2::new(-1.5, 0.866);

        let abc = compose_translations([a, b, c]);
        let cab = compose_translations([c, a, b]);
        let nested = translate(translate(a, b), c);

        assert!(abc.approx_eq(cab));
        assert!(abc.approx_eq(nested));
    }

    #[test]
    fn test_polar_round_trip_right_half_plane() {
        for angle in [-1.2, -0.3, 0.0, 0.7, 1.4] {
            let v = polar_to_cartesian(angle);
            assert!((v.length() - 1.0).abs() < EPSILON);
            assert!((cartesian_to_polar(v) - angle).abs() < EPSILON);
        }
    }

    #[test]
    fn test_cartesian_to_polar_vertical() {
        assert_eq!(cartesian_to_polar(Vec2::new(0.0, 5.0)), FRAC_PI_2);
        assert_eq!(cartesian_to_polar(Vec2::new(0.0, -5.0)), -FRAC_PI_2);
        assert_eq!(cartesian_to_polar(Vec2::ZERO), FRAC_PI_2);
    }

    #[test]
    fn test_cartesian_to_polar_mirrors_left_half_plane() {
        // Known approximation: the left half-plane folds onto the right one.
        assert_eq!(
            cartesian_to_polar(Vec2::new(-1.0, 0.0)),
            cartesian_to_polar(Vec2::new(1.0, 0.0))
        );
        assert_eq!(cartesian_to_polar(Vec2::new(1.0, 0.0)), 0.0);
    }

    #[test]
    fn test_angle_is_four_quadrant() {
        assert!((Vec2::new(-1.0, 0.0).angle() - PI).abs() < EPSILON);
        assert!((Vec2::new(-1.0, -1.0).angle() + 3.0 * PI / 4.0).abs() < EPSILON);
        assert!((Vec2::new(0.0, 5.0).angle() - FRAC_PI_2).abs() < EPSILON);
    }
}
