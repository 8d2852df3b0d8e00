use crate::error::Error;
use ordered_float::NotNan;
use serde::Serialize;
use std::ops::{Add, Mul, Sub};

/// A 2D position in normalized frame (or screen) space.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Result<Self, Error> {
        let checked = |value: f32| {
            NotNan::new(value)
                .map(NotNan::into_inner)
                .map_err(|e| Error::ConstructNotNan(e, value))
        };
        Ok(Self::from_valid(checked(x)?, checked(y)?))
    }

    /// Caller guarantees neither coordinate is NaN.
    pub(crate) const fn from_valid(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean distance in the plane.
    pub fn distance(self, other: Self) -> f32 {
        let delta = other - self;
        delta.x.hypot(delta.y)
    }

    pub fn midpoint(self, other: Self) -> Self {
        (self + other) * 0.5
    }

    /// Flip horizontally so the point follows a user facing the camera.
    pub fn mirrored(self) -> Self {
        Self {
            x: 1.0 - self.x,
            y: self.y,
        }
    }

    pub fn clamped_unit(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }

    /// Largest per-axis difference to `other`.
    pub fn max_axis_delta(self, other: Self) -> f32 {
        let delta = other - self;
        delta.x.abs().max(delta.y.abs())
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.y
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_valid(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_valid(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Self;

    fn mul(self, scale: f32) -> Self {
        Self::from_valid(self.x * scale, self.y * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::Point;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn thumb_to_index_distance() {
        let thumb = Point::new(0.47, 0.35).unwrap();
        let index = Point::new(0.44, 0.39).unwrap();
        assert_approx_eq!(thumb.distance(index), 0.05);
        assert_approx_eq!(index.distance(thumb), 0.05);
        assert_eq!(thumb.distance(thumb), 0.0);
    }

    #[test]
    fn nan_is_rejected() {
        assert!(Point::new(f32::NAN, 0.5).is_err());
        assert!(Point::new(0.5, f32::NAN).is_err());
    }

    #[test]
    fn mirror_and_midpoint() {
        let a = Point::new(0.3, 0.4).unwrap();
        assert_approx_eq!(a.mirrored().x(), 0.7);
        assert_approx_eq!(a.mirrored().y(), 0.4);

        let m = a.midpoint(Point::new(0.5, 0.8).unwrap());
        assert_approx_eq!(m.x(), 0.4);
        assert_approx_eq!(m.y(), 0.6);
    }

    #[test]
    fn max_axis_delta_is_chebyshev() {
        let a = Point::new(0.1, 0.1).unwrap();
        let b = Point::new(0.115, 0.13).unwrap();
        assert_approx_eq!(a.max_axis_delta(b), 0.03);
    }
}
