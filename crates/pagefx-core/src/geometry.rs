//! Small 2D geometry helpers.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A point or displacement in surface pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    pub fn midpoint(self, other: Vec2) -> Vec2 {
        (self + other) / 2.0
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

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

/// Width and height of a surface or viewport in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn area(self) -> f32 {
        self.width * self.height
    }

    pub fn center(self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether `point` lies in `[0, width) x [0, height)`.
    pub fn contains(self, point: Vec2) -> bool {
        (0.0..self.width).contains(&point.x) && (0.0..self.height).contains(&point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(Vec2::new(0.0, 0.0).distance(Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_negate() {
        assert_eq!(-Vec2::new(2.0, -3.5), Vec2::new(-2.0, 3.5));
        assert_eq!(Vec2::new(1.0, 1.0) + -Vec2::new(1.0, 1.0), Vec2::ZERO);
    }

    #[test]
    fn test_midpoint() {
        let mid = Vec2::new(10.0, 20.0).midpoint(Vec2::new(30.0, 0.0));
        assert_eq!(mid, Vec2::new(20.0, 10.0));
    }

    #[test]
    fn test_size_contains() {
        let size = Size::new(100.0, 50.0);
        assert!(size.contains(Vec2::new(0.0, 0.0)));
        assert!(size.contains(Vec2::new(99.9, 49.9)));
        assert!(!size.contains(Vec2::new(100.0, 10.0)));
        assert!(!size.contains(Vec2::new(10.0, -0.1)));
        assert_eq!(size.center(), Vec2::new(50.0, 25.0));
        assert_eq!(size.area(), 5000.0);
    }
}
