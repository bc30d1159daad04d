use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// 2D vector with f32 coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Create a new vector
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a zero vector
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Return the component-wise maximum of two vectors
    pub fn max(self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }

    /// Swap the x and y components
    pub fn transpose(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// 2D point with f32 coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Point at `radius` from `self` in the direction of `angle` (radians)
    pub fn polar_offset(self, angle: f32, radius: f32) -> Self {
        Self {
            x: self.x + angle.cos() * radius,
            y: self.y + angle.sin() * radius,
        }
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, rhs: Vec2) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    fn sub(self, rhs: Vec2) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Smallest box containing every `(top_left, size)` rectangle, or a
    /// zero box when there are none
    pub fn from_rects(rects: impl IntoIterator<Item = (Point, Vec2)>) -> Self {
        let mut rects = rects.into_iter();
        let Some((first, size)) = rects.next() else {
            return Self::default();
        };

        let mut bounds = Self {
            min: first,
            max: first + size,
        };
        for (pos, size) in rects {
            bounds.min.x = bounds.min.x.min(pos.x);
            bounds.min.y = bounds.min.y.min(pos.y);
            bounds.max.x = bounds.max.x.max(pos.x + size.x);
            bounds.max.y = bounds.max.y.max(pos.y + size.y);
        }
        bounds
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn bounds_cover_all_rects() {
        let bounds = Bounds::from_rects([
            (Point::new(10.0, 20.0), Vec2::new(100.0, 50.0)),
            (Point::new(-30.0, 40.0), Vec2::new(20.0, 60.0)),
        ]);

        assert_eq!(bounds.min, Point::new(-30.0, 20.0));
        assert_eq!(bounds.max, Point::new(110.0, 100.0));
        assert_eq!(bounds.width(), 140.0);
        assert_eq!(bounds.height(), 80.0);
    }

    #[test]
    fn empty_bounds_are_zero() {
        let bounds = Bounds::from_rects(std::iter::empty());
        assert_eq!(bounds, Bounds::default());
        assert_eq!(bounds.width(), 0.0);
    }

    #[test]
    fn polar_offset_quarter_turn() {
        let p = Point::new(5.0, 5.0).polar_offset(std::f32::consts::FRAC_PI_2, 10.0);
        assert!((p.x - 5.0).abs() < 1e-4);
        assert!((p.y - 15.0).abs() < 1e-4);
    }
}
