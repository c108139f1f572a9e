//! Plain geometry value types shared by the pipeline.
//!
//! Screen space is Y-up: `y = 0` is the bottom edge of the current display,
//! matching the engine the colliders are handed to. OS pixel rectangles are
//! Y-down and are converted by [`crate::resolver::to_screen_points`].

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing collider sizes between frames.
pub const SIZE_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A point with a synthetic depth component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn xy(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

impl std::ops::Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Div<f32> for Point3 {
    type Output = Point3;

    fn div(self, rhs: f32) -> Point3 {
        Point3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl std::ops::Mul<f32> for Point3 {
    type Output = Point3;

    fn mul(self, rhs: f32) -> Point3 {
        Point3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Axis-aligned rectangle in OS pixel coordinates (Y-down, edges inclusive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl WindowRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from an origin and a size, the shape most window APIs report.
    pub fn from_origin_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        Self {
            left: x,
            top: y,
            right: x.saturating_add(width),
            bottom: y.saturating_add(height),
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// The four corners of a window translated into Y-up screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenSpacePoints {
    pub top_left: Point3,
    pub top_right: Point3,
    pub bottom_right: Point3,
    pub bottom_left: Point3,
}

/// Axis-aligned box in world space, used for touch tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Point2,
    pub size: Point2,
}

impl Aabb {
    pub fn new(center: Point2, size: Point2) -> Self {
        Self { center, size }
    }

    pub fn min(&self) -> Point2 {
        Point2::new(
            self.center.x - self.size.x / 2.0,
            self.center.y - self.size.y / 2.0,
        )
    }

    pub fn max(&self) -> Point2 {
        Point2::new(
            self.center.x + self.size.x / 2.0,
            self.center.y + self.size.y / 2.0,
        )
    }

    /// Overlap test; boxes sharing only an edge count as touching.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x <= b_max.x && a_max.x >= b_min.x && a_min.y <= b_max.y && a_max.y >= b_min.y
    }
}
