use serde::Serialize;

use super::types::{BoundCoordinates, COLLIDER_OFFSET, DEBUG_LINE_Z_OFFSET};
use crate::geometry::{Aabb, Point2, Point3, SIZE_EPSILON};
use crate::pool::Poolable;
use crate::resolver::Segment;
use crate::transform::CoordinateTransform;

/// A thin box collider laid along a segment.
///
/// Horizontal boxes act as one-way platforms (the companion can jump up
/// through them); everything else is a solid wall.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoundaryCollider {
    id: String,
    screen_bounds: BoundCoordinates,
    world_bounds: BoundCoordinates,
    position: Point3,
    size: Point2,
    one_way: bool,
    shape_revision: u64,
    debug_line: Option<[Point3; 2]>,
    active: bool,
}

impl BoundaryCollider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place this collider on `segment`.
    ///
    /// The collision shape is only rebuilt when the size actually changed,
    /// which is what [`shape_revision`](Self::shape_revision) counts.
    pub fn configure(
        &mut self,
        segment: &Segment,
        draw_debug: bool,
        transform: &dyn CoordinateTransform,
    ) {
        self.id.clone_from(&segment.id);
        self.screen_bounds = BoundCoordinates::new(
            segment.start.xy(),
            segment.end.xy(),
            ((segment.start + segment.end) / 2.0).xy(),
        );

        let start = transform
            .scaled_screen_to_world(transform.screen_to_scaled_screen(segment.start), false);
        let end =
            transform.scaled_screen_to_world(transform.screen_to_scaled_screen(segment.end), false);
        let center = ((start + end) - Point3::new(0.0, COLLIDER_OFFSET, 0.0)) / 2.0;
        self.world_bounds = BoundCoordinates::new(start.xy(), end.xy(), center.xy());
        self.position = center;

        let width = COLLIDER_OFFSET.max((end.x - start.x).abs());
        let height = COLLIDER_OFFSET.max((end.y - start.y).abs());
        if !approximately(self.size.x, width) || !approximately(self.size.y, height) {
            self.size = Point2::new(width, height);
            self.one_way = height < width;
            self.shape_revision += 1;
        }

        self.debug_line = draw_debug.then(|| {
            let lift = Point3::new(0.0, 0.0, DEBUG_LINE_Z_OFFSET);
            [start + lift, end + lift]
        });
    }

    /// Whether `other` overlaps or touches this collider's box.
    pub fn is_touching(&self, other: &Aabb) -> bool {
        self.active && self.bounds().overlaps(other)
    }

    /// World-space box of this collider.
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position.xy(), self.size)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn screen_bounds(&self) -> BoundCoordinates {
        self.screen_bounds
    }

    pub fn world_bounds(&self) -> BoundCoordinates {
        self.world_bounds
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn size(&self) -> Point2 {
        self.size
    }

    pub fn is_one_way(&self) -> bool {
        self.one_way
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of times the collision shape has been rebuilt.
    pub fn shape_revision(&self) -> u64 {
        self.shape_revision
    }

    pub fn debug_line(&self) -> Option<[Point3; 2]> {
        self.debug_line
    }
}

impl Poolable for BoundaryCollider {
    fn activate(&mut self) {
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.id.clear();
        self.position = Point3::default();
        self.debug_line = None;
    }
}

impl std::fmt::Display for BoundaryCollider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_({:.2}, {:.2})", self.id, self.size.x, self.size.y)
    }
}

fn approximately(a: f32, b: f32) -> bool {
    (a - b).abs() <= SIZE_EPSILON.max(f32::EPSILON * a.abs().max(b.abs()))
}
