use crate::geometry::Point3;

/// Conversion from resolver screen space to the world the colliders live in.
///
/// Implemented by whatever owns the camera and canvas scaling.
pub trait CoordinateTransform {
    /// Raw pixel position to scaled screen (playspace) position.
    fn screen_to_scaled_screen(&self, pixel: Point3) -> Point3;

    /// Scaled screen position to world position. With `bounded` the position
    /// is first clamped inside the playspace margins.
    fn scaled_screen_to_world(&self, scaled: Point3, bounded: bool) -> Point3;

    /// Z of the camera in world space.
    fn camera_depth(&self) -> f32;
}
