use sill_config::PlayspaceConfig;

use super::traits::CoordinateTransform;
use crate::geometry::{Point2, Point3};

/// An orthographic camera centred on the screen, one world unit per pixel.
///
/// The scaled screen is the pixel screen divided by `scale_factor`, the way
/// a UI canvas scaler shrinks the logical playspace on high-DPI displays.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthoCameraTransform {
    screen_width: f32,
    screen_height: f32,
    scale_factor: f32,
    edge_buffer_x: f32,
    edge_buffer_y: f32,
    camera_depth: f32,
}

impl OrthoCameraTransform {
    pub fn new(screen_width: f32, screen_height: f32, config: &PlayspaceConfig) -> Self {
        Self {
            screen_width,
            screen_height,
            scale_factor: config.scale_factor(),
            edge_buffer_x: config.edge_buffer_x(),
            edge_buffer_y: config.edge_buffer_y(),
            camera_depth: config.camera_depth(),
        }
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Set a new scale factor, returning the previous one. Non-positive or
    /// non-finite values are ignored.
    pub fn set_scale_factor(&mut self, scale_factor: f32) -> f32 {
        let old = self.scale_factor;
        if scale_factor.is_finite() && scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
        old
    }

    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    /// Screen size in scaled (playspace) units.
    pub fn scaled_screen_size(&self) -> Point2 {
        Point2::new(
            self.screen_width / self.scale_factor,
            self.screen_height / self.scale_factor,
        )
    }

    /// Clamp a scaled screen position so an object of `size` stays inside the
    /// edge buffers. The returned z is always 0.
    pub fn clamp_scaled_screen_position(&self, scaled: Point3, size: Point2) -> Point3 {
        let extents = Point2::new(size.x / 2.0, size.y / 2.0);
        let screen = self.scaled_screen_size();
        Point3::new(
            clamp(
                scaled.x,
                self.edge_buffer_x + extents.x,
                screen.x - self.edge_buffer_x - extents.x,
            ),
            clamp(
                scaled.y,
                self.edge_buffer_y + extents.y,
                screen.y - self.edge_buffer_y - extents.y,
            ),
            0.0,
        )
    }

    /// Inverse of [`CoordinateTransform::scaled_screen_to_world`].
    pub fn world_to_scaled_screen(&self, world: Point3, bounded: bool) -> Point3 {
        let pixel = Point3::new(
            world.x + self.screen_width / 2.0,
            world.y + self.screen_height / 2.0,
            0.0,
        );
        let scaled = self.screen_to_scaled_screen(pixel);
        if bounded {
            self.clamp_scaled_screen_position(scaled, Point2::default())
        } else {
            scaled
        }
    }
}

impl CoordinateTransform for OrthoCameraTransform {
    fn screen_to_scaled_screen(&self, pixel: Point3) -> Point3 {
        pixel / self.scale_factor
    }

    fn scaled_screen_to_world(&self, scaled: Point3, bounded: bool) -> Point3 {
        let mut position = Point3::new(scaled.x, scaled.y, 0.0);
        if bounded {
            position = self.clamp_scaled_screen_position(position, Point2::default());
        }
        let pixel = position * self.scale_factor;
        Point3::new(
            pixel.x - self.screen_width / 2.0,
            pixel.y - self.screen_height / 2.0,
            self.camera_depth,
        )
    }

    fn camera_depth(&self) -> f32 {
        self.camera_depth
    }
}

/// Like `f32::clamp`, but tolerates `min > max` on screens narrower than the
/// combined buffers by preferring `min`.
fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max.max(min)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(scale: f32) -> OrthoCameraTransform {
        let config = PlayspaceConfig {
            scale_factor: Some(scale),
            ..Default::default()
        };
        OrthoCameraTransform::new(800.0, 600.0, &config)
    }

    #[test]
    fn test_screen_to_scaled_screen_divides_by_scale() {
        let t = transform(2.0);
        let scaled = t.screen_to_scaled_screen(Point3::new(400.0, 300.0, 2.0));
        assert_eq!(scaled, Point3::new(200.0, 150.0, 1.0));
        assert_eq!(t.scaled_screen_size(), Point2::new(400.0, 300.0));
    }

    #[test]
    fn test_world_origin_is_screen_centre() {
        let t = transform(1.0);
        let world = t.scaled_screen_to_world(Point3::new(400.0, 300.0, 2.0), false);
        assert_eq!(world, Point3::new(0.0, 0.0, -10.0));
    }

    #[test]
    fn test_screen_round_trip_through_scaled_space() {
        let t = transform(1.25);
        let pixel = Point3::new(100.0, 500.0, 0.0);
        let world = t.scaled_screen_to_world(t.screen_to_scaled_screen(pixel), false);
        assert!((world.x - (100.0 - 400.0)).abs() < 1e-3);
        assert!((world.y - (500.0 - 300.0)).abs() < 1e-3);

        let back = t.world_to_scaled_screen(world, false);
        assert!((back.x - 80.0).abs() < 1e-3);
        assert!((back.y - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_bounded_conversion_clamps_to_edge_buffers() {
        let t = transform(1.0);
        let clamped = t.clamp_scaled_screen_position(Point3::new(-50.0, 900.0, 3.0), Point2::default());
        assert_eq!(clamped, Point3::new(20.0, 579.5, 0.0));

        let world = t.scaled_screen_to_world(Point3::new(-50.0, 900.0, 0.0), true);
        assert_eq!(world, Point3::new(20.0 - 400.0, 579.5 - 300.0, -10.0));
    }

    #[test]
    fn test_clamp_accounts_for_object_size() {
        let t = transform(1.0);
        let clamped = t.clamp_scaled_screen_position(Point3::new(0.0, 0.0, 0.0), Point2::new(40.0, 10.0));
        assert_eq!(clamped, Point3::new(40.0, 25.5, 0.0));
    }

    #[test]
    fn test_set_scale_factor_rejects_invalid() {
        let mut t = transform(1.0);
        assert_eq!(t.set_scale_factor(2.0), 1.0);
        assert_eq!(t.set_scale_factor(0.0), 2.0);
        assert_eq!(t.scale_factor(), 2.0);
    }
}
