use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Nudge applied before flooring device coordinates.
///
/// `screen_to_world` followed by `world_to_pixel` should land on the pixel
/// the screen position started in; without it, rounding error in
/// `x / scale + origin - origin` can leave an integer just below itself.
/// Kept far below any coordinate a pointer can produce, so genuine
/// fractions still floor down.
const PIXEL_EPSILON: f64 = 1e-8;

/// A location on the zoom/pan independent drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: WorldPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Integer index into the device pixel buffer. May lie outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelPos {
    pub x: i64,
    pub y: i64,
}

impl PixelPos {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Mapping between screen, world and device pixel space.
///
/// `origin` is the world coordinate drawn at device pixel (0, 0); `scale` is
/// device pixels per world unit. Screen and device space coincide: the
/// surface is sized to the container it is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: f64,
    pub origin: WorldPoint,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        origin: WorldPoint::ZERO,
    };

    pub fn new(scale: f64, origin: WorldPoint) -> Self {
        Self { scale, origin }
    }

    pub fn screen_to_world(&self, x: f64, y: f64) -> WorldPoint {
        WorldPoint::new(x / self.scale + self.origin.x, y / self.scale + self.origin.y)
    }

    pub fn screen_pos_to_world(&self, pos: Pos2) -> WorldPoint {
        self.screen_to_world(pos.x as f64, pos.y as f64)
    }

    /// Unrounded device coordinates of a world point.
    pub fn world_to_device(&self, p: WorldPoint) -> (f64, f64) {
        ((p.x - self.origin.x) * self.scale, (p.y - self.origin.y) * self.scale)
    }

    pub fn world_to_pixel(&self, x: f64, y: f64) -> PixelPos {
        let (dx, dy) = self.world_to_device(WorldPoint::new(x, y));
        PixelPos::new(
            (dx + PIXEL_EPSILON).floor() as i64,
            (dy + PIXEL_EPSILON).floor() as i64,
        )
    }

    /// A screen-space drag of `delta` expressed in world units.
    pub fn screen_delta_to_world(&self, delta: Vec2) -> (f64, f64) {
        (delta.x as f64 / self.scale, delta.y as f64 / self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_to_world_applies_scale_then_origin() {
        let t = Transform::new(2.0, WorldPoint::new(10.0, -4.0));
        assert_eq!(t.screen_to_world(8.0, 6.0), WorldPoint::new(14.0, -1.0));
    }

    #[test]
    fn world_to_pixel_floors() {
        let t = Transform::new(1.5, WorldPoint::new(0.0, 0.0));
        assert_eq!(t.world_to_pixel(1.0, 3.0), PixelPos::new(1, 4));
        assert_eq!(t.world_to_pixel(-1.0, 0.0), PixelPos::new(-2, 0));

        let identity = Transform::IDENTITY;
        assert_eq!(identity.world_to_pixel(4.9999995, 0.0), PixelPos::new(4, 0));
        assert_eq!(identity.world_to_pixel(4.999, -0.0001), PixelPos::new(4, -1));
    }

    #[test]
    fn pixel_roundtrip_lands_on_start_pixel() {
        let scales = [0.1, 0.25, 1.0 / 3.0, 0.7, 1.0, 1.1, 1.21, 2.0, 3.0, 4.7, 5.0];
        let origins = [
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(100.7, -33.3),
            WorldPoint::new(-1234.5678, 987.654321),
            WorldPoint::new(1e5 + 0.1, -1e5 - 0.3),
        ];
        for &scale in &scales {
            for &origin in &origins {
                let t = Transform::new(scale, origin);
                for y in (0..600).step_by(7) {
                    for x in (0..800).step_by(13) {
                        let world = t.screen_to_world(x as f64, y as f64);
                        assert_eq!(
                            t.world_to_pixel(world.x, world.y),
                            PixelPos::new(x, y),
                            "scale {scale} origin {origin:?} at ({x}, {y})"
                        );
                    }
                }
            }
        }
    }
}
