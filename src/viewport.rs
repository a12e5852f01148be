use egui::{Pos2, Vec2};

use crate::config::EngineConfig;
use crate::geometry::{Transform, WorldPoint};

/// Inclusive zoom limits shared by every zoom input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self { min: 0.1, max: 5.0 }
    }
}

impl ScaleBounds {
    pub fn clamp(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min;
        }
        scale.clamp(self.min, self.max)
    }
}

/// Owns the viewport transform and applies zoom and pan gestures to it.
///
/// Every zoom keeps the world point under its anchor (cursor for the wheel,
/// viewport center otherwise) at the same screen position.
#[derive(Debug, Clone)]
pub struct ViewportController {
    transform: Transform,
    bounds: ScaleBounds,
    zoom_factor: f64,
    zoom_step: f64,
    size: Vec2,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl ViewportController {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            transform: Transform::IDENTITY,
            bounds: ScaleBounds {
                min: config.min_scale,
                max: config.max_scale,
            },
            zoom_factor: config.zoom_factor,
            zoom_step: config.zoom_step,
            size: Vec2::ZERO,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn origin(&self) -> WorldPoint {
        self.transform.origin
    }

    /// Size of the visible area in screen points, used for centered zooms.
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn center(&self) -> Pos2 {
        (self.size / 2.0).to_pos2()
    }

    /// Replaces the transform, e.g. when restoring a snapshot. Scale is clamped.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = Transform::new(self.bounds.clamp(transform.scale), transform.origin);
    }

    /// Sets the scale keeping the world point under `anchor` in place.
    /// Returns whether the transform changed.
    pub fn zoom_at(&mut self, anchor: Pos2, new_scale: f64) -> bool {
        let new_scale = self.bounds.clamp(new_scale);
        let anchor_world = self.transform.screen_pos_to_world(anchor);
        let origin = WorldPoint::new(
            anchor_world.x - anchor.x as f64 / new_scale,
            anchor_world.y - anchor.y as f64 / new_scale,
        );
        let next = Transform::new(new_scale, origin);
        let changed = next != self.transform;
        self.transform = next;
        changed
    }

    /// Mouse wheel zoom around the cursor. Scrolling up (negative delta) zooms in.
    pub fn wheel(&mut self, pos: Pos2, delta_y: f32) -> bool {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let scale = if delta_y < 0.0 {
            self.scale() * self.zoom_factor
        } else {
            self.scale() / self.zoom_factor
        };
        self.zoom_at(pos, scale)
    }

    /// Keyboard zoom in around the viewport center.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom_at(self.center(), self.scale() * self.zoom_factor)
    }

    /// Keyboard zoom out around the viewport center.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom_at(self.center(), self.scale() / self.zoom_factor)
    }

    /// Slider zoom: the new scale is taken as-is, anchored at the center.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        self.zoom_at(self.center(), scale)
    }

    /// Toolbar +/- buttons: adds `direction * zoom_step` to the scale.
    pub fn step_zoom(&mut self, direction: i32) -> bool {
        self.set_scale(self.scale() + direction.signum() as f64 * self.zoom_step)
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.set_scale(1.0)
    }

    /// Drag pan: the content follows the pointer.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }
        let (dx, dy) = self.transform.screen_delta_to_world(delta);
        self.transform.origin = WorldPoint::new(self.origin().x - dx, self.origin().y - dy);
        true
    }
}
