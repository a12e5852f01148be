use crate::action::{Action, ActionLog, Fill};
use crate::fill::{DEFAULT_FILL_TOLERANCE, flood_fill};
use crate::geometry::{PathSample, Transform, smooth_polyline};
use crate::stroke::{Point, Stroke};
use crate::surface::Surface;

/// Longest flattened curve segment, in device pixels.
const MAX_DEVICE_SEGMENT: f64 = 2.0;

/// Turns the action log into pixels.
///
/// There are two ways onto the surface: [`Renderer::render`] clears it and
/// replays every visible action through the viewport transform, while the
/// `draw_live_*` methods paint straight device-space pieces of the stroke
/// currently being drawn on top of what is already there. A full replay at
/// the end of the gesture replaces whatever the live path drew.
#[derive(Debug, Clone)]
pub struct Renderer {
    fill_tolerance: u8,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_FILL_TOLERANCE)
    }
}

impl Renderer {
    pub fn new(fill_tolerance: u8) -> Self {
        Self { fill_tolerance }
    }

    /// Clears the surface and replays everything after the last `Clear`.
    ///
    /// Args:
    ///     surface: The device-pixel buffer to draw onto
    ///     log: The action log to replay
    ///     transform: Current viewport mapping world to device space
    pub fn render(&self, surface: &mut Surface, log: &ActionLog, transform: &Transform) {
        surface.clear();
        if surface.is_empty() {
            return;
        }
        let visible = log.visible_actions();
        log::debug!(
            "Replaying {} of {} actions at scale {:.2}",
            visible.len(),
            log.len(),
            transform.scale
        );
        for action in visible {
            match action {
                Action::Stroke(stroke) => self.draw_stroke(surface, transform, stroke),
                Action::Fill(fill) => {
                    self.apply_fill(surface, transform, fill);
                }
                Action::Clear => {}
            }
        }
    }

    /// Runs a flood fill at the fill's world location. Returns whether any
    /// pixel changed; targets outside the surface are skipped.
    pub fn apply_fill(&self, surface: &mut Surface, transform: &Transform, fill: &Fill) -> bool {
        let pixel = transform.world_to_pixel(fill.x, fill.y);
        if !surface.in_bounds(pixel.x, pixel.y) {
            log::debug!(
                "Skipping fill at ({}, {}): outside {}x{} surface",
                pixel.x,
                pixel.y,
                surface.width(),
                surface.height()
            );
            return false;
        }
        flood_fill(
            surface.image_mut(),
            pixel.x,
            pixel.y,
            fill.color,
            self.fill_tolerance,
        )
    }

    fn draw_stroke(&self, surface: &mut Surface, transform: &Transform, stroke: &Stroke) {
        let samples = stroke.path_samples();
        let mode = stroke.tool().composite_mode();
        let color = stroke.paint_color();

        if let [only] = samples.as_slice() {
            let (x, y) = transform.world_to_device(only.pos);
            let radius = sample_radius(stroke, only, transform.scale);
            surface.fill_circle(x, y, radius, color, mode);
            return;
        }

        let path = smooth_polyline(&samples, MAX_DEVICE_SEGMENT / transform.scale);
        for pair in path.windows(2) {
            let a = transform.world_to_device(pair[0].pos);
            let b = transform.world_to_device(pair[1].pos);
            surface.fill_segment(
                a,
                b,
                sample_radius(stroke, &pair[0], transform.scale),
                sample_radius(stroke, &pair[1], transform.scale),
                color,
                mode,
            );
        }
    }

    /// Live feedback for the first point of a gesture.
    pub fn draw_live_dot(&self, surface: &mut Surface, transform: &Transform, stroke: &Stroke, at: &Point) {
        let (x, y) = transform.world_to_device(at.pos());
        let radius = live_radius(stroke, at, transform.scale);
        surface.fill_circle(x, y, radius, stroke.paint_color(), stroke.tool().composite_mode());
    }

    /// Live feedback for one new piece of the active stroke, drawn as a
    /// straight segment with the width pre-multiplied by the current scale.
    pub fn draw_live_segment(
        &self,
        surface: &mut Surface,
        transform: &Transform,
        stroke: &Stroke,
        from: &Point,
        to: &Point,
    ) {
        surface.fill_segment(
            transform.world_to_device(from.pos()),
            transform.world_to_device(to.pos()),
            live_radius(stroke, from, transform.scale),
            live_radius(stroke, to, transform.scale),
            stroke.paint_color(),
            stroke.tool().composite_mode(),
        );
    }
}

fn sample_radius(stroke: &Stroke, sample: &PathSample, scale: f64) -> f64 {
    stroke.brush_size() as f64 * sample.weight * scale / 2.0
}

fn live_radius(stroke: &Stroke, point: &Point, scale: f64) -> f64 {
    stroke.width_at(point) * scale / 2.0
}
