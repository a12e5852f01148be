use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba};
use crate::error::PaintError;
use crate::geometry::{PathSample, WorldPoint};
use crate::surface::CompositeMode;

/// A recorded stroke sample in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Pen pressure in `[0, 1]`; `None` means full weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f32>,
}

impl Point {
    pub fn new(x: f64, y: f64, pressure: Option<f32>) -> Self {
        Self { x, y, pressure }
    }

    pub fn at(pos: WorldPoint, pressure: Option<f32>) -> Self {
        Self::new(pos.x, pos.y, pressure)
    }

    pub fn pos(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    pub fn weight(&self) -> f64 {
        self.pressure.map_or(1.0, f64::from)
    }
}

/// Which tool laid down a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeTool {
    Brush,
    Eraser,
}

impl StrokeTool {
    pub fn composite_mode(self) -> CompositeMode {
        match self {
            StrokeTool::Brush => CompositeMode::PaintOver,
            StrokeTool::Eraser => CompositeMode::Erase,
        }
    }
}

/// A freehand stroke. Always holds at least one point and has a positive
/// brush size; deserialization rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StrokeData")]
pub struct Stroke {
    tool: StrokeTool,
    brush_size: f32,
    color: Rgb,
    uses_pressure: bool,
    points: Vec<Point>,
}

/// Unchecked wire form of [`Stroke`]
#[derive(Deserialize)]
struct StrokeData {
    tool: StrokeTool,
    brush_size: f32,
    color: Rgb,
    uses_pressure: bool,
    points: Vec<Point>,
}

impl TryFrom<StrokeData> for Stroke {
    type Error = PaintError;

    fn try_from(data: StrokeData) -> Result<Self, Self::Error> {
        if data.points.is_empty() {
            return Err(PaintError::InvalidStroke("no points".to_string()));
        }
        if !(data.brush_size.is_finite() && data.brush_size > 0.0) {
            return Err(PaintError::InvalidStroke(format!(
                "brush size {} is not positive",
                data.brush_size
            )));
        }
        Ok(Self {
            tool: data.tool,
            brush_size: data.brush_size,
            color: data.color,
            uses_pressure: data.uses_pressure,
            points: data.points,
        })
    }
}

impl Stroke {
    pub fn new(tool: StrokeTool, brush_size: f32, color: Rgb, uses_pressure: bool, first: Point) -> Self {
        Self {
            tool,
            brush_size,
            color,
            uses_pressure,
            points: vec![first],
        }
    }

    pub fn tool(&self) -> StrokeTool {
        self.tool
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    /// Color written to the surface; erasers only clear, so theirs is unused.
    pub fn paint_color(&self) -> Rgba {
        self.color.opaque()
    }

    pub fn uses_pressure(&self) -> bool {
        self.uses_pressure
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn last_point(&self) -> Option<&Point> {
        self.points.last()
    }

    pub fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Width multiplier of a point: its pressure when this stroke is
    /// pressure-weighted, otherwise 1.
    pub fn weight_of(&self, point: &Point) -> f64 {
        if self.uses_pressure { point.weight() } else { 1.0 }
    }

    /// Line width in world units at `point`.
    pub fn width_at(&self, point: &Point) -> f64 {
        self.brush_size as f64 * self.weight_of(point)
    }

    pub(crate) fn path_samples(&self) -> Vec<PathSample> {
        self.points
            .iter()
            .map(|p| PathSample::new(p.pos(), self.weight_of(p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_follows_pressure_only_when_enabled() {
        let first = Point::new(0.0, 0.0, Some(0.5));
        let weighted = Stroke::new(StrokeTool::Brush, 10.0, Rgb::BLACK, true, first);
        let flat = Stroke::new(StrokeTool::Brush, 10.0, Rgb::BLACK, false, first);
        assert_eq!(weighted.width_at(&first), 5.0);
        assert_eq!(flat.width_at(&first), 10.0);
        assert_eq!(weighted.width_at(&Point::new(1.0, 1.0, None)), 10.0);
    }

    #[test]
    fn deserialize_rejects_empty_or_sizeless_strokes() {
        let json = |size: f32, points: &str| {
            format!(
                r#"{{"tool":"brush","brush_size":{size},"color":{{"r":0,"g":0,"b":0}},"uses_pressure":false,"points":{points}}}"#
            )
        };
        assert!(serde_json::from_str::<Stroke>(&json(4.0, "[]")).is_err());
        assert!(serde_json::from_str::<Stroke>(&json(-3.0, r#"[{"x":1,"y":2}]"#)).is_err());
        assert!(serde_json::from_str::<Stroke>(&json(0.0, r#"[{"x":1,"y":2}]"#)).is_err());

        let stroke: Stroke = serde_json::from_str(&json(4.0, r#"[{"x":1,"y":2}]"#)).unwrap();
        assert_eq!(stroke.points(), &[Point::new(1.0, 2.0, None)]);
        assert_eq!(stroke.brush_size(), 4.0);
    }

    #[test]
    fn eraser_uses_erase_composite() {
        assert_eq!(StrokeTool::Eraser.composite_mode(), CompositeMode::Erase);
        assert_eq!(StrokeTool::Brush.composite_mode(), CompositeMode::PaintOver);
    }
}
