mod history;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::geometry::WorldPoint;
use crate::stroke::Stroke;

pub use history::ActionLog;

/// A flood fill recorded at a world location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub x: f64,
    pub y: f64,
    pub color: Rgba,
}

impl Fill {
    pub fn new(at: WorldPoint, color: Rgba) -> Self {
        Self {
            x: at.x,
            y: at.y,
            color,
        }
    }
}

/// One entry of the drawing log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Stroke(Stroke),
    Fill(Fill),
    /// Hides everything before it from replay without deleting it.
    Clear,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Stroke(_) => "Stroke",
            Action::Fill(_) => "Fill",
            Action::Clear => "Clear",
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Action::Clear)
    }
}

impl From<Stroke> for Action {
    fn from(stroke: Stroke) -> Self {
        Action::Stroke(stroke)
    }
}

impl From<Fill> for Action {
    fn from(fill: Fill) -> Self {
        Action::Fill(fill)
    }
}
