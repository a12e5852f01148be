use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::config::EngineConfig;
use crate::stroke::StrokeTool;

/// The tool selected in the tools panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Fill,
    Pan,
    /// Crop mode: resize the focus window from its edges, pan elsewhere.
    FillImage,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Brush,
        ToolKind::Eraser,
        ToolKind::Fill,
        ToolKind::Pan,
        ToolKind::FillImage,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Brush => "Brush",
            ToolKind::Eraser => "Eraser",
            ToolKind::Fill => "Fill",
            ToolKind::Pan => "Pan",
            ToolKind::FillImage => "Crop",
        }
    }

    /// The stroke tool a primary drag lays down, if this tool draws at all
    pub fn stroke_tool(&self) -> Option<StrokeTool> {
        match self {
            ToolKind::Brush => Some(StrokeTool::Brush),
            ToolKind::Eraser => Some(StrokeTool::Eraser),
            _ => None,
        }
    }

    /// Whether the focus window outline and edge handles are active
    pub fn is_crop(&self) -> bool {
        matches!(self, ToolKind::FillImage)
    }
}

/// Brush size and color shared by the brush, eraser and fill tools
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSettings {
    size: f32,
    pub color: Rgb,
}

impl BrushSettings {
    pub const MIN_SIZE: f32 = 1.0;

    pub fn new(size: f32, color: Rgb, max_size: f32) -> Self {
        let mut settings = Self { size: Self::MIN_SIZE, color };
        settings.set_size(size, max_size);
        settings
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.brush_size, config.initial_color(), config.max_brush_size)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Clamps into `[1, max_size]`; non-finite input is ignored.
    pub fn set_size(&mut self, size: f32, max_size: f32) {
        if size.is_finite() {
            self.size = size.clamp(Self::MIN_SIZE, max_size.max(Self::MIN_SIZE));
        }
    }
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
