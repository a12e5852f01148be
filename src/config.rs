use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{PaintError, PaintResult};

/// Tunable constants of the drawing engine.
///
/// Missing fields fall back to their defaults, so a config file only needs
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-channel flood fill tolerance (of 255).
    pub fill_tolerance: u8,
    /// Number of trailing samples averaged for stroke positions.
    pub smoothing_window: usize,
    /// Weight of the newest sample in the pressure moving average.
    pub pressure_alpha: f32,
    /// Minimum world distance between two recorded stroke points.
    pub min_point_distance: f64,
    /// Multiplicative factor for wheel and keyboard zoom.
    pub zoom_factor: f64,
    /// Additive step of the zoom +/- buttons.
    pub zoom_step: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Pixel band around each focus window side that grabs a resize.
    pub edge_threshold: f32,
    pub min_focus_size: u32,
    pub focus_width: u32,
    pub focus_height: u32,
    pub brush_size: f32,
    pub max_brush_size: f32,
    /// Initial stroke color as `#rrggbb`.
    pub brush_color: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fill_tolerance: 30,
            smoothing_window: 3,
            pressure_alpha: 0.7,
            min_point_distance: 2.0,
            zoom_factor: 1.1,
            zoom_step: 0.1,
            min_scale: 0.1,
            max_scale: 5.0,
            edge_threshold: 10.0,
            min_focus_size: 50,
            focus_width: 400,
            focus_height: 300,
            brush_size: 5.0,
            max_brush_size: 128.0,
            brush_color: "#000000".to_owned(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> PaintResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> PaintResult<Self> {
        let path = path.as_ref();
        log::info!("Loading engine config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Parsed initial brush color; falls back to black.
    pub fn initial_color(&self) -> Rgb {
        Rgb::from_hex(&self.brush_color).unwrap_or(Rgb::BLACK)
    }

    fn validate(&self) -> PaintResult<()> {
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(PaintError::InvalidConfig(format!(
                "scale bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.min_scale, self.max_scale
            )));
        }
        if self.zoom_factor <= 1.0 {
            return Err(PaintError::InvalidConfig(format!(
                "zoom_factor must be greater than 1, got {}",
                self.zoom_factor
            )));
        }
        if self.smoothing_window == 0 {
            return Err(PaintError::InvalidConfig("smoothing_window must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.pressure_alpha) {
            return Err(PaintError::InvalidConfig(format!(
                "pressure_alpha must be within [0, 1], got {}",
                self.pressure_alpha
            )));
        }
        if self.brush_size <= 0.0 || self.max_brush_size < self.brush_size {
            return Err(PaintError::InvalidConfig(format!(
                "brush size {} must be positive and at most {}",
                self.brush_size, self.max_brush_size
            )));
        }
        Rgb::from_hex(&self.brush_color)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "fill_tolerance": 10, "max_scale": 8.0 }"#)
            .unwrap();
        assert_eq!(config.fill_tolerance, 10);
        assert_eq!(config.max_scale, 8.0);
        assert_eq!(config.min_scale, 0.1);
        assert_eq!(config.smoothing_window, 3);
    }

    #[test]
    fn rejects_non_positive_scale_floor() {
        assert!(EngineConfig::from_json_str(r#"{ "min_scale": 0.0 }"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{ "min_scale": 6.0 }"#).is_err());
    }

    #[test]
    fn rejects_bad_color() {
        assert!(matches!(
            EngineConfig::from_json_str(r##"{ "brush_color": "#12" }"##),
            Err(PaintError::InvalidColor(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(&path, r#"{ "edge_threshold": 4.0 }"#).unwrap();
        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.edge_threshold, 4.0);
    }
}
