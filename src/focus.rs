use std::path::Path;

use egui::{CursorIcon, Pos2, Rect, Vec2};
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{PaintError, PaintResult};
use crate::surface::Surface;

/// A side of the focus window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Top => "top",
            Edge::Bottom => "bottom",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Edge::Left | Edge::Right => CursorIcon::ResizeHorizontal,
            Edge::Top | Edge::Bottom => CursorIcon::ResizeVertical,
        }
    }
}

/// Width and height of the focus window in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSize {
    pub width: u32,
    pub height: u32,
}

impl FocusSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The export rectangle, always centered on the surface regardless of pan
/// and zoom. Only its size changes.
#[derive(Debug, Clone)]
pub struct FocusWindow {
    size: FocusSize,
    min_size: u32,
    edge_threshold: f32,
}

impl Default for FocusWindow {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl FocusWindow {
    pub fn new(config: &EngineConfig) -> Self {
        let min_size = config.min_focus_size;
        Self {
            size: FocusSize::new(
                config.focus_width.max(min_size),
                config.focus_height.max(min_size),
            ),
            min_size,
            edge_threshold: config.edge_threshold,
        }
    }

    pub fn size(&self) -> FocusSize {
        self.size
    }

    /// Sets the size, flooring each side at the minimum
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.size = FocusSize::new(width.max(self.min_size), height.max(self.min_size));
    }

    /// Integer placement `(x, y, width, height)` on a surface of the given
    /// size. `x`/`y` may be negative when the window is larger than the surface.
    pub fn pixel_bounds(&self, surface_width: u32, surface_height: u32) -> (i64, i64, i64, i64) {
        let (w, h) = (self.size.width as i64, self.size.height as i64);
        let x = (surface_width as i64 - w).div_euclid(2);
        let y = (surface_height as i64 - h).div_euclid(2);
        (x, y, w, h)
    }

    /// The window in surface-local screen coordinates.
    pub fn rect(&self, surface_size: Vec2) -> Rect {
        let (x, y, w, h) =
            self.pixel_bounds(surface_size.x.round() as u32, surface_size.y.round() as u32);
        Rect::from_min_size(
            Pos2::new(x as f32, y as f32),
            Vec2::new(w as f32, h as f32),
        )
    }

    /// The edge under `pointer`, checked left, right, top, bottom.
    pub fn hit_edge(&self, pointer: Pos2, surface_size: Vec2) -> Option<Edge> {
        let rect = self.rect(surface_size);
        let t = self.edge_threshold;
        if !rect.expand(t).contains(pointer) {
            return None;
        }
        if (pointer.x - rect.left()).abs() <= t {
            Some(Edge::Left)
        } else if (pointer.x - rect.right()).abs() <= t {
            Some(Edge::Right)
        } else if (pointer.y - rect.top()).abs() <= t {
            Some(Edge::Top)
        } else if (pointer.y - rect.bottom()).abs() <= t {
            Some(Edge::Bottom)
        } else {
            None
        }
    }

    /// Resizes from the size at gesture start by the total pointer delta
    /// since then. Only the dimension the edge controls changes.
    pub fn resize_from(&mut self, edge: Edge, start: FocusSize, delta: Vec2) {
        let moved = |base: u32, by: f32| -> u32 {
            let value = (base as f32 + by).round();
            if value.is_finite() && value > 0.0 {
                (value as u32).max(self.min_size)
            } else {
                self.min_size
            }
        };
        let size = match edge {
            Edge::Left => FocusSize::new(moved(start.width, -delta.x), start.height),
            Edge::Right => FocusSize::new(moved(start.width, delta.x), start.height),
            Edge::Top => FocusSize::new(start.width, moved(start.height, -delta.y)),
            Edge::Bottom => FocusSize::new(start.width, moved(start.height, delta.y)),
        };
        self.size = size;
    }

    /// Copies the surface pixels under the window. `None` when the window
    /// and the surface do not overlap.
    pub fn export(&self, surface: &Surface) -> Option<RgbaImage> {
        let (x, y, w, h) = self.pixel_bounds(surface.width(), surface.height());
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(surface.width() as i64);
        let y1 = (y + h).min(surface.height() as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        let view = image::imageops::crop_imm(
            surface.image(),
            x0 as u32,
            y0 as u32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
        );
        Some(view.to_image())
    }

    /// Writes the exported region as a PNG file
    pub fn save_png(&self, surface: &Surface, path: impl AsRef<Path>) -> PaintResult<()> {
        let path = path.as_ref();
        let image = self.export(surface).ok_or(PaintError::EmptyExport)?;
        image.save_with_format(path, ImageFormat::Png)?;
        log::info!(
            "Exported {}x{} focus region to {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(())
    }
}
