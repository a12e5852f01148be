use image::RgbaImage;

use crate::color::Rgba;

/// Smallest radius (in device pixels) a mark is drawn with, so hairlines
/// at low zoom stay visible.
const MIN_DEVICE_RADIUS: f64 = 0.5;

/// How new pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Overwrite with the source color.
    PaintOver,
    /// Clear the covered pixels' alpha.
    Erase,
}

/// The device-pixel RGBA raster everything is drawn onto.
///
/// Coordinates are device pixels; pixel `(x, y)` covers `[x, x+1) x [y, y+1)`
/// and is painted when its center lies inside the shape.
#[derive(Debug, Clone)]
pub struct Surface {
    pixels: RgbaImage,
    version: u64,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            version: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Bumped on every mutation; lets the UI skip texture uploads.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Raw buffer access for whole-buffer algorithms such as flood fill.
    pub fn image_mut(&mut self) -> &mut RgbaImage {
        self.version += 1;
        &mut self.pixels
    }

    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgba> {
        self.in_bounds(x, y)
            .then(|| Rgba::from(*self.pixels.get_pixel(x as u32, y as u32)))
    }

    /// Reallocates to a new size. Content is discarded; callers replay.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width != self.width() || height != self.height() {
            self.pixels = RgbaImage::new(width, height);
            self.version += 1;
        }
    }

    /// Sets every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.version += 1;
    }

    /// Filled disc centered at device `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba, mode: CompositeMode) {
        self.fill_segment((cx, cy), (cx, cy), radius, radius, color, mode);
    }

    /// A round-capped segment whose radius varies linearly from `ra` at `a`
    /// to `rb` at `b`.
    pub fn fill_segment(
        &mut self,
        a: (f64, f64),
        b: (f64, f64),
        ra: f64,
        rb: f64,
        color: Rgba,
        mode: CompositeMode,
    ) {
        if self.is_empty() {
            return;
        }
        let ra = ra.max(MIN_DEVICE_RADIUS);
        let rb = rb.max(MIN_DEVICE_RADIUS);
        let reach = ra.max(rb);
        if ![a.0, a.1, b.0, b.1, reach].iter().all(|v| v.is_finite()) {
            return;
        }

        let max_x = self.width() as i64 - 1;
        let max_y = self.height() as i64 - 1;
        let x0 = ((a.0.min(b.0) - reach).floor() as i64).max(0);
        let x1 = ((a.0.max(b.0) + reach).ceil() as i64).min(max_x);
        let y0 = ((a.1.min(b.1) - reach).floor() as i64).max(0);
        let y1 = ((a.1.max(b.1) + reach).ceil() as i64).min(max_y);
        if x0 > x1 || y0 > y1 {
            return;
        }

        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let len_sq = dx * dx + dy * dy;
        let value = match mode {
            CompositeMode::PaintOver => image::Rgba(color.channels()),
            CompositeMode::Erase => image::Rgba(Rgba::TRANSPARENT.channels()),
        };

        for y in y0..=y1 {
            let py = y as f64 + 0.5;
            for x in x0..=x1 {
                let px = x as f64 + 0.5;
                let t = if len_sq > 0.0 {
                    (((px - a.0) * dx + (py - a.1) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (qx, qy) = (a.0 + dx * t, a.1 + dy * t);
                let radius = ra + (rb - ra) * t;
                if (px - qx).powi(2) + (py - qy).powi(2) <= radius * radius {
                    self.pixels.put_pixel(x as u32, y as u32, value);
                }
            }
        }
        self.version += 1;
    }
}
