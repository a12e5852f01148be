use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::surface::Surface;

/// GPU copy of the drawing surface.
///
/// The surface is re-uploaded only when its version changed since the last
/// upload, so idle frames cost nothing.
#[derive(Default)]
pub struct SurfaceTexture {
    handle: Option<TextureHandle>,
    uploaded_version: Option<u64>,
    uploads: u64,
}

impl SurfaceTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads the surface if needed and returns the texture to paint.
    /// Returns `None` for an empty surface.
    pub fn update(&mut self, ctx: &Context, surface: &Surface) -> Option<TextureId> {
        if surface.is_empty() {
            self.handle = None;
            self.uploaded_version = None;
            return None;
        }

        if self.uploaded_version != Some(surface.version()) || self.handle.is_none() {
            let image = ColorImage::from_rgba_unmultiplied(
                [surface.width() as usize, surface.height() as usize],
                surface.image().as_raw(),
            );
            match &mut self.handle {
                Some(handle) => handle.set(image, TextureOptions::NEAREST),
                None => {
                    self.handle = Some(ctx.load_texture("surface", image, TextureOptions::NEAREST))
                }
            }
            self.uploaded_version = Some(surface.version());
            self.uploads += 1;
        }

        self.handle.as_ref().map(TextureHandle::id)
    }

    /// Number of uploads so far
    pub fn uploads(&self) -> u64 {
        self.uploads
    }
}
