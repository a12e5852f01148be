use crate::config::EngineConfig;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::session::Session;
use crate::state::DocumentSnapshot;
use crate::texture::SurfaceTexture;

/// The eframe application: a tools panel on the left and the canvas.
pub struct PaintApp {
    pub(crate) session: Session,
    pub(crate) input_handler: InputHandler,
    pub(crate) texture: SurfaceTexture,
    /// Target of the "Save PNG" button
    pub(crate) export_path: String,
    /// Target of the drawing save/load buttons
    pub(crate) document_path: String,
    /// Result of the last save/load, shown under the buttons
    pub(crate) status: Option<String>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EngineConfig) -> Self {
        // Ctrl +/- zooms the canvas, not the UI.
        cc.egui_ctx.options_mut(|options| options.zoom_with_keyboard = false);

        let mut app = Self::with_config(config);
        if let Some(storage) = cc.storage {
            if let Some(snapshot) = eframe::get_value::<DocumentSnapshot>(storage, eframe::APP_KEY) {
                app.session.restore(snapshot);
            }
        }
        app
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            session: Session::new(config),
            input_handler: InputHandler::new(),
            texture: SurfaceTexture::new(),
            export_path: "focus.png".to_owned(),
            document_path: "drawing.json".to_owned(),
            status: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn save_png(&mut self) {
        self.status = Some(match self.session.save_focus_png(&self.export_path) {
            Ok(()) => format!("Saved {}", self.export_path),
            Err(err) => {
                log::error!("PNG export failed: {err}");
                err.to_string()
            }
        });
    }

    pub(crate) fn save_document(&mut self) {
        self.status = Some(match self.session.save_snapshot(&self.document_path) {
            Ok(()) => format!("Saved {}", self.document_path),
            Err(err) => {
                log::error!("Saving drawing failed: {err}");
                err.to_string()
            }
        });
    }

    pub(crate) fn load_document(&mut self) {
        self.status = Some(match self.session.load_snapshot(&self.document_path) {
            Ok(()) => format!("Loaded {}", self.document_path),
            Err(err) => {
                log::error!("Loading drawing failed: {err}");
                err.to_string()
            }
        });
    }
}

impl eframe::App for PaintApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.session.snapshot());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
