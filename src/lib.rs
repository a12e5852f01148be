#![warn(clippy::all, rust_2018_idioms)]

pub mod action;
pub mod app;
pub mod capture;
pub mod color;
pub mod config;
pub mod error;
pub mod fill;
pub mod focus;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod session;
pub mod state;
pub mod stroke;
pub mod surface;
pub mod texture;
pub mod tools;
pub mod util;
pub mod viewport;

pub use action::{Action, ActionLog, Fill};
pub use app::PaintApp;
pub use color::{Rgb, Rgba};
pub use config::EngineConfig;
pub use error::{PaintError, PaintResult};
pub use focus::{Edge, FocusSize, FocusWindow};
pub use geometry::{PixelPos, Transform, WorldPoint};
pub use input::{InputEvent, InputHandler, ZoomDirection};
pub use renderer::Renderer;
pub use session::Session;
pub use state::{DocumentSnapshot, InteractionState};
pub use stroke::{Point, Stroke, StrokeTool};
pub use surface::{CompositeMode, Surface};
pub use tools::{BrushSettings, ToolKind};
pub use viewport::{ScaleBounds, ViewportController};
