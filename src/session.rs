use std::path::Path;

use egui::{CursorIcon, PointerButton, Pos2, Rect, Vec2};
use image::RgbaImage;

use crate::action::{ActionLog, Fill};
use crate::capture::{CaptureConfig, StrokeCapture};
use crate::color::Rgb;
use crate::config::EngineConfig;
use crate::error::PaintResult;
use crate::focus::{Edge, FocusSize, FocusWindow};
use crate::geometry::{Transform, WorldPoint};
use crate::input::{InputEvent, ZoomDirection};
use crate::renderer::Renderer;
use crate::state::{DocumentSnapshot, InteractionState};
use crate::stroke::{Stroke, StrokeTool};
use crate::surface::Surface;
use crate::tools::{BrushSettings, ToolKind};
use crate::viewport::ViewportController;

/// A drawing document together with its view and gesture state.
///
/// All input goes through [`Session::handle_event`]; the UI reads the
/// surface and the exposed settings back out. The surface always reflects
/// the visible part of the action log under the current viewport.
#[derive(Debug)]
pub struct Session {
    config: EngineConfig,
    log: ActionLog,
    viewport: ViewportController,
    focus: FocusWindow,
    surface: Surface,
    renderer: Renderer,
    capture: StrokeCapture,
    state: InteractionState,
    tool: ToolKind,
    brush: BrushSettings,
    hover_edge: Option<Edge>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            log: ActionLog::new(),
            viewport: ViewportController::new(&config),
            focus: FocusWindow::new(&config),
            surface: Surface::new(0, 0),
            renderer: Renderer::new(config.fill_tolerance),
            capture: StrokeCapture::new(CaptureConfig::from(&config)),
            state: InteractionState::Idle,
            tool: ToolKind::default(),
            brush: BrushSettings::from_config(&config),
            hover_edge: None,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn transform(&self) -> &Transform {
        self.viewport.transform()
    }

    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    pub fn origin(&self) -> WorldPoint {
        self.viewport.origin()
    }

    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    pub fn hover_edge(&self) -> Option<Edge> {
        self.hover_edge
    }

    pub fn focus_size(&self) -> FocusSize {
        self.focus.size()
    }

    /// Focus window in canvas-local coordinates
    pub fn focus_rect(&self) -> Rect {
        self.focus.rect(self.surface_size())
    }

    fn surface_size(&self) -> Vec2 {
        Vec2::new(self.surface.width() as f32, self.surface.height() as f32)
    }

    /// Cursor the canvas should show for the current tool and gesture
    pub fn cursor_icon(&self) -> CursorIcon {
        match &self.state {
            InteractionState::Resizing { edge, .. } => edge.cursor_icon(),
            InteractionState::Panning { .. } => CursorIcon::Grabbing,
            InteractionState::Drawing { .. } => CursorIcon::Crosshair,
            InteractionState::Idle => match self.tool {
                ToolKind::FillImage => self
                    .hover_edge
                    .map_or(CursorIcon::Grab, |edge| edge.cursor_icon()),
                ToolKind::Pan => CursorIcon::Grab,
                ToolKind::Fill => CursorIcon::PointingHand,
                ToolKind::Brush | ToolKind::Eraser => CursorIcon::Crosshair,
            },
        }
    }

    /// Routes one input event through the gesture state machine.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown {
                pos,
                button,
                pressure,
            } => self.pointer_down(pos, button, pressure),
            InputEvent::PointerMove { pos, pressure } => self.pointer_move(pos, pressure),
            InputEvent::PointerUp { .. } => self.end_gesture(),
            InputEvent::PointerLeave => {
                self.end_gesture();
                self.hover_edge = None;
            }
            InputEvent::Wheel { pos, delta_y } => {
                if !self.state.is_drawing() && self.viewport.wheel(pos, delta_y) {
                    self.rerender();
                }
            }
            InputEvent::Zoom(direction) => {
                if self.state.is_drawing() {
                    return;
                }
                let changed = match direction {
                    ZoomDirection::In => self.viewport.zoom_in(),
                    ZoomDirection::Out => self.viewport.zoom_out(),
                };
                if changed {
                    self.rerender();
                }
            }
        }
    }

    fn pointer_down(&mut self, pos: Pos2, button: PointerButton, pressure: Option<f32>) {
        if !self.state.is_idle() {
            return;
        }
        match (button, self.tool) {
            (PointerButton::Middle, _) | (PointerButton::Primary, ToolKind::Pan) => {
                self.transition_to(InteractionState::Panning { last: pos });
            }
            (PointerButton::Primary, ToolKind::Brush | ToolKind::Eraser) => {
                if let Some(tool) = self.tool.stroke_tool() {
                    self.begin_stroke(pos, pressure, tool);
                }
            }
            (PointerButton::Primary, ToolKind::Fill) => self.fill_at(pos),
            (PointerButton::Primary, ToolKind::FillImage) => {
                match self.focus.hit_edge(pos, self.surface_size()) {
                    Some(edge) => self.transition_to(InteractionState::Resizing {
                        edge,
                        start_pointer: pos,
                        start_size: self.focus.size(),
                    }),
                    None => self.transition_to(InteractionState::Panning { last: pos }),
                }
            }
            _ => {}
        }
    }

    fn pointer_move(&mut self, pos: Pos2, pressure: Option<f32>) {
        match self.state.clone() {
            InteractionState::Idle => {
                self.hover_edge = if self.tool.is_crop() {
                    self.focus.hit_edge(pos, self.surface_size())
                } else {
                    None
                };
            }
            InteractionState::Drawing { .. } => {
                let world = self.viewport.transform().screen_pos_to_world(pos);
                let Some(point) = self.capture.sample(world, pressure) else {
                    return;
                };
                let transform = *self.viewport.transform();
                if let Some(stroke) = self.log.last_stroke_mut() {
                    let from = stroke.last_point().copied().unwrap_or(point);
                    stroke.push_point(point);
                    self.renderer
                        .draw_live_segment(&mut self.surface, &transform, stroke, &from, &point);
                }
            }
            InteractionState::Panning { last } => {
                if self.viewport.pan(pos - last) {
                    self.rerender();
                }
                self.transition_to(InteractionState::Panning { last: pos });
            }
            InteractionState::Resizing {
                edge,
                start_pointer,
                start_size,
            } => {
                self.focus.resize_from(edge, start_size, pos - start_pointer);
            }
        }
    }

    fn begin_stroke(&mut self, pos: Pos2, pressure: Option<f32>, tool: StrokeTool) {
        let world = self.viewport.transform().screen_pos_to_world(pos);
        let first = self.capture.begin(world, pressure);
        let stroke = Stroke::new(
            tool,
            self.brush.size(),
            self.brush.color,
            pressure.is_some(),
            first,
        );
        self.renderer
            .draw_live_dot(&mut self.surface, self.viewport.transform(), &stroke, &first);
        self.log.append(stroke);
        self.transition_to(InteractionState::Drawing { tool });
    }

    fn fill_at(&mut self, pos: Pos2) {
        let world = self.viewport.transform().screen_pos_to_world(pos);
        let fill = Fill::new(world, self.brush.color.opaque());
        let pixel = self.viewport.transform().world_to_pixel(fill.x, fill.y);
        if !self.surface.in_bounds(pixel.x, pixel.y) {
            log::debug!("Ignoring fill outside the surface at ({}, {})", pixel.x, pixel.y);
            return;
        }
        let changed = self
            .renderer
            .apply_fill(&mut self.surface, self.viewport.transform(), &fill);
        log::info!(
            "Fill {} at ({:.1}, {:.1}){}",
            self.brush.color.to_hex(),
            fill.x,
            fill.y,
            if changed { "" } else { " changed nothing" }
        );
        self.log.append(fill);
    }

    /// Finishes whatever gesture is in progress. A finished stroke is
    /// replayed so the live feedback is replaced by the smoothed result.
    pub fn end_gesture(&mut self) {
        match self.state {
            InteractionState::Idle => return,
            InteractionState::Drawing { .. } => {
                self.capture.end();
                self.rerender();
            }
            InteractionState::Resizing { .. } => {
                let size = self.focus.size();
                log::debug!("Focus window resized to {}x{}", size.width, size.height);
            }
            InteractionState::Panning { .. } => {}
        }
        self.transition_to(InteractionState::Idle);
    }

    fn transition_to(&mut self, next: InteractionState) {
        if self.state.can_transition_to(&next) {
            if std::mem::discriminant(&self.state) != std::mem::discriminant(&next) {
                log::debug!("State {} -> {}", self.state.name(), next.name());
            }
            self.state = next;
        } else {
            log::warn!(
                "Ignoring invalid state transition {} -> {}",
                self.state.name(),
                next.name()
            );
        }
    }

    /// Replays the log onto the surface under the current viewport
    pub fn rerender(&mut self) {
        self.renderer
            .render(&mut self.surface, &self.log, self.viewport.transform());
    }

    pub fn undo(&mut self) -> bool {
        self.end_gesture();
        let changed = self.log.undo();
        if changed {
            self.rerender();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        self.end_gesture();
        let changed = self.log.redo();
        if changed {
            self.rerender();
        }
        changed
    }

    /// Hides everything drawn so far; undo brings it back.
    pub fn clear(&mut self) {
        self.end_gesture();
        self.log.clear();
        log::info!("Canvas cleared");
        self.rerender();
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool == self.tool {
            return;
        }
        self.end_gesture();
        log::info!("Tool changed: {} -> {}", self.tool.name(), tool.name());
        self.tool = tool;
        self.hover_edge = None;
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.brush.set_size(size, self.config.max_brush_size);
    }

    pub fn set_brush_color(&mut self, color: Rgb) {
        self.brush.color = color;
    }

    /// Resizes the surface to the canvas and replays onto it
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.viewport.set_size(Vec2::new(width as f32, height as f32));
        if width == self.surface.width() && height == self.surface.height() {
            return;
        }
        log::debug!("Surface resized to {width}x{height}");
        self.surface.resize(width, height);
        self.rerender();
    }

    fn after_zoom(&mut self, changed: bool) -> bool {
        if changed {
            self.rerender();
        }
        changed
    }

    /// Slider zoom around the canvas center
    pub fn set_scale(&mut self, scale: f64) -> bool {
        let changed = self.viewport.set_scale(scale);
        self.after_zoom(changed)
    }

    pub fn step_zoom(&mut self, direction: i32) -> bool {
        let changed = self.viewport.step_zoom(direction);
        self.after_zoom(changed)
    }

    pub fn reset_zoom(&mut self) -> bool {
        let changed = self.viewport.reset_zoom();
        self.after_zoom(changed)
    }

    /// Numeric focus window input; each side is floored at the minimum size
    pub fn set_focus_size(&mut self, width: u32, height: u32) {
        self.focus.set_size(width, height);
    }

    /// Pixels currently under the focus window
    pub fn export_focus(&self) -> Option<RgbaImage> {
        self.focus.export(&self.surface)
    }

    pub fn save_focus_png(&self, path: impl AsRef<Path>) -> PaintResult<()> {
        self.focus.save_png(&self.surface, path)
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot::new(
            self.log.actions().to_vec(),
            *self.viewport.transform(),
            self.focus.size(),
            self.brush,
            self.tool,
        )
    }

    /// Replaces the document with a snapshot and replays it
    pub fn restore(&mut self, snapshot: DocumentSnapshot) {
        self.capture.end();
        self.state = InteractionState::Idle;
        self.hover_edge = None;
        log::info!(
            "Restoring {} actions (saved by version {})",
            snapshot.actions.len(),
            snapshot.version
        );
        self.log = ActionLog::from_actions(snapshot.actions);
        self.viewport.set_transform(snapshot.transform);
        self.focus.set_size(snapshot.focus.width, snapshot.focus.height);
        self.brush = BrushSettings::new(
            snapshot.brush.size(),
            snapshot.brush.color,
            self.config.max_brush_size,
        );
        self.tool = snapshot.tool;
        self.rerender();
    }

    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> PaintResult<()> {
        self.snapshot().save(path)
    }

    pub fn load_snapshot(&mut self, path: impl AsRef<Path>) -> PaintResult<()> {
        let snapshot = DocumentSnapshot::load(path)?;
        self.restore(snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::color::Rgba;

    fn session(width: u32, height: u32) -> Session {
        let mut session = Session::default();
        session.resize_surface(width, height);
        session
    }

    fn down(x: f32, y: f32, button: PointerButton) -> InputEvent {
        InputEvent::PointerDown {
            pos: Pos2::new(x, y),
            button,
            pressure: None,
        }
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove {
            pos: Pos2::new(x, y),
            pressure: None,
        }
    }

    fn up(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerUp {
            pos: Pos2::new(x, y),
        }
    }

    #[test]
    fn stroke_gesture_records_one_action() {
        let mut session = session(100, 100);
        session.handle_event(&down(10.0, 10.0, PointerButton::Primary));
        assert!(session.state().is_drawing());
        for x in [20.0, 30.0, 40.0, 50.0] {
            session.handle_event(&moved(x, 10.0));
        }
        session.handle_event(&up(50.0, 10.0));

        assert!(session.state().is_idle());
        assert_eq!(session.log().len(), 1);
        let Action::Stroke(stroke) = &session.log().actions()[0] else {
            panic!("expected a stroke");
        };
        assert!(stroke.points().len() > 1);
        assert!(!stroke.uses_pressure());
        assert_eq!(session.surface().pixel(10, 10), Some(Rgba::new(0, 0, 0, 255)));
    }

    #[test]
    fn zoom_is_ignored_while_drawing() {
        let mut session = session(100, 100);
        session.handle_event(&down(10.0, 10.0, PointerButton::Primary));
        session.handle_event(&InputEvent::Zoom(ZoomDirection::In));
        session.handle_event(&InputEvent::Wheel {
            pos: Pos2::new(10.0, 10.0),
            delta_y: -1.0,
        });
        assert_eq!(session.scale(), 1.0);
        session.handle_event(&up(10.0, 10.0));
        session.handle_event(&InputEvent::Zoom(ZoomDirection::In));
        assert!((session.scale() - 1.1).abs() < 1e-12);
    }

    #[test]
    fn secondary_button_does_nothing() {
        let mut session = session(50, 50);
        session.handle_event(&down(10.0, 10.0, PointerButton::Secondary));
        assert!(session.state().is_idle());
        assert!(session.log().is_empty());
    }

    #[test]
    fn hover_edge_only_in_crop_mode() {
        let mut session = session(300, 300);
        session.set_focus_size(100, 100);
        session.handle_event(&moved(100.0, 150.0));
        assert_eq!(session.hover_edge(), None);

        session.set_tool(ToolKind::FillImage);
        session.handle_event(&moved(100.0, 150.0));
        assert_eq!(session.hover_edge(), Some(Edge::Left));
        assert_eq!(session.cursor_icon(), CursorIcon::ResizeHorizontal);
        session.handle_event(&InputEvent::PointerLeave);
        assert_eq!(session.hover_edge(), None);
    }

    #[test]
    fn undo_during_stroke_finishes_it_first() {
        let mut session = session(100, 100);
        session.handle_event(&down(10.0, 10.0, PointerButton::Primary));
        assert!(session.undo());
        assert!(session.state().is_idle());
        assert!(session.log().is_empty());
        // Further moves do not resurrect or extend anything.
        session.handle_event(&moved(60.0, 60.0));
        assert!(session.log().is_empty());
    }
}
