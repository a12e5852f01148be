use egui::{Color32, Pos2, Rect, Sense, Stroke, Vec2};

use crate::PaintApp;
use crate::focus::Edge;

const FOCUS_COLOR: Color32 = Color32::from_rgb(30, 120, 255);

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            let canvas_rect = response.rect;

            app.session.resize_surface(
                canvas_rect.width().round().max(0.0) as u32,
                canvas_rect.height().round().max(0.0) as u32,
            );

            for event in app.input_handler.process_input(ctx, canvas_rect, ui.layer_id()) {
                app.session.handle_event(&event);
            }

            painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);

            let surface = app.session.surface();
            if let Some(texture_id) = app.texture.update(ctx, surface) {
                let size = Vec2::new(surface.width() as f32, surface.height() as f32);
                painter.image(
                    texture_id,
                    Rect::from_min_size(canvas_rect.min, size),
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
            }

            if app.session.tool().is_crop() {
                let focus = app.session.focus_rect().translate(canvas_rect.min.to_vec2());
                painter.rect_stroke(focus, 0.0, Stroke::new(1.5, FOCUS_COLOR));

                let active = app
                    .session
                    .state()
                    .resizing_edge()
                    .or(app.session.hover_edge());
                if let Some(edge) = active {
                    let (a, b) = match edge {
                        Edge::Left => (focus.left_top(), focus.left_bottom()),
                        Edge::Right => (focus.right_top(), focus.right_bottom()),
                        Edge::Top => (focus.left_top(), focus.right_top()),
                        Edge::Bottom => (focus.left_bottom(), focus.right_bottom()),
                    };
                    painter.line_segment([a, b], Stroke::new(4.0, FOCUS_COLOR));
                }

                let size = app.session.focus_size();
                painter.text(
                    focus.left_top() + Vec2::new(4.0, -4.0),
                    egui::Align2::LEFT_BOTTOM,
                    format!("{} x {}", size.width, size.height),
                    egui::FontId::proportional(12.0),
                    FOCUS_COLOR,
                );
            }

            if response.hovered() || app.input_handler.is_captured() {
                ctx.set_cursor_icon(app.session.cursor_icon());
            }
        });
}
