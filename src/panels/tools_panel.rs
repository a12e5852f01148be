use egui::color_picker::{Alpha, color_edit_button_srgba};
use egui::{Color32, DragValue, Slider};

use crate::PaintApp;
use crate::color::Rgb;
use crate::tools::{BrushSettings, ToolKind};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            for tool in ToolKind::ALL {
                let is_selected = app.session.tool() == tool;
                if ui.selectable_label(is_selected, tool.name()).clicked() {
                    log::info!("Tool selected from UI: {}", tool.name());
                    app.session.set_tool(tool);
                }
            }
            ui.separator();

            let max_size = app.session.config().max_brush_size;
            let mut size = app.session.brush().size();
            if ui
                .add(Slider::new(&mut size, BrushSettings::MIN_SIZE..=max_size).text("Size"))
                .changed()
            {
                app.session.set_brush_size(size);
            }
            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = Color32::from(app.session.brush().color);
                if color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                    app.session.set_brush_color(Rgb::from(color));
                }
                ui.monospace(app.session.brush().color.to_hex());
            });
            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.session.can_undo();
                let can_redo = app.session.can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.session.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.session.redo();
                }
                if ui.button("Clear").clicked() {
                    app.session.clear();
                }
            });
            ui.separator();

            ui.label("Zoom");
            let bounds_min = app.session.config().min_scale;
            let bounds_max = app.session.config().max_scale;
            let mut scale = app.session.scale();
            if ui
                .add(Slider::new(&mut scale, bounds_min..=bounds_max).fixed_decimals(2))
                .changed()
            {
                app.session.set_scale(scale);
            }
            ui.horizontal(|ui| {
                if ui.button("-").clicked() {
                    app.session.step_zoom(-1);
                }
                if ui.button("+").clicked() {
                    app.session.step_zoom(1);
                }
                if ui.button("Reset").clicked() {
                    app.session.reset_zoom();
                }
                ui.label(format!("{:.0}%", app.session.scale() * 100.0));
            });
            ui.separator();

            ui.label("Focus window");
            let focus = app.session.focus_size();
            let min = app.session.config().min_focus_size;
            let (mut width, mut height) = (focus.width, focus.height);
            ui.horizontal(|ui| {
                let w = ui.add(DragValue::new(&mut width).range(min..=u32::MAX).prefix("w: "));
                let h = ui.add(DragValue::new(&mut height).range(min..=u32::MAX).prefix("h: "));
                if w.changed() || h.changed() {
                    app.session.set_focus_size(width, height);
                }
            });

            #[cfg(not(target_arch = "wasm32"))]
            {
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut app.export_path);
                    if ui.button("Save PNG").clicked() {
                        app.save_png();
                    }
                });
                ui.separator();

                ui.label("Drawing");
                ui.text_edit_singleline(&mut app.document_path);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        app.save_document();
                    }
                    if ui.button("Load").clicked() {
                        app.load_document();
                    }
                });
            }
            if let Some(status) = &app.status {
                ui.small(status.as_str());
            }
            ui.separator();

            let log = app.session.log();
            ui.horizontal(|ui| {
                ui.label(format!("Actions: {}", log.len()));
                ui.label(format!("Redo: {}", log.redo_actions().count()));
            });
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                egui::Grid::new("action_history_grid")
                    .num_columns(2)
                    .spacing([40.0, 4.0])
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("Log");
                        ui.strong("Redo");
                        ui.end_row();

                        let actions = log.actions();
                        let redo: Vec<_> = log.redo_actions().collect();
                        for i in 0..actions.len().max(redo.len()) {
                            ui.label(actions.get(i).map_or("", |a| a.name()));
                            ui.label(redo.get(i).map_or("", |a| a.name()));
                            ui.end_row();
                        }
                    });
            });
        });
}
