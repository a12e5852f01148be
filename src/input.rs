use egui::{Context, Event, Key, LayerId, PointerButton, Pos2, Rect, TouchPhase, Vec2};

/// Keyboard zoom direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Input the drawing session reacts to. Positions are relative to the
/// canvas' top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Button pressed over the canvas. `pressure` is the touch force, if the
    /// device reported one.
    PointerDown {
        pos: Pos2,
        button: PointerButton,
        pressure: Option<f32>,
    },
    /// Pointer moved over the canvas, or anywhere while a press that began
    /// on the canvas is held.
    PointerMove { pos: Pos2, pressure: Option<f32> },
    /// The press that began on the canvas was released.
    PointerUp { pos: Pos2 },
    /// The pointer left the window.
    PointerLeave,
    /// Wheel over the canvas. Negative `delta_y` means scrolling up.
    Wheel { pos: Pos2, delta_y: f32 },
    /// Ctrl/Cmd with `+`/`=` or `-`.
    Zoom(ZoomDirection),
}

/// Converts egui's raw input into canvas [`InputEvent`]s.
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Button of the press that started on the canvas, held until release
    captured: Option<PointerButton>,
    /// Force of the active touch, if the device reports one
    touch_force: Option<f32>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_captured(&self) -> bool {
        self.captured.is_some()
    }

    /// Collects this frame's events for the canvas occupying `canvas_rect`
    /// on `canvas_layer`. Points covered by a popup or window above the
    /// canvas do not count as on the canvas.
    pub fn process_input(
        &mut self,
        ctx: &Context,
        canvas_rect: Rect,
        canvas_layer: LayerId,
    ) -> Vec<InputEvent> {
        let (events, scroll, hover) =
            ctx.input(|i| (i.events.clone(), i.raw_scroll_delta, i.pointer.hover_pos()));
        let keys_free = !ctx.wants_keyboard_input();
        let covered = |pos: Pos2| ctx.layer_id_at(pos).is_some_and(|layer| layer != canvas_layer);
        self.translate(&events, scroll, hover, canvas_rect, covered, keys_free)
    }

    /// Translates raw events. `scroll` is egui's raw scroll delta for the
    /// frame (positive `y` scrolls up) and `hover` the pointer position.
    /// `covered` reports points hidden behind another layer; zoom keys are
    /// only read when `keys_free`.
    pub fn translate(
        &mut self,
        events: &[Event],
        scroll: Vec2,
        hover: Option<Pos2>,
        canvas_rect: Rect,
        covered: impl Fn(Pos2) -> bool,
        keys_free: bool,
    ) -> Vec<InputEvent> {
        let local = |pos: Pos2| (pos - canvas_rect.min).to_pos2();
        let on_canvas = |pos: Pos2| canvas_rect.contains(pos) && !covered(pos);
        let mut out = Vec::new();

        for event in events {
            match event {
                Event::Touch { phase, force, .. } => match phase {
                    TouchPhase::Start | TouchPhase::Move => self.touch_force = *force,
                    TouchPhase::End | TouchPhase::Cancel => {}
                },
                Event::PointerButton {
                    pos,
                    button,
                    pressed: true,
                    ..
                } => {
                    if self.captured.is_none() && on_canvas(*pos) {
                        self.captured = Some(*button);
                        out.push(InputEvent::PointerDown {
                            pos: local(*pos),
                            button: *button,
                            pressure: self.touch_force,
                        });
                    }
                }
                Event::PointerButton {
                    pos,
                    button,
                    pressed: false,
                    ..
                } => {
                    if self.captured == Some(*button) {
                        self.captured = None;
                        self.touch_force = None;
                        out.push(InputEvent::PointerUp { pos: local(*pos) });
                    }
                }
                Event::PointerMoved(pos) => {
                    if self.captured.is_some() || on_canvas(*pos) {
                        out.push(InputEvent::PointerMove {
                            pos: local(*pos),
                            pressure: self.touch_force,
                        });
                    }
                }
                Event::PointerGone => {
                    self.touch_force = None;
                    out.push(InputEvent::PointerLeave);
                }
                Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } if keys_free && modifiers.command => match key {
                    Key::Plus | Key::Equals => out.push(InputEvent::Zoom(ZoomDirection::In)),
                    Key::Minus => out.push(InputEvent::Zoom(ZoomDirection::Out)),
                    _ => {}
                },
                _ => {}
            }
        }

        if scroll.y != 0.0 {
            if let Some(pos) = hover.filter(|pos| on_canvas(*pos)) {
                out.push(InputEvent::Wheel {
                    pos: local(pos),
                    delta_y: -scroll.y,
                });
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, TouchDeviceId, TouchId};

    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::new(200.0, 0.0), Vec2::new(400.0, 300.0))
    }

    fn translate(
        handler: &mut InputHandler,
        events: &[Event],
        scroll: Vec2,
        hover: Option<Pos2>,
    ) -> Vec<InputEvent> {
        handler.translate(events, scroll, hover, canvas(), |_| false, true)
    }

    fn zoom_key(key: Key, command: bool) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers {
                command,
                ..Modifiers::NONE
            },
        }
    }

    fn button(x: f32, y: f32, pressed: bool) -> Event {
        Event::PointerButton {
            pos: Pos2::new(x, y),
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn press_outside_canvas_is_ignored() {
        let mut handler = InputHandler::new();
        let events = [
            button(50.0, 50.0, true),
            Event::PointerMoved(Pos2::new(60.0, 50.0)),
            button(60.0, 50.0, false),
        ];
        assert!(translate(&mut handler, &events, Vec2::ZERO, None).is_empty());
    }

    #[test]
    fn drag_is_tracked_outside_canvas_once_captured() {
        let mut handler = InputHandler::new();
        let events = [
            button(210.0, 20.0, true),
            Event::PointerMoved(Pos2::new(150.0, 20.0)),
            button(150.0, 20.0, false),
        ];
        let out = translate(&mut handler, &events, Vec2::ZERO, None);
        assert_eq!(
            out,
            vec![
                InputEvent::PointerDown {
                    pos: Pos2::new(10.0, 20.0),
                    button: PointerButton::Primary,
                    pressure: None,
                },
                InputEvent::PointerMove {
                    pos: Pos2::new(-50.0, 20.0),
                    pressure: None,
                },
                InputEvent::PointerUp {
                    pos: Pos2::new(-50.0, 20.0),
                },
            ]
        );
        assert!(!handler.is_captured());
    }

    #[test]
    fn touch_force_becomes_pressure() {
        let mut handler = InputHandler::new();
        let events = [
            Event::Touch {
                device_id: TouchDeviceId(0),
                id: TouchId(1),
                phase: TouchPhase::Start,
                pos: Pos2::new(300.0, 100.0),
                force: Some(0.4),
            },
            button(300.0, 100.0, true),
        ];
        let out = translate(&mut handler, &events, Vec2::ZERO, None);
        assert_eq!(
            out[0],
            InputEvent::PointerDown {
                pos: Pos2::new(100.0, 100.0),
                button: PointerButton::Primary,
                pressure: Some(0.4),
            }
        );
    }

    #[test]
    fn wheel_and_zoom_keys() {
        let mut handler = InputHandler::new();
        let events = [
            zoom_key(Key::Equals, true),
            zoom_key(Key::Minus, true),
            zoom_key(Key::Minus, false),
        ];
        let out = translate(&mut handler, &events, Vec2::new(0.0, 3.0), Some(Pos2::new(250.0, 40.0)));
        assert_eq!(
            out,
            vec![
                InputEvent::Zoom(ZoomDirection::In),
                InputEvent::Zoom(ZoomDirection::Out),
                InputEvent::Wheel {
                    pos: Pos2::new(50.0, 40.0),
                    delta_y: -3.0,
                },
            ]
        );

        // Scrolling over the side panel does not zoom the canvas.
        let out = translate(&mut handler, &[], Vec2::new(0.0, 3.0), Some(Pos2::new(10.0, 40.0)));
        assert!(out.is_empty());
    }

    #[test]
    fn popup_over_canvas_swallows_press_and_wheel() {
        let mut handler = InputHandler::new();
        // A popup covering x in [110, 360] overlaps the canvas starting at 200.
        let popup = Rect::from_min_max(Pos2::new(110.0, 50.0), Pos2::new(360.0, 300.0));
        let covered = |pos: Pos2| popup.contains(pos);
        let events = [
            button(300.0, 100.0, true),
            Event::PointerMoved(Pos2::new(320.0, 120.0)),
            button(320.0, 120.0, false),
        ];
        let out = handler.translate(
            &events,
            Vec2::new(0.0, 3.0),
            Some(Pos2::new(320.0, 120.0)),
            canvas(),
            covered,
            true,
        );
        assert!(out.is_empty());
        assert!(!handler.is_captured());

        // Outside the popup the canvas still takes the press.
        let out = handler.translate(&[button(500.0, 100.0, true)], Vec2::ZERO, None, canvas(), covered, true);
        assert!(matches!(out[..], [InputEvent::PointerDown { .. }]));
    }

    #[test]
    fn zoom_keys_ignored_while_typing() {
        let mut handler = InputHandler::new();
        let events = [zoom_key(Key::Plus, true), zoom_key(Key::Minus, true)];
        let out = handler.translate(&events, Vec2::ZERO, None, canvas(), |_| false, false);
        assert!(out.is_empty());
    }
}
