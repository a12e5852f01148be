//! The gesture state machine of a drawing session.
//!
//! Each pointer gesture moves the session out of `Idle` and back again;
//! gestures never chain directly into one another.
//!
//! ```text
//!                ┌──────────┐
//!          ┌─────►  Drawing ├─────┐
//!          │     └──────────┘     │
//! ┌──────┐ │     ┌──────────┐     │ ┌──────┐
//! │ Idle ├─┼─────►  Panning ├─────┼─► Idle │
//! └──────┘ │     └──────────┘     │ └──────┘
//!          │     ┌──────────┐     │
//!          └─────► Resizing ├─────┘
//!                └──────────┘
//! ```
use egui::Pos2;

use crate::focus::{Edge, FocusSize};
use crate::stroke::StrokeTool;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// No gesture in progress
    #[default]
    Idle,
    /// A stroke is being recorded; it is the last action in the log
    Drawing { tool: StrokeTool },
    /// Dragging the viewport; `last` is the previous pointer position
    Panning { last: Pos2 },
    /// Dragging a focus window edge
    Resizing {
        edge: Edge,
        start_pointer: Pos2,
        start_size: FocusSize,
    },
}

impl InteractionState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, next: &InteractionState) -> bool {
        match (self, next) {
            (InteractionState::Idle, _) => true,
            // Every gesture ends by returning to Idle
            (_, InteractionState::Idle) => true,
            // A pan keeps updating its own anchor
            (InteractionState::Panning { .. }, InteractionState::Panning { .. }) => true,
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "Idle",
            InteractionState::Drawing { .. } => "Drawing",
            InteractionState::Panning { .. } => "Panning",
            InteractionState::Resizing { .. } => "Resizing",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, InteractionState::Drawing { .. })
    }

    /// The edge being dragged, if resizing
    pub fn resizing_edge(&self) -> Option<Edge> {
        match self {
            InteractionState::Resizing { edge, .. } => Some(*edge),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gestures_only_start_from_idle() {
        let drawing = InteractionState::Drawing {
            tool: StrokeTool::Brush,
        };
        let panning = InteractionState::Panning { last: Pos2::ZERO };
        let resizing = InteractionState::Resizing {
            edge: Edge::Left,
            start_pointer: Pos2::ZERO,
            start_size: FocusSize::new(100, 100),
        };

        for state in [&drawing, &panning, &resizing] {
            assert!(InteractionState::Idle.can_transition_to(state));
            assert!(state.can_transition_to(&InteractionState::Idle));
        }
        assert!(!drawing.can_transition_to(&panning));
        assert!(!panning.can_transition_to(&resizing));
        assert!(!resizing.can_transition_to(&drawing));
        assert!(panning.can_transition_to(&InteractionState::Panning {
            last: Pos2::new(3.0, 4.0)
        }));
    }
}
