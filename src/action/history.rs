use super::Action;
use crate::stroke::Stroke;

/// Append-only record of drawing actions plus the redo buffer.
///
/// The log only shrinks through [`ActionLog::undo`] and only regrows from
/// the redo buffer through [`ActionLog::redo`]; appending anything new
/// discards the redo buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionLog {
    /// Applied actions, oldest first
    actions: Vec<Action>,
    /// Undone actions; the most recently undone is at the end
    redo_stack: Vec<Action>,
}

impl ActionLog {
    /// Creates a new empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a log from persisted actions with an empty redo buffer
    pub fn from_actions(actions: Vec<Action>) -> Self {
        Self {
            actions,
            redo_stack: Vec::new(),
        }
    }

    /// Appends an action and clears the redo buffer
    pub fn append(&mut self, action: impl Into<Action>) {
        let action = action.into();
        log::debug!("Appending {} action", action.name());
        self.actions.push(action);
        self.redo_stack.clear();
    }

    /// Hides everything drawn so far by appending a `Clear`
    pub fn clear(&mut self) {
        self.append(Action::Clear);
    }

    /// Moves the last action to the redo buffer. Returns false if the log is empty.
    pub fn undo(&mut self) -> bool {
        match self.actions.pop() {
            Some(action) => {
                log::info!("Undo {}", action.name());
                self.redo_stack.push(action);
                true
            }
            None => false,
        }
    }

    /// Re-applies the most recently undone action. Returns false if there is none.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(action) => {
                log::info!("Redo {}", action.name());
                self.actions.push(action);
                true
            }
            None => false,
        }
    }

    /// Returns true if there are actions that can be undone
    pub fn can_undo(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Returns true if there are actions that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Undone actions, most recently undone first
    pub fn redo_actions(&self) -> impl Iterator<Item = &Action> {
        self.redo_stack.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Index of the most recent `Clear`, if any
    pub fn last_clear_index(&self) -> Option<usize> {
        self.actions.iter().rposition(Action::is_clear)
    }

    /// The actions replay has to draw: everything after the last `Clear`
    pub fn visible_actions(&self) -> &[Action] {
        match self.last_clear_index() {
            Some(index) => &self.actions[index + 1..],
            None => &self.actions,
        }
    }

    /// The last action, if it is a stroke. Only the gesture that created it
    /// should extend it.
    pub fn last_stroke_mut(&mut self) -> Option<&mut Stroke> {
        match self.actions.last_mut() {
            Some(Action::Stroke(stroke)) => Some(stroke),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Fill;
    use crate::color::{Rgb, Rgba};
    use crate::geometry::WorldPoint;
    use crate::stroke::{Point, StrokeTool};

    fn stroke(x: f64) -> Action {
        Action::Stroke(Stroke::new(
            StrokeTool::Brush,
            4.0,
            Rgb::BLACK,
            false,
            Point::new(x, x, None),
        ))
    }

    fn fill(x: f64) -> Action {
        Action::Fill(Fill::new(WorldPoint::new(x, 0.0), Rgba::new(1, 2, 3, 255)))
    }

    #[test]
    fn undo_redo_on_empty_is_noop() {
        let mut log = ActionLog::new();
        assert!(!log.undo());
        assert!(!log.redo());
        assert!(!log.can_undo());
        assert!(!log.can_redo());
    }

    #[test]
    fn undo_all_then_redo_all_restores_log() {
        let mut log = ActionLog::new();
        for action in [stroke(1.0), fill(2.0), Action::Clear, stroke(3.0), fill(4.0)] {
            log.append(action);
        }
        let original = log.actions().to_vec();

        for _ in 0..original.len() {
            assert!(log.undo());
        }
        assert!(log.is_empty());
        assert_eq!(log.redo_actions().next(), original.first());

        for _ in 0..original.len() {
            assert!(log.redo());
        }
        assert_eq!(log.actions(), original.as_slice());
        assert!(!log.can_redo());
    }

    #[test]
    fn new_action_discards_redo_branch() {
        let mut log = ActionLog::new();
        log.append(stroke(1.0));
        log.append(stroke(2.0));
        log.undo();
        assert!(log.can_redo());
        log.append(stroke(3.0));
        assert!(!log.can_redo());
        assert!(!log.redo());
        assert_eq!(log.actions(), &[stroke(1.0), stroke(3.0)]);
    }

    #[test]
    fn clear_hides_without_deleting() {
        let mut log = ActionLog::new();
        log.append(stroke(1.0));
        log.append(stroke(2.0));
        log.clear();
        assert_eq!(log.len(), 3);
        assert!(log.visible_actions().is_empty());

        log.undo();
        assert_eq!(log.visible_actions(), &[stroke(1.0), stroke(2.0)]);
    }

    #[test]
    fn replay_boundary_is_most_recent_clear() {
        // [A, B, Clear, C]: only C is visible. Undo removes C, not the Clear,
        // so nothing is visible until the Clear itself is undone.
        let mut log = ActionLog::new();
        for action in [stroke(1.0), stroke(2.0), Action::Clear, stroke(3.0)] {
            log.append(action);
        }
        assert_eq!(log.visible_actions(), &[stroke(3.0)]);

        log.undo();
        assert!(log.visible_actions().is_empty());
        assert_eq!(log.redo_actions().collect::<Vec<_>>(), vec![&stroke(3.0)]);

        log.undo();
        assert_eq!(log.visible_actions(), &[stroke(1.0), stroke(2.0)]);
        assert_eq!(
            log.redo_actions().collect::<Vec<_>>(),
            vec![&Action::Clear, &stroke(3.0)]
        );
    }

    #[test]
    fn last_stroke_mut_only_for_trailing_stroke() {
        let mut log = ActionLog::new();
        log.append(stroke(1.0));
        log.last_stroke_mut().unwrap().push_point(Point::new(5.0, 5.0, None));
        assert_eq!(log.visible_actions().len(), 1);

        log.append(fill(0.0));
        assert!(log.last_stroke_mut().is_none());
    }
}
