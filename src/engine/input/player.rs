// Per-player input state management

use super::action::Action;
use super::snapshot::{InputSnapshot, InputSource};
use std::collections::HashSet;

/// Tracks pressed actions for one player across frames.
///
/// The host feeds device events through [`press`](Self::press) and
/// [`release`](Self::release); polling through [`InputSource`] turns the
/// current state into an [`InputSnapshot`] and ends the frame.
#[derive(Debug)]
pub struct PlayerInput {
    /// Player ID
    player_id: usize,

    /// Actions that are currently pressed this frame
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this frame (release events)
    just_released: HashSet<Action>,

    /// Actions that were pressed in the previous frame
    previous_pressed: HashSet<Action>,
}

impl PlayerInput {
    /// Create a new player input state
    pub fn new(player_id: usize) -> Self {
        Self {
            player_id,
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
            previous_pressed: HashSet::new(),
        }
    }

    /// Get the player ID
    pub fn player_id(&self) -> usize {
        self.player_id
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Check if an action is held (pressed for multiple frames)
    pub fn is_held(&self, action: Action) -> bool {
        self.pressed.contains(&action) && self.previous_pressed.contains(&action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Update input state for a new frame
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_pressed = self.pressed.clone();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_pressed.clear();
    }

    /// Get directional input (-1.0 to 1.0)
    /// Returns (horizontal, vertical); opposite directions cancel out
    pub fn get_direction(&self) -> (f32, f32) {
        let mut horizontal = 0.0;
        let mut vertical = 0.0;

        if self.is_pressed(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            horizontal += 1.0;
        }
        if self.is_pressed(Action::MoveDown) {
            vertical -= 1.0;
        }
        if self.is_pressed(Action::MoveUp) {
            vertical += 1.0;
        }

        (horizontal, vertical)
    }

    /// Build the snapshot for the current frame without ending it
    pub fn snapshot(&self) -> InputSnapshot {
        let (horizontal, vertical) = self.get_direction();
        InputSnapshot::new(horizontal, vertical, self.just_pressed(Action::Jump))
    }
}

impl InputSource for PlayerInput {
    fn poll(&mut self) -> InputSnapshot {
        let snapshot = self.snapshot();
        self.update();
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_input_creation() {
        let input = PlayerInput::new(0);
        assert_eq!(input.player_id(), 0);
        assert!(!input.is_pressed(Action::Jump));
    }

    #[test]
    fn test_press_and_release() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        assert!(input.is_pressed(Action::Jump));
        assert!(input.just_pressed(Action::Jump));

        input.update();
        input.release(Action::Jump);
        assert!(!input.is_pressed(Action::Jump));
        assert!(input.just_released(Action::Jump));
    }

    #[test]
    fn test_held_detection() {
        let mut input = PlayerInput::new(0);
        input.press(Action::MoveUp);
        assert!(!input.is_held(Action::MoveUp));

        input.update();
        assert!(input.is_held(Action::MoveUp));
        assert!(!input.just_pressed(Action::MoveUp));
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut input = PlayerInput::new(0);
        input.release(Action::Jump);
        assert!(!input.just_released(Action::Jump));
    }

    #[test]
    fn test_get_direction() {
        let mut input = PlayerInput::new(0);
        assert_eq!(input.get_direction(), (0.0, 0.0));

        input.press(Action::MoveRight);
        input.press(Action::MoveDown);
        assert_eq!(input.get_direction(), (1.0, -1.0));

        // Opposite directions cancel
        input.press(Action::MoveLeft);
        assert_eq!(input.get_direction(), (0.0, -1.0));
    }

    #[test]
    fn test_jump_is_not_vertical_axis() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        let snapshot = input.snapshot();
        assert_eq!(snapshot.vertical, 0.0);
        assert!(snapshot.jump_pressed);
    }

    #[test]
    fn test_poll_reports_jump_only_on_press_frame() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.press(Action::MoveLeft);

        let first = input.poll();
        assert!(first.jump_pressed);
        assert_eq!(first.horizontal, -1.0);

        // Still held, but the press edge is gone
        let second = input.poll();
        assert!(!second.jump_pressed);
        assert_eq!(second.horizontal, -1.0);
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.press(Action::MoveRight);
        input.reset();

        assert!(!input.is_pressed(Action::Jump));
        assert_eq!(input.snapshot(), InputSnapshot::idle());
    }
}
