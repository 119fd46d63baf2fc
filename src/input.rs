//! Keyboard intent snapshot.
//!
//! Key-down sets a persistent intent, key-up clears it; the latest event
//! wins. The session reads the snapshot once per tick.

use bevy::prelude::*;

use crate::simulation::vehicles::CarInput;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputSnapshot>()
            .add_systems(PreUpdate, collect_keyboard_intent.after(bevy::input::InputSystem));
    }
}

#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub car: CarInput,
    /// Edge-triggered; cleared once the session has consumed it.
    pub reset: bool,
}

impl InputSnapshot {
    pub fn press(&mut self, key: KeyCode) {
        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => self.car.throttle = 1.0,
            KeyCode::KeyS | KeyCode::ArrowDown => self.car.throttle = -1.0,
            KeyCode::KeyA | KeyCode::ArrowLeft => self.car.steer = 1.0,
            KeyCode::KeyD | KeyCode::ArrowRight => self.car.steer = -1.0,
            KeyCode::Space => self.car.handbrake = true,
            KeyCode::KeyR => self.reset = true,
            _ => {}
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        match key {
            KeyCode::KeyW | KeyCode::KeyS | KeyCode::ArrowUp | KeyCode::ArrowDown => {
                self.car.throttle = 0.0
            }
            KeyCode::KeyA | KeyCode::KeyD | KeyCode::ArrowLeft | KeyCode::ArrowRight => {
                self.car.steer = 0.0
            }
            KeyCode::Space => self.car.handbrake = false,
            KeyCode::KeyR => self.reset = false,
            _ => {}
        }
    }
}

fn collect_keyboard_intent(keys: Res<ButtonInput<KeyCode>>, mut snapshot: ResMut<InputSnapshot>) {
    for key in keys.get_just_released() {
        snapshot.release(*key);
    }
    for key in keys.get_just_pressed() {
        snapshot.press(*key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_direction_wins() {
        let mut snap = InputSnapshot::default();
        snap.press(KeyCode::KeyW);
        snap.press(KeyCode::KeyS);
        assert_eq!(snap.car.throttle, -1.0);
        snap.release(KeyCode::KeyW);
        assert_eq!(snap.car.throttle, 0.0);
    }

    #[test]
    fn steering_and_handbrake() {
        let mut snap = InputSnapshot::default();
        snap.press(KeyCode::KeyA);
        snap.press(KeyCode::Space);
        assert_eq!(snap.car.steer, 1.0);
        assert!(snap.car.handbrake);
        snap.press(KeyCode::KeyD);
        assert_eq!(snap.car.steer, -1.0);
        snap.release(KeyCode::Space);
        assert!(!snap.car.handbrake);
    }

    #[test]
    fn reset_is_an_edge() {
        let mut snap = InputSnapshot::default();
        snap.press(KeyCode::KeyR);
        assert!(snap.reset);
        snap.release(KeyCode::KeyR);
        assert!(!snap.reset);
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let mut snap = InputSnapshot::default();
        snap.press(KeyCode::KeyQ);
        assert_eq!(snap, InputSnapshot::default());
    }
}
