//! Session phase as a Bevy state.
//!
//! The session resource is authoritative; this state mirrors it so that
//! presentation systems can hook `OnEnter` transitions.

use bevy::prelude::*;

use crate::simulation::session::ParkingSession;
use crate::simulation::SessionSystems;

pub struct GameStatePlugin;

impl Plugin for GameStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(Update, mirror_session_state.after(SessionSystems::Tick));
    }
}

#[derive(States, Default, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum GameState {
    /// Driving, parking and collecting the key.
    #[default]
    Playing,
    /// Drove through the open door. Only a reset leaves this state.
    Won,
}

fn mirror_session_state(
    session: Res<ParkingSession>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if session.state() != *state.get() {
        next.set(session.state());
    }
}
