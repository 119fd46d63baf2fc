//! Parking Quest - a small 3D parking game.
//!
//! Park in a random sequence of marked spots, hold still long enough for
//! each to count, then grab the key and drive through the opening door.

use bevy::prelude::*;

mod camera;
mod game_state;
mod input;
mod procgen;
mod render;
mod simulation;
mod ui;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Parking Quest".into(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(game_state::GameStatePlugin)
        .add_plugins(input::InputPlugin)
        .add_plugins(procgen::ProcgenPlugin)
        .add_plugins(simulation::SimulationPlugin)
        .add_plugins(render::RenderPlugin)
        .add_plugins(camera::CameraPlugin)
        .add_plugins(ui::UiPlugin)
        .run();
}
