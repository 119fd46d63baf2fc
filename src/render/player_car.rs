//! The player's car body and its status colour.

use bevy::prelude::*;

use crate::game_state::GameState;
use crate::simulation::session::ParkingSession;
use crate::simulation::SessionSystems;

pub struct PlayerCarPlugin;

impl Plugin for PlayerCarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_player_car.after(SessionSystems::Setup))
            .add_systems(Update, sync_player_car.in_set(SessionSystems::Sync));
    }
}

#[derive(Component)]
pub struct PlayerCar;

/// The car owns its material so it can be recoloured without touching
/// anything else.
#[derive(Resource)]
struct PlayerCarMaterial(Handle<StandardMaterial>);

const CAR_BASE_COLOR: Color = Color::srgb(1.0, 0.231, 0.184);
const CAR_WIN_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);

/// Red while driving, fading to green as the dwell fills, yellow after a win.
pub fn car_color(state: GameState, park_progress: f32) -> Color {
    match state {
        GameState::Won => CAR_WIN_COLOR,
        GameState::Playing if park_progress > 0.0 => {
            let t = park_progress.clamp(0.0, 1.0);
            Color::srgb(1.0 - t, t, 0.0)
        }
        GameState::Playing => CAR_BASE_COLOR,
    }
}

fn spawn_player_car(
    mut commands: Commands,
    session: Res<ParkingSession>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let material = materials.add(StandardMaterial {
        base_color: CAR_BASE_COLOR,
        perceptual_roughness: 0.4,
        metallic: 0.3,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.0, 0.5, 2.0))),
        MeshMaterial3d(material.clone()),
        session.car().transform(),
        PlayerCar,
    ));
    commands.insert_resource(PlayerCarMaterial(material));
}

fn sync_player_car(
    session: Res<ParkingSession>,
    car_material: Res<PlayerCarMaterial>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<&mut Transform, With<PlayerCar>>,
) {
    for mut transform in &mut query {
        *transform = session.car().transform();
    }

    let color = car_color(session.state(), session.park_progress());
    let stale = materials
        .get(&car_material.0)
        .is_some_and(|m| m.base_color != color);
    if stale {
        if let Some(material) = materials.get_mut(&car_material.0) {
            material.base_color = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_car_is_base_red() {
        assert_eq!(car_color(GameState::Playing, 0.0), CAR_BASE_COLOR);
    }

    #[test]
    fn dwell_blends_toward_green() {
        assert_eq!(car_color(GameState::Playing, 1.0), Color::srgb(0.0, 1.0, 0.0));
        assert_eq!(car_color(GameState::Playing, 0.5), Color::srgb(0.5, 0.5, 0.0));
    }

    #[test]
    fn won_overrides_dwell() {
        assert_eq!(car_color(GameState::Won, 0.7), CAR_WIN_COLOR);
    }
}
