//! Scene presentation: lighting, sky colour and the entities that mirror
//! the parking session.

use bevy::prelude::*;

use crate::game_state::GameState;

pub mod parking_lots;
pub mod player_car;
pub mod props;

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(SKY_COLOR))
            .insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 300.0,
            })
            .add_plugins(parking_lots::ParkingLotsPlugin)
            .add_plugins(props::PropsPlugin)
            .add_plugins(player_car::PlayerCarPlugin)
            .add_systems(Startup, setup_lighting)
            .add_systems(OnEnter(GameState::Playing), set_sky(SKY_COLOR))
            .add_systems(OnEnter(GameState::Won), set_sky(WIN_SKY_COLOR));
    }
}

const SKY_COLOR: Color = Color::srgb(0.529, 0.808, 0.922);
const WIN_SKY_COLOR: Color = Color::srgb(0.133, 0.667, 0.133);

fn setup_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(40.0, 60.0, 40.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn set_sky(color: Color) -> impl Fn(ResMut<ClearColor>) {
    move |mut clear| clear.0 = color
}
