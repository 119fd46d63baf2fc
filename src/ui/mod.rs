//! On-screen HUD and debug overlay toggles.

use bevy::prelude::*;

use crate::game_state::GameState;
use crate::simulation::session::ParkingSession;
use crate::simulation::SessionSystems;

pub mod debug_render;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(debug_render::DebugRenderPlugin)
            .init_resource::<DebugConfig>()
            .add_systems(Startup, setup_hud)
            .add_systems(
                Update,
                (update_progress_text, update_objective_text).after(SessionSystems::Tick),
            )
            .add_systems(Update, toggle_debug_views);
    }
}

/// Configuration for debug visualization.
#[derive(Resource, Default)]
pub struct DebugConfig {
    pub show_overlay: bool,
}

/// Speed and targets line.
#[derive(Component)]
struct ProgressText;

/// What the player should do next.
#[derive(Component)]
struct ObjectiveText;

fn setup_hud(mut commands: Commands) {
    let panel_bg = Color::srgba(0.04, 0.05, 0.06, 0.85);
    let border = Color::srgb(1.0, 0.8, 0.0);
    let title_color = Color::srgb(1.0, 0.85, 0.2);

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::axes(Val::Px(12.0), Val::Px(10.0)),
                border: UiRect::all(Val::Px(1.0)),
                row_gap: Val::Px(6.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(panel_bg),
            BorderColor(border),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("PARKING QUEST"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(title_color),
            ));

            parent.spawn((
                Text::new("Speed: -- | Targets: --"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                ProgressText,
            ));

            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.75, 0.95, 0.8)),
                ObjectiveText,
            ));
        });

    commands.spawn((
        Text::new("W/S: Drive | A/D: Steer | Space: Handbrake | R: Reset | F1: Debug"),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.9, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
}

fn update_progress_text(session: Res<ParkingSession>, mut query: Query<&mut Text, With<ProgressText>>) {
    let hold = if session.is_inside_target() {
        format!(
            " | Park hold: {:.1} / {:.1} s",
            session.parked_timer(),
            session.config().required_park_time
        )
    } else {
        String::new()
    };

    for mut text in &mut query {
        **text = format!(
            "Speed: {:.1} m/s | Targets: {}/{}{}",
            session.car().speed(),
            session.completed_targets(),
            session.config().required_targets,
            hold
        );
    }
}

/// Next step in the quest, as shown in the HUD.
pub fn objective(session: &ParkingSession) -> &'static str {
    if session.state() == GameState::Won {
        "YOU WIN! Press R to play again."
    } else if session.door().opened {
        "Door is open: drive through it!"
    } else if session.key().collected {
        "Door opening..."
    } else if session.key().available {
        "Collect the yellow key."
    } else if !session.targets().is_exhausted() {
        "Park at the yellow pole and hold still."
    } else {
        "No target spots available."
    }
}

fn update_objective_text(
    session: Res<ParkingSession>,
    mut query: Query<(&mut Text, &mut TextColor), With<ObjectiveText>>,
) {
    for (mut text, mut color) in &mut query {
        **text = objective(&session).to_string();
        color.0 = if session.state() == GameState::Won {
            Color::srgb(1.0, 1.0, 0.0)
        } else {
            Color::srgb(0.75, 0.95, 0.8)
        };
    }
}

fn toggle_debug_views(keys: Res<ButtonInput<KeyCode>>, mut config: ResMut<DebugConfig>) {
    if keys.just_pressed(KeyCode::F1) {
        config.show_overlay = !config.show_overlay;
        info!(
            "Debug overlay: {}",
            if config.show_overlay { "ON" } else { "OFF" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procgen::parking::ParkingLotConfig;
    use crate::procgen::traffic_cones::ConeFieldConfig;
    use crate::simulation::session::SessionConfig;
    use crate::simulation::vehicles::CarPhysicsParams;

    #[test]
    fn fresh_session_asks_for_parking() {
        let session = ParkingSession::new(
            SessionConfig {
                seed: Some(1),
                ..default()
            },
            CarPhysicsParams::default(),
            &ParkingLotConfig::default(),
            &ConeFieldConfig::default(),
        );
        assert_eq!(objective(&session), "Park at the yellow pole and hold still.");
    }

    #[test]
    fn empty_lot_objective() {
        let session = ParkingSession::new(
            SessionConfig {
                seed: Some(2),
                ..default()
            },
            CarPhysicsParams::default(),
            &ParkingLotConfig {
                cols: 0,
                ..default()
            },
            &ConeFieldConfig::default(),
        );
        assert_eq!(objective(&session), "No target spots available.");
    }
}
