//! Asphalt, spot markings, the target pole and completion posts.

use bevy::prelude::*;

use crate::procgen::parking::{completion_marker_position, target_marker_position};
use crate::simulation::session::ParkingSession;
use crate::simulation::SessionSystems;

pub struct ParkingLotsPlugin;

impl Plugin for ParkingLotsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_parking_lot.after(SessionSystems::Setup))
            .add_systems(
                Update,
                (sync_target_marker, sync_completion_markers).in_set(SessionSystems::Sync),
            );
    }
}

/// Root entity of the lot surface and its line markings.
#[derive(Component)]
pub struct ParkingLotSurface;

/// Yellow pole over the active target spot.
#[derive(Component)]
pub struct TargetMarker;

/// Green post left on a completed spot.
#[derive(Component)]
pub struct CompletionMarker;

#[derive(Resource)]
struct CompletionMarkerAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

const LINE_THICKNESS: f32 = 0.05;
const LINE_HEIGHT: f32 = 0.01;

fn spawn_parking_lot(
    mut commands: Commands,
    session: Res<ParkingSession>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let lot = session.lot();
    let bounds = lot.bounds;

    let asphalt_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x30, 0x30, 0x30),
        perceptual_roughness: 0.9,
        ..default()
    });
    let marking_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    let surface = meshes.add(Cuboid::new(bounds.width, 0.05, bounds.depth));
    // All spots share one size; fall back to a unit line on an empty lot.
    let (spot_w, spot_d) = lot
        .spots
        .first()
        .map(|s| (s.half_width * 2.0, s.half_depth * 2.0))
        .unwrap_or((1.0, 1.0));
    let side_line = meshes.add(Cuboid::new(LINE_THICKNESS, LINE_HEIGHT, spot_d));
    let front_line = meshes.add(Cuboid::new(spot_w, LINE_HEIGHT, LINE_THICKNESS));

    commands
        .spawn((
            Transform::from_xyz(bounds.center.x, 0.0, bounds.center.z),
            Visibility::Visible,
            ParkingLotSurface,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(surface),
                MeshMaterial3d(asphalt_material),
                Transform::from_xyz(0.0, -0.025, 0.0),
            ));

            let y = LINE_HEIGHT * 0.5;
            for spot in &lot.spots {
                let local = spot.center - bounds.center;
                for x in [local.x - spot.half_width, local.x + spot.half_width] {
                    parent.spawn((
                        Mesh3d(side_line.clone()),
                        MeshMaterial3d(marking_material.clone()),
                        Transform::from_xyz(x, y, local.z),
                    ));
                }
                parent.spawn((
                    Mesh3d(front_line.clone()),
                    MeshMaterial3d(marking_material.clone()),
                    Transform::from_xyz(local.x, y, local.z + spot.half_depth),
                ));
            }
        });

    let target = session
        .targets()
        .current()
        .and_then(|index| lot.spot(index));
    let (translation, visibility) = match target {
        Some(spot) => (target_marker_position(spot), Visibility::Visible),
        None => (Vec3::ZERO, Visibility::Hidden),
    };
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.4, 1.5, 0.4))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 1.0, 0.0),
            emissive: LinearRgba::rgb(0.4, 0.4, 0.0),
            ..default()
        })),
        Transform::from_translation(translation),
        visibility,
        TargetMarker,
    ));

    commands.insert_resource(CompletionMarkerAssets {
        mesh: meshes.add(Cuboid::new(0.3, 1.2, 0.3)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.0, 1.0, 0.0),
            ..default()
        }),
    });

    info!("Spawned parking lot with {} marked spots", lot.len());
}

fn sync_target_marker(
    session: Res<ParkingSession>,
    mut query: Query<(&mut Transform, &mut Visibility), With<TargetMarker>>,
) {
    let target = session
        .targets()
        .current()
        .and_then(|index| session.lot().spot(index));

    for (mut transform, mut visibility) in &mut query {
        match target {
            Some(spot) => {
                transform.translation = target_marker_position(spot);
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

/// Completion posts follow the spots' `completed` flags: spawned on
/// completion, despawned when a reset clears the flag.
fn sync_completion_markers(
    mut commands: Commands,
    mut session: ResMut<ParkingSession>,
    assets: Res<CompletionMarkerAssets>,
) {
    for spot in &mut session.lot_mut().spots {
        match (spot.completed, spot.completion_marker) {
            (true, None) => {
                let marker = commands
                    .spawn((
                        Mesh3d(assets.mesh.clone()),
                        MeshMaterial3d(assets.material.clone()),
                        Transform::from_translation(completion_marker_position(spot)),
                        CompletionMarker,
                    ))
                    .id();
                spot.completion_marker = Some(marker);
            }
            (false, Some(marker)) => {
                commands.entity(marker).despawn_recursive();
                spot.completion_marker = None;
            }
            _ => {}
        }
    }
}
