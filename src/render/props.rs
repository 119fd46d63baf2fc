//! Traffic cones, the exit door and the key.

use bevy::prelude::*;

use crate::procgen::traffic_cones::ConeFieldConfig;
use crate::simulation::session::ParkingSession;
use crate::simulation::SessionSystems;

pub struct PropsPlugin;

impl Plugin for PropsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (spawn_traffic_cones, spawn_door_and_key).after(SessionSystems::Setup),
        )
        .add_systems(Update, (sync_door, sync_key).in_set(SessionSystems::Sync));
    }
}

#[derive(Component)]
pub struct TrafficConeProp;

#[derive(Component)]
pub struct ExitDoor;

#[derive(Component)]
pub struct KeyPickup;

fn spawn_traffic_cones(
    mut commands: Commands,
    session: Res<ParkingSession>,
    config: Res<ConeFieldConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Cone {
        radius: config.visual_radius,
        height: config.visual_height,
    });
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xff, 0x88, 0x00),
        ..default()
    });

    for cone in session.cones() {
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(cone.position),
            TrafficConeProp,
        ));
    }
}

fn spawn_door_and_key(
    mut commands: Commands,
    session: Res<ParkingSession>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let door = session.door();
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(door.half_width * 2.0, 2.0, 0.5))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0x55, 0x55, 0xff),
            ..default()
        })),
        Transform::from_translation(door.position()),
        ExitDoor,
    ));

    let key = session.key();
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(0.6))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 1.0, 0.0),
            emissive: LinearRgba::rgb(0.6, 0.6, 0.0),
            ..default()
        })),
        Transform::from_translation(key.position),
        Visibility::Hidden,
        KeyPickup,
    ));
}

fn sync_door(session: Res<ParkingSession>, mut query: Query<&mut Transform, With<ExitDoor>>) {
    for mut transform in &mut query {
        transform.translation = session.door().position();
    }
}

fn sync_key(
    session: Res<ParkingSession>,
    mut query: Query<(&mut Transform, &mut Visibility), With<KeyPickup>>,
) {
    let key = session.key();
    let shown = key.available && !key.collected;
    for (mut transform, mut visibility) in &mut query {
        transform.translation = key.position;
        *visibility = if shown {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}
