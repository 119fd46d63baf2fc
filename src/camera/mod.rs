//! Perspective chase camera that trails the player car.

use bevy::prelude::*;

use crate::render::player_car::PlayerCar;
use crate::simulation::SessionSystems;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChaseCameraConfig>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, chase_player_car.after(SessionSystems::Sync));
    }
}

#[derive(Resource)]
pub struct ChaseCameraConfig {
    /// Distance behind the car along its heading.
    pub distance: f32,
    /// Height above the car.
    pub height: f32,
    /// Look-at point above the car's origin.
    pub look_height: f32,
    /// Exponential approach rate (1/sec).
    pub stiffness: f32,
    pub fov_degrees: f32,
}

impl Default for ChaseCameraConfig {
    fn default() -> Self {
        Self {
            distance: 10.0,
            height: 3.0,
            look_height: 0.5,
            stiffness: 8.0,
            fov_degrees: 70.0,
        }
    }
}

/// Marker for the chase camera.
#[derive(Component)]
pub struct ChaseCamera;

/// Next camera transform: ease toward a point behind and above the target,
/// then aim just above it. The blend factor `1 - exp(-k dt)` keeps the
/// approach independent of frame rate.
pub fn chase(
    camera: &Transform,
    target_pos: Vec3,
    target_yaw: f32,
    dt: f32,
    config: &ChaseCameraConfig,
) -> Transform {
    let (s, c) = target_yaw.sin_cos();
    let desired = Vec3::new(
        target_pos.x - s * config.distance,
        target_pos.y + config.height,
        target_pos.z - c * config.distance,
    );
    let alpha = 1.0 - (-config.stiffness * dt).exp();
    let translation = camera.translation.lerp(desired, alpha);
    let look_at = target_pos + Vec3::Y * config.look_height;

    if translation.distance_squared(look_at) < f32::EPSILON {
        return Transform::from_translation(translation);
    }
    Transform::from_translation(translation).looking_at(look_at, Vec3::Y)
}

fn setup_camera(mut commands: Commands, config: Res<ChaseCameraConfig>) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.fov_degrees.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_xyz(0.0, 6.0, 18.0).looking_at(Vec3::ZERO, Vec3::Y),
        ChaseCamera,
    ));
}

fn chase_player_car(
    time: Res<Time>,
    config: Res<ChaseCameraConfig>,
    car_query: Query<&Transform, (With<PlayerCar>, Without<ChaseCamera>)>,
    mut camera_query: Query<&mut Transform, With<ChaseCamera>>,
) {
    let Ok(car) = car_query.get_single() else {
        return;
    };
    let (yaw, _, _) = car.rotation.to_euler(EulerRot::YXZ);
    let dt = time.delta_secs();

    for mut transform in &mut camera_query {
        *transform = chase(&transform, car.translation, yaw, dt, &config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_behind_and_above_target() {
        let config = ChaseCameraConfig::default();
        let mut cam = Transform::from_xyz(50.0, 50.0, 50.0);
        for _ in 0..200 {
            cam = chase(&cam, Vec3::ZERO, 0.0, 0.05, &config);
        }
        assert!(cam.translation.distance(Vec3::new(0.0, 3.0, -10.0)) < 1e-3);
        // Looking toward +Z, where the car is facing.
        let forward = cam.forward();
        assert!(forward.z > 0.9);
    }

    #[test]
    fn follows_heading() {
        let config = ChaseCameraConfig::default();
        let yaw = std::f32::consts::FRAC_PI_2;
        let mut cam = Transform::IDENTITY;
        for _ in 0..200 {
            cam = chase(&cam, Vec3::ZERO, yaw, 0.05, &config);
        }
        assert!(cam.translation.distance(Vec3::new(-10.0, 3.0, 0.0)) < 1e-3);
    }

    #[test]
    fn zero_dt_holds_position() {
        let config = ChaseCameraConfig::default();
        let cam = Transform::from_xyz(4.0, 2.0, 1.0);
        let next = chase(&cam, Vec3::new(0.0, 0.0, 20.0), 0.0, 0.0, &config);
        assert_eq!(next.translation, cam.translation);
    }

    #[test]
    fn smoothing_moves_partway() {
        let config = ChaseCameraConfig::default();
        let cam = Transform::from_xyz(0.0, 3.0, 0.0);
        let next = chase(&cam, Vec3::ZERO, 0.0, 1.0 / 60.0, &config);
        assert!(next.translation.z < 0.0 && next.translation.z > -10.0);
    }
}
