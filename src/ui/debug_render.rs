//! Debug overlay for collision and containment geometry using Bevy gizmos.

use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::simulation::session::ParkingSession;
use crate::ui::DebugConfig;

pub struct DebugRenderPlugin;

impl Plugin for DebugRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (render_spot_bounds, render_colliders));
    }
}

const OVERLAY_Y: f32 = 0.05;

/// Spot outlines: active target yellow, completed green, the rest grey.
fn render_spot_bounds(session: Res<ParkingSession>, config: Res<DebugConfig>, mut gizmos: Gizmos) {
    if !config.show_overlay {
        return;
    }

    let target = session.targets().current();
    for (index, spot) in session.lot().spots.iter().enumerate() {
        let color = if Some(index) == target {
            Color::srgb(1.0, 1.0, 0.0)
        } else if spot.completed {
            Color::srgb(0.0, 1.0, 0.0)
        } else {
            Color::srgb(0.4, 0.4, 0.4)
        };
        gizmos.linestrip(rect_xz(spot.center, spot.half_width, spot.half_depth), color);
    }

    // Win zone on the lot side of the door.
    let door = session.door();
    let depth = session.config().door_win_depth;
    let zone_center = Vec3::new(door.base.x, 0.0, door.base.z + depth * 0.5);
    let zone_color = if door.opened {
        Color::srgb(0.0, 1.0, 0.5)
    } else {
        Color::srgb(0.3, 0.3, 1.0)
    };
    gizmos.linestrip(rect_xz(zone_center, door.half_width, depth * 0.5), zone_color);
}

/// Car and cone collision circles.
fn render_colliders(session: Res<ParkingSession>, config: Res<DebugConfig>, mut gizmos: Gizmos) {
    if !config.show_overlay {
        return;
    }

    let cone_color = Color::srgb(1.0, 0.5, 0.0);
    for cone in session.cones() {
        gizmos.linestrip(circle_xz(cone.position, session.cone_radius()), cone_color);
    }

    let car = session.car();
    let car_color = Color::srgb(1.0, 0.2, 0.2);
    gizmos.linestrip(circle_xz(car.position(), session.config().car_radius), car_color);
    let (s, c) = car.heading().sin_cos();
    let nose = car.position() + Vec3::new(s, 0.0, c) * 2.0;
    gizmos.line(
        car.position().with_y(OVERLAY_Y),
        nose.with_y(OVERLAY_Y),
        car_color,
    );

    let key = session.key();
    if key.available && !key.collected {
        gizmos.linestrip(
            circle_xz(key.position, session.config().key_pickup_dist_sq.sqrt()),
            Color::srgb(1.0, 1.0, 0.0),
        );
    }
}

fn rect_xz(center: Vec3, half_w: f32, half_d: f32) -> [Vec3; 5] {
    let y = OVERLAY_Y;
    [
        Vec3::new(center.x - half_w, y, center.z - half_d),
        Vec3::new(center.x + half_w, y, center.z - half_d),
        Vec3::new(center.x + half_w, y, center.z + half_d),
        Vec3::new(center.x - half_w, y, center.z + half_d),
        Vec3::new(center.x - half_w, y, center.z - half_d),
    ]
}

fn circle_xz(center: Vec3, radius: f32) -> impl Iterator<Item = Vec3> {
    const SEGMENTS: usize = 16;
    (0..=SEGMENTS).map(move |i| {
        let (s, c) = (i as f32 / SEGMENTS as f32 * TAU).sin_cos();
        Vec3::new(center.x + c * radius, OVERLAY_Y, center.z + s * radius)
    })
}
