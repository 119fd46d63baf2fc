//! Procedural layout of the play area.
//!
//! - Parking spot grid and containment queries
//! - Traffic cone scatter

use bevy::prelude::*;

pub mod parking;
pub mod traffic_cones;

pub struct ProcgenPlugin;

impl Plugin for ProcgenPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<parking::ParkingLotConfig>()
            .init_resource::<traffic_cones::ConeFieldConfig>();
    }
}
