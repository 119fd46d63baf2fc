//! Parking lot layout: a rows x cols grid of marked spots separated by
//! driving lanes, plus the containment test and target sampling used by
//! the session.

use bevy::prelude::*;
use rand::{seq::SliceRandom, Rng};

/// Lot layout settings.
#[derive(Resource, Clone, Debug)]
pub struct ParkingLotConfig {
    pub rows: usize,
    pub cols: usize,
    /// Width of one spot across the X axis.
    pub slot_width: f32,
    /// Depth of one spot along the Z axis.
    pub slot_depth: f32,
    /// Driving lane between consecutive rows.
    pub lane_width: f32,
    /// Asphalt border around the outermost spots.
    pub margin: f32,
    pub center: Vec3,
}

impl Default for ParkingLotConfig {
    fn default() -> Self {
        Self {
            rows: 12,
            cols: 24,
            slot_width: 2.6,
            slot_depth: 5.2,
            lane_width: 3.0,
            margin: 1.0,
            center: Vec3::ZERO,
        }
    }
}

/// One marked parking spot. Geometry is fixed after generation.
#[derive(Clone, Debug)]
pub struct ParkingSpot {
    pub center: Vec3,
    pub half_width: f32,
    pub half_depth: f32,
    pub completed: bool,
    /// Marker entity shown once the spot is completed. Owned by the render glue.
    pub completion_marker: Option<Entity>,
}

impl ParkingSpot {
    pub fn new(center: Vec3, width: f32, depth: f32) -> Self {
        Self {
            center,
            half_width: width * 0.5,
            half_depth: depth * 0.5,
            completed: false,
            completion_marker: None,
        }
    }
}

/// Overall asphalt footprint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LotBounds {
    pub center: Vec3,
    pub width: f32,
    pub depth: f32,
}

impl LotBounds {
    pub fn min_x(&self) -> f32 {
        self.center.x - self.width * 0.5
    }

    pub fn max_x(&self) -> f32 {
        self.center.x + self.width * 0.5
    }

    pub fn min_z(&self) -> f32 {
        self.center.z - self.depth * 0.5
    }

    pub fn max_z(&self) -> f32 {
        self.center.z + self.depth * 0.5
    }
}

#[derive(Clone, Debug)]
pub struct ParkingLot {
    pub spots: Vec<ParkingSpot>,
    pub bounds: LotBounds,
}

impl ParkingLot {
    pub fn spot(&self, index: usize) -> Option<&ParkingSpot> {
        self.spots.get(index)
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }
}

/// Lay out the spot grid. Rows run along X, successive rows step along +Z.
pub fn generate_parking_lot(config: &ParkingLotConfig) -> ParkingLot {
    let total_w = config.cols as f32 * config.slot_width + 2.0 * config.margin;
    let lanes = config.rows.saturating_sub(1) as f32;
    let total_d =
        config.rows as f32 * config.slot_depth + lanes * config.lane_width + 2.0 * config.margin;

    let bounds = LotBounds {
        center: config.center,
        width: total_w,
        depth: total_d,
    };

    let base_x = bounds.min_x() + config.margin + config.slot_width * 0.5;
    let base_z = bounds.min_z() + config.margin + config.slot_depth * 0.5;

    let mut spots = Vec::with_capacity(config.rows * config.cols);
    for r in 0..config.rows {
        let row_z = base_z + r as f32 * (config.slot_depth + config.lane_width);
        for c in 0..config.cols {
            let x = base_x + c as f32 * config.slot_width;
            spots.push(ParkingSpot::new(
                Vec3::new(x, config.center.y, row_z),
                config.slot_width,
                config.slot_depth,
            ));
        }
    }

    ParkingLot { spots, bounds }
}

/// True when the car footprint, shrunk by a quarter of its half extents,
/// fits inside the spot on both axes. The shrink lets a slightly
/// off-centre car still count.
pub fn is_car_inside_spot(spot: &ParkingSpot, car_pos: Vec3, car_half_w: f32, car_half_d: f32) -> bool {
    (car_pos.x - spot.center.x).abs() <= spot.half_width - car_half_w * 0.25
        && (car_pos.z - spot.center.z).abs() <= spot.half_depth - car_half_d * 0.25
}

/// `min(count, total_spots)` distinct spot indices in uniformly random order.
pub fn make_random_target_sequence<R: Rng + ?Sized>(
    total_spots: usize,
    count: usize,
    rng: &mut R,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..total_spots).collect();
    indices.shuffle(rng);
    indices.truncate(count);
    indices
}

/// Where the yellow pole for the current target stands: on the spot's
/// centre line, pulled toward its near (-Z) edge.
pub fn target_marker_position(spot: &ParkingSpot) -> Vec3 {
    Vec3::new(spot.center.x, 0.9, spot.center.z - spot.half_depth * 0.6)
}

/// Where the green post for a completed spot stands.
pub fn completion_marker_position(spot: &ParkingSpot) -> Vec3 {
    Vec3::new(spot.center.x, 0.6, spot.center.z - spot.half_depth * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn origin_spot() -> ParkingSpot {
        ParkingSpot::new(Vec3::ZERO, 3.0, 6.0)
    }

    #[test]
    fn car_at_spot_centre_is_inside() {
        assert!(is_car_inside_spot(&origin_spot(), Vec3::ZERO, 0.5, 1.0));
    }

    #[test]
    fn car_far_away_is_outside() {
        assert!(!is_car_inside_spot(&origin_spot(), Vec3::new(10.0, 0.0, 0.0), 0.5, 1.0));
    }

    #[test]
    fn containment_tolerance_edges() {
        let spot = origin_spot();
        // halfW 1.5 - 0.5 * 0.25 = 1.375
        assert!(is_car_inside_spot(&spot, Vec3::new(1.375, 0.0, 0.0), 0.5, 1.0));
        assert!(!is_car_inside_spot(&spot, Vec3::new(1.4, 0.0, 0.0), 0.5, 1.0));
        // halfD 3.0 - 1.0 * 0.25 = 2.75
        assert!(is_car_inside_spot(&spot, Vec3::new(0.0, 0.0, -2.75), 0.5, 1.0));
        assert!(!is_car_inside_spot(&spot, Vec3::new(0.0, 0.0, -2.8), 0.5, 1.0));
    }

    #[test]
    fn sequence_has_requested_distinct_indices() {
        let mut rng = StdRng::seed_from_u64(7);
        let seq = make_random_target_sequence(10, 5, &mut rng);
        assert_eq!(seq.len(), 5);
        let unique: HashSet<_> = seq.iter().copied().collect();
        assert_eq!(unique.len(), 5);
        assert!(seq.iter().all(|&i| i < 10));
    }

    #[test]
    fn full_sequence_is_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seq = make_random_target_sequence(16, 16, &mut rng);
        seq.sort_unstable();
        assert_eq!(seq, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn sequence_is_truncated_to_spot_count() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(make_random_target_sequence(2, 5, &mut rng).len(), 2);
        assert!(make_random_target_sequence(0, 3, &mut rng).is_empty());
    }

    #[test]
    fn sequence_is_reproducible_from_seed() {
        let a = make_random_target_sequence(288, 3, &mut StdRng::seed_from_u64(42));
        let b = make_random_target_sequence(288, 3, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn default_lot_dimensions() {
        let config = ParkingLotConfig::default();
        let lot = generate_parking_lot(&config);
        assert_eq!(lot.len(), 12 * 24);
        assert!((lot.bounds.width - (24.0 * 2.6 + 2.0)).abs() < 1e-4);
        assert!((lot.bounds.depth - (12.0 * 5.2 + 11.0 * 3.0 + 2.0)).abs() < 1e-4);
    }

    #[test]
    fn spots_lie_within_bounds() {
        let lot = generate_parking_lot(&ParkingLotConfig::default());
        for spot in &lot.spots {
            assert!(spot.center.x - spot.half_width >= lot.bounds.min_x() - 1e-4);
            assert!(spot.center.x + spot.half_width <= lot.bounds.max_x() + 1e-4);
            assert!(spot.center.z - spot.half_depth >= lot.bounds.min_z() - 1e-4);
            assert!(spot.center.z + spot.half_depth <= lot.bounds.max_z() + 1e-4);
            assert!(!spot.completed);
        }
    }

    #[test]
    fn empty_grid_has_no_spots() {
        let lot = generate_parking_lot(&ParkingLotConfig {
            rows: 0,
            ..default()
        });
        assert!(lot.is_empty());
        assert!(lot.spot(0).is_none());
    }

    #[test]
    fn marker_sits_toward_near_edge() {
        let spot = origin_spot();
        let pos = target_marker_position(&spot);
        assert_eq!(pos.x, 0.0);
        assert!(pos.z < 0.0 && pos.z > -spot.half_depth);
    }
}
