//! Static traffic cones scattered over the lot.

use bevy::prelude::*;
use rand::Rng;

use super::parking::LotBounds;

#[derive(Resource, Clone, Debug)]
pub struct ConeFieldConfig {
    pub count: usize,
    /// Keep cones this far inside the asphalt edge.
    pub inset: f32,
    /// Collision radius.
    pub radius: f32,
    pub visual_radius: f32,
    pub visual_height: f32,
}

impl Default for ConeFieldConfig {
    fn default() -> Self {
        Self {
            count: 30,
            inset: 2.0,
            radius: 0.35,
            visual_radius: 0.4,
            visual_height: 1.0,
        }
    }
}

/// A cone is just a ground position; it never moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrafficCone {
    pub position: Vec3,
}

pub fn scatter_traffic_cones<R: Rng + ?Sized>(
    bounds: &LotBounds,
    config: &ConeFieldConfig,
    rng: &mut R,
) -> Vec<TrafficCone> {
    let (min_x, max_x) = inset_range(bounds.min_x(), bounds.max_x(), config.inset);
    let (min_z, max_z) = inset_range(bounds.min_z(), bounds.max_z(), config.inset);
    let y = config.visual_height * 0.5;

    (0..config.count)
        .map(|_| TrafficCone {
            position: Vec3::new(sample(rng, min_x, max_x), y, sample(rng, min_z, max_z)),
        })
        .collect()
}

/// Shrink `[lo, hi]` by `inset` on both sides, collapsing to the midpoint
/// when the range is too narrow.
fn inset_range(lo: f32, hi: f32, inset: f32) -> (f32, f32) {
    let (a, b) = (lo + inset, hi - inset);
    if a <= b {
        (a, b)
    } else {
        let mid = (lo + hi) * 0.5;
        (mid, mid)
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if lo < hi {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
