//! The parking quest controller.
//!
//! Owns the car, the lot, the cones and all progression state. One `tick`
//! per frame runs, in order: reset, drive, cone collision, target dwell,
//! key, door, win check, status report. Presentation reads the results
//! back out; the session never touches the ECS.

use bevy::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use crate::game_state::GameState;
use crate::input::InputSnapshot;
use crate::procgen::parking::{
    generate_parking_lot, is_car_inside_spot, make_random_target_sequence, ParkingLot,
    ParkingLotConfig,
};
use crate::procgen::traffic_cones::{scatter_traffic_cones, ConeFieldConfig, TrafficCone};

use super::vehicles::{Car, CarPhysicsParams};

/// Rules and tuning for one session.
#[derive(Resource, Clone, Debug)]
pub struct SessionConfig {
    /// Spots to complete before the key appears.
    pub required_targets: usize,
    /// Seconds the car must hold still inside a target.
    pub required_park_time: f32,
    /// Speed below which the car counts as parked.
    pub parked_speed: f32,
    pub car_half_width: f32,
    pub car_half_depth: f32,
    /// Planar collision radius of the car against cones.
    pub car_radius: f32,
    /// Squared planar distance for picking up the key.
    pub key_pickup_dist_sq: f32,
    pub door_half_width: f32,
    /// Door lift speed (units/sec) once the key is held.
    pub door_rise_rate: f32,
    /// Door counts as open once its height exceeds this.
    pub door_open_height: f32,
    /// Depth of the win zone on the lot side of the door.
    pub door_win_depth: f32,
    /// Seconds between status reports.
    pub hud_interval: f32,
    /// Upper bound on a single step.
    pub max_step: f32,
    /// Fixed seed for cone layout and target order. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            required_targets: 3,
            required_park_time: 1.5,
            parked_speed: 0.4,
            car_half_width: 0.5,
            car_half_depth: 1.0,
            car_radius: 0.9,
            key_pickup_dist_sq: 2.0,
            door_half_width: 3.0,
            door_rise_rate: 3.0,
            door_open_height: 4.0,
            door_win_depth: 5.0,
            hud_interval: 0.5,
            max_step: 0.1,
            seed: None,
        }
    }
}

/// Spot indices still to be parked in, consumed front to back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetSequence {
    order: Vec<usize>,
    cursor: usize,
}

impl TargetSequence {
    pub fn new(order: Vec<usize>) -> Self {
        Self { order, cursor: 0 }
    }

    /// Spot index of the active target, if any remain.
    pub fn current(&self) -> Option<usize> {
        self.order.get(self.cursor).copied()
    }

    pub fn advance(&mut self) {
        if self.cursor < self.order.len() {
            self.cursor += 1;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.order.len()
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }
}

#[derive(Clone, Debug)]
pub struct DoorState {
    pub base: Vec3,
    pub half_width: f32,
    /// Accumulated rise above `base`.
    pub lift: f32,
    /// Latches true once the door clears the open height.
    pub opened: bool,
}

impl DoorState {
    pub fn height(&self) -> f32 {
        self.base.y + self.lift
    }

    pub fn position(&self) -> Vec3 {
        self.base + Vec3::Y * self.lift
    }
}

#[derive(Clone, Debug)]
pub struct KeyState {
    pub position: Vec3,
    pub available: bool,
    pub collected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusReport {
    pub speed: f32,
    pub completed: usize,
    pub required: usize,
    pub required_park_time: f32,
    /// Current dwell while the car sits inside the active target.
    pub park_hold: Option<f32>,
}

/// Milestones produced by a tick, in the order they happened.
#[derive(Event, Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Reset,
    TargetCompleted { ordinal: usize, spot: usize },
    KeySpawned,
    KeyCollected,
    DoorOpened,
    Won,
    Status(StatusReport),
}

#[derive(Resource)]
pub struct ParkingSession {
    config: SessionConfig,
    car: Car,
    lot: ParkingLot,
    cones: Vec<TrafficCone>,
    cone_radius: f32,
    targets: TargetSequence,
    door: DoorState,
    key: KeyState,
    state: GameState,
    completed_targets: usize,
    parked_timer: f32,
    inside_target: bool,
    hud_accumulator: f32,
    announced_win: bool,
    start_position: Vec3,
    start_yaw: f32,
    rng: StdRng,
}

impl ParkingSession {
    /// Generate a fresh lot and cone field and start playing.
    pub fn new(
        config: SessionConfig,
        car_params: CarPhysicsParams,
        lot_config: &ParkingLotConfig,
        cone_config: &ConeFieldConfig,
    ) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let lot = generate_parking_lot(lot_config);
        let cones = scatter_traffic_cones(&lot.bounds, cone_config, &mut rng);
        Self::with_layout(config, car_params, lot, cones, cone_config.radius, rng)
    }

    /// Start a session over an existing layout.
    pub fn with_layout(
        config: SessionConfig,
        car_params: CarPhysicsParams,
        lot: ParkingLot,
        cones: Vec<TrafficCone>,
        cone_radius: f32,
        mut rng: StdRng,
    ) -> Self {
        let bounds = lot.bounds;
        let door = DoorState {
            base: Vec3::new(0.0, 1.0, bounds.min_z() - 2.0),
            half_width: config.door_half_width,
            lift: 0.0,
            opened: false,
        };
        let key = KeyState {
            position: Vec3::new(bounds.max_x() - 3.0, 0.6, bounds.max_z() - 3.0),
            available: false,
            collected: false,
        };
        let start_position = Vec3::new(0.0, car_params.ride_height, door.base.z - 8.0);
        let start_yaw = 0.0;

        let mut car = Car::new(car_params);
        car.hard_reset(start_position, start_yaw);

        let targets = TargetSequence::new(make_random_target_sequence(
            lot.len(),
            config.required_targets,
            &mut rng,
        ));

        Self {
            config,
            car,
            lot,
            cones,
            cone_radius,
            targets,
            door,
            key,
            state: GameState::Playing,
            completed_targets: 0,
            parked_timer: 0.0,
            inside_target: false,
            hud_accumulator: 0.0,
            announced_win: false,
            start_position,
            start_yaw,
            rng,
        }
    }

    pub fn tick(&mut self, dt: f32, input: &InputSnapshot) -> Vec<SessionEvent> {
        let dt = dt.clamp(0.0, self.config.max_step);
        let mut events = Vec::new();
        self.hud_accumulator += dt;

        if input.reset {
            self.reset();
            events.push(SessionEvent::Reset);
            return events;
        }

        let previous = self.car.position();
        self.car.update(dt, &input.car);
        self.resolve_cone_collisions(previous);

        if self.state == GameState::Won {
            self.report_status(&mut events);
            return events;
        }

        self.inside_target = false;
        if let Some(spot) = self.targets.current() {
            self.evaluate_target(spot, dt, &mut events);
        }

        self.update_key(&mut events);
        self.update_door(dt, &mut events);
        self.check_win(&mut events);
        self.report_status(&mut events);
        events
    }

    /// Back to the starting line. Lot and cones are kept; the target order
    /// is drawn again.
    pub fn reset(&mut self) {
        self.state = GameState::Playing;
        self.completed_targets = 0;
        self.parked_timer = 0.0;
        self.inside_target = false;
        self.hud_accumulator = 0.0;
        self.announced_win = false;

        self.key.available = false;
        self.key.collected = false;
        self.door.lift = 0.0;
        self.door.opened = false;

        for spot in &mut self.lot.spots {
            spot.completed = false;
        }

        self.targets = TargetSequence::new(make_random_target_sequence(
            self.lot.len(),
            self.config.required_targets,
            &mut self.rng,
        ));

        self.car.hard_reset(self.start_position, self.start_yaw);
    }

    fn resolve_cone_collisions(&mut self, previous: Vec3) {
        let car_pos = self.car.position();
        let min_dist = self.config.car_radius + self.cone_radius;
        let hit = self
            .cones
            .iter()
            .any(|cone| planar_dist_sq(car_pos, cone.position) < min_dist * min_dist);
        if hit {
            self.car.set_position(previous);
            self.car.stop();
        }
    }

    fn evaluate_target(&mut self, spot_index: usize, dt: f32, events: &mut Vec<SessionEvent>) {
        let car_pos = self.car.position();
        let still = self.car.speed().abs() < self.config.parked_speed;
        let Some(spot) = self.lot.spots.get_mut(spot_index) else {
            return;
        };

        let inside = still
            && is_car_inside_spot(
                spot,
                car_pos,
                self.config.car_half_width,
                self.config.car_half_depth,
            );
        self.inside_target = inside;

        if !inside {
            self.parked_timer = 0.0;
            return;
        }

        self.parked_timer += dt;
        if !spot.completed && self.parked_timer >= self.config.required_park_time {
            spot.completed = true;
            self.completed_targets += 1;
            self.parked_timer = 0.0;
            self.targets.advance();
            events.push(SessionEvent::TargetCompleted {
                ordinal: self.completed_targets,
                spot: spot_index,
            });
        }
    }

    fn update_key(&mut self, events: &mut Vec<SessionEvent>) {
        if !self.key.available && self.completed_targets >= self.config.required_targets {
            self.key.available = true;
            events.push(SessionEvent::KeySpawned);
        }

        if self.key.available
            && !self.key.collected
            && planar_dist_sq(self.car.position(), self.key.position) < self.config.key_pickup_dist_sq
        {
            self.key.collected = true;
            events.push(SessionEvent::KeyCollected);
        }
    }

    fn update_door(&mut self, dt: f32, events: &mut Vec<SessionEvent>) {
        if !self.key.collected || self.door.opened {
            return;
        }
        self.door.lift += self.config.door_rise_rate * dt;
        if self.door.height() > self.config.door_open_height {
            self.door.opened = true;
            events.push(SessionEvent::DoorOpened);
        }
    }

    fn check_win(&mut self, events: &mut Vec<SessionEvent>) {
        if !self.door.opened {
            return;
        }
        let car = self.car.position();
        let door = self.door.base;
        let in_zone = (car.x - door.x).abs() <= self.door.half_width
            && car.z > door.z
            && car.z < door.z + self.config.door_win_depth;
        if !in_zone {
            return;
        }

        self.state = GameState::Won;
        if !self.announced_win {
            self.announced_win = true;
            events.push(SessionEvent::Won);
        }
    }

    fn report_status(&mut self, events: &mut Vec<SessionEvent>) {
        if self.hud_accumulator <= self.config.hud_interval {
            return;
        }
        self.hud_accumulator = 0.0;
        let park_hold = (self.state == GameState::Playing && self.inside_target)
            .then_some(self.parked_timer);
        events.push(SessionEvent::Status(StatusReport {
            speed: self.car.speed(),
            completed: self.completed_targets,
            required: self.config.required_targets,
            required_park_time: self.config.required_park_time,
            park_hold,
        }));
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn car(&self) -> &Car {
        &self.car
    }

    pub fn lot(&self) -> &ParkingLot {
        &self.lot
    }

    /// Mutable lot access for the render glue to register marker handles.
    pub fn lot_mut(&mut self) -> &mut ParkingLot {
        &mut self.lot
    }

    pub fn cones(&self) -> &[TrafficCone] {
        &self.cones
    }

    pub fn cone_radius(&self) -> f32 {
        self.cone_radius
    }

    pub fn targets(&self) -> &TargetSequence {
        &self.targets
    }

    pub fn door(&self) -> &DoorState {
        &self.door
    }

    pub fn key(&self) -> &KeyState {
        &self.key
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn completed_targets(&self) -> usize {
        self.completed_targets
    }

    pub fn parked_timer(&self) -> f32 {
        self.parked_timer
    }

    pub fn is_inside_target(&self) -> bool {
        self.inside_target
    }

    /// Dwell progress in `[0, 1]` toward completing the active target.
    pub fn park_progress(&self) -> f32 {
        if self.parked_timer > 0.0 {
            (self.parked_timer / self.config.required_park_time).min(1.0)
        } else {
            0.0
        }
    }

    #[cfg(test)]
    fn car_mut(&mut self) -> &mut Car {
        &mut self.car
    }
}

fn planar_dist_sq(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz
}
