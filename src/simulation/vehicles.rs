//! Player car kinematics.
//!
//! A heuristic bicycle-free model: one scalar speed along the heading, yaw
//! steering whose authority fades with speed, a handbrake that only brakes
//! forward motion, and one-sided rolling friction.

use bevy::prelude::*;

/// Tuning for the car integrator.
#[derive(Resource, Clone, Copy, Debug)]
pub struct CarPhysicsParams {
    /// Top forward speed (units/sec). Reverse is capped at a quarter of this.
    pub max_speed: f32,
    /// Acceleration at full throttle (units/sec²).
    pub accel: f32,
    /// Handbrake deceleration (units/sec²).
    pub brake: f32,
    /// Yaw rate at full steer before speed scaling (rad/sec).
    pub steer_rate: f32,
    /// Rolling friction (units/sec²), always pulls speed toward zero.
    pub friction: f32,
    /// Height the car body is pinned to.
    pub ride_height: f32,
}

impl Default for CarPhysicsParams {
    fn default() -> Self {
        Self {
            max_speed: 20.0,
            accel: 10.0,
            brake: 20.0,
            steer_rate: 1.3,
            friction: 3.0,
            ride_height: 0.25,
        }
    }
}

/// Driver intent for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CarInput {
    /// -1 (full reverse) to +1 (full throttle).
    pub throttle: f32,
    /// -1 (right) to +1 (left).
    pub steer: f32,
    pub handbrake: bool,
}

/// Steering authority multiplier: full lock at a crawl, damped at speed.
pub fn steer_scale(speed: f32) -> f32 {
    (10.0 / (speed.abs() + 5.0)).clamp(0.4, 1.2)
}

/// The player's car state.
#[derive(Clone, Debug)]
pub struct Car {
    params: CarPhysicsParams,
    position: Vec3,
    /// Yaw about +Y in radians. Zero faces +Z.
    heading: f32,
    /// Signed speed along the heading, forward positive.
    speed: f32,
}

impl Car {
    pub fn new(params: CarPhysicsParams) -> Self {
        Self {
            params,
            position: Vec3::new(0.0, params.ride_height, 0.0),
            heading: 0.0,
            speed: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, input: &CarInput) {
        let p = self.params;
        let throttle = input.throttle.clamp(-1.0, 1.0);
        let steer = input.steer.clamp(-1.0, 1.0);

        self.heading += steer * p.steer_rate * steer_scale(self.speed) * dt;

        let mut a = throttle * p.accel;

        // Handbrake bleeds forward speed and cancels forward drive. It never
        // pushes the car into reverse.
        if input.handbrake && self.speed > 0.0 {
            self.speed = (self.speed - p.brake * dt).max(0.0);
            if a > 0.0 {
                a = 0.0;
            }
        }

        if self.speed > 0.0 {
            self.speed = (self.speed - p.friction * dt).max(0.0);
        } else if self.speed < 0.0 {
            self.speed = (self.speed + p.friction * dt).min(0.0);
        }

        self.speed = (self.speed + a * dt).clamp(-p.max_speed * 0.25, p.max_speed);

        let (s, c) = self.heading.sin_cos();
        self.position.y = p.ride_height;
        self.position.x += self.speed * s * dt;
        self.position.z += self.speed * c * dt;
    }

    /// Teleport to a pose and come to rest.
    pub fn hard_reset(&mut self, position: Vec3, yaw: f32) {
        self.position = position;
        self.heading = yaw;
        self.speed = 0.0;
    }

    /// Kill speed in place (collision response).
    pub fn stop(&mut self) {
        self.speed = 0.0;
    }

    /// Put the car back where it was without touching heading or speed.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(Quat::from_rotation_y(self.heading))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn throttle(value: f32) -> CarInput {
        CarInput {
            throttle: value,
            ..default()
        }
    }

    #[test]
    fn accelerates_forward_under_throttle() {
        let mut car = Car::new(CarPhysicsParams {
            brake: 40.0,
            steer_rate: 1.0,
            ..default()
        });
        car.update(0.1, &throttle(1.0));
        assert!(car.speed() > 0.0);
        assert!(car.position().z > 0.0);
    }

    #[test]
    fn speed_grows_monotonically_with_throttle() {
        let mut car = Car::new(CarPhysicsParams::default());
        let mut last = car.speed();
        for _ in 0..20 {
            car.update(0.05, &throttle(1.0));
            assert!(car.speed() > last);
            last = car.speed();
        }
    }

    #[test]
    fn friction_slows_car_when_throttle_released() {
        let mut car = Car::new(CarPhysicsParams::default());
        for _ in 0..10 {
            car.update(0.1, &throttle(1.0));
        }
        let before = car.speed();
        car.update(0.1, &throttle(0.0));
        assert!(car.speed() < before);
    }

    #[test]
    fn friction_never_overshoots_zero() {
        let mut car = Car::new(CarPhysicsParams::default());
        car.update(0.1, &throttle(1.0));
        for _ in 0..50 {
            car.update(0.1, &throttle(0.0));
        }
        assert_eq!(car.speed(), 0.0);
    }

    #[test]
    fn speed_is_capped_both_ways() {
        let params = CarPhysicsParams::default();
        let mut car = Car::new(params);
        for _ in 0..200 {
            car.update(0.1, &throttle(1.0));
        }
        assert!((car.speed() - params.max_speed).abs() < 1e-4);

        let mut car = Car::new(params);
        for _ in 0..200 {
            car.update(0.1, &throttle(-1.0));
        }
        assert!((car.speed() + params.max_speed * 0.25).abs() < 1e-4);
    }

    #[test]
    fn handbrake_cannot_drive_forward() {
        let mut car = Car::new(CarPhysicsParams::default());
        for _ in 0..10 {
            car.update(0.1, &throttle(1.0));
        }
        let before = car.speed();
        car.update(
            0.1,
            &CarInput {
                throttle: 1.0,
                handbrake: true,
                ..default()
            },
        );
        assert!(car.speed() < before);
        assert!(car.speed() >= 0.0);
    }

    #[test]
    fn handbrake_from_rest_does_nothing_forward() {
        let mut car = Car::new(CarPhysicsParams::default());
        car.update(
            0.1,
            &CarInput {
                throttle: 1.0,
                handbrake: true,
                ..default()
            },
        );
        // Speed is zero, so the handbrake branch is skipped and throttle applies.
        assert!(car.speed() > 0.0);
    }

    #[test]
    fn steering_authority_fades_with_speed() {
        assert_eq!(steer_scale(0.0), 1.2);
        assert!((steer_scale(5.0) - 1.0).abs() < 1e-6);
        assert_eq!(steer_scale(100.0), 0.4);
        assert_eq!(steer_scale(-100.0), 0.4);
    }

    #[test]
    fn ride_height_is_pinned() {
        let params = CarPhysicsParams::default();
        let mut car = Car::new(params);
        car.hard_reset(Vec3::new(3.0, 9.0, -4.0), 0.0);
        car.update(0.016, &CarInput::default());
        assert_eq!(car.position().y, params.ride_height);
        assert_eq!(car.position().x, 3.0);
    }

    #[test]
    fn hard_reset_and_stop() {
        let mut car = Car::new(CarPhysicsParams::default());
        for _ in 0..5 {
            car.update(0.1, &throttle(1.0));
        }
        let pos = car.position();
        car.stop();
        assert_eq!(car.speed(), 0.0);
        assert_eq!(car.position(), pos);

        car.hard_reset(Vec3::new(1.0, 0.25, 2.0), 1.5);
        assert_eq!(car.speed(), 0.0);
        assert_eq!(car.heading(), 1.5);
        assert_eq!(car.position(), Vec3::new(1.0, 0.25, 2.0));
    }
}
