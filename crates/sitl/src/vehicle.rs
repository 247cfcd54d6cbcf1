//! Minimal multirotor kinematics
//!
//! A velocity-following model: the vehicle tracks the commanded velocity
//! perfectly within one tick and integrates position from it. That is
//! deliberately simple; the harness exercises the supervisory logic, not
//! vehicle dynamics. Optional Gaussian-ish position noise (uniform
//! approximation, seeded) stands in for estimator jitter.

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use offboard_center_core::telemetry::VelocityCommand;

use crate::scenario::ScenarioConfig;

/// Simulated vehicle state.
#[derive(Debug)]
pub struct QuadModel {
    position: Vector3<f32>,
    velocity: Vector3<f32>,
    yaw: f32,
    noise_std: f32,
    rng: StdRng,
}

impl QuadModel {
    pub fn new(scenario: &ScenarioConfig) -> Self {
        Self {
            position: Vector3::from(scenario.initial_position),
            velocity: Vector3::zeros(),
            yaw: scenario.initial_yaw,
            noise_std: scenario.noise_std,
            rng: StdRng::seed_from_u64(scenario.seed),
        }
    }

    /// Advance the model by one tick under the given command.
    pub fn step(&mut self, command: &VelocityCommand, dt: f32) {
        self.velocity = Vector3::new(command.vx, command.vy, command.vz);
        self.position += self.velocity * dt;
        self.yaw += command.yaw_rate * dt;

        // The ground is at z = 0; a descent command cannot push below it.
        if self.position.z < 0.0 {
            self.position.z = 0.0;
            self.velocity.z = 0.0;
        }
    }

    /// True vehicle position.
    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    /// True vehicle velocity.
    pub fn velocity(&self) -> Vector3<f32> {
        self.velocity
    }

    /// True vehicle yaw.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Position as the estimator would report it, with noise applied.
    pub fn measured_position(&mut self) -> Vector3<f32> {
        if self.noise_std == 0.0 {
            return self.position;
        }
        let mut noisy = self.position;
        for value in noisy.iter_mut() {
            *value += self.rng.gen_range(-self.noise_std..=self.noise_std);
        }
        noisy
    }
}
