/*
 * Agent Module
 *
 * This module defines the Agent struct shared by all three species:
 * the two prey kinds (Boid and Doib) and the Predator. Species differ only
 * in their parameter block and in which rules apply to them, so there is a
 * single record with a species tag instead of one type per kind.
 *
 * Each tick an agent goes through:
 * 1. Rules add steering into `target_velocity`, clamped to the speed limit
 * 2. Its random bias drifts a little
 * 3. `actual_velocity` turns toward target + bias at a bounded rate
 * 4. Position moves by `actual_velocity`
 */

use nannou::prelude::{vec3, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::Vec3Ext;
use crate::params::{SimulationParams, SpeciesParams};

// Ticks a prey stays scared after it last saw a predator
pub const SCARE_TICKS: u32 = 120;

// Ticks a predator stays sated after a kill
pub const HUNGER_TICKS: u32 = 300;

// Acceleration multiplier while a predator closes in on its target
pub const HUNT_ACCELERATION_FACTOR: f32 = 2.0;

// Divisor applied to the random bias once it exceeds the limit
pub const BIAS_DECAY: f32 = 100.0;

// Height above the world floor where dead agents come to rest
pub const GROUND_CLEARANCE: f32 = 0.5;

// Dead agents still fall when their species is configured with no speed
const MIN_FALL_SPEED: f32 = 0.05;
const MIN_FALL_ACCELERATION: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Boid,
    Doib,
    Predator,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Boid, Species::Doib, Species::Predator];

    pub fn is_prey(self) -> bool {
        matches!(self, Species::Boid | Species::Doib)
    }

    pub fn is_predator(self) -> bool {
        self == Species::Predator
    }

    pub fn label(self) -> &'static str {
        match self {
            Species::Boid => "Boid",
            Species::Doib => "Doib",
            Species::Predator => "Predator",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable handle to an agent. Ids are never reused, so a handle to a removed
/// agent simply stops resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// Heading derived from velocity, for display only
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub fn from_velocity(v: Vec3) -> Self {
        let horizontal = (v.x * v.x + v.z * v.z).sqrt();
        Self {
            yaw: (-v.z).atan2(v.x),
            pitch: horizontal.atan2(v.y),
        }
    }
}

/// What the renderer needs to draw one agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub species: Species,
    pub position: Vec3,
    pub velocity: Vec3,
    pub orientation: Orientation,
    pub alive: bool,
    pub scared: bool,
    pub hunting: bool,
}

#[derive(Clone, Debug)]
pub struct Agent {
    pub id: AgentId,
    pub species: Species,
    pub position: Vec3,
    pub actual_velocity: Vec3,
    pub target_velocity: Vec3,
    pub acceleration: f32,
    pub max_speed: f32,
    pub scared_surge: f32,
    pub visibility_range: f32,
    pub predator_detection_range: f32,
    pub random_bias: Vec3,
    pub alive: bool,
    // Dead and resting on the floor; eligible for removal
    pub grounded: bool,
    pub scared: bool,
    pub scare_timer: u32,
    // Predator-only state
    pub target: Option<AgentId>,
    pub hunting: bool,
    pub hunger: u32,
}

impl Agent {
    pub fn new(
        id: AgentId,
        species: Species,
        position: Vec3,
        velocity: Vec3,
        params: &SpeciesParams,
    ) -> Self {
        let mut agent = Self {
            id,
            species,
            position,
            actual_velocity: velocity,
            target_velocity: velocity,
            acceleration: 0.0,
            max_speed: 0.0,
            scared_surge: 1.0,
            visibility_range: 0.0,
            predator_detection_range: 0.0,
            random_bias: Vec3::ZERO,
            alive: true,
            grounded: false,
            scared: false,
            scare_timer: 0,
            target: None,
            hunting: false,
            // A fresh predator is hungry straight away
            hunger: 0,
        };
        agent.apply_species_params(params);
        agent
    }

    // Copy the live species limits onto the agent
    pub fn apply_species_params(&mut self, params: &SpeciesParams) {
        self.acceleration = params.acceleration;
        self.max_speed = params.max_speed;
        self.scared_surge = params.scared_surge;
        self.visibility_range = params.visibility_range;
        self.predator_detection_range = params.predator_detection_range;
    }

    pub fn speed_limit(&self) -> f32 {
        if self.scared {
            self.max_speed * self.scared_surge
        } else {
            self.max_speed
        }
    }

    pub fn effective_acceleration(&self) -> f32 {
        if self.hunting {
            self.acceleration * HUNT_ACCELERATION_FACTOR
        } else {
            self.acceleration
        }
    }

    pub fn scare(&mut self) {
        self.scared = true;
        self.scare_timer = SCARE_TICKS;
    }

    // Count down the scare; calm down once it runs out
    pub fn tick_scare_timer(&mut self) {
        if !self.scared {
            return;
        }
        self.scare_timer = self.scare_timer.saturating_sub(1);
        if self.scare_timer == 0 {
            self.scared = false;
        }
    }

    pub fn kill(&mut self) {
        self.alive = false;
        self.scared = false;
        self.scare_timer = 0;
        self.hunting = false;
        self.target = None;
    }

    /// Add summed rule output to the target velocity and clamp it to the
    /// current speed limit.
    pub fn accumulate_steering(&mut self, steering: Vec3) {
        self.target_velocity = (self.target_velocity + steering).clamp_length_to(self.speed_limit());
    }

    pub fn drift_random_bias<R: Rng + ?Sized>(&mut self, rng: &mut R, per_timestep: f32, limit: f32) {
        let half = (per_timestep / 2.0).abs();
        if half > 0.0 {
            self.random_bias += vec3(
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
            );
        }
        if self.random_bias.length() > limit {
            self.random_bias /= BIAS_DECAY;
        }
    }

    // Move actual velocity toward `desired` by at most `step`
    fn approach_velocity(&mut self, desired: Vec3, step: f32) {
        let diff = desired - self.actual_velocity;
        if diff.length() <= step {
            self.actual_velocity = desired;
        } else {
            self.actual_velocity += diff.set_length(step);
        }
    }

    /// Integrate one tick: bias drift, velocity smoothing and movement for the
    /// living, falling for the dead.
    pub fn integrate<R: Rng + ?Sized>(&mut self, rng: &mut R, params: &SimulationParams) {
        if !self.alive {
            self.fall(params.world_dimens.y_min + GROUND_CLEARANCE);
            return;
        }

        self.drift_random_bias(rng, params.randomness_per_timestep, params.randomness_limit);

        let desired = self.target_velocity + self.random_bias;
        self.approach_velocity(desired, self.effective_acceleration());
        self.position += self.actual_velocity;
    }

    fn fall(&mut self, ground_height: f32) {
        if self.grounded || self.position.y <= ground_height {
            self.land(ground_height);
            return;
        }

        self.target_velocity = vec3(0.0, -self.max_speed.max(MIN_FALL_SPEED), 0.0);
        let step = self.acceleration.max(MIN_FALL_ACCELERATION);
        self.approach_velocity(self.target_velocity, step);
        self.position += self.actual_velocity;

        if self.position.y <= ground_height {
            self.land(ground_height);
        }
    }

    fn land(&mut self, ground_height: f32) {
        self.position.y = ground_height;
        self.target_velocity = Vec3::ZERO;
        self.actual_velocity = Vec3::ZERO;
        self.grounded = true;
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_velocity(self.actual_velocity)
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id,
            species: self.species,
            position: self.position,
            velocity: self.actual_velocity,
            orientation: self.orientation(),
            alive: self.alive,
            scared: self.scared,
            hunting: self.hunting,
        }
    }
}
