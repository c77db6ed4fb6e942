/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * adjustable parameters for the simulation. The viewer edits these live and
 * the engine reads them again on every tick, so a change takes effect on the
 * very next step without rebuilding any agents.
 */

use serde::{Deserialize, Deserializer, Serialize};
use std::ops::RangeInclusive;

use crate::agent::Species;
use crate::geometry::Bounds3D;

// Per-species limits and population target
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesParams {
    pub count: usize,
    pub max_speed: f32,
    pub acceleration: f32,
    // Multiplier on max speed while fleeing
    pub scared_surge: f32,
    pub visibility_range: f32,
    pub predator_detection_range: f32,
}

impl Default for SpeciesParams {
    fn default() -> Self {
        Self {
            count: 100,
            max_speed: 0.5,
            acceleration: 0.02,
            scared_surge: 2.0,
            visibility_range: 40.0,
            predator_detection_range: 15.0,
        }
    }
}

impl SpeciesParams {
    pub fn boid() -> Self {
        Self {
            count: 150,
            ..Self::default()
        }
    }

    pub fn doib() -> Self {
        Self {
            count: 50,
            max_speed: 0.3,
            acceleration: 0.015,
            scared_surge: 2.5,
            ..Self::default()
        }
    }

    pub fn predator() -> Self {
        Self {
            count: 3,
            max_speed: 0.6,
            acceleration: 0.02,
            scared_surge: 1.0,
            visibility_range: 100.0,
            predator_detection_range: 0.0,
        }
    }

    pub fn for_species(species: Species) -> Self {
        match species {
            Species::Boid => Self::boid(),
            Species::Doib => Self::doib(),
            Species::Predator => Self::predator(),
        }
    }
}

// A species block as written in a config file; absent keys keep that
// species' own defaults
#[derive(Deserialize)]
struct SpeciesOverrides {
    count: Option<usize>,
    max_speed: Option<f32>,
    acceleration: Option<f32>,
    scared_surge: Option<f32>,
    visibility_range: Option<f32>,
    predator_detection_range: Option<f32>,
}

impl SpeciesOverrides {
    fn apply(self, base: SpeciesParams) -> SpeciesParams {
        SpeciesParams {
            count: self.count.unwrap_or(base.count),
            max_speed: self.max_speed.unwrap_or(base.max_speed),
            acceleration: self.acceleration.unwrap_or(base.acceleration),
            scared_surge: self.scared_surge.unwrap_or(base.scared_surge),
            visibility_range: self.visibility_range.unwrap_or(base.visibility_range),
            predator_detection_range: self
                .predator_detection_range
                .unwrap_or(base.predator_detection_range),
        }
    }
}

fn species_block<'de, D: Deserializer<'de>>(
    deserializer: D,
    species: Species,
) -> Result<SpeciesParams, D::Error> {
    Ok(SpeciesOverrides::deserialize(deserializer)?.apply(SpeciesParams::for_species(species)))
}

fn boid_block<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SpeciesParams, D::Error> {
    species_block(deserializer, Species::Boid)
}

fn doib_block<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SpeciesParams, D::Error> {
    species_block(deserializer, Species::Doib)
}

fn predator_block<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SpeciesParams, D::Error> {
    species_block(deserializer, Species::Predator)
}

// Parameters for the simulation that can be adjusted via UI
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    #[serde(deserialize_with = "boid_block")]
    pub boid: SpeciesParams,
    #[serde(deserialize_with = "doib_block")]
    pub doib: SpeciesParams,
    #[serde(deserialize_with = "predator_block")]
    pub predator: SpeciesParams,

    // Neighbour detection radius shared by every species
    pub visibility_threshold: f32,
    pub world_dimens: Bounds3D,
    pub spawn_position: Bounds3D,
    pub spawn_velocity: Bounds3D,

    // Random bias: accumulation rate and cap
    pub randomness_per_timestep: f32,
    pub randomness_limit: f32,

    // Per-tick probability that a predator re-rolls its target
    pub pred_new_target_chance: f32,
    pub hunt_range: f32,
    pub kill_range: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        let world_dimens = Bounds3D::centred_xz(200.0, 200.0, 100.0);

        Self {
            boid: SpeciesParams::boid(),
            doib: SpeciesParams::doib(),
            predator: SpeciesParams::predator(),
            visibility_threshold: 10.0,
            world_dimens,
            // Keep new agents off the walls so they don't spawn into a boundary push
            spawn_position: Bounds3D::new(-80.0, 80.0, 10.0, 90.0, -80.0, 80.0),
            spawn_velocity: Bounds3D::symmetric(0.3, 0.3, 0.3),
            randomness_per_timestep: 0.005,
            randomness_limit: 0.05,
            pred_new_target_chance: 0.01,
            hunt_range: 20.0,
            kill_range: 1.0,
        }
    }
}

impl SimulationParams {
    pub fn species(&self, species: Species) -> &SpeciesParams {
        match species {
            Species::Boid => &self.boid,
            Species::Doib => &self.doib,
            Species::Predator => &self.predator,
        }
    }

    pub fn species_mut(&mut self, species: Species) -> &mut SpeciesParams {
        match species {
            Species::Boid => &mut self.boid,
            Species::Doib => &mut self.doib,
            Species::Predator => &mut self.predator,
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_count_range(species: Species) -> RangeInclusive<usize> {
        match species {
            Species::Predator => 0..=20,
            Species::Boid | Species::Doib => 0..=1000,
        }
    }

    pub fn get_max_speed_range() -> RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn get_acceleration_range() -> RangeInclusive<f32> {
        0.0..=0.2
    }

    pub fn get_scared_surge_range() -> RangeInclusive<f32> {
        1.0..=5.0
    }

    pub fn get_range_range() -> RangeInclusive<f32> {
        0.0..=150.0
    }

    pub fn get_visibility_range() -> RangeInclusive<f32> {
        0.0..=100.0
    }

    pub fn get_randomness_per_timestep_range() -> RangeInclusive<f32> {
        0.0..=0.05
    }

    pub fn get_randomness_limit_range() -> RangeInclusive<f32> {
        0.0..=0.5
    }

    pub fn get_chance_range() -> RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn get_kill_range_range() -> RangeInclusive<f32> {
        0.0..=10.0
    }
}
