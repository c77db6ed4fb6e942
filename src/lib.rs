/*
 * Predator/Prey Boid Simulation - Module Definitions
 *
 * The simulation engine (agents, rules, neighbour queries, population control
 * and the tick driver) plus the nannou viewer that draws it and edits its
 * parameters live.
 */

// Re-export key components for easier access
pub use agent::{Agent, AgentId, AgentSnapshot, Orientation, Species};
pub use config::{ConfigError, SimulationConfig};
pub use geometry::{Bounds3D, Vec3Ext};
pub use params::{SimulationParams, SpeciesParams};
pub use population::{PopulationEvent, Populations};
pub use rules::{Rule, RuleContext, RuleSet, RuleWeights};
pub use world::{TickReport, World};

// Engine
pub mod agent;
pub mod config;
pub mod geometry;
pub mod neighbors;
pub mod params;
pub mod population;
pub mod rng;
pub mod rules;
pub mod targeting;
pub mod world;

// Viewer
pub mod app;
pub mod debug;
pub mod renderer;
pub mod ui;

// Constants
pub const AGENT_SIZE: f32 = 6.0;
