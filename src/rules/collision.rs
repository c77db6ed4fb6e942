use nannou::prelude::Vec3;
use std::ops::RangeInclusive;

use super::{Rule, RuleContext};
use crate::agent::Agent;
use crate::geometry::Vec3Ext;

/// Short-range repulsion that decays exponentially with distance.
///
/// `sharpness` is the base of the decay: higher values let agents get closer
/// before reacting and make the swerve snappier. Values below 1 are treated as 1.
pub struct CollisionAvoidanceRule {
    pub weight: f32,
    pub sharpness: f32,
}

impl CollisionAvoidanceRule {
    pub const DEFAULT_SHARPNESS: f32 = 3.0;

    pub fn new(weight: f32, sharpness: f32) -> Self {
        Self { weight, sharpness }
    }

    pub fn magnitude(&self, distance: f32) -> f32 {
        self.sharpness.max(1.0).powf(-distance)
    }
}

impl Default for CollisionAvoidanceRule {
    fn default() -> Self {
        Self::new(1.0, Self::DEFAULT_SHARPNESS)
    }
}

impl Rule for CollisionAvoidanceRule {
    fn name(&self) -> &'static str {
        "Collision Avoidance"
    }

    fn weight(&self) -> f32 {
        self.weight
    }

    fn weight_mut(&mut self) -> &mut f32 {
        &mut self.weight
    }

    fn weight_range(&self) -> RangeInclusive<f32> {
        0.0..=5.0
    }

    fn calculate_vector(&self, agent: &mut Agent, ctx: &mut RuleContext<'_>) -> Vec3 {
        let avoid = ctx.neighbours.iter().fold(Vec3::ZERO, |acc, n| {
            let distance = agent.position.distance(n.position);
            acc + (agent.position - n.position).set_length(self.magnitude(distance))
        });

        avoid * self.weight
    }
}
