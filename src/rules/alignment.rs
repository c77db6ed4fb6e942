use nannou::prelude::Vec3;

use super::{Rule, RuleContext};
use crate::agent::Agent;

// Steer toward the average heading of the visible neighbours
pub struct AlignmentRule {
    pub weight: f32,
}

impl AlignmentRule {
    pub fn new(weight: f32) -> Self {
        Self { weight }
    }
}

impl Rule for AlignmentRule {
    fn name(&self) -> &'static str {
        "Alignment"
    }

    fn weight(&self) -> f32 {
        self.weight
    }

    fn weight_mut(&mut self) -> &mut f32 {
        &mut self.weight
    }

    fn calculate_vector(&self, _agent: &mut Agent, ctx: &mut RuleContext<'_>) -> Vec3 {
        if ctx.neighbours.is_empty() {
            return Vec3::ZERO;
        }

        let sum = ctx
            .neighbours
            .iter()
            .fold(Vec3::ZERO, |acc, n| acc + n.actual_velocity);
        let heading = sum / ctx.neighbours.len() as f32;

        heading.normalize_or_zero() * self.weight
    }
}
