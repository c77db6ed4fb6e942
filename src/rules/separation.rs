use nannou::prelude::Vec3;

use super::{Rule, RuleContext};
use crate::agent::Agent;

/// Steer away from the neighbours as a group. Switched off while the agent
/// is scared so that fleeing isn't diluted by local spacing.
pub struct SeparationRule {
    pub weight: f32,
}

impl SeparationRule {
    pub fn new(weight: f32) -> Self {
        Self { weight }
    }
}

impl Rule for SeparationRule {
    fn name(&self) -> &'static str {
        "Separation"
    }

    fn weight(&self) -> f32 {
        self.weight
    }

    fn weight_mut(&mut self) -> &mut f32 {
        &mut self.weight
    }

    fn calculate_vector(&self, agent: &mut Agent, ctx: &mut RuleContext<'_>) -> Vec3 {
        if agent.scared || ctx.neighbours.is_empty() {
            return Vec3::ZERO;
        }

        let away = ctx
            .neighbours
            .iter()
            .fold(Vec3::ZERO, |acc, n| acc + (agent.position - n.position));

        away.normalize_or_zero() * self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Species;
    use crate::rules::test_support::Scene;
    use nannou::prelude::vec3;

    #[test]
    fn no_neighbours_no_force() {
        let mut scene = Scene::new();
        let me = scene.add(Species::Boid, Vec3::ZERO);
        let mut agent = scene.agent(me);
        assert_eq!(scene.run(&SeparationRule::new(0.8), &mut agent, &[], &[]), Vec3::ZERO);
    }

    #[test]
    fn pushes_away_with_weight_length() {
        let mut scene = Scene::new();
        let me = scene.add(Species::Boid, Vec3::ZERO);
        let a = scene.add(Species::Boid, vec3(1.0, 0.0, 0.0));
        let b = scene.add(Species::Doib, vec3(0.0, 0.0, 3.0));
        let mut agent = scene.agent(me);

        let force = scene.run(&SeparationRule::new(0.8), &mut agent, &[a, b], &[]);
        assert!((force.length() - 0.8).abs() < 1e-5);
        assert!(force.x < 0.0 && force.z < 0.0);
    }

    #[test]
    fn scared_agents_ignore_spacing() {
        let mut scene = Scene::new();
        let me = scene.add(Species::Boid, Vec3::ZERO);
        let a = scene.add(Species::Boid, vec3(1.0, 0.0, 0.0));
        let mut agent = scene.agent(me);
        agent.scare();

        assert_eq!(scene.run(&SeparationRule::new(0.8), &mut agent, &[a], &[]), Vec3::ZERO);
    }
}
