use nannou::prelude::Vec3;

use super::{Rule, RuleContext};
use crate::agent::Agent;

/// Prey flee every predator inside their detection range and get scared.
///
/// The scare wears off on the agent's own timer. The tick driver counts it
/// down before any rule runs, so agents calm down even without this rule.
pub struct PredatorAvoidanceRule {
    pub weight: f32,
}

impl PredatorAvoidanceRule {
    pub fn new(weight: f32) -> Self {
        Self { weight }
    }
}

impl Rule for PredatorAvoidanceRule {
    fn name(&self) -> &'static str {
        "Predator Avoidance"
    }

    fn weight(&self) -> f32 {
        self.weight
    }

    fn weight_mut(&mut self) -> &mut f32 {
        &mut self.weight
    }

    fn calculate_vector(&self, agent: &mut Agent, ctx: &mut RuleContext<'_>) -> Vec3 {
        if !agent.species.is_prey() {
            return Vec3::ZERO;
        }

        let mut flee = Vec3::ZERO;
        for predator in ctx.predators {
            if agent.position.distance(predator.position) < agent.predator_detection_range {
                agent.scare();
                flee += agent.position - predator.position;
            }
        }

        flee * self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Species, SCARE_TICKS};
    use crate::rules::test_support::Scene;
    use nannou::prelude::vec3;

    #[test]
    fn predator_in_range_scares_and_repels() {
        let mut scene = Scene::new();
        scene.params.boid.predator_detection_range = 15.0;
        let me = scene.add(Species::Boid, Vec3::ZERO);
        let hunter = scene.add(Species::Predator, vec3(5.0, 0.0, 0.0));
        let mut agent = scene.agent(me);

        let force = scene.run(&PredatorAvoidanceRule::new(1.0), &mut agent, &[], &[hunter]);

        assert!(agent.scared);
        assert_eq!(agent.scare_timer, SCARE_TICKS);
        assert!((force - vec3(-5.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn no_predators_no_force_and_no_scare() {
        let mut scene = Scene::new();
        let me = scene.add(Species::Boid, Vec3::ZERO);
        let mut agent = scene.agent(me);

        let force = scene.run(&PredatorAvoidanceRule::new(1.0), &mut agent, &[], &[]);
        assert_eq!(force, Vec3::ZERO);
        assert!(!agent.scared);
    }

    #[test]
    fn each_agent_keeps_its_own_timer() {
        let mut scene = Scene::new();
        let a = scene.add(Species::Boid, Vec3::ZERO);
        let b = scene.add(Species::Doib, vec3(30.0, 0.0, 0.0));
        let hunter = scene.add(Species::Predator, vec3(1.0, 0.0, 0.0));
        let rule = PredatorAvoidanceRule::new(1.0);

        let mut first = scene.agent(a);
        let mut second = scene.agent(b);
        scene.run(&rule, &mut first, &[], &[hunter]);
        for _ in 0..10 {
            scene.run(&rule, &mut second, &[], &[]);
        }

        assert!(first.scared);
        assert_eq!(first.scare_timer, SCARE_TICKS);
        assert!(!second.scared);
    }

    #[test]
    fn predators_do_not_flee() {
        let mut scene = Scene::new();
        let me = scene.add(Species::Predator, Vec3::ZERO);
        let other = scene.add(Species::Predator, vec3(1.0, 0.0, 0.0));
        let mut agent = scene.agent(me);

        let force = scene.run(&PredatorAvoidanceRule::new(1.0), &mut agent, &[], &[other]);
        assert_eq!(force, Vec3::ZERO);
        assert!(!agent.scared);
    }
}
