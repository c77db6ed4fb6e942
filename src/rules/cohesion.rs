use nannou::prelude::Vec3;

use super::{Rule, RuleContext};
use crate::agent::Agent;

// Steer toward the centre of the visible neighbours
pub struct CohesionRule {
    pub weight: f32,
}

impl CohesionRule {
    pub fn new(weight: f32) -> Self {
        Self { weight }
    }
}

impl Rule for CohesionRule {
    fn name(&self) -> &'static str {
        "Cohesion"
    }

    fn weight(&self) -> f32 {
        self.weight
    }

    fn weight_mut(&mut self) -> &mut f32 {
        &mut self.weight
    }

    fn calculate_vector(&self, agent: &mut Agent, ctx: &mut RuleContext<'_>) -> Vec3 {
        if ctx.neighbours.is_empty() {
            return Vec3::ZERO;
        }

        let sum = ctx
            .neighbours
            .iter()
            .fold(Vec3::ZERO, |acc, n| acc + n.position);
        let centre = sum / ctx.neighbours.len() as f32;

        (centre - agent.position).normalize_or_zero() * self.weight
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
        assert_eq!(scene.run(&CohesionRule::new(1.0), &mut agent, &[], &[]), Vec3::ZERO);
    }

    #[test]
    fn points_toward_centroid() {
        let mut scene = Scene::new();
        let me = scene.add(Species::Boid, vec3(1.0, 1.0, 1.0));
        let positions = [
            vec3(5.0, 2.0, 1.0),
            vec3(3.0, -4.0, 2.0),
            vec3(4.0, 3.0, 6.0),
        ];
        let ids: Vec<_> = positions
            .iter()
            .map(|p| scene.add(Species::Doib, *p))
            .collect();
        let mut agent = scene.agent(me);

        let force = scene.run(&CohesionRule::new(0.5), &mut agent, &ids, &[]);
        let centroid = (positions[0] + positions[1] + positions[2]) / 3.0;

        assert!(force.dot(centroid - agent.position) > 0.0);
        assert!((force.length() - 0.5).abs() < 1e-5);
    }
}
