use nannou::prelude::{vec3, Vec3};

use super::{Rule, RuleContext};
use crate::agent::Agent;

/// Keeps agents inside the world volume.
///
/// Every one of the six walls pushes inward with `sharpness^(-d)`, where `d`
/// is the signed distance to that wall (negative once outside). The push is
/// negligible far from a wall and grows exponentially past it, up to
/// `MAX_PUSH` per wall so it stays finite however far out an agent drifts.
pub struct WorldBoundaryRule {
    pub weight: f32,
    pub sharpness: f32,
}

impl WorldBoundaryRule {
    pub const DEFAULT_SHARPNESS: f32 = 1.5;

    // Squared sum over three axes must still fit in an f32
    pub const MAX_PUSH: f32 = 1.0e6;

    pub fn new(weight: f32, sharpness: f32) -> Self {
        Self { weight, sharpness }
    }

    pub fn magnitude(&self, distance_to_wall: f32) -> f32 {
        self.sharpness
            .max(1.0)
            .powf(-distance_to_wall)
            .min(Self::MAX_PUSH)
    }
}

impl Default for WorldBoundaryRule {
    fn default() -> Self {
        Self::new(1.0, Self::DEFAULT_SHARPNESS)
    }
}

impl Rule for WorldBoundaryRule {
    fn name(&self) -> &'static str {
        "World Boundary"
    }

    fn weight(&self) -> f32 {
        self.weight
    }

    fn weight_mut(&mut self) -> &mut f32 {
        &mut self.weight
    }

    fn calculate_vector(&self, agent: &mut Agent, ctx: &mut RuleContext<'_>) -> Vec3 {
        let b = &ctx.params.world_dimens;
        let p = agent.position;

        // Low wall pushes toward +axis, high wall toward -axis
        let push = vec3(
            self.magnitude(p.x - b.x_min) - self.magnitude(b.x_max - p.x),
            self.magnitude(p.y - b.y_min) - self.magnitude(b.y_max - p.y),
            self.magnitude(p.z - b.z_min) - self.magnitude(b.z_max - p.z),
        );

        push * self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Species;
    use crate::rules::test_support::Scene;

    #[test]
    fn magnitude_decays_with_distance() {
        let rule = WorldBoundaryRule::default();
        let mut previous = rule.magnitude(-10.0);
        let mut d = -10.0;
        while d < 60.0 {
            d += 0.5;
            let m = rule.magnitude(d);
            assert!(m < previous, "not decreasing at {d}");
            previous = m;
        }
        assert!(rule.magnitude(60.0) < 1e-9);
        assert_eq!(rule.magnitude(0.0), 1.0);
        assert!(rule.magnitude(-20.0) > 1000.0);
    }

    #[test]
    fn magnitude_stays_finite_far_outside() {
        let rule = WorldBoundaryRule::default();
        for d in [-220.0, -1_000.0, -1.0e9] {
            let m = rule.magnitude(d);
            assert!(m.is_finite(), "push at {d} is {m}");
            assert_eq!(m, WorldBoundaryRule::MAX_PUSH);
        }
    }

    #[test]
    fn stranded_agent_is_pulled_back() {
        let mut scene = Scene::new();
        let centre = scene.params.world_dimens.centre();
        let me = scene.add(Species::Boid, vec3(400.0, centre.y, centre.z));
        let mut agent = scene.agent(me);

        let force = scene.run(&WorldBoundaryRule::default(), &mut agent, &[], &[]);
        assert!(force.is_finite());
        assert!(force.x < 0.0);

        agent.accumulate_steering(force);
        assert!(agent.target_velocity.x < 0.0);
        assert!((agent.target_velocity.length() - agent.speed_limit()).abs() < 1e-5);
    }

    #[test]
    fn centre_of_world_feels_nothing() {
        let mut scene = Scene::new();
        let centre = scene.params.world_dimens.centre();
        let me = scene.add(Species::Boid, centre);
        let mut agent = scene.agent(me);

        let force = scene.run(&WorldBoundaryRule::default(), &mut agent, &[], &[]);
        assert!(force.length() < 1e-6);
    }

    #[test]
    fn walls_push_inward() {
        let mut scene = Scene::new();
        let b = scene.params.world_dimens;
        let centre = b.centre();
        let near_low_x = scene.add(Species::Boid, vec3(b.x_min + 0.5, centre.y, centre.z));
        let past_high_z = scene.add(Species::Boid, vec3(centre.x, centre.y, b.z_max + 2.0));
        let on_floor = scene.add(Species::Boid, vec3(centre.x, b.y_min, centre.z));
        let rule = WorldBoundaryRule::default();

        let mut agent = scene.agent(near_low_x);
        let force = scene.run(&rule, &mut agent, &[], &[]);
        assert!(force.x > 0.0);
        assert!(force.y.abs() < 1e-6 && force.z.abs() < 1e-6);

        let mut agent = scene.agent(past_high_z);
        let force = scene.run(&rule, &mut agent, &[], &[]);
        assert!(force.z < -1.0);

        let mut agent = scene.agent(on_floor);
        let force = scene.run(&rule, &mut agent, &[], &[]);
        assert!(force.y > 0.9);
    }
}
