/*
 * Rules Module
 *
 * Each rule turns an agent plus the shared tick context into one weighted
 * steering vector. Rules hold nothing but their tuning (weight and, for some,
 * a sharpness); anything that belongs to an individual agent, like its scare
 * timer or hunger, lives on the agent.
 *
 * The tick driver sums the output of every rule in the RuleSet and adds the
 * result to the agent's target velocity.
 */

use nannou::prelude::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::agent::{Agent, AgentId};
use crate::params::SimulationParams;
use crate::population::Populations;
use crate::rng::SimRng;

mod alignment;
mod boundary;
mod cohesion;
mod collision;
mod predator_avoidance;
mod prey_seek;
mod separation;

pub use alignment::AlignmentRule;
pub use boundary::WorldBoundaryRule;
pub use cohesion::CohesionRule;
pub use collision::CollisionAvoidanceRule;
pub use predator_avoidance::PredatorAvoidanceRule;
pub use prey_seek::PreySeekRule;
pub use separation::SeparationRule;

/// Everything a rule may look at while evaluating one agent.
pub struct RuleContext<'a> {
    /// Same-group neighbours within sight, computed before anyone moved.
    pub neighbours: &'a [&'a Agent],
    /// Predators within the agent's detection range.
    pub predators: &'a [&'a Agent],
    /// Every population, for global queries like target search.
    pub populations: &'a Populations,
    pub params: &'a SimulationParams,
    pub rng: &'a mut SimRng,
    /// Prey killed this tick. Applied by the tick driver after all rules ran.
    pub kills: &'a mut Vec<AgentId>,
}

pub trait Rule {
    fn name(&self) -> &'static str;

    fn weight(&self) -> f32;

    fn weight_mut(&mut self) -> &mut f32;

    // Slider range for live tuning
    fn weight_range(&self) -> RangeInclusive<f32> {
        0.0..=3.0
    }

    fn calculate_vector(&self, agent: &mut Agent, ctx: &mut RuleContext<'_>) -> Vec3;
}

// Starting weights for the standard rule set
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleWeights {
    pub separation: f32,
    pub cohesion: f32,
    pub alignment: f32,
    pub collision_avoidance: f32,
    pub collision_sharpness: f32,
    pub world_boundary: f32,
    pub boundary_sharpness: f32,
    pub predator_avoidance: f32,
    pub prey_seek: f32,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            separation: 0.8,
            cohesion: 0.1,
            alignment: 0.1,
            collision_avoidance: 0.8,
            collision_sharpness: CollisionAvoidanceRule::DEFAULT_SHARPNESS,
            world_boundary: 1.0,
            boundary_sharpness: WorldBoundaryRule::DEFAULT_SHARPNESS,
            predator_avoidance: 1.0,
            prey_seek: 1.0,
        }
    }
}

pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// All seven rules. Predator avoidance runs first so separation already
    /// sees this tick's scare state.
    pub fn standard(weights: &RuleWeights) -> Self {
        Self::empty()
            .with(PredatorAvoidanceRule::new(weights.predator_avoidance))
            .with(SeparationRule::new(weights.separation))
            .with(CohesionRule::new(weights.cohesion))
            .with(AlignmentRule::new(weights.alignment))
            .with(CollisionAvoidanceRule::new(
                weights.collision_avoidance,
                weights.collision_sharpness,
            ))
            .with(WorldBoundaryRule::new(
                weights.world_boundary,
                weights.boundary_sharpness,
            ))
            .with(PreySeekRule::new(weights.prey_seek))
    }

    pub fn with(mut self, rule: impl Rule + 'static) -> Self {
        self.push(rule);
        self
    }

    pub fn push(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Rule>> {
        self.rules.iter_mut()
    }

    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.iter().find(|r| r.name() == name)
    }

    /// Change the weight of the rule called `name`. Returns false if there is
    /// no such rule.
    pub fn set_weight(&mut self, name: &str, weight: f32) -> bool {
        match self.rules.iter_mut().find(|r| r.name() == name) {
            Some(rule) => {
                *rule.weight_mut() = weight;
                true
            }
            None => false,
        }
    }

    // Sum of every rule's output for one agent
    pub fn sum(&self, agent: &mut Agent, ctx: &mut RuleContext<'_>) -> Vec3 {
        self.rules
            .iter()
            .fold(Vec3::ZERO, |acc, rule| acc + rule.calculate_vector(agent, ctx))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard(&RuleWeights::default())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::agent::Species;
    use crate::rng::create_rng;
    use nannou::prelude::Vec3;

    /// A small world: agents by position, plus what a rule needs to run.
    pub struct Scene {
        pub params: SimulationParams,
        pub populations: Populations,
        pub rng: SimRng,
        pub kills: Vec<AgentId>,
    }

    impl Scene {
        pub fn new() -> Self {
            Self {
                params: SimulationParams::default(),
                populations: Populations::new(),
                rng: create_rng(7),
                kills: Vec::new(),
            }
        }

        pub fn add(&mut self, species: Species, position: Vec3) -> AgentId {
            self.populations.insert(species, position, Vec3::ZERO, &self.params)
        }

        pub fn agent(&self, id: AgentId) -> Agent {
            self.populations.find(id).cloned().unwrap()
        }

        /// Run `rule` for `id` with the given neighbour and predator ids.
        pub fn run(
            &mut self,
            rule: &dyn Rule,
            agent: &mut Agent,
            neighbours: &[AgentId],
            predators: &[AgentId],
        ) -> Vec3 {
            let neighbours: Vec<&Agent> = neighbours
                .iter()
                .map(|id| self.populations.find(*id).unwrap())
                .collect();
            let predators: Vec<&Agent> = predators
                .iter()
                .map(|id| self.populations.find(*id).unwrap())
                .collect();
            let mut ctx = RuleContext {
                neighbours: &neighbours,
                predators: &predators,
                populations: &self.populations,
                params: &self.params,
                rng: &mut self.rng,
                kills: &mut self.kills,
            };
            rule.calculate_vector(agent, &mut ctx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::Scene;
    use super::*;
    use crate::agent::Species;
    use nannou::prelude::vec3;

    #[test]
    fn standard_set_has_every_rule() {
        let rules = RuleSet::default();
        assert_eq!(rules.len(), 7);
        for name in [
            "Separation",
            "Cohesion",
            "Alignment",
            "Collision Avoidance",
            "World Boundary",
            "Predator Avoidance",
            "Prey Seek",
        ] {
            assert!(rules.get(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn set_weight_by_name() {
        let mut rules = RuleSet::default();
        assert!(rules.set_weight("Cohesion", 2.5));
        assert_eq!(rules.get("Cohesion").unwrap().weight(), 2.5);
        assert!(!rules.set_weight("Nope", 1.0));
    }

    #[test]
    fn sum_adds_rule_outputs() {
        let mut scene = Scene::new();
        let me = scene.add(Species::Boid, vec3(0.0, 50.0, 0.0));
        let other = scene.add(Species::Boid, vec3(2.0, 50.0, 0.0));
        let mut agent = scene.agent(me);

        let cohesion = CohesionRule::new(1.0);
        let separation = SeparationRule::new(1.0);
        let set = RuleSet::empty()
            .with(CohesionRule::new(1.0))
            .with(SeparationRule::new(1.0));

        let c = scene.run(&cohesion, &mut agent, &[other], &[]);
        let s = scene.run(&separation, &mut agent, &[other], &[]);

        let neighbours = vec![scene.populations.find(other).unwrap()];
        let mut ctx = RuleContext {
            neighbours: &neighbours,
            predators: &[],
            populations: &scene.populations,
            params: &scene.params,
            rng: &mut scene.rng,
            kills: &mut scene.kills,
        };
        let total = set.sum(&mut agent, &mut ctx);
        assert!((total - (c + s)).length() < 1e-6);
        // Equal and opposite here
        assert!(total.length() < 1e-6);
    }
}
