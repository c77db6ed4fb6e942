use nannou::prelude::Vec3;
use rand::Rng;
use tracing::{info, trace};

use super::{Rule, RuleContext};
use crate::agent::{Agent, HUNGER_TICKS};
use crate::targeting::choose_target;

/// Predators chase a prey target and kill it once close enough.
///
/// Per evaluation:
/// 1. The current target is re-validated; dead or removed prey drop out.
/// 2. With probability `pred_new_target_chance` a new target is drawn from all
///    living prey, nearer prey being likelier.
/// 3. A hungry predator within `kill_range` kills its target and is sated for
///    `HUNGER_TICKS`. Within `hunt_range` it hunts (faster acceleration);
///    otherwise it is just seeking.
pub struct PreySeekRule {
    pub weight: f32,
}

impl PreySeekRule {
    pub fn new(weight: f32) -> Self {
        Self { weight }
    }
}

impl Rule for PreySeekRule {
    fn name(&self) -> &'static str {
        "Prey Seek"
    }

    fn weight(&self) -> f32 {
        self.weight
    }

    fn weight_mut(&mut self) -> &mut f32 {
        &mut self.weight
    }

    fn calculate_vector(&self, agent: &mut Agent, ctx: &mut RuleContext<'_>) -> Vec3 {
        if !agent.species.is_predator() {
            return Vec3::ZERO;
        }

        agent.hunger = agent.hunger.saturating_sub(1);

        let populations = ctx.populations;
        let kills = &*ctx.kills;
        // Prey already caught this tick are as good as dead
        let resolve = |id| {
            populations
                .find_live_prey(id)
                .filter(|prey| !kills.contains(&prey.id))
        };

        let mut target = agent.target.and_then(resolve);

        if ctx.rng.gen::<f32>() < ctx.params.pred_new_target_chance {
            let candidates: Vec<&Agent> = populations
                .live_prey()
                .filter(|prey| !kills.contains(&prey.id))
                .collect();
            target = choose_target(agent.position, &candidates, &mut *ctx.rng).and_then(resolve);
            trace!(predator = %agent.id, target = ?target.map(|t| t.id), "predator re-rolled target");
        }

        agent.target = target.map(|t| t.id);

        let Some(prey) = target else {
            agent.hunting = false;
            return Vec3::ZERO;
        };

        let distance = agent.position.distance(prey.position);

        if distance < ctx.params.kill_range && agent.hunger == 0 {
            info!(predator = %agent.id, prey = %prey.id, species = %prey.species, "prey caught");
            ctx.kills.push(prey.id);
            agent.hunger = HUNGER_TICKS;
            agent.target = None;
            agent.hunting = false;
            return Vec3::ZERO;
        }

        agent.hunting = distance < ctx.params.hunt_range;

        (prey.position - agent.position).normalize_or_zero() * self.weight
    }
}
