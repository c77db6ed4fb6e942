/*
 * World Module
 *
 * The tick driver. One call to `World::tick` runs one full simulation step:
 *
 * 1. Reconcile populations against the configured counts
 * 2. Copy live species parameters onto every agent
 * 3. For every living agent, count down its scare timer, gather neighbours
 *    and visible predators and run the rule set against a copy of the agent. Everyone reads the same
 *    pre-tick state; results are written back only once all agents are done
 * 4. Apply this tick's kills
 * 5. Integrate velocity and position (dead agents fall instead)
 */

use tracing::{debug, info};

use crate::agent::{Agent, AgentId, AgentSnapshot, Species};
use crate::config::SimulationConfig;
use crate::neighbors::{visible_neighbours, visible_predators};
use crate::params::SimulationParams;
use crate::population::{PopulationEvent, Populations};
use crate::rng::{create_rng, SimRng};
use crate::rules::{RuleContext, RuleSet};

/// What happened during one tick, for the renderer and for logging.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub events: Vec<PopulationEvent>,
    pub kills: Vec<AgentId>,
}

pub struct World {
    params: SimulationParams,
    rules: RuleSet,
    populations: Populations,
    rng: SimRng,
    seed: u64,
    tick: u64,
}

impl World {
    pub fn new(params: SimulationParams, rules: RuleSet, seed: u64) -> Self {
        info!(
            seed,
            boids = params.boid.count,
            doibs = params.doib.count,
            predators = params.predator.count,
            rules = rules.len(),
            "world created"
        );

        Self {
            params,
            rules,
            populations: Populations::new(),
            rng: create_rng(seed),
            seed,
            tick: 0,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.params.clone(),
            RuleSet::standard(&config.rules),
            config.seed,
        )
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    // The UI writes here between ticks
    pub fn params_mut(&mut self) -> &mut SimulationParams {
        &mut self.params
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleSet {
        &mut self.rules
    }

    pub fn populations(&self) -> &Populations {
        &self.populations
    }

    pub fn populations_mut(&mut self) -> &mut Populations {
        &mut self.populations
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn live_count(&self, species: Species) -> usize {
        self.populations.live_count(species)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = AgentSnapshot> + '_ {
        self.populations.iter().map(Agent::snapshot)
    }

    /// Drop every agent and restart the random stream. The next tick
    /// repopulates from the configured counts.
    pub fn reset(&mut self) -> Vec<PopulationEvent> {
        let events = self
            .populations
            .iter()
            .map(|a| PopulationEvent::Despawned { id: a.id, species: a.species })
            .collect();
        self.populations.clear();
        self.rng = create_rng(self.seed);
        self.tick = 0;
        info!(seed = self.seed, "world reset");
        events
    }

    pub fn tick(&mut self) -> TickReport {
        let events = self.populations.reconcile(&self.params, &mut self.rng);

        for species in Species::ALL {
            let limits = self.params.species(species);
            for agent in self.populations.list_mut(species) {
                agent.apply_species_params(limits);
            }
        }

        let mut kills = Vec::new();
        let evaluated = Species::ALL.map(|species| {
            self.populations
                .list(species)
                .iter()
                .map(|agent| {
                    let mut next = agent.clone();
                    if next.alive {
                        next.tick_scare_timer();
                        let neighbours = visible_neighbours(
                            agent,
                            &self.populations,
                            self.params.visibility_threshold,
                        );
                        let predators = visible_predators(agent, &self.populations);
                        let mut ctx = RuleContext {
                            neighbours: &neighbours,
                            predators: &predators,
                            populations: &self.populations,
                            params: &self.params,
                            rng: &mut self.rng,
                            kills: &mut kills,
                        };
                        let steering = self.rules.sum(&mut next, &mut ctx);
                        next.accumulate_steering(steering);
                    }
                    next
                })
                .collect::<Vec<_>>()
        });

        for (species, agents) in Species::ALL.into_iter().zip(evaluated) {
            *self.populations.list_mut(species) = agents;
        }

        for id in &kills {
            if let Some(prey) = self.populations.find_mut(*id) {
                prey.kill();
            }
        }

        for agent in self.populations.iter_mut() {
            agent.integrate(&mut self.rng, &self.params);
        }

        self.tick += 1;
        debug!(
            tick = self.tick,
            agents = self.populations.len(),
            population_changes = events.len(),
            kills = kills.len(),
            "tick complete"
        );

        TickReport {
            tick: self.tick,
            events,
            kills,
        }
    }
}
