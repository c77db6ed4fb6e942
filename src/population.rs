/*
 * Population Module
 *
 * Owns the three per-species agent lists and keeps their sizes in line with
 * the configured counts. Dead agents that have come to rest on the floor are
 * compacted away first, so a lower target count never removes a healthy agent
 * while a corpse lingers.
 */

use nannou::prelude::Vec3;
use rand::Rng;
use tracing::debug;

use crate::agent::{Agent, AgentId, Species};
use crate::params::SimulationParams;

/// Notifies the renderer that a visual should be added or dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopulationEvent {
    Spawned { id: AgentId, species: Species },
    Despawned { id: AgentId, species: Species },
}

#[derive(Clone, Debug, Default)]
pub struct Populations {
    boids: Vec<Agent>,
    doibs: Vec<Agent>,
    predators: Vec<Agent>,
    next_id: u64,
}

impl Populations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, species: Species) -> &[Agent] {
        match species {
            Species::Boid => &self.boids,
            Species::Doib => &self.doibs,
            Species::Predator => &self.predators,
        }
    }

    pub fn list_mut(&mut self, species: Species) -> &mut Vec<Agent> {
        match species {
            Species::Boid => &mut self.boids,
            Species::Doib => &mut self.doibs,
            Species::Predator => &mut self.predators,
        }
    }

    // Every agent, boids first, then doibs, then predators
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.boids.iter().chain(&self.doibs).chain(&self.predators)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.boids
            .iter_mut()
            .chain(self.doibs.iter_mut())
            .chain(self.predators.iter_mut())
    }

    pub fn len(&self) -> usize {
        self.boids.len() + self.doibs.len() + self.predators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn live_count(&self, species: Species) -> usize {
        self.list(species).iter().filter(|a| a.alive).count()
    }

    pub fn dead_count(&self, species: Species) -> usize {
        self.list(species).iter().filter(|a| !a.alive).count()
    }

    // Both prey lists, living agents only
    pub fn live_prey(&self) -> impl Iterator<Item = &Agent> {
        self.boids.iter().chain(&self.doibs).filter(|a| a.alive)
    }

    pub fn find(&self, id: AgentId) -> Option<&Agent> {
        self.iter().find(|a| a.id == id)
    }

    pub fn find_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.iter_mut().find(|a| a.id == id)
    }

    /// Resolve a predator's target handle. Anything that is not a living prey
    /// no longer counts as a target.
    pub fn find_live_prey(&self, id: AgentId) -> Option<&Agent> {
        self.live_prey().find(|a| a.id == id)
    }

    fn allocate_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    // Place an agent at a known position and velocity
    pub fn insert(
        &mut self,
        species: Species,
        position: Vec3,
        velocity: Vec3,
        params: &SimulationParams,
    ) -> AgentId {
        let id = self.allocate_id();
        let agent = Agent::new(id, species, position, velocity, params.species(species));
        self.list_mut(species).push(agent);
        id
    }

    // Spawn with a random position and velocity drawn from the spawn bounds
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        species: Species,
        params: &SimulationParams,
        rng: &mut R,
    ) -> AgentId {
        let position = params.spawn_position.sample(rng);
        let velocity = params.spawn_velocity.sample(rng);
        self.insert(species, position, velocity, params)
    }

    /// Remove the last living agent of a species. Empty lists are left alone.
    pub fn remove_last_live(&mut self, species: Species) -> Option<Agent> {
        let list = self.list_mut(species);
        let index = list.iter().rposition(|a| a.alive)?;
        Some(list.remove(index))
    }

    pub fn clear(&mut self) {
        self.boids.clear();
        self.doibs.clear();
        self.predators.clear();
    }

    /// Bring every species to its configured count.
    pub fn reconcile<R: Rng + ?Sized>(
        &mut self,
        params: &SimulationParams,
        rng: &mut R,
    ) -> Vec<PopulationEvent> {
        let mut events = Vec::new();
        for species in Species::ALL {
            self.reconcile_species(species, params, rng, &mut events);
        }
        events
    }

    fn reconcile_species<R: Rng + ?Sized>(
        &mut self,
        species: Species,
        params: &SimulationParams,
        rng: &mut R,
        events: &mut Vec<PopulationEvent>,
    ) {
        let before = events.len();

        // Corpses that finished falling go first
        self.list_mut(species).retain(|agent| {
            let settled = !agent.alive && agent.grounded;
            if settled {
                events.push(PopulationEvent::Despawned { id: agent.id, species });
            }
            !settled
        });

        let target = params.species(species).count;
        let mut live = self.live_count(species);

        while live < target {
            let id = self.spawn(species, params, rng);
            events.push(PopulationEvent::Spawned { id, species });
            live += 1;
        }

        while live > target {
            match self.remove_last_live(species) {
                Some(agent) => {
                    events.push(PopulationEvent::Despawned { id: agent.id, species });
                    live -= 1;
                }
                None => break,
            }
        }

        if events.len() > before {
            debug!(
                %species,
                live,
                target,
                changes = events.len() - before,
                "population reconciled"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use nannou::prelude::vec3;

    fn params_with_boids(count: usize) -> SimulationParams {
        let mut params = SimulationParams::default();
        params.boid.count = count;
        params.doib.count = 0;
        params.predator.count = 0;
        params
    }

    #[test]
    fn reconcile_spawns_up_to_target() {
        let mut rng = create_rng(1);
        let mut pops = Populations::new();
        pops.reconcile(&params_with_boids(10), &mut rng);
        assert_eq!(pops.live_count(Species::Boid), 10);

        let events = pops.reconcile(&params_with_boids(50), &mut rng);
        let spawned = events
            .iter()
            .filter(|e| matches!(e, PopulationEvent::Spawned { .. }))
            .count();
        assert_eq!(spawned, 40);
        assert_eq!(pops.live_count(Species::Boid), 50);
    }

    #[test]
    fn reconcile_removes_down_to_target() {
        let mut rng = create_rng(1);
        let mut pops = Populations::new();
        pops.reconcile(&params_with_boids(50), &mut rng);

        let events = pops.reconcile(&params_with_boids(10), &mut rng);
        assert_eq!(events.len(), 40);
        assert_eq!(pops.live_count(Species::Boid), 10);
        assert_eq!(pops.list(Species::Boid).len(), 10);
    }

    #[test]
    fn spawned_agents_start_inside_spawn_bounds() {
        let mut rng = create_rng(9);
        let params = params_with_boids(100);
        let mut pops = Populations::new();
        pops.reconcile(&params, &mut rng);
        for agent in pops.iter() {
            assert!(params.spawn_position.contains(agent.position));
            assert!(params.spawn_velocity.contains(agent.actual_velocity));
        }
    }

    #[test]
    fn grounded_dead_are_removed_before_live_agents() {
        let mut rng = create_rng(1);
        let params = params_with_boids(3);
        let mut pops = Populations::new();
        pops.reconcile(&params, &mut rng);

        let first = pops.list(Species::Boid)[0].id;
        {
            let corpse = pops.find_mut(first).unwrap();
            corpse.kill();
            corpse.grounded = true;
        }

        let events = pops.reconcile(&params, &mut rng);
        assert!(events.contains(&PopulationEvent::Despawned { id: first, species: Species::Boid }));
        assert!(pops.find(first).is_none());
        // Replacement keeps the live count on target
        assert_eq!(pops.live_count(Species::Boid), 3);
    }

    #[test]
    fn falling_dead_are_kept_and_not_counted() {
        let mut rng = create_rng(1);
        let params = params_with_boids(2);
        let mut pops = Populations::new();
        pops.reconcile(&params, &mut rng);

        let victim = pops.list(Species::Boid)[1].id;
        pops.find_mut(victim).unwrap().kill();

        pops.reconcile(&params, &mut rng);
        assert!(pops.find(victim).is_some());
        assert_eq!(pops.live_count(Species::Boid), 2);
        assert_eq!(pops.dead_count(Species::Boid), 1);
    }

    #[test]
    fn removing_from_empty_list_is_noop() {
        let mut pops = Populations::new();
        assert!(pops.remove_last_live(Species::Predator).is_none());
        let mut rng = create_rng(1);
        let events = pops.reconcile(&params_with_boids(0), &mut rng);
        assert!(events.is_empty());
    }

    #[test]
    fn ids_are_never_reused() {
        let params = SimulationParams::default();
        let mut pops = Populations::new();
        let a = pops.insert(Species::Boid, Vec3::ZERO, Vec3::ZERO, &params);
        pops.remove_last_live(Species::Boid);
        let b = pops.insert(Species::Boid, vec3(1.0, 0.0, 0.0), Vec3::ZERO, &params);
        assert_ne!(a, b);
        assert!(pops.find(a).is_none());
    }

    #[test]
    fn live_prey_lookup_skips_dead_and_predators() {
        let params = SimulationParams::default();
        let mut pops = Populations::new();
        let prey = pops.insert(Species::Doib, Vec3::ZERO, Vec3::ZERO, &params);
        let hunter = pops.insert(Species::Predator, Vec3::ZERO, Vec3::ZERO, &params);

        assert!(pops.find_live_prey(prey).is_some());
        assert!(pops.find_live_prey(hunter).is_none());

        pops.find_mut(prey).unwrap().kill();
        assert!(pops.find_live_prey(prey).is_none());
    }
}
