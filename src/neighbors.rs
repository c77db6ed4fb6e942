/*
 * Neighbour Query Module
 *
 * Linear visibility scans. Each call is O(n) over the relevant list, so a
 * full tick is O(n^2). At the population sizes the simulation targets this is
 * cheaper than maintaining a spatial index; it is the first place to look if
 * populations grow.
 */

use crate::agent::{Agent, Species};
use crate::population::Populations;

/// Living agents of the same group within sight, excluding the agent itself.
///
/// Prey flock with both prey species; predators only with each other. The
/// sight radius is the global threshold for every species.
pub fn visible_neighbours<'a>(
    agent: &Agent,
    populations: &'a Populations,
    visibility_threshold: f32,
) -> Vec<&'a Agent> {
    let within = |other: &&'a Agent| {
        other.alive
            && other.id != agent.id
            && agent.position.distance(other.position) < visibility_threshold
    };

    if agent.species.is_prey() {
        populations
            .list(Species::Boid)
            .iter()
            .chain(populations.list(Species::Doib))
            .filter(within)
            .collect()
    } else {
        populations
            .list(Species::Predator)
            .iter()
            .filter(within)
            .collect()
    }
}

/// Living predators within the agent's predator detection range. Only prey
/// look out for predators.
pub fn visible_predators<'a>(agent: &Agent, populations: &'a Populations) -> Vec<&'a Agent> {
    if !agent.species.is_prey() {
        return Vec::new();
    }

    populations
        .list(Species::Predator)
        .iter()
        .filter(|p| {
            p.alive && agent.position.distance(p.position) < agent.predator_detection_range
        })
        .collect()
}
