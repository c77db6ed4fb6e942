/*
 * Target Acquisition Module
 *
 * Roulette-wheel selection with inverse-distance weights: a candidate twice
 * as far away is half as likely to be picked.
 */

use nannou::prelude::Vec3;
use rand::Rng;

use crate::agent::{Agent, AgentId};

/// Pick an index into `candidates` with probability proportional to
/// `1 / distance(origin, candidate)`.
///
/// Returns `None` for an empty list. A candidate sitting exactly on the origin
/// has unbounded weight and is returned directly.
pub fn roulette_select<R: Rng + ?Sized>(
    origin: Vec3,
    candidates: &[Vec3],
    rng: &mut R,
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }

    let mut weights = Vec::with_capacity(candidates.len());
    for (i, &candidate) in candidates.iter().enumerate() {
        let distance = origin.distance(candidate);
        if distance <= f32::EPSILON {
            return Some(i);
        }
        weights.push(1.0 / distance);
    }

    let total: f32 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return None;
    }

    let threshold: f32 = rng.gen();
    let mut cumulative = 0.0;
    for (i, weight) in weights.iter().enumerate() {
        cumulative += weight / total;
        if cumulative > threshold {
            return Some(i);
        }
    }

    // Rounding can leave the wheel a hair short of 1.0
    Some(candidates.len() - 1)
}

pub fn choose_target<R: Rng + ?Sized>(
    origin: Vec3,
    candidates: &[&Agent],
    rng: &mut R,
) -> Option<AgentId> {
    let positions: Vec<Vec3> = candidates.iter().map(|a| a.position).collect();
    roulette_select(origin, &positions, rng).map(|i| candidates[i].id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use nannou::prelude::vec3;

    #[test]
    fn empty_candidates_yield_none() {
        let mut rng = create_rng(0);
        assert_eq!(roulette_select(Vec3::ZERO, &[], &mut rng), None);
        assert_eq!(choose_target(Vec3::ZERO, &[], &mut rng), None);
    }

    #[test]
    fn zero_distance_candidate_is_taken() {
        let mut rng = create_rng(0);
        let candidates = [vec3(3.0, 0.0, 0.0), Vec3::ZERO];
        assert_eq!(roulette_select(Vec3::ZERO, &candidates, &mut rng), Some(1));
    }

    #[test]
    fn single_candidate_is_always_chosen() {
        let mut rng = create_rng(0);
        let candidates = [vec3(0.0, 7.0, 0.0)];
        for _ in 0..100 {
            assert_eq!(roulette_select(Vec3::ZERO, &candidates, &mut rng), Some(0));
        }
    }

    #[test]
    fn selection_follows_inverse_distance() {
        let mut rng = create_rng(1234);
        let candidates = [
            vec3(1.0, 0.0, 0.0),
            vec3(0.0, 2.0, 0.0),
            vec3(0.0, 0.0, 4.0),
        ];
        let trials = 20_000;
        let mut hits = [0usize; 3];
        for _ in 0..trials {
            let i = roulette_select(Vec3::ZERO, &candidates, &mut rng).unwrap();
            hits[i] += 1;
        }

        let expected = [4.0 / 7.0, 2.0 / 7.0, 1.0 / 7.0];
        for (hit, expected) in hits.iter().zip(expected) {
            let freq = *hit as f64 / trials as f64;
            assert!((freq - expected).abs() < 0.02, "freq {freq} vs {expected}");
        }
    }
}
