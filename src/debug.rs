/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and simulation counters to be displayed in the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second) and frame time
 * - Current tick
 * - Live and dead agents per species
 * - Kills and population changes
 */

use std::time::Duration;

use crate::agent::Species;
use crate::population::PopulationEvent;
use crate::world::{TickReport, World};

#[derive(Clone, Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub tick: u64,
    // Indexed in Species::ALL order
    pub live: [usize; 3],
    pub dead: [usize; 3],
    pub total_kills: usize,
    pub total_spawned: usize,
    pub total_despawned: usize,
}

impl DebugInfo {
    pub fn record(&mut self, report: &TickReport, world: &World) {
        self.tick = report.tick;
        self.total_kills += report.kills.len();
        for event in &report.events {
            match event {
                PopulationEvent::Spawned { .. } => self.total_spawned += 1,
                PopulationEvent::Despawned { .. } => self.total_despawned += 1,
            }
        }
        for (i, species) in Species::ALL.into_iter().enumerate() {
            self.live[i] = world.populations().live_count(species);
            self.dead[i] = world.populations().dead_count(species);
        }
    }

    pub fn reset_counters(&mut self) {
        *self = Self {
            fps: self.fps,
            frame_time: self.frame_time,
            ..Self::default()
        };
    }
}
