//! Level lifecycle: populate, restart and advance.

use glam::Vec3;
use log::{debug, info, warn};
use rand::Rng;

use super::Simulation;
use crate::clock::Timestamp;
use crate::collision::{CollisionSystem, Mover};
use crate::config::sample_extent;
use crate::terrain::Terrain;
use crate::{CREATURE_RADIUS, SPAWN_ATTEMPTS};

impl<T: Terrain> Simulation<T> {
    /// Replaces the population with the batch for `level`.
    ///
    /// Creatures are placed at random inside the configured spawn extent, on
    /// spots buildings and fences leave clear. A creature whose spot never
    /// clears within a bounded number of draws is skipped. An active beam is
    /// switched off since whatever it was lifting is gone. Returns the number
    /// spawned.
    pub fn start_level(&mut self, level: u32, now: Timestamp) -> usize {
        let target = level.max(1);
        self.registry.refresh(now, true, &self.terrain);
        self.creatures.clear();
        if let Some(change) = self.beam.stand_down() {
            debug!("level change switched the beam to {:?}", change.visual);
        }
        self.beam_was_active = false;
        self.level = target;
        self.victory_signalled = false;

        let wanted = self.config.creatures.batch_for(target);
        let spots = self.spawn_spots(wanted);
        for spot in &spots {
            self.spawn_creature_at(*spot);
        }
        if spots.len() < wanted {
            warn!(
                "level {target}: placed {} of {wanted} creatures",
                spots.len()
            );
        }
        info!("level {target} started with {} creatures", spots.len());
        spots.len()
    }

    /// Restarts the current level. The score is kept.
    pub fn reset_level(&mut self, now: Timestamp) -> usize {
        self.start_level(self.level, now)
    }

    /// Starts the level after the current one.
    pub fn advance_level(&mut self, now: Timestamp) -> usize {
        self.start_level(self.level.saturating_add(1), now)
    }

    fn spawn_spots(&mut self, wanted: usize) -> Vec<Vec3> {
        let extent = sample_extent(self.config.creatures.spawn_extent);
        let collision = CollisionSystem::new(&self.terrain, self.registry.colliders());
        let mut spots = Vec::with_capacity(wanted);
        for _ in 0..wanted {
            let found = (0..SPAWN_ATTEMPTS).find_map(|_| {
                let mut spot = Vec3::new(
                    self.rng.gen_range(-extent..extent),
                    0.0,
                    self.rng.gen_range(-extent..extent),
                );
                (!collision.would_collide(Mover::Creature, &mut spot, CREATURE_RADIUS))
                    .then_some(spot)
            });
            if let Some(spot) = found {
                spots.push(spot);
            }
        }
        spots
    }
}
