//! The simulation context and its per-tick step.
//!
//! [`Simulation`] owns everything that changes while the game runs: the
//! vehicle, its beam, the creature population, score and level. The terrain
//! is a collaborator behind the [`Terrain`] trait and never mutates. A host
//! drives the simulation by calling [`Simulation::tick`] once per frame with
//! a monotonic timestamp and the input sampled for that frame.

mod events;
mod level;
mod step;

pub use events::{SimEvent, TickReport};

use glam::Vec3;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::beam::BeamController;
use crate::collider::ColliderRegistry;
use crate::collision::CollisionSystem;
use crate::config::SimulationConfig;
use crate::creature::{Creature, CreatureId};
use crate::terrain::{ProceduralTerrain, Terrain};
use crate::vehicle::Vehicle;

/// Explicit game state advanced one tick at a time.
#[derive(Debug)]
pub struct Simulation<T: Terrain = ProceduralTerrain> {
    config: SimulationConfig,
    terrain: T,
    registry: ColliderRegistry,
    vehicle: Vehicle,
    beam: BeamController,
    creatures: Vec<Creature>,
    rng: StdRng,
    score: u32,
    level: u32,
    next_creature: u64,
    ticks: u64,
    beam_was_active: bool,
    victory_signalled: bool,
}

impl Simulation<ProceduralTerrain> {
    /// Builds a simulation over procedurally generated terrain.
    ///
    /// No creatures exist until [`start_level`](Self::start_level) runs.
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        let terrain = ProceduralTerrain::generate(config.seed, &config.terrain);
        Self::with_terrain(terrain, config)
    }
}

impl<T: Terrain> Simulation<T> {
    /// Builds a simulation over a caller-supplied terrain.
    #[must_use]
    pub fn with_terrain(terrain: T, config: SimulationConfig) -> Self {
        let vehicle = Vehicle::above_origin(&terrain);
        let rng = StdRng::seed_from_u64(config.seed);
        debug!("simulation created with seed {}", config.seed);
        Self {
            config,
            terrain,
            registry: ColliderRegistry::new(),
            vehicle,
            beam: BeamController::new(),
            creatures: Vec::new(),
            rng,
            score: 0,
            level: 0,
            next_creature: 0,
            ticks: 0,
            beam_was_active: false,
            victory_signalled: false,
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the terrain collaborator.
    #[must_use]
    pub const fn terrain(&self) -> &T {
        &self.terrain
    }

    /// Returns the collider registry.
    #[must_use]
    pub const fn registry(&self) -> &ColliderRegistry {
        &self.registry
    }

    /// Returns the vehicle.
    #[must_use]
    pub const fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Returns the beam controller.
    #[must_use]
    pub const fn beam(&self) -> &BeamController {
        &self.beam
    }

    /// Returns the live creatures.
    #[must_use]
    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    /// Looks up a creature by id.
    #[must_use]
    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|creature| creature.id() == id)
    }

    /// Looks up a creature by id for modification.
    pub fn creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|creature| creature.id() == id)
    }

    /// Returns the score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Returns the current level; zero before the first level starts.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Returns the number of ticks run so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Vehicle height above the ground.
    #[must_use]
    pub fn altitude(&self) -> f32 {
        self.collision().altitude_of(self.vehicle.position)
    }

    /// Teleports the vehicle, bypassing collision checks.
    pub fn place_vehicle(&mut self, position: Vec3) {
        self.vehicle.position = position;
    }

    /// Adds a free creature standing on the ground below `position`.
    pub fn spawn_creature_at(&mut self, position: Vec3) -> CreatureId {
        let id = CreatureId(self.next_creature);
        self.next_creature += 1;
        let ground = self.terrain.height_at(position.x, position.z);
        self.creatures
            .push(Creature::new(id, Vec3::new(position.x, ground, position.z)));
        id
    }

    fn collision(&self) -> CollisionSystem<'_, T> {
        CollisionSystem::new(&self.terrain, self.registry.colliders())
    }
}
