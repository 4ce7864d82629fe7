//! Signals emitted by a tick for presentation and scoring.

use crate::beam::BeamVisual;
use crate::creature::CreatureId;

/// Something a presentation layer may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// A creature reached the vehicle and was removed.
    CreatureCaptured {
        /// The captured creature.
        creature: CreatureId,
        /// Points awarded.
        score_delta: u32,
    },
    /// The last creature of the level was captured. Fires once per level.
    AllCreaturesCaptured,
    /// The beam changed its visible state.
    BeamVisualStateChanged(BeamVisual),
}

/// Outcome of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Events in the order they happened.
    pub events: Vec<SimEvent>,
    /// Vehicle height above the ground after moving.
    pub altitude: f32,
    /// Whether the targeting reticle should be drawn.
    pub reticle_visible: bool,
    /// Total score after the tick.
    pub score: u32,
    /// Beam visual state after the tick.
    pub beam: BeamVisual,
}

impl TickReport {
    /// Creatures captured during the tick.
    #[must_use]
    pub fn captured(&self) -> impl Iterator<Item = CreatureId> + '_ {
        self.events.iter().filter_map(|event| match event {
            SimEvent::CreatureCaptured { creature, .. } => Some(*creature),
            _ => None,
        })
    }

    /// Returns `true` when the level was cleared during the tick.
    #[must_use]
    pub fn cleared_level(&self) -> bool {
        self.events.contains(&SimEvent::AllCreaturesCaptured)
    }
}
