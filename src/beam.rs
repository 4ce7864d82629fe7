//! Tractor beam timing.
//!
//! The beam is a three-phase state machine: `Ready`, `Active` and `Cooldown`.
//! An engaged beam that lifts nothing for [`BEAM_TIMEOUT_MS`] shuts itself off
//! and cools down for [`BEAM_COOLDOWN_MS`]. Catching a creature keeps it on for
//! as long as something is being lifted. All transitions take the current
//! [`Timestamp`] explicitly so the machine can be driven without a real clock.
//!
//! Cooldown expiry is observed both lazily, by every query that takes `now`,
//! and actively by [`BeamController::advance`]; both paths agree.

use log::debug;

use crate::clock::Timestamp;
use crate::{BEAM_COOLDOWN_MS, BEAM_MAX_ALTITUDE, BEAM_TIMEOUT_MS};

/// Current phase of the beam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeamPhase {
    /// Off and available.
    Ready,
    /// On.
    Active {
        /// When the beam was switched on.
        activated_at: Timestamp,
        /// Whether a creature was caught during this activation.
        caught: bool,
    },
    /// Off and unavailable until `ends_at`.
    Cooldown {
        /// When the cooldown finishes.
        ends_at: Timestamp,
    },
}

/// Visual state exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeamVisual {
    /// Beam available; the targeting reticle may show.
    Ready,
    /// Beam column visible.
    Active,
    /// Beam recharging.
    Cooldown,
}

/// Why the beam changed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCause {
    /// The trigger switched the beam on.
    Engaged,
    /// The trigger was let go while the beam was on.
    Released,
    /// The beam stayed on without catching anything.
    TimedOut,
    /// Every creature being lifted was collected.
    CaptureComplete,
    /// The cooldown ran out.
    CooldownExpired,
    /// A safety rule switched the beam off.
    ForcedOff,
    /// A catch cleared a pending cooldown.
    CatchReset,
    /// The level was restarted or replaced.
    LevelChanged,
}

/// A phase change and the visual state it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeamTransition {
    /// Visual state after the change.
    pub visual: BeamVisual,
    /// What triggered the change.
    pub cause: TransitionCause,
}

/// Flat snapshot of the beam for readers that want plain flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BeamState {
    /// Beam on.
    pub is_active: bool,
    /// Beam recharging.
    pub is_on_cooldown: bool,
    /// Start of the latest activation.
    pub activation_timestamp: Option<Timestamp>,
    /// End of the latest cooldown.
    pub cooldown_end_timestamp: Option<Timestamp>,
    /// A creature was caught during the current activation.
    pub has_caught_creature_this_activation: bool,
    /// The trigger was let go since the beam last switched off.
    pub was_trigger_released_since_last_deactivation: bool,
}

/// Timed beam state machine owned by the vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeamController {
    phase: BeamPhase,
    trigger_released: bool,
    last_activation: Option<Timestamp>,
    last_cooldown_end: Option<Timestamp>,
}

impl Default for BeamController {
    fn default() -> Self {
        Self::new()
    }
}

impl BeamController {
    /// Creates a ready beam with the trigger up.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: BeamPhase::Ready,
            trigger_released: true,
            last_activation: None,
            last_cooldown_end: None,
        }
    }

    /// Returns the raw phase without applying lazy expiry.
    #[must_use]
    pub const fn phase(&self) -> BeamPhase {
        self.phase
    }

    /// Returns `true` while the beam is on.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.phase, BeamPhase::Active { .. })
    }

    /// Returns `true` while the cooldown has not yet run out at `now`.
    #[must_use]
    pub fn is_on_cooldown(&self, now: Timestamp) -> bool {
        matches!(self.phase, BeamPhase::Cooldown { ends_at } if now < ends_at)
    }

    /// Returns `true` once the trigger has been let go since the last
    /// deactivation.
    #[must_use]
    pub const fn trigger_released(&self) -> bool {
        self.trigger_released
    }

    /// Visual state at `now`, with cooldown expiry applied lazily.
    #[must_use]
    pub fn visual(&self, now: Timestamp) -> BeamVisual {
        match self.phase {
            BeamPhase::Active { .. } => BeamVisual::Active,
            BeamPhase::Cooldown { ends_at } if now < ends_at => BeamVisual::Cooldown,
            BeamPhase::Cooldown { .. } | BeamPhase::Ready => BeamVisual::Ready,
        }
    }

    /// Whether the targeting reticle should show: low enough and ready.
    #[must_use]
    pub fn reticle_visible(&self, now: Timestamp, altitude: f32) -> bool {
        altitude <= BEAM_MAX_ALTITUDE && self.visual(now) == BeamVisual::Ready
    }

    /// Flat snapshot at `now`.
    #[must_use]
    pub fn state(&self, now: Timestamp) -> BeamState {
        let caught = matches!(self.phase, BeamPhase::Active { caught: true, .. });
        BeamState {
            is_active: self.is_active(),
            is_on_cooldown: self.is_on_cooldown(now),
            activation_timestamp: self.last_activation,
            cooldown_end_timestamp: self.last_cooldown_end,
            has_caught_creature_this_activation: caught,
            was_trigger_released_since_last_deactivation: self.trigger_released,
        }
    }

    /// Attempts to switch the beam on.
    ///
    /// Ignored unless the trigger was released since the last deactivation,
    /// `altitude` is at most [`BEAM_MAX_ALTITUDE`] and no cooldown is pending.
    /// A cooldown that has already run out is cleared first, so the returned
    /// transition may be its expiry when the engage itself is refused.
    pub fn engage(&mut self, now: Timestamp, altitude: f32) -> Option<BeamTransition> {
        let expired = self.expire_cooldown(now);
        if !self.trigger_released || altitude > BEAM_MAX_ALTITUDE || self.phase != BeamPhase::Ready
        {
            return expired;
        }
        self.phase = BeamPhase::Active {
            activated_at: now,
            caught: false,
        };
        self.trigger_released = false;
        self.last_activation = Some(now);
        debug!("beam engaged at {} ms", now.as_millis());
        Some(transition(BeamVisual::Active, TransitionCause::Engaged))
    }

    /// Records the trigger being let go, switching an active beam off.
    pub fn release(&mut self) -> Option<BeamTransition> {
        self.trigger_released = true;
        if !self.is_active() {
            return None;
        }
        self.phase = BeamPhase::Ready;
        debug!("beam released");
        Some(transition(BeamVisual::Ready, TransitionCause::Released))
    }

    /// Applies time-driven transitions: the idle timeout and cooldown expiry.
    pub fn advance(&mut self, now: Timestamp) -> Option<BeamTransition> {
        match self.phase {
            BeamPhase::Active {
                activated_at,
                caught: false,
            } if now.since(activated_at) >= BEAM_TIMEOUT_MS => {
                debug!("beam timed out after {} ms", now.since(activated_at));
                self.start_cooldown(now);
                Some(transition(BeamVisual::Cooldown, TransitionCause::TimedOut))
            }
            _ => self.expire_cooldown(now),
        }
    }

    /// Ends an activation whose lifted creatures were all collected.
    ///
    /// Starts the cooldown and counts the trigger as released so the beam can
    /// be re-engaged as soon as the cooldown ends.
    pub fn complete_capture(&mut self, now: Timestamp) -> Option<BeamTransition> {
        if !self.is_active() {
            return None;
        }
        self.start_cooldown(now);
        self.trigger_released = true;
        Some(transition(BeamVisual::Cooldown, TransitionCause::CaptureComplete))
    }

    /// Records a catch: marks the activation as productive, which suspends the
    /// idle timeout, and clears any pending cooldown.
    pub fn reset_cooldown(&mut self) -> Option<BeamTransition> {
        if let BeamPhase::Active { caught, .. } = &mut self.phase {
            *caught = true;
            return None;
        }
        if matches!(self.phase, BeamPhase::Cooldown { .. }) {
            self.phase = BeamPhase::Ready;
            return Some(transition(BeamVisual::Ready, TransitionCause::CatchReset));
        }
        None
    }

    /// Switches an active beam off without counting the trigger as released.
    pub fn force_deactivate(&mut self) -> Option<BeamTransition> {
        if !self.is_active() {
            return None;
        }
        self.phase = BeamPhase::Ready;
        debug!("beam forced off");
        Some(transition(BeamVisual::Ready, TransitionCause::ForcedOff))
    }

    /// Switches an active beam off for a level change.
    ///
    /// Whatever was being lifted is gone, so the activation ends outright and
    /// the trigger counts as released. A pending cooldown is left to run out.
    pub fn stand_down(&mut self) -> Option<BeamTransition> {
        if !self.is_active() {
            return None;
        }
        self.phase = BeamPhase::Ready;
        self.trigger_released = true;
        debug!("beam stood down for a level change");
        Some(transition(BeamVisual::Ready, TransitionCause::LevelChanged))
    }

    fn start_cooldown(&mut self, now: Timestamp) {
        let ends_at = now.plus_millis(BEAM_COOLDOWN_MS);
        self.phase = BeamPhase::Cooldown { ends_at };
        self.last_cooldown_end = Some(ends_at);
    }

    fn expire_cooldown(&mut self, now: Timestamp) -> Option<BeamTransition> {
        match self.phase {
            BeamPhase::Cooldown { ends_at } if now >= ends_at => {
                self.phase = BeamPhase::Ready;
                Some(transition(BeamVisual::Ready, TransitionCause::CooldownExpired))
            }
            _ => None,
        }
    }
}

const fn transition(visual: BeamVisual, cause: TransitionCause) -> BeamTransition {
    BeamTransition { visual, cause }
}
