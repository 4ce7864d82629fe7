//! Couples a [`Clock`] to [`Simulation::tick`].
//!
//! The simulation itself never reads time; a host normally owns a
//! [`FrameDriver`] and calls [`FrameDriver::frame`] once per rendered frame.

use crate::clock::{Clock, Timestamp};
use crate::input::InputFrame;
use crate::simulation::{Simulation, TickReport};
use crate::terrain::Terrain;

/// Owns a clock and a simulation and ticks one with the other.
#[derive(Debug)]
pub struct FrameDriver<C: Clock, T: Terrain> {
    clock: C,
    simulation: Simulation<T>,
}

impl<C: Clock, T: Terrain> FrameDriver<C, T> {
    /// Creates a driver.
    #[must_use]
    pub const fn new(clock: C, simulation: Simulation<T>) -> Self {
        Self { clock, simulation }
    }

    /// Reads the clock once and runs a tick at that time.
    pub fn frame(&mut self, input: &InputFrame) -> TickReport {
        let now = self.clock.now();
        self.simulation.tick(now, input)
    }

    /// Current clock reading.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Returns the clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the simulation.
    #[must_use]
    pub const fn simulation(&self) -> &Simulation<T> {
        &self.simulation
    }

    /// Returns the simulation for level changes and host-side edits.
    pub fn simulation_mut(&mut self) -> &mut Simulation<T> {
        &mut self.simulation
    }

    /// Consumes the driver, returning the simulation.
    #[must_use]
    pub fn into_simulation(self) -> Simulation<T> {
        self.simulation
    }
}
