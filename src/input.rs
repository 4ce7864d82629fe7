//! Per-tick control input.
//!
//! Hosts translate their own devices into an [`InputFrame`]: a set of held
//! keys plus the two beam trigger edges. Nothing here knows about keyboards.

use hashbrown::HashSet;

/// Logical controls of the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move along the heading.
    Forward,
    /// Move against the heading.
    Backward,
    /// Increase yaw.
    TurnLeft,
    /// Decrease yaw.
    TurnRight,
    /// Climb.
    Ascend,
    /// Sink.
    Descend,
}

/// Input sampled for one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFrame {
    pressed: HashSet<Key>,
    /// The beam trigger went down this tick.
    pub beam_engage: bool,
    /// The beam trigger went up this tick.
    pub beam_release: bool,
}

impl InputFrame {
    /// Creates a frame with nothing pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frame with `keys` held.
    #[must_use]
    pub fn holding(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            pressed: keys.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Marks `key` as held.
    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    /// Marks `key` as no longer held.
    pub fn lift(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    /// Returns `true` when `key` is held.
    #[must_use]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Sets the engage edge.
    #[must_use]
    pub const fn with_engage(mut self) -> Self {
        self.beam_engage = true;
        self
    }

    /// Sets the release edge.
    #[must_use]
    pub const fn with_release(mut self) -> Self {
        self.beam_release = true;
        self
    }

    /// Folds the held keys into signed control axes.
    #[must_use]
    pub fn axes(&self) -> ControlAxes {
        const fn axis(neg: bool, pos: bool) -> f32 {
            match (neg, pos) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            }
        }

        ControlAxes {
            thrust: axis(self.is_pressed(Key::Backward), self.is_pressed(Key::Forward)),
            turn: axis(self.is_pressed(Key::TurnRight), self.is_pressed(Key::TurnLeft)),
            climb: axis(self.is_pressed(Key::Descend), self.is_pressed(Key::Ascend)),
        }
    }
}

/// Signed control axes in `[-1, 1]`. Opposing keys cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlAxes {
    /// Forward (+) or backward (-).
    pub thrust: f32,
    /// Left (+) or right (-).
    pub turn: f32,
    /// Up (+) or down (-).
    pub climb: f32,
}

impl ControlAxes {
    /// Returns `true` when no axis is deflected.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}
