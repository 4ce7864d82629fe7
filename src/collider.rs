//! Static obstacles and the periodically refreshed registry holding them.

use glam::Vec3;
use log::debug;

use crate::clock::Timestamp;
use crate::error::WorldDataError;
use crate::terrain::{DecorationKind, Terrain};
use crate::COLLIDER_REFRESH_INTERVAL_MS;

/// Collidable obstacle kinds with their fixed footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderKind {
    /// Tree; creatures walk through trees.
    Tree,
    /// Building.
    Building,
    /// Fence segment.
    Fence,
}

impl ColliderKind {
    /// Horizontal collision radius.
    #[must_use]
    pub const fn radius(self) -> f32 {
        match self {
            Self::Tree => 2.0,
            Self::Building => 4.0,
            Self::Fence => 0.5,
        }
    }

    /// Height used for vertical overlap tests against the vehicle.
    #[must_use]
    pub const fn height(self) -> f32 {
        match self {
            Self::Tree => 6.0,
            Self::Building => 8.0,
            Self::Fence => 2.0,
        }
    }

    /// Maps a decoration tag to a collider kind; scenery yields `None`.
    #[must_use]
    pub const fn from_decoration(kind: DecorationKind) -> Option<Self> {
        match kind {
            DecorationKind::Tree => Some(Self::Tree),
            DecorationKind::Building => Some(Self::Building),
            DecorationKind::Fence => Some(Self::Fence),
            DecorationKind::Rock | DecorationKind::Flower => None,
        }
    }
}

/// Immutable snapshot of one obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Obstacle kind.
    pub kind: ColliderKind,
    /// Base position on the ground.
    pub position: Vec3,
}

impl Collider {
    /// Creates a collider of `kind` at `position`.
    #[must_use]
    pub const fn new(kind: ColliderKind, position: Vec3) -> Self {
        Self { kind, position }
    }

    /// Derives a collider from a decoration.
    ///
    /// Returns `Ok(None)` for purely visual decorations.
    ///
    /// # Errors
    /// Returns [`WorldDataError`] when the position is non-finite or exactly at
    /// the origin, both of which mark a construction mistake upstream.
    pub fn from_decoration(
        kind: DecorationKind,
        position: Vec3,
    ) -> Result<Option<Self>, WorldDataError> {
        let Some(collider_kind) = ColliderKind::from_decoration(kind) else {
            return Ok(None);
        };
        if !position.is_finite() {
            return Err(WorldDataError::NonFinitePosition {
                kind,
                x: position.x,
                y: position.y,
                z: position.z,
            });
        }
        if position == Vec3::ZERO {
            return Err(WorldDataError::OriginPlacement { kind });
        }
        Ok(Some(Self::new(collider_kind, position)))
    }

    /// Collision radius of this obstacle.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.kind.radius()
    }

    /// Collision height of this obstacle.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.kind.height()
    }
}

/// Cached obstacle list refreshed at most once per interval.
///
/// Between refreshes the snapshot may be stale: a collider that moved or
/// appeared since the last scan is invisible until the next one.
#[derive(Debug, Clone, Default)]
pub struct ColliderRegistry {
    colliders: Vec<Collider>,
    last_refresh: Option<Timestamp>,
}

impl ColliderRegistry {
    /// Creates an empty registry that refreshes on first use.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            colliders: Vec::new(),
            last_refresh: None,
        }
    }

    /// Re-scans `terrain` when the refresh interval has elapsed or `force` is
    /// set. Returns `true` when a scan happened.
    pub fn refresh<T: Terrain + ?Sized>(&mut self, now: Timestamp, force: bool, terrain: &T) -> bool {
        let due = self
            .last_refresh
            .is_none_or(|last| now.since(last) >= COLLIDER_REFRESH_INTERVAL_MS);
        if !force && !due {
            return false;
        }
        self.colliders = terrain.colliders_snapshot();
        self.last_refresh = Some(now);
        debug!("collider snapshot refreshed: {} obstacles", self.colliders.len());
        true
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Returns when the snapshot was last taken.
    #[must_use]
    pub const fn last_refresh(&self) -> Option<Timestamp> {
        self.last_refresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    struct CountingTerrain {
        scans: Cell<usize>,
    }

    impl Terrain for CountingTerrain {
        fn height_at(&self, _x: f32, _z: f32) -> f32 {
            0.0
        }

        fn colliders_snapshot(&self) -> Vec<Collider> {
            self.scans.set(self.scans.get() + 1);
            vec![Collider::new(ColliderKind::Fence, Vec3::new(1.0, 0.0, 1.0))]
        }
    }

    #[rstest]
    #[case::tree(ColliderKind::Tree, 2.0, 6.0)]
    #[case::building(ColliderKind::Building, 4.0, 8.0)]
    #[case::fence(ColliderKind::Fence, 0.5, 2.0)]
    fn kinds_carry_fixed_footprints(
        #[case] kind: ColliderKind,
        #[case] radius: f32,
        #[case] height: f32,
    ) {
        assert!((kind.radius() - radius).abs() < f32::EPSILON);
        assert!((kind.height() - height).abs() < f32::EPSILON);
    }

    #[rstest]
    #[case::just_before(999, 1)]
    #[case::on_interval(1000, 2)]
    #[case::well_after(5000, 2)]
    fn refresh_is_gated_by_interval(#[case] second_at: u64, #[case] expected_scans: usize) {
        let terrain = CountingTerrain { scans: Cell::new(0) };
        let mut registry = ColliderRegistry::new();
        assert!(registry.refresh(Timestamp(0), false, &terrain));
        registry.refresh(Timestamp(second_at), false, &terrain);
        assert_eq!(terrain.scans.get(), expected_scans);
        assert_eq!(registry.colliders().len(), 1);
    }

    #[test]
    fn forced_refresh_ignores_interval() {
        let terrain = CountingTerrain { scans: Cell::new(0) };
        let mut registry = ColliderRegistry::new();
        registry.refresh(Timestamp(10), false, &terrain);
        assert!(registry.refresh(Timestamp(11), true, &terrain));
        assert_eq!(terrain.scans.get(), 2);
        assert_eq!(registry.last_refresh(), Some(Timestamp(11)));
    }

    #[test]
    fn scenery_maps_to_no_collider() {
        let result = Collider::from_decoration(DecorationKind::Rock, Vec3::ZERO);
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn origin_placement_is_rejected() {
        let result = Collider::from_decoration(DecorationKind::Building, Vec3::ZERO);
        assert_eq!(
            result,
            Err(WorldDataError::OriginPlacement {
                kind: DecorationKind::Building
            })
        );
    }
}
