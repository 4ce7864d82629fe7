//! Properties of the generated landscape and its obstacle snapshot.
use glam::Vec3;
use rstest::rstest;
use skylift::{
    terrain::collect_colliders, ColliderKind, ColliderRegistry, CollisionSystem, HeightField, Mover,
    ProceduralTerrain, Terrain, TerrainConfig, Timestamp, CREATURE_RADIUS,
};
use test_utils::{assert_near, FlatTerrain};

#[rstest]
#[case(0)]
#[case(7)]
#[case(123_456_789)]
fn heights_stay_within_the_octave_weights(#[case] seed: u32) {
    let field = HeightField::new(seed);
    for step in -50..50_i16 {
        let x = f32::from(step) * 3.7;
        let z = f32::from(step) * -2.3;
        let height = field.height_at(x, z);
        assert!(height.abs() <= 8.0 + 1e-3, "height {height} out of range at ({x}, {z})");
        assert_near(field.height_at(x, z), height, 0.0);
    }
}

#[test]
fn normals_point_up_and_are_unit_length() {
    let terrain = ProceduralTerrain::generate(11, &TerrainConfig::default());
    for step in 0..20_u8 {
        let x = f32::from(step) * 5.0;
        let normal = terrain.normal_at(x, -x);
        assert_near(normal.length(), 1.0, 1e-4);
        assert!(normal.y > 0.0);
    }
}

#[test]
fn obstacles_rest_on_the_ground_away_from_the_start() {
    let config = TerrainConfig::default();
    let terrain = ProceduralTerrain::generate(21, &config);
    let colliders = terrain.colliders_snapshot();
    assert_eq!(colliders.len(), config.trees + config.buildings + config.fences);
    for collider in &colliders {
        let p = collider.position;
        assert_near(p.y, terrain.height_at(p.x, p.z), 1e-4);
        assert!(p.x.hypot(p.z) >= config.clear_radius);
        assert!(p.x.abs() <= config.extent && p.z.abs() <= config.extent);
    }
    let buildings = colliders
        .iter()
        .filter(|collider| collider.kind == ColliderKind::Building)
        .count();
    assert_eq!(buildings, config.buildings);
}

#[test]
fn registry_snapshots_the_procedural_terrain() {
    let terrain = ProceduralTerrain::generate(4, &TerrainConfig::default());
    let mut registry = ColliderRegistry::new();
    assert!(registry.refresh(Timestamp(0), false, &terrain));
    assert!(!registry.refresh(Timestamp(500), false, &terrain));
    assert_eq!(registry.colliders(), terrain.colliders_snapshot().as_slice());
}

#[test]
fn procedural_terrain_exposes_its_layers() {
    let terrain = ProceduralTerrain::generate(9, &TerrainConfig::default());
    let field = terrain.height_field();
    for step in 0..10_u8 {
        let x = f32::from(step) * 7.5;
        assert_near(terrain.height_at(x, -x), field.height_at(x, -x), 0.0);
    }
    assert!(!terrain.decorations().is_empty());
    assert_eq!(
        collect_colliders(terrain.decorations()),
        terrain.colliders_snapshot()
    );
}

#[rstest]
#[case::fence_blocks(ColliderKind::Fence, true)]
#[case::building_blocks(ColliderKind::Building, true)]
#[case::trees_are_walked_past(ColliderKind::Tree, false)]
fn creatures_are_stopped_by_fixture_obstacles(#[case] kind: ColliderKind, #[case] blocked: bool) {
    let ground = FlatTerrain::at(1.5).with_obstacle(kind, 3.0, 0.0);
    let mut registry = ColliderRegistry::new();
    registry.refresh(Timestamp(0), true, &ground);
    let collision = CollisionSystem::new(&ground, registry.colliders());
    let mut step = Vec3::new(3.2, 0.0, 0.0);
    assert_eq!(
        collision.would_collide(Mover::Creature, &mut step, CREATURE_RADIUS),
        blocked
    );
    assert_near(step.y, 1.5, 0.0);
}
