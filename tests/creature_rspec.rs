//! Behaviour tests for creature motion: ground snapping, free fall and
//! scattering under a fresh beam.
use glam::Vec3;
use skylift::{CreatureId, InputFrame, MotionState, Simulation, Terrain, FALL_TERMINAL_VELOCITY};
use std::sync::{Arc, Mutex};
use test_utils::{assert_near, frame_time, hovering, run_frames, FlatTerrain, RampTerrain};

#[path = "support/rspec_runner.rs"]
mod rspec_runner;
use rspec_runner::run_serial;

#[derive(Clone, Debug)]
struct Field<T: Terrain> {
    sim: Arc<Mutex<Simulation<T>>>,
    creature: Arc<Mutex<Option<CreatureId>>>,
    fall_speeds: Arc<Mutex<Vec<f32>>>,
}

impl<T: Terrain + Clone> Field<T> {
    fn new(terrain: T) -> Self {
        Self {
            sim: Arc::new(Mutex::new(hovering(terrain, 10.0))),
            creature: Arc::new(Mutex::new(None)),
            fall_speeds: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn reset(&self, terrain: T, altitude: f32, creature_at: Vec3) {
        let mut sim = hovering(terrain, altitude);
        let id = sim.spawn_creature_at(creature_at);
        *self.sim.lock().expect("sim lock") = sim;
        *self.creature.lock().expect("id lock") = Some(id);
        self.fall_speeds.lock().expect("speeds lock").clear();
    }

    fn id(&self) -> CreatureId {
        self.creature
            .lock()
            .expect("id lock")
            .expect("creature spawned")
    }

    fn with_creature<R>(&self, f: impl FnOnce(&mut skylift::Creature) -> R) -> R {
        let id = self.id();
        let mut sim = self.sim.lock().expect("sim lock");
        f(sim.creature_mut(id).expect("creature present"))
    }

    fn run(&self, first: u64, count: u64, input: &InputFrame) {
        let mut sim = self.sim.lock().expect("sim lock");
        run_frames(&mut *sim, first, count, input);
    }
}

/// Runs behavioural tests for wandering creatures on a slope.
#[test]
fn creatures_follow_the_ground() {
    let ramp = RampTerrain { slope: 0.5 };
    run_serial(&rspec::given(
        "a creature far from the vehicle on a ramp",
        Field::new(ramp),
        |ctx| {
            ctx.before_each(move |field| {
                field.reset(ramp, 10.0, Vec3::new(60.0, 0.0, 0.0));
                field.with_creature(|creature| creature.velocity = glam::Vec2::new(-0.1, 0.05));
                field.run(0, 200, &InputFrame::new());
            });
            ctx.then("it stays free", |field| {
                assert!(field.with_creature(|creature| creature.is_free()));
            });
            ctx.then("its height matches the ground below it", move |field| {
                let position = field.with_creature(|creature| creature.position);
                assert_near(position.y, ramp.height_at(position.x, position.z), 1e-4);
            });
        },
    ));
}

/// Runs behavioural tests for a creature dropped from the beam.
#[test]
fn dropped_creatures_fall_and_land() {
    let ground = FlatTerrain::at(1.0);
    run_serial(&rspec::given(
        "a creature lifted high in the beam",
        Field::new(ground.clone()),
        |ctx| {
            ctx.before_each(move |field| {
                field.reset(ground.clone(), 20.0, Vec3::new(0.5, 0.0, 0.0));
                field.run(0, 1, &InputFrame::new().with_engage());
                field.with_creature(|creature| creature.position.y = 18.0);
                field.run(1, 1, &InputFrame::new().with_release());
                for frame in 2..200 {
                    let mut sim = field.sim.lock().expect("sim lock");
                    sim.tick(frame_time(frame), &InputFrame::new());
                    let state = sim.creature(field.id()).map(skylift::Creature::state);
                    if let Some(MotionState::Falling { fall_velocity, .. }) = state {
                        field.fall_speeds.lock().expect("speeds lock").push(fall_velocity);
                    }
                }
            });
            ctx.then("the fall accelerates until terminal velocity", |field| {
                let speeds = field.fall_speeds.lock().expect("speeds lock").clone();
                assert!(speeds.len() > 34);
                assert!(speeds
                    .windows(2)
                    .all(|pair| matches!(pair, [a, b] if b < a || (*b - FALL_TERMINAL_VELOCITY).abs() < 1e-6)));
                assert!(speeds.iter().all(|v| *v >= FALL_TERMINAL_VELOCITY));
                assert!(speeds
                    .iter()
                    .any(|v| (*v - FALL_TERMINAL_VELOCITY).abs() < 1e-6));
            });
            ctx.then("it lands upright on the ground", |field| {
                let (state, position, tilt) = field.with_creature(|creature| {
                    (creature.state(), creature.position, creature.rotation.x)
                });
                assert_eq!(state, MotionState::Free);
                assert_near(position.y, 1.0, 1e-6);
                assert_near(tilt, 0.0, 1e-6);
            });
        },
    ));
}

/// Runs behavioural tests for creatures scattering when the beam fires.
#[test]
fn fresh_beam_scatters_creatures() {
    let ground = FlatTerrain::at(0.0);
    run_serial(&rspec::given(
        "a resting creature ten units from the beam",
        Field::new(ground.clone()),
        |ctx| {
            ctx.before_each(move |field| {
                field.reset(ground.clone(), 5.0, Vec3::new(-10.0, 0.0, 0.0));
                field.run(0, 1, &InputFrame::new().with_engage());
            });
            ctx.then("it runs directly away from the impact point", |field| {
                let velocity = field.with_creature(|creature| creature.velocity);
                assert_near(velocity.x, -skylift::FLEE_SPEED, 1e-6);
                assert_near(velocity.y, 0.0, 1e-6);
            });
        },
    ));
}
