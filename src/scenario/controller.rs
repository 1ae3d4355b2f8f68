use crate::error::{Result, ScenarioError};
use crate::geometry::BoundarySurface;
use crate::math::{Point3, Vector3};
use crate::world::{ParticleStore, WallId, WallStore};

use super::StepClock;

/// Lifecycle state of the hopper scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioState {
    /// Particles settle onto the supported floor.
    Settling,
    /// The support floor has been dropped to the domain base; terminal.
    FloorDropped,
}

/// One-shot relocation of the support floor, armed at construction.
#[derive(Debug, Clone, Copy)]
struct DropEvent {
    instant: f64,
    target_z: f64,
}

/// Per-step scenario logic, run once after each completed integration
/// step.
///
/// Every step, independent of state: particles below the freeze height
/// lose their horizontal velocity, emulating floor friction without a
/// true friction contact. Once, when the clock crosses the drop
/// instant: the support floor's half-space is rewritten to the domain
/// base, releasing the settled bed into the neck. The state machine
/// guards the transition, so invoking the hook twice within one step
/// cannot fire the drop twice.
#[derive(Debug)]
pub struct ScenarioController {
    floor: WallId,
    freeze_z: f64,
    drop: DropEvent,
    state: ScenarioState,
}

impl ScenarioController {
    /// Creates a controller in the `Settling` state.
    ///
    /// `floor` must refer to a planar wall; `drop_z` is where its plane
    /// moves when the clock crosses `drop_time`.
    #[must_use]
    pub fn new(floor: WallId, freeze_z: f64, drop_time: f64, drop_z: f64) -> Self {
        Self {
            floor,
            freeze_z,
            drop: DropEvent {
                instant: drop_time,
                target_z: drop_z,
            },
            state: ScenarioState::Settling,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ScenarioState {
        self.state
    }

    /// Height below which horizontal velocity is zeroed.
    #[must_use]
    pub fn freeze_z(&self) -> f64 {
        self.freeze_z
    }

    /// The per-step hook.
    ///
    /// # Errors
    ///
    /// Returns an error if the floor handle is stale or no longer
    /// refers to a planar half-space.
    pub fn after_time_step(
        &mut self,
        clock: StepClock,
        particles: &mut ParticleStore,
        walls: &mut WallStore,
    ) -> Result<()> {
        for (_, particle) in particles.iter_mut() {
            if particle.position.z < self.freeze_z {
                particle.velocity.x = 0.0;
                particle.velocity.y = 0.0;
            }
        }

        if self.state == ScenarioState::Settling && clock.straddles(self.drop.instant) {
            let wall = walls.wall_mut(self.floor)?;
            match &mut wall.surface {
                BoundarySurface::PlanarHalfSpace(floor) => {
                    let point =
                        Point3::new(floor.point().x, floor.point().y, self.drop.target_z);
                    floor.set(Vector3::new(0.0, 0.0, -1.0), point)?;
                }
                _ => {
                    return Err(ScenarioError::NotPlanar("support floor".into()).into());
                }
            }
            tracing::info!(time = clock.time(), "shifting support floor to the domain base");
            self.state = ScenarioState::FloorDropped;
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakeFloor;
    use crate::world::{Particle, SpeciesId};

    const FLOOR_Z: f64 = 0.4;
    const FREEZE_Z: f64 = 0.02;
    const DROP_TIME: f64 = 0.9;

    fn setup() -> (WallStore, ParticleStore, ScenarioController) {
        let mut walls = WallStore::new();
        let floor = MakeFloor::new(FLOOR_Z, SpeciesId::default())
            .execute(&mut walls)
            .unwrap();
        let controller = ScenarioController::new(floor, FREEZE_Z, DROP_TIME, 0.0);
        (walls, ParticleStore::new(), controller)
    }

    fn floor_z(walls: &WallStore, controller: &ScenarioController) -> f64 {
        match &walls.wall(controller.floor).unwrap().surface {
            BoundarySurface::PlanarHalfSpace(floor) => floor.point().z,
            _ => unreachable!("floor is planar"),
        }
    }

    #[test]
    fn slow_particle_near_floor_loses_horizontal_velocity() {
        let (mut walls, mut particles, mut controller) = setup();
        let near = particles.add(Particle {
            position: Point3::new(0.1, 0.1, 0.01),
            velocity: Vector3::new(1.0, 2.0, 3.0),
            radius: 6e-3,
            species: SpeciesId::default(),
        });
        let above = particles.add(Particle {
            position: Point3::new(0.1, 0.1, 0.03),
            velocity: Vector3::new(1.0, 2.0, 3.0),
            radius: 6e-3,
            species: SpeciesId::default(),
        });

        controller
            .after_time_step(StepClock::new(0.0, 0.01), &mut particles, &mut walls)
            .unwrap();

        let frozen = particles.particle(near).unwrap();
        assert!((frozen.velocity - Vector3::new(0.0, 0.0, 3.0)).norm() < 1e-12);
        let free = particles.particle(above).unwrap();
        assert!((free.velocity - Vector3::new(1.0, 2.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn floor_drops_exactly_once_across_a_full_run() {
        let (mut walls, mut particles, mut controller) = setup();
        let mut clock = StepClock::new(0.0, 0.01);
        let mut drops = 0;
        while clock.time() < 30.0 {
            let before = floor_z(&walls, &controller);
            controller
                .after_time_step(clock, &mut particles, &mut walls)
                .unwrap();
            let after = floor_z(&walls, &controller);
            if (before - after).abs() > 0.0 {
                drops += 1;
            }
            if clock.time() + clock.dt() < DROP_TIME {
                assert!((after - FLOOR_Z).abs() < 1e-12, "dropped early at {}", clock.time());
            }
            clock = clock.advanced();
        }
        assert_eq!(drops, 1);
        assert!((floor_z(&walls, &controller) - 0.0).abs() < 1e-12);
        assert_eq!(controller.state(), ScenarioState::FloorDropped);
    }

    #[test]
    fn double_invocation_in_one_step_fires_once() {
        let (mut walls, mut particles, mut controller) = setup();
        let clock = StepClock::new(0.895, 0.01);
        controller
            .after_time_step(clock, &mut particles, &mut walls)
            .unwrap();
        assert_eq!(controller.state(), ScenarioState::FloorDropped);
        // Calling again with the same clock must not error or re-fire.
        controller
            .after_time_step(clock, &mut particles, &mut walls)
            .unwrap();
        assert_eq!(controller.state(), ScenarioState::FloorDropped);
        assert!((floor_z(&walls, &controller) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn stale_floor_handle_errors_at_fire_time() {
        let (_, mut particles, mut controller) = setup();
        let mut other_walls = WallStore::new();
        let r = controller.after_time_step(
            StepClock::new(0.895, 0.01),
            &mut particles,
            &mut other_walls,
        );
        assert!(r.is_err());
    }

    #[test]
    fn freeze_applies_every_step_even_after_drop() {
        let (mut walls, mut particles, mut controller) = setup();
        controller
            .after_time_step(StepClock::new(0.895, 0.01), &mut particles, &mut walls)
            .unwrap();
        let id = particles.add(Particle {
            position: Point3::new(0.1, 0.1, 0.015),
            velocity: Vector3::new(-4.0, 5.0, -6.0),
            radius: 6e-3,
            species: SpeciesId::default(),
        });
        controller
            .after_time_step(StepClock::new(1.0, 0.01), &mut particles, &mut walls)
            .unwrap();
        let p = particles.particle(id).unwrap();
        assert!((p.velocity - Vector3::new(0.0, 0.0, -6.0)).norm() < 1e-12);
    }
}
