use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::error::Result;
use crate::math::{Point3, Vector3};
use crate::operations::creation::{MakeFloor, MakeNeck, MakeVessel};
use crate::operations::packing::{PackReport, PackSpheres};
use crate::world::{
    Domain, ParticleStore, Species, SpeciesId, SpeciesStore, WallId, WallStore,
};

use super::{ScenarioController, ScenarioState, StepClock};

/// External configuration of the dry-powder hopper scenario.
///
/// Defaults reproduce the reference setup: a 0.30 m x 0.60 m vessel,
/// a 0.132 m wide and 0.05 m high contraction starting 0.1 m above
/// mid-height, 4500 particles of 6-7 mm radius, and the floor drop at
/// t = 0.9 s.
#[derive(Debug, Clone)]
pub struct HopperParams {
    /// Domain footprint width (square).
    pub width: f64,
    /// Domain height.
    pub height: f64,
    /// Radial depth of the contraction wedge.
    pub neck_width: f64,
    /// Height of the contraction cone.
    pub neck_height: f64,
    /// Height of the neck's lower rim above mid-height.
    pub base_offset: f64,
    /// Smallest particle radius.
    pub min_radius: f64,
    /// Largest particle radius.
    pub max_radius: f64,
    /// Target particle count.
    pub target_count: usize,
    /// Polygon sides approximating the cylinder wall.
    pub num_sides: usize,
    /// Freeze height above the domain base.
    pub freeze_offset: f64,
    /// Simulated time at which the support floor drops.
    pub drop_time: f64,
    /// Seed of the packing RNG stream.
    pub seed: u64,
}

impl Default for HopperParams {
    fn default() -> Self {
        Self {
            width: 30e-2,
            height: 60e-2,
            neck_width: 13.2e-2,
            neck_height: 5e-2,
            base_offset: 10e-2,
            min_radius: 6e-3,
            max_radius: 7e-3,
            target_count: 4500,
            num_sides: 12,
            freeze_offset: 0.02,
            drop_time: 0.9,
            seed: 0,
        }
    }
}

/// Handles of the scenario's material triplet.
#[derive(Debug, Clone, Copy)]
pub struct HopperSpecies {
    /// Granular material of the packed bed.
    pub particle: SpeciesId,
    /// Near-frictionless vessel and neck walls.
    pub smooth_wall: SpeciesId,
    /// The support floor.
    pub rough_floor: SpeciesId,
}

/// A fully assembled hopper scenario: domain, species, walls, packed
/// bed, and the per-step controller, communicating through handles.
#[derive(Debug)]
pub struct HopperScenario {
    domain: Domain,
    species: SpeciesStore,
    species_ids: HopperSpecies,
    walls: WallStore,
    particles: ParticleStore,
    vessel: WallId,
    neck: WallId,
    floor: WallId,
    pack: PackReport,
    controller: ScenarioController,
}

impl HopperScenario {
    /// Builds the complete scenario.
    ///
    /// Construction order: domain, species triplet, vessel shell,
    /// conical neck, support floor, then the packed bed above the neck.
    /// Packing uses a PCG stream seeded from `params.seed`, so builds
    /// with identical parameters produce identical beds.
    ///
    /// # Errors
    ///
    /// Returns an error if any scenario parameter violates its builder's
    /// preconditions.
    pub fn build(params: &HopperParams) -> Result<Self> {
        let domain = Domain::with_footprint(params.width, params.height)?;
        let mid = domain.mid();
        let half_width = domain.half_width();

        let mut species = SpeciesStore::new();
        let mut particle_spec = Species::linear_viscoelastic(2000.0, 1e5, 9.0);
        particle_spec.sliding_stiffness = 2.0 / 7.0 * particle_spec.stiffness;
        particle_spec.sliding_dissipation = 2.0 / 7.0 * particle_spec.dissipation;
        particle_spec.rolling_stiffness = 2.0 / 7.0 * particle_spec.stiffness;
        particle_spec.rolling_dissipation = 2.0 / 7.0 * particle_spec.dissipation;

        // Walls copy the bed material; the shell stays near-smooth, the
        // floor dissipates rolling harder.
        let smooth_wall_spec = particle_spec.clone();
        let mut rough_floor_spec = particle_spec.clone();
        rough_floor_spec.rolling_dissipation = 2.0 / 5.0 * particle_spec.dissipation;

        let species_ids = HopperSpecies {
            particle: species.add(particle_spec),
            smooth_wall: species.add(smooth_wall_spec),
            rough_floor: species.add(rough_floor_spec),
        };

        let mut walls = WallStore::new();
        let vessel = MakeVessel::new(
            Point3::new(mid.x, mid.y, 0.0),
            half_width,
            params.num_sides,
            domain.z_max(),
            species_ids.smooth_wall,
        )
        .execute(&mut walls)?;

        let neck_op = MakeNeck::new(
            mid,
            Vector3::z(),
            half_width,
            params.neck_width,
            params.neck_height,
            params.base_offset,
            species_ids.smooth_wall,
        );
        let neck_top_z = mid.z + neck_op.junction_offset();
        let floor_z = mid.z + neck_op.rim_offset();
        let neck = neck_op.execute(&mut walls)?;
        let floor = MakeFloor::new(floor_z, species_ids.rough_floor).execute(&mut walls)?;

        let mut particles = ParticleStore::new();
        let mut rng = Pcg32::seed_from_u64(params.seed);
        let pack = PackSpheres::new(
            Point3::new(mid.x, mid.y, 0.0),
            half_width,
            neck_top_z,
            params.min_radius,
            params.max_radius,
            params.target_count,
            species_ids.particle,
        )
        .execute(&mut rng, &mut particles)?;
        tracing::info!(
            placed = pack.placed(),
            walls = walls.len(),
            "assembled hopper scenario"
        );

        let controller = ScenarioController::new(
            floor,
            domain.z_min() + params.freeze_offset,
            params.drop_time,
            domain.z_min(),
        );

        Ok(Self {
            domain,
            species,
            species_ids,
            walls,
            particles,
            vessel,
            neck,
            floor,
            pack,
            controller,
        })
    }

    /// The per-step hook, to be invoked once after each completed
    /// integration step.
    ///
    /// # Errors
    ///
    /// Propagates controller errors (stale or non-planar floor handle).
    pub fn after_time_step(&mut self, clock: StepClock) -> Result<()> {
        self.controller
            .after_time_step(clock, &mut self.particles, &mut self.walls)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ScenarioState {
        self.controller.state()
    }

    /// The simulation domain.
    #[must_use]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The species registry.
    #[must_use]
    pub fn species(&self) -> &SpeciesStore {
        &self.species
    }

    /// Handles of the species triplet.
    #[must_use]
    pub fn species_ids(&self) -> HopperSpecies {
        self.species_ids
    }

    /// The wall store.
    #[must_use]
    pub fn walls(&self) -> &WallStore {
        &self.walls
    }

    /// The particle store.
    #[must_use]
    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    /// Mutable particle access for the integrating engine.
    pub fn particles_mut(&mut self) -> &mut ParticleStore {
        &mut self.particles
    }

    /// Handle of the vessel shell wall.
    #[must_use]
    pub fn vessel(&self) -> WallId {
        self.vessel
    }

    /// Handle of the conical neck wall.
    #[must_use]
    pub fn neck(&self) -> WallId {
        self.neck
    }

    /// Handle of the support floor wall.
    #[must_use]
    pub fn floor(&self) -> WallId {
        self.floor
    }

    /// Summary of the packing run.
    #[must_use]
    pub fn pack(&self) -> &PackReport {
        &self.pack
    }
}
