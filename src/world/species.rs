use std::f64::consts::PI;

use slotmap::SlotMap;

use crate::error::ScenarioError;

slotmap::new_key_type! {
    /// Unique identifier for a species in the registry.
    pub struct SpeciesId;
}

/// Material parameters for a linear viscoelastic contact law with
/// sliding and rolling friction.
///
/// The kernel performs no contact mechanics itself; it stores these
/// parameters, attaches their handles to walls and particles, and
/// derives contact timescales for time-step selection. Everything else
/// is the external engine's business.
#[derive(Debug, Clone)]
pub struct Species {
    pub density: f64,
    pub stiffness: f64,
    pub dissipation: f64,
    pub sliding_friction: f64,
    pub sliding_stiffness: f64,
    pub sliding_dissipation: f64,
    pub rolling_friction: f64,
    pub rolling_stiffness: f64,
    pub rolling_dissipation: f64,
}

impl Species {
    /// Creates a frictionless linear viscoelastic species.
    #[must_use]
    pub fn linear_viscoelastic(density: f64, stiffness: f64, dissipation: f64) -> Self {
        Self {
            density,
            stiffness,
            dissipation,
            sliding_friction: 0.0,
            sliding_stiffness: 0.0,
            sliding_dissipation: 0.0,
            rolling_friction: 0.0,
            rolling_stiffness: 0.0,
            rolling_dissipation: 0.0,
        }
    }

    /// Mass of a sphere of the given radius at this species' density.
    #[must_use]
    pub fn particle_mass(&self, radius: f64) -> f64 {
        self.density * 4.0 / 3.0 * PI * radius.powi(3)
    }

    /// Collision time for a contact between two copies of a particle of
    /// the given mass: `pi / sqrt(k / (m/2) - (gamma / m)^2)`.
    ///
    /// # Errors
    ///
    /// Returns an error if mass or stiffness is non-positive, or the
    /// contact is overdamped (no oscillatory solution).
    pub fn collision_time(&self, mass: f64) -> Result<f64, ScenarioError> {
        if mass <= 0.0 {
            return Err(ScenarioError::InvalidParameter(format!(
                "collision time needs a positive mass, got {mass}"
            )));
        }
        if self.stiffness <= 0.0 {
            return Err(ScenarioError::InvalidParameter(format!(
                "collision time needs a positive stiffness, got {}",
                self.stiffness
            )));
        }
        let omega_sq = self.stiffness / (mass / 2.0) - (self.dissipation / mass).powi(2);
        if omega_sq <= 0.0 {
            return Err(ScenarioError::InvalidParameter(
                "contact is overdamped: dissipation too large for stiffness and mass".into(),
            ));
        }
        Ok(PI / omega_sq.sqrt())
    }

    /// Restitution coefficient for the same two-particle contact:
    /// `exp(-(gamma / m) * collision_time)`.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as
    /// [`Species::collision_time`].
    pub fn restitution_coefficient(&self, mass: f64) -> Result<f64, ScenarioError> {
        let tc = self.collision_time(mass)?;
        Ok((-(self.dissipation / mass) * tc).exp())
    }
}

/// Registry of material species.
///
/// Walls and particles hold [`SpeciesId`] handles into this store; the
/// handles stay valid for the lifetime of the scenario.
#[derive(Debug, Default)]
pub struct SpeciesStore {
    species: SlotMap<SpeciesId, Species>,
}

impl SpeciesStore {
    /// Creates a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a species and returns its handle.
    pub fn add(&mut self, species: Species) -> SpeciesId {
        self.species.insert(species)
    }

    /// Returns a reference to the species, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not in the registry.
    pub fn species(&self, id: SpeciesId) -> Result<&Species, ScenarioError> {
        self.species
            .get(id)
            .ok_or_else(|| ScenarioError::EntityNotFound("species".into()))
    }

    /// Number of registered species.
    #[must_use]
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}
