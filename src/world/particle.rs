use slotmap::SlotMap;

use crate::error::ScenarioError;
use crate::math::{Point3, Vector3};

use super::SpeciesId;

slotmap::new_key_type! {
    /// Unique identifier for a particle in the store.
    pub struct ParticleId;
}

/// A spherical particle.
///
/// Particles are created once during initial packing and never
/// destroyed during a run; only their kinematic state is mutated.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Center position.
    pub position: Point3,
    /// Translational velocity.
    pub velocity: Vector3,
    /// Sphere radius.
    pub radius: f64,
    /// Material species handle.
    pub species: SpeciesId,
}

impl Particle {
    /// Creates a particle at rest.
    #[must_use]
    pub fn at_rest(position: Point3, radius: f64, species: SpeciesId) -> Self {
        Self {
            position,
            velocity: Vector3::zeros(),
            radius,
            species,
        }
    }

    /// Height of the sphere's lowest point.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.position.z - self.radius
    }
}

/// Arena that owns all particles: the particle sink of the external
/// engine contract. Accepts one particle at a time and returns a stable
/// handle.
#[derive(Debug, Default)]
pub struct ParticleStore {
    particles: SlotMap<ParticleId, Particle>,
}

impl ParticleStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a particle and returns its handle.
    pub fn add(&mut self, particle: Particle) -> ParticleId {
        self.particles.insert(particle)
    }

    /// Returns a reference to the particle, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not in the store.
    pub fn particle(&self, id: ParticleId) -> Result<&Particle, ScenarioError> {
        self.particles
            .get(id)
            .ok_or_else(|| ScenarioError::EntityNotFound("particle".into()))
    }

    /// Returns a mutable reference to the particle, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not in the store.
    pub fn particle_mut(&mut self, id: ParticleId) -> Result<&mut Particle, ScenarioError> {
        self.particles
            .get_mut(id)
            .ok_or_else(|| ScenarioError::EntityNotFound("particle".into()))
    }

    /// Iterates over all particles with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &Particle)> {
        self.particles.iter()
    }

    /// Iterates mutably over all particles with their handles.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ParticleId, &mut Particle)> {
        self.particles.iter_mut()
    }

    /// Number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn at_rest_has_zero_velocity() {
        let p = Particle::at_rest(Point3::new(0.1, 0.2, 0.3), 6e-3, SpeciesId::default());
        assert!(p.velocity.norm() == 0.0);
        assert!((p.bottom() - (0.3 - 6e-3)).abs() < 1e-12);
    }

    #[test]
    fn store_roundtrip() {
        let mut store = ParticleStore::new();
        let id = store.add(Particle::at_rest(
            Point3::origin(),
            7e-3,
            SpeciesId::default(),
        ));
        assert_eq!(store.len(), 1);
        store.particle_mut(id).unwrap().velocity = Vector3::new(1.0, 2.0, 3.0);
        assert!((store.particle(id).unwrap().velocity.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn missing_handle_errors() {
        let store = ParticleStore::new();
        assert!(store.particle(ParticleId::default()).is_err());
    }
}
