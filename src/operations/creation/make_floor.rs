use crate::error::Result;
use crate::geometry::{BoundarySurface, HalfSpace};
use crate::math::{Point3, Vector3};
use crate::world::{SpeciesId, WallId, WallStore};

/// Builds the flat support floor below the neck.
///
/// A single half-space with outward normal `(0, 0, -1)`: solid below
/// `z`, open above. The returned handle stays mutable through the
/// store, because the scenario controller relocates this wall mid-run;
/// it is not folded into a sealed intersection solid.
pub struct MakeFloor {
    z: f64,
    species: SpeciesId,
}

impl MakeFloor {
    /// Creates a new `MakeFloor` operation supporting particles at
    /// height `z`.
    #[must_use]
    pub fn new(z: f64, species: SpeciesId) -> Self {
        Self { z, species }
    }

    /// Executes the operation, adding the floor wall to the store.
    ///
    /// # Errors
    ///
    /// Infallible in practice; kept fallible for uniformity with the
    /// other builders.
    pub fn execute(&self, store: &mut WallStore) -> Result<WallId> {
        let floor = HalfSpace::new(
            Vector3::new(0.0, 0.0, -1.0),
            Point3::new(0.0, 0.0, self.z),
        )?;
        Ok(store.add(BoundarySurface::PlanarHalfSpace(floor), self.species))
    }
}
