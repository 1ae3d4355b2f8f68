use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::geometry::{BoundarySurface, HalfSpace, IntersectionSolid};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::world::{SpeciesId, WallId, WallStore};

/// Builds the vessel shell: a regular polygonal prism approximating a
/// vertical cylinder, capped flat at the top.
///
/// `num_sides` half-spaces with normals `(cos a_i, sin a_i, 0)` at
/// angles `a_i = 2 pi i / num_sides`, each passing through the point at
/// distance `radius` from the axis, plus one upward-facing cap through
/// `top_z`. The intersection of their interiors is the capped prism;
/// more sides approximate the circle more closely at the cost of more
/// per-step boundary evaluations in the engine.
pub struct MakeVessel {
    center: Point3,
    radius: f64,
    num_sides: usize,
    top_z: f64,
    species: SpeciesId,
}

impl MakeVessel {
    /// Creates a new `MakeVessel` operation.
    ///
    /// `center` fixes the vessel axis; its z component is only used for
    /// the side faces' defining points and does not affect the geometry.
    #[must_use]
    pub fn new(
        center: Point3,
        radius: f64,
        num_sides: usize,
        top_z: f64,
        species: SpeciesId,
    ) -> Self {
        Self {
            center,
            radius,
            num_sides,
            top_z,
            species,
        }
    }

    /// Executes the operation, adding the vessel wall to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_sides < 3` or the radius is not
    /// positive.
    pub fn execute(&self, store: &mut WallStore) -> Result<WallId> {
        if self.num_sides < 3 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "num_sides",
                value: self.num_sides as f64,
                min: 3.0,
                max: f64::INFINITY,
            }
            .into());
        }
        if self.radius < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "vessel radius must be positive".into(),
            )
            .into());
        }

        let mut shell = IntersectionSolid::with_capacity(self.num_sides + 1);
        for i in 0..self.num_sides {
            let angle = TAU * i as f64 / self.num_sides as f64;
            let normal = Vector3::new(angle.cos(), angle.sin(), 0.0);
            let point = Point3::new(
                self.center.x + self.radius * angle.cos(),
                self.center.y + self.radius * angle.sin(),
                self.center.z,
            );
            shell.add(HalfSpace::new(normal, point)?);
        }
        shell.add(HalfSpace::new(
            Vector3::z(),
            Point3::new(self.center.x, self.center.y, self.top_z),
        )?);

        Ok(store.add(BoundarySurface::IntersectionSolid(shell), self.species))
    }
}
