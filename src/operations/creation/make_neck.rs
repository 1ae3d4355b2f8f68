use crate::error::{GeometryError, Result};
use crate::geometry::{BoundarySurface, RevolvedSolid};
use crate::math::{Point2, Point3, Vector3};
use crate::world::{SpeciesId, WallId, WallStore};

/// Builds the conical contraction (neck) as a solid of revolution.
///
/// The meridian profile is a 3-point open polyline ordered clockwise:
/// an outer point where the cone meets the vessel wall, an inner point
/// offset inward by `neck_width` at the lower rim, and a closing outer
/// point at the same rim height. `axis_point` anchors the vertical axis
/// at the domain's mid-height; profile heights are axial offsets from
/// it: the rim sits at `base_offset`, the junction with the vessel at
/// `neck_height + 2 * base_offset`.
///
/// The visible range truncates the swept surface at the junction height
/// so it does not continue up the inside of the vessel wall.
pub struct MakeNeck {
    axis_point: Point3,
    axis_dir: Vector3,
    outer_radius: f64,
    neck_width: f64,
    neck_height: f64,
    base_offset: f64,
    species: SpeciesId,
}

impl MakeNeck {
    /// Creates a new `MakeNeck` operation.
    #[must_use]
    pub fn new(
        axis_point: Point3,
        axis_dir: Vector3,
        outer_radius: f64,
        neck_width: f64,
        neck_height: f64,
        base_offset: f64,
        species: SpeciesId,
    ) -> Self {
        Self {
            axis_point,
            axis_dir,
            outer_radius,
            neck_width,
            neck_height,
            base_offset,
            species,
        }
    }

    /// Height of the neck's lower rim above the axis anchor.
    #[must_use]
    pub fn rim_offset(&self) -> f64 {
        self.base_offset
    }

    /// Height of the junction with the vessel wall above the axis anchor.
    #[must_use]
    pub fn junction_offset(&self) -> f64 {
        self.neck_height + 2.0 * self.base_offset
    }

    /// Executes the operation, adding the neck wall to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if `neck_width` does not lie strictly between
    /// zero and `outer_radius` (the cone would self-intersect), if
    /// `outer_radius` or `neck_height` is not positive, or the axis
    /// direction is degenerate.
    pub fn execute(&self, store: &mut WallStore) -> Result<WallId> {
        if self.outer_radius <= 0.0 {
            return Err(GeometryError::Degenerate(
                "neck outer radius must be positive".into(),
            )
            .into());
        }
        if self.neck_width <= 0.0 || self.neck_width >= self.outer_radius {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "neck_width",
                value: self.neck_width,
                min: 0.0,
                max: self.outer_radius,
            }
            .into());
        }
        if self.neck_height <= 0.0 {
            return Err(GeometryError::Degenerate(
                "neck height must be positive".into(),
            )
            .into());
        }

        let rim = self.rim_offset();
        let junction = self.junction_offset();
        let profile = vec![
            Point2::new(self.outer_radius, junction),
            Point2::new(self.outer_radius - self.neck_width, rim),
            Point2::new(self.outer_radius, rim),
        ];

        let mut neck = RevolvedSolid::new(self.axis_point, self.axis_dir, profile)?;
        // Physical from the domain base up to the vessel-wall junction;
        // the anchor sits at mid-height, so the base is -axis_point.z
        // below it.
        neck.set_visible_range(-self.axis_point.z, junction)?;

        Ok(store.add(BoundarySurface::RevolvedSolid(neck), self.species))
    }
}
