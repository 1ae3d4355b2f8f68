mod half_space;
mod intersection;
mod revolved;

pub use half_space::HalfSpace;
pub use intersection::IntersectionSolid;
pub use revolved::RevolvedSolid;

use crate::math::Point3;

/// A boundary surface of the simulation container.
///
/// Tagged variants dispatched by pattern match: a single planar
/// half-space, an intersection of half-spaces (polygonal prism, caps),
/// or a solid of revolution (the conical neck).
#[derive(Debug, Clone)]
pub enum BoundarySurface {
    PlanarHalfSpace(HalfSpace),
    IntersectionSolid(IntersectionSolid),
    RevolvedSolid(RevolvedSolid),
}

impl BoundarySurface {
    /// Whether `p` lies in the region particles may occupy.
    ///
    /// For a revolved solid this is the complement of the swept wall
    /// material; for the planar variants it is the half-space
    /// (intersection) interior.
    #[must_use]
    pub fn admits(&self, p: &Point3) -> bool {
        match self {
            Self::PlanarHalfSpace(half_space) => half_space.contains(p),
            Self::IntersectionSolid(solid) => solid.contains(p),
            Self::RevolvedSolid(solid) => !solid.occludes(p),
        }
    }
}
