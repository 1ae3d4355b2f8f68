use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// An infinite planar half-space.
///
/// Defined by a unit outward normal and a point on the dividing plane.
/// The interior (the region particles may occupy) is the side the
/// normal points away from: `normal . (x - point) <= 0`. The exterior
/// is solid wall.
#[derive(Debug, Clone)]
pub struct HalfSpace {
    normal: Vector3,
    point: Point3,
}

impl HalfSpace {
    /// Creates a half-space from an outward normal and a point on its plane.
    ///
    /// The normal is normalized on construction.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is zero-length.
    pub fn new(normal: Vector3, point: Point3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            normal: normal / len,
            point,
        })
    }

    /// Returns the unit outward normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the defining point on the plane.
    #[must_use]
    pub fn point(&self) -> &Point3 {
        &self.point
    }

    /// Signed distance from `p` to the plane: negative in the interior,
    /// positive in the wall.
    #[must_use]
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&(p - self.point))
    }

    /// Whether `p` lies in the interior (points on the plane count).
    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        self.signed_distance(p) <= TOLERANCE
    }

    /// Replaces the normal and defining point in place.
    ///
    /// Walls keep a stable identity in the store, so relocating one (the
    /// floor drop) rewrites its half-space rather than re-adding it.
    ///
    /// # Errors
    ///
    /// Returns an error if the new normal is zero-length.
    pub fn set(&mut self, normal: Vector3, point: Point3) -> Result<()> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        self.normal = normal / len;
        self.point = point;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn floor_at(z: f64) -> HalfSpace {
        HalfSpace::new(Vector3::new(0.0, 0.0, -1.0), Point3::new(0.0, 0.0, z)).unwrap()
    }

    #[test]
    fn normal_is_normalized() {
        let hs = HalfSpace::new(Vector3::new(0.0, 0.0, -5.0), Point3::origin()).unwrap();
        assert!((hs.normal().norm() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn zero_normal_fails() {
        let r = HalfSpace::new(Vector3::zeros(), Point3::origin());
        assert!(r.is_err());
    }

    #[test]
    fn interior_is_above_downward_floor() {
        let hs = floor_at(0.4);
        assert!(hs.contains(&Point3::new(0.1, 0.1, 0.5)));
        assert!(!hs.contains(&Point3::new(0.1, 0.1, 0.3)));
    }

    #[test]
    fn signed_distance_sign_convention() {
        let hs = floor_at(0.4);
        // Below the plane is the wall side for a downward normal.
        assert!(hs.signed_distance(&Point3::new(0.0, 0.0, 0.3)) > 0.0);
        assert!(hs.signed_distance(&Point3::new(0.0, 0.0, 0.5)) < 0.0);
        assert!(hs.signed_distance(&Point3::new(0.0, 0.0, 0.4)).abs() < TOLERANCE);
    }

    #[test]
    fn set_relocates_plane() {
        let mut hs = floor_at(0.4);
        hs.set(Vector3::new(0.0, 0.0, -1.0), Point3::new(0.0, 0.0, 0.0))
            .unwrap();
        assert!(hs.contains(&Point3::new(0.0, 0.0, 0.1)));
        assert!((hs.point().z - 0.0).abs() < TOLERANCE);
    }

    #[test]
    fn set_rejects_zero_normal() {
        let mut hs = floor_at(0.4);
        assert!(hs.set(Vector3::zeros(), Point3::origin()).is_err());
    }
}
