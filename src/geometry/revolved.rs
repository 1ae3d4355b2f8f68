use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};

/// A solid of revolution: an open meridian polyline swept 360 degrees
/// about an axis.
///
/// Profile points are `(r, h)` pairs in the meridian half-plane: radial
/// distance from the axis and axial offset from `axis_point`. The
/// polyline must be ordered clockwise (viewed with `r` to the right and
/// `h` up) so the swept surface's outward normal points away from the
/// simulation interior; the swept wall then occupies the meridian region
/// on the wall side of every segment.
///
/// Only the `visible_range` sub-interval of axial extent acts as a
/// physical boundary; it truncates an otherwise over-extended sweep, for
/// example a conical neck that must stop where it meets the vessel wall.
#[derive(Debug, Clone)]
pub struct RevolvedSolid {
    axis_point: Point3,
    axis_dir: Vector3,
    profile: Vec<Point2>,
    visible_range: (f64, f64),
}

impl RevolvedSolid {
    /// Creates a solid of revolution from an axis and an open profile.
    ///
    /// The axis direction is normalized. The visible range defaults to
    /// the axial extent of the profile itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis direction is zero-length, the
    /// profile has fewer than two points, or any profile point has a
    /// negative radial coordinate.
    pub fn new(axis_point: Point3, axis_dir: Vector3, profile: Vec<Point2>) -> Result<Self> {
        let len = axis_dir.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        if profile.len() < 2 {
            return Err(GeometryError::Degenerate(
                "revolved profile must have at least 2 points".into(),
            )
            .into());
        }
        if profile.iter().any(|p| p.x < -TOLERANCE) {
            return Err(GeometryError::Degenerate(
                "revolved profile has a negative radial coordinate".into(),
            )
            .into());
        }

        let lo = profile.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let hi = profile.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            axis_point,
            axis_dir: axis_dir / len,
            profile,
            visible_range: (lo, hi),
        })
    }

    /// Restricts the axial interval over which the swept surface acts as
    /// a physical boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if `lo >= hi`.
    pub fn set_visible_range(&mut self, lo: f64, hi: f64) -> Result<()> {
        if lo >= hi {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "visible_range low bound",
                value: lo,
                min: f64::NEG_INFINITY,
                max: hi,
            }
            .into());
        }
        self.visible_range = (lo, hi);
        Ok(())
    }

    /// Returns the anchor point on the axis.
    #[must_use]
    pub fn axis_point(&self) -> &Point3 {
        &self.axis_point
    }

    /// Returns the axis direction (unit vector).
    #[must_use]
    pub fn axis_dir(&self) -> &Vector3 {
        &self.axis_dir
    }

    /// Returns the meridian profile polyline.
    #[must_use]
    pub fn profile(&self) -> &[Point2] {
        &self.profile
    }

    /// Returns the visible axial interval `(lo, hi)`.
    #[must_use]
    pub fn visible_range(&self) -> (f64, f64) {
        self.visible_range
    }

    /// Projects a 3D point into meridian coordinates `(r, h)`: distance
    /// from the axis and axial offset from the anchor.
    #[must_use]
    pub fn meridian_of(&self, p: &Point3) -> (f64, f64) {
        let dp = p - self.axis_point;
        let h = dp.dot(&self.axis_dir);
        let radial = dp - self.axis_dir * h;
        (radial.norm(), h)
    }

    /// Whether `p` lies inside the swept wall material.
    ///
    /// The wall occupies the meridian region on the wall side of every
    /// profile segment, restricted to the visible axial interval.
    #[must_use]
    pub fn occludes(&self, p: &Point3) -> bool {
        let (r, h) = self.meridian_of(p);
        let (lo, hi) = self.visible_range;
        if h < lo - TOLERANCE || h > hi + TOLERANCE {
            return false;
        }
        self.profile.windows(2).all(|seg| {
            let d = seg[1] - seg[0];
            // Wall-side normal of a clockwise-ordered segment: (-d.y, d.x).
            (-d.y) * (r - seg[0].x) + d.x * (h - seg[0].y) >= -TOLERANCE
        })
    }

    /// Evaluates the swept surface at `(angle, v)`.
    ///
    /// `angle` is the rotation about the axis in radians; `v` is the
    /// polyline parameter in `[0, len - 1]` with integer values at the
    /// profile points.
    ///
    /// # Errors
    ///
    /// Returns an error if `v` is outside the profile's parameter range.
    pub fn evaluate(&self, angle: f64, v: f64) -> Result<Point3> {
        let max_v = (self.profile.len() - 1) as f64;
        if !(0.0..=max_v).contains(&v) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "v",
                value: v,
                min: 0.0,
                max: max_v,
            }
            .into());
        }
        let seg = (v.floor() as usize).min(self.profile.len() - 2);
        let t = v - seg as f64;
        let a = self.profile[seg];
        let b = self.profile[seg + 1];
        let r = a.x + (b.x - a.x) * t;
        let h = a.y + (b.y - a.y) * t;

        let ref_dir = perpendicular_dir(&self.axis_dir);
        let binormal = self.axis_dir.cross(&ref_dir);
        let radial = ref_dir * angle.cos() + binormal * angle.sin();
        Ok(self.axis_point + radial * r + self.axis_dir * h)
    }
}

/// Finds a direction perpendicular to the given unit vector.
fn perpendicular_dir(axis: &Vector3) -> Vector3 {
    let candidate = if axis.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let perp = axis.cross(&candidate);
    perp / perp.norm()
}
