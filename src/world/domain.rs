use crate::error::{Result, ScenarioError};
use crate::math::{Point3, TOLERANCE};

/// The axis-aligned simulation world.
///
/// Domain boundaries are not walls; they only size the scenario. The
/// footprint is square by invariant: the x and y widths must match, the
/// height is independent.
#[derive(Debug, Clone, Copy)]
pub struct Domain {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    z_min: f64,
    z_max: f64,
}

impl Domain {
    /// Creates a domain from explicit extents.
    ///
    /// # Errors
    ///
    /// Returns an error if any extent is non-positive or the footprint
    /// is not square.
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        z_min: f64,
        z_max: f64,
    ) -> Result<Self> {
        let width_x = x_max - x_min;
        let width_y = y_max - y_min;
        let height = z_max - z_min;
        if width_x <= 0.0 || width_y <= 0.0 || height <= 0.0 {
            return Err(
                ScenarioError::InvalidParameter("domain extents must be positive".into()).into(),
            );
        }
        if (width_x - width_y).abs() > TOLERANCE {
            return Err(ScenarioError::InvalidParameter(format!(
                "domain footprint must be square, got {width_x} x {width_y}"
            ))
            .into());
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z_min,
            z_max,
        })
    }

    /// Creates a `[0, width] x [0, width] x [0, height]` domain.
    ///
    /// # Errors
    ///
    /// Returns an error if `width` or `height` is non-positive.
    pub fn with_footprint(width: f64, height: f64) -> Result<Self> {
        Self::new(0.0, width, 0.0, width, 0.0, height)
    }

    /// Returns the center of the domain.
    #[must_use]
    pub fn mid(&self) -> Point3 {
        Point3::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
            (self.z_min + self.z_max) / 2.0,
        )
    }

    /// Half the footprint width, i.e. the outer radius of an inscribed
    /// vessel.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        (self.x_max - self.x_min) / 2.0
    }

    /// Returns the lower z bound.
    #[must_use]
    pub fn z_min(&self) -> f64 {
        self.z_min
    }

    /// Returns the upper z bound.
    #[must_use]
    pub fn z_max(&self) -> f64 {
        self.z_max
    }

    /// Whether `p` lies within the domain box.
    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        p.x >= self.x_min
            && p.x <= self.x_max
            && p.y >= self.y_min
            && p.y <= self.y_max
            && p.z >= self.z_min
            && p.z <= self.z_max
    }
}
