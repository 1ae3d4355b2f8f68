use crate::math::Point3;

use super::HalfSpace;

/// A convex region defined as the intersection of half-space interiors.
///
/// Flat faces approximate bounded convex shapes: a regular polygon of
/// vertical half-spaces approximates a cylinder wall, and an extra
/// horizontal face caps it. Faces keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct IntersectionSolid {
    faces: Vec<HalfSpace>,
}

impl IntersectionSolid {
    /// Creates an empty intersection solid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty intersection solid with room for `capacity` faces.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            faces: Vec::with_capacity(capacity),
        }
    }

    /// Appends a bounding face.
    pub fn add(&mut self, face: HalfSpace) {
        self.faces.push(face);
    }

    /// Returns the bounding faces in insertion order.
    #[must_use]
    pub fn faces(&self) -> &[HalfSpace] {
        &self.faces
    }

    /// Number of bounding faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether the solid has no faces yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Whether `p` lies in the interior of every constituent half-space.
    ///
    /// An empty solid contains everything (the intersection over no
    /// constraints is all of space).
    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        self.faces.iter().all(|face| face.contains(p))
    }
}
