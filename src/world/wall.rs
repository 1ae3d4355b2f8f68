use slotmap::SlotMap;

use crate::error::ScenarioError;
use crate::geometry::BoundarySurface;

use super::SpeciesId;

slotmap::new_key_type! {
    /// Unique identifier for a wall in the store.
    pub struct WallId;
}

/// A container wall: a boundary surface with its material species.
///
/// A wall cannot exist without a species: insertion takes both, so no
/// unassigned surface ever reaches the engine.
#[derive(Debug, Clone)]
pub struct Wall {
    /// The bounding geometry.
    pub surface: BoundarySurface,
    /// Material species handle.
    pub species: SpeciesId,
}

/// Arena that owns all container walls: the wall sink of the external
/// engine contract. Accepts finished surfaces and returns stable handles
/// usable for later mutation.
#[derive(Debug, Default)]
pub struct WallStore {
    walls: SlotMap<WallId, Wall>,
}

impl WallStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a wall and returns its handle.
    pub fn add(&mut self, surface: BoundarySurface, species: SpeciesId) -> WallId {
        self.walls.insert(Wall { surface, species })
    }

    /// Returns a reference to the wall, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not in the store.
    pub fn wall(&self, id: WallId) -> Result<&Wall, ScenarioError> {
        self.walls
            .get(id)
            .ok_or_else(|| ScenarioError::EntityNotFound("wall".into()))
    }

    /// Returns a mutable reference to the wall, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not in the store.
    pub fn wall_mut(&mut self, id: WallId) -> Result<&mut Wall, ScenarioError> {
        self.walls
            .get_mut(id)
            .ok_or_else(|| ScenarioError::EntityNotFound("wall".into()))
    }

    /// Iterates over all walls with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (WallId, &Wall)> {
        self.walls.iter()
    }

    /// Number of walls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}
