pub mod domain;
pub mod particle;
pub mod species;
pub mod wall;

pub use domain::Domain;
pub use particle::{Particle, ParticleId, ParticleStore};
pub use species::{Species, SpeciesId, SpeciesStore};
pub use wall::{Wall, WallId, WallStore};
