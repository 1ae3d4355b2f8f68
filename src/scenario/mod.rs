mod clock;
mod controller;
mod hopper;

pub use clock::StepClock;
pub use controller::{ScenarioController, ScenarioState};
pub use hopper::{HopperParams, HopperScenario, HopperSpecies};
