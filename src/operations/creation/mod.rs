mod make_floor;
mod make_neck;
mod make_vessel;

pub use make_floor::MakeFloor;
pub use make_neck::MakeNeck;
pub use make_vessel::MakeVessel;
