pub mod aerodynamics;
pub mod constants;

pub use constants::{PhysicsConstants, FPS_TO_MS, GRAINS_TO_KG};
