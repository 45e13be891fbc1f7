pub mod physics;
pub mod dynamics;
pub mod projectile;
pub mod sim;
pub mod io;
pub mod sweep;
pub mod sight;
pub mod error;
pub mod logging;
pub mod cli;

pub use error::FlightError;

// Flat re-exports of the types most callers need
pub mod types {
    pub use crate::dynamics::state::FlightState;
    pub use crate::error::FlightError;
    pub use crate::physics::PhysicsConstants;
    pub use crate::projectile::{BallisticBody, Profile, ProfileBuilder, ProfileCatalog};
    pub use crate::sim::{
        AngleSearchResult, Recording, SimConfig, SimulationResult, Solution, SolverConfig, Target,
    };
}
