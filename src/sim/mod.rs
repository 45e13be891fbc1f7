pub mod integrator;
pub mod runner;
pub mod solver;

pub use integrator::{euler_increment, euler_step, StepIncrement};
pub use runner::{simulate, Recording, SimConfig, SimulationResult};
pub use solver::{
    find_launch_angle, holdover, solve, AngleSearchResult, Solution, SolverConfig, Target,
};
