//! Command-line pieces shared by the binaries.

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use crate::physics::PhysicsConstants;
use crate::projectile::{presets, CatalogError, ProfileCatalog};
use crate::sim::{SimConfig, SolverConfig};

pub const DEFAULT_CATALOG: &str = "arrows.json";

/// Numerical and environment overrides.
#[derive(Debug, Clone, Args)]
pub struct EngineArgs {
    /// Integration time step [s]
    #[arg(long, default_value_t = 0.001)]
    pub dt: f64,

    /// Flight-time ceiling per simulated shot [s]
    #[arg(long, default_value_t = 60.0)]
    pub max_time: f64,

    /// Bisection iterations
    #[arg(long, default_value_t = 25)]
    pub iterations: usize,

    /// Air density [kg/m^3]
    #[arg(long, default_value_t = 1.2)]
    pub air_density: f64,

    /// Gravitational acceleration [m/s^2]
    #[arg(long, default_value_t = 9.81)]
    pub gravity: f64,
}

impl EngineArgs {
    pub fn sim_config(&self) -> SimConfig {
        SimConfig { dt: self.dt, max_time: self.max_time }
    }

    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig { iterations: self.iterations, ..SolverConfig::default() }
    }

    pub fn physics(&self) -> PhysicsConstants {
        PhysicsConstants::new(self.air_density, self.gravity)
    }
}

/// Load the profile catalog.
///
/// An explicit path must exist. Without one, `arrows.json` in the working
/// directory is used if present, else the built-in presets.
pub fn load_catalog(path: Option<&Path>) -> Result<ProfileCatalog, CatalogError> {
    match path {
        Some(p) => ProfileCatalog::from_path(p),
        None => {
            let default = PathBuf::from(DEFAULT_CATALOG);
            if default.exists() {
                ProfileCatalog::from_path(default)
            } else {
                info!("no {DEFAULT_CATALOG} found, using built-in profiles");
                Ok(presets::catalog())
            }
        }
    }
}
