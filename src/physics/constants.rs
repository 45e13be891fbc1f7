use crate::error::FlightError;

// ---------------------------------------------------------------------------
// Unit conversions (applied at the profile boundary only)
// ---------------------------------------------------------------------------

pub const GRAINS_TO_KG: f64 = 6.479_891e-5;
pub const FPS_TO_MS: f64 = 0.3048;

pub const DEFAULT_AIR_DENSITY: f64 = 1.2; // kg/m^3
pub const DEFAULT_GRAVITY: f64 = 9.81; // m/s^2

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Air density and gravitational acceleration for one solver call.
///
/// Values are replaced wholesale, never patched in place: the `with_*`
/// helpers return a new set of constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConstants {
    pub air_density: f64, // kg/m^3
    pub gravity: f64,     // m/s^2, acts along -y
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            air_density: DEFAULT_AIR_DENSITY,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl PhysicsConstants {
    pub fn new(air_density: f64, gravity: f64) -> Self {
        Self { air_density, gravity }
    }

    pub fn with_air_density(self, air_density: f64) -> Self {
        Self { air_density, ..self }
    }

    pub fn with_gravity(self, gravity: f64) -> Self {
        Self { gravity, ..self }
    }

    pub fn validate(&self) -> Result<(), FlightError> {
        if !self.air_density.is_finite() || self.air_density < 0.0 {
            return Err(FlightError::invalid(format!(
                "air density must be finite and non-negative, got {}",
                self.air_density
            )));
        }
        if !self.gravity.is_finite() {
            return Err(FlightError::invalid(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        Ok(())
    }
}
