use std::f64::consts::PI;

use crate::error::FlightError;
use crate::physics::constants::{FPS_TO_MS, GRAINS_TO_KG};

pub const DEFAULT_MASS_GRAINS: f64 = 235.0;
pub const DEFAULT_DIAMETER_M: f64 = 0.00542;
pub const DEFAULT_CW: f64 = 0.25;
pub const DEFAULT_V0_FPS: f64 = 230.0;

// ---------------------------------------------------------------------------
// Profile: one arrow configuration, in the units archers use
// ---------------------------------------------------------------------------

/// Named arrow configuration. Fields are fixed at construction; build one
/// with [`ProfileBuilder`] or load it from a [`ProfileCatalog`](super::ProfileCatalog).
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    name: String,
    mass_grains: f64,
    diameter_m: f64,
    cw: f64,
    v0_fps: f64,
}

impl Profile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass_grains(&self) -> f64 {
        self.mass_grains
    }

    pub fn diameter_m(&self) -> f64 {
        self.diameter_m
    }

    /// Drag coefficient (dimensionless).
    pub fn cw(&self) -> f64 {
        self.cw
    }

    pub fn v0_fps(&self) -> f64 {
        self.v0_fps
    }

    pub fn mass_kg(&self) -> f64 {
        self.mass_grains * GRAINS_TO_KG
    }

    /// Cross-sectional area, m^2.
    pub fn area(&self) -> f64 {
        PI * (self.diameter_m / 2.0).powi(2)
    }

    pub fn muzzle_speed_ms(&self) -> f64 {
        self.v0_fps * FPS_TO_MS
    }

    /// SI parameters for the integrator, validated.
    pub fn body(&self) -> Result<BallisticBody, FlightError> {
        let body = BallisticBody {
            mass_kg: self.mass_kg(),
            area_m2: self.area(),
            cw: self.cw,
            muzzle_speed_ms: self.muzzle_speed_ms(),
        };
        body.validate(&self.name)?;
        Ok(body)
    }
}

// ---------------------------------------------------------------------------
// BallisticBody: SI view consumed by the integrator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallisticBody {
    pub mass_kg: f64,
    pub area_m2: f64,
    pub cw: f64,
    pub muzzle_speed_ms: f64,
}

impl BallisticBody {
    fn validate(&self, name: &str) -> Result<(), FlightError> {
        let positive = [
            ("mass", self.mass_kg),
            ("cross-sectional area", self.area_m2),
            ("muzzle speed", self.muzzle_speed_ms),
        ];
        for (label, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(FlightError::invalid(format!(
                    "profile '{name}': {label} must be positive, got {value}"
                )));
            }
        }
        if !self.cw.is_finite() || self.cw < 0.0 {
            return Err(FlightError::invalid(format!(
                "profile '{name}': drag coefficient must be non-negative, got {}",
                self.cw
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Profile builder
// ---------------------------------------------------------------------------

pub struct ProfileBuilder {
    name: String,
    mass_grains: f64,
    diameter_m: f64,
    cw: f64,
    v0_fps: f64,
}

impl ProfileBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mass_grains: DEFAULT_MASS_GRAINS,
            diameter_m: DEFAULT_DIAMETER_M,
            cw: DEFAULT_CW,
            v0_fps: DEFAULT_V0_FPS,
        }
    }

    pub fn mass_grains(mut self, v: f64) -> Self { self.mass_grains = v; self }
    pub fn diameter_m(mut self, v: f64) -> Self { self.diameter_m = v; self }
    pub fn cw(mut self, v: f64) -> Self { self.cw = v; self }
    pub fn v0_fps(mut self, v: f64) -> Self { self.v0_fps = v; self }

    pub fn build(self) -> Profile {
        Profile {
            name: self.name,
            mass_grains: self.mass_grains,
            diameter_m: self.diameter_m,
            cw: self.cw,
            v0_fps: self.v0_fps,
        }
    }
}
