use tracing::debug;

use crate::error::FlightError;
use crate::physics::PhysicsConstants;
use crate::projectile::Profile;
use super::runner::{
    fly, simulate, validate_target_distance, Recording, SimConfig, SimulationResult,
};

// ---------------------------------------------------------------------------
// Target point
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub distance: f64, // m, downrange
    pub height: f64,   // m, relative to the bow
}

impl Target {
    pub fn new(distance: f64, height: f64) -> Self {
        Self { distance, height }
    }

    pub fn validate(&self) -> Result<(), FlightError> {
        validate_target_distance(self.distance)?;
        if !self.height.is_finite() {
            return Err(FlightError::invalid(format!(
                "target height must be finite, got {}",
                self.height
            )));
        }
        Ok(())
    }

    /// Elevation of the line of sight from the bow to the target, degrees.
    pub fn sight_angle_deg(&self) -> f64 {
        self.height.atan2(self.distance).to_degrees()
    }
}

// ---------------------------------------------------------------------------
// Solver config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub iterations: usize,
    pub low: f64,  // rad
    pub high: f64, // rad
    /// Reach tolerance in units of (muzzle speed * dt).
    pub reach_tolerance_factor: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iterations: 25,
            low: (-45.0_f64).to_radians(),
            high: 45.0_f64.to_radians(),
            reach_tolerance_factor: 2.0,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), FlightError> {
        if self.iterations == 0 {
            return Err(FlightError::invalid("bisection needs at least one iteration"));
        }
        let limit = std::f64::consts::FRAC_PI_2;
        if !(self.low.is_finite() && self.high.is_finite())
            || self.low >= self.high
            || self.low <= -limit
            || self.high >= limit
        {
            return Err(FlightError::invalid(format!(
                "angle bracket must satisfy -90° < low < high < 90°, got [{:.3}°, {:.3}°]",
                self.low.to_degrees(),
                self.high.to_degrees()
            )));
        }
        if !self.reach_tolerance_factor.is_finite() || self.reach_tolerance_factor < 0.0 {
            return Err(FlightError::invalid(format!(
                "reach tolerance factor must be non-negative, got {}",
                self.reach_tolerance_factor
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Bisection on launch angle
// ---------------------------------------------------------------------------

/// Last bisection midpoint and where that shot passed the target distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSearchResult {
    pub best_theta: f64, // rad
    pub achieved_x: f64, // m
    pub achieved_y: f64, // m
}

impl AngleSearchResult {
    pub fn best_angle_deg(&self) -> f64 {
        self.best_theta.to_degrees()
    }

    pub fn holdover(&self, target: &Target) -> f64 {
        holdover(self.best_theta, target)
    }
}

/// Vertical offset at the target distance between the straight line along
/// the launch angle and the target itself.
pub fn holdover(theta: f64, target: &Target) -> f64 {
    theta.tan() * target.distance - target.height
}

/// Smallest launch angle in the bracket whose shot passes the target
/// distance at or above the target height.
///
/// Assumes the height at the target distance grows with the launch angle over
/// the whole bracket. This holds below the angle of maximum range and is not
/// checked. The bracket is halved a fixed number of times; afterwards the
/// last midpoint is accepted only if its shot came within
/// `reach_tolerance_factor * v0 * dt` of the target, otherwise the result is
/// [`FlightError::UnreachableTarget`].
pub fn find_launch_angle(
    profile: &Profile,
    target: &Target,
    sim: &SimConfig,
    solver: &SolverConfig,
    physics: &PhysicsConstants,
) -> Result<AngleSearchResult, FlightError> {
    target.validate()?;
    sim.validate()?;
    solver.validate()?;
    physics.validate()?;
    let body = profile.body()?;

    let mut low = solver.low;
    let mut high = solver.high;
    let mut best = AngleSearchResult {
        best_theta: 0.5 * (low + high),
        achieved_x: 0.0,
        achieved_y: 0.0,
    };
    let mut crossed = false;

    for _ in 0..solver.iterations {
        let mid = 0.5 * (low + high);
        // A probe that runs out of steps never reached the target distance.
        let run = fly(mid, &body, target.distance, sim, physics, Recording::Endpoint);
        let (x_hit, y_hit) = (run.last.pos.x, run.last.pos.y);

        if !run.crossed || x_hit < target.distance || y_hit < target.height {
            low = mid;
        } else {
            high = mid;
        }
        best = AngleSearchResult { best_theta: mid, achieved_x: x_hit, achieved_y: y_hit };
        crossed = run.crossed;
    }

    let eps = solver.reach_tolerance_factor * body.muzzle_speed_ms * sim.dt;
    let reached = crossed
        && best.achieved_x >= target.distance - eps
        && best.achieved_y >= target.height - eps;

    debug!(
        profile = profile.name(),
        distance = target.distance,
        height = target.height,
        angle_deg = best.best_angle_deg(),
        achieved_x = best.achieved_x,
        achieved_y = best.achieved_y,
        reached,
        "angle search finished"
    );

    if !reached {
        return Err(FlightError::UnreachableTarget {
            target_distance: target.distance,
            target_height: target.height,
            best_angle_deg: best.best_angle_deg(),
            achieved_x: best.achieved_x,
            achieved_y: best.achieved_y,
        });
    }
    Ok(best)
}

// ---------------------------------------------------------------------------
// Full solve: search + recorded flight
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub profile_name: String,
    pub target: Target,
    pub search: AngleSearchResult,
    /// Recorded flight at the chosen angle.
    pub flight: SimulationResult,
    pub holdover: f64,
}

impl Solution {
    pub fn launch_angle_deg(&self) -> f64 {
        self.search.best_angle_deg()
    }

    /// Launch angle relative to the line of sight, degrees.
    pub fn aim_angle_deg(&self) -> f64 {
        self.launch_angle_deg() - self.target.sight_angle_deg()
    }
}

pub fn solve(
    profile: &Profile,
    target: &Target,
    sim: &SimConfig,
    solver: &SolverConfig,
    physics: &PhysicsConstants,
) -> Result<Solution, FlightError> {
    let search = find_launch_angle(profile, target, sim, solver, physics)?;
    let flight = simulate(
        search.best_theta,
        profile,
        target.distance,
        sim,
        physics,
        Recording::Full,
    )?;
    Ok(Solution {
        profile_name: profile.name().to_string(),
        target: *target,
        holdover: search.holdover(target),
        search,
        flight,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
