use thiserror::Error;

/// Failures of the flight engine. Every variant is a per-call outcome; none of
/// them terminate the process.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlightError {
    #[error("profile '{name}' not found (available: {})", available.join(", "))]
    ProfileNotFound { name: String, available: Vec<String> },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(
        "trajectory did not pass x = {target_distance:.2} m within {steps} steps \
         (stopped at x = {reached_x:.2} m)"
    )]
    NonConvergence {
        steps: usize,
        reached_x: f64,
        target_distance: f64,
    },

    #[error(
        "target ({target_distance:.2} m, {target_height:.2} m) is unreachable: \
         best angle {best_angle_deg:.3}° reaches ({achieved_x:.2} m, {achieved_y:.2} m)"
    )]
    UnreachableTarget {
        target_distance: f64,
        target_height: f64,
        best_angle_deg: f64,
        achieved_x: f64,
        achieved_y: f64,
    },
}

impl FlightError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        FlightError::InvalidInput(msg.into())
    }
}
