use crate::dynamics::state::FlightState;
use crate::error::FlightError;
use crate::physics::PhysicsConstants;
use crate::projectile::{BallisticBody, Profile};
use super::integrator::euler_step;

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub dt: f64,       // integration timestep, s
    pub max_time: f64, // flight-time ceiling, s; bounds the step count
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.001,       // 1 kHz
            max_time: 60.0,  // ~60x a 70 m shot
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), FlightError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(FlightError::invalid(format!(
                "time step must be positive, got {}",
                self.dt
            )));
        }
        if !self.max_time.is_finite() || self.max_time <= 0.0 {
            return Err(FlightError::invalid(format!(
                "maximum flight time must be positive, got {}",
                self.max_time
            )));
        }
        Ok(())
    }

    /// Step budget for one run.
    pub fn max_steps(&self) -> usize {
        (self.max_time / self.dt).ceil() as usize
    }
}

/// Whether a run keeps every intermediate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recording {
    #[default]
    Endpoint,
    Full,
}

// ---------------------------------------------------------------------------
// Simulation result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// First state past the target distance.
    pub terminal: FlightState,
    pub steps: usize,
    /// One state per step in time order, present only for `Recording::Full`.
    pub trajectory: Option<Vec<FlightState>>,
}

impl SimulationResult {
    pub fn x(&self) -> f64 {
        self.terminal.pos.x
    }

    pub fn y(&self) -> f64 {
        self.terminal.pos.y
    }

    pub fn time(&self) -> f64 {
        self.terminal.time
    }

    pub fn speed(&self) -> f64 {
        self.terminal.speed()
    }

    pub fn impact_angle_deg(&self) -> f64 {
        self.terminal.path_angle_deg()
    }
}

/// Outcome of a bounded run before it is turned into a result or an error.
#[derive(Debug, Clone)]
pub(crate) struct Run {
    pub last: FlightState,
    pub steps: usize,
    pub crossed: bool,
    pub trajectory: Option<Vec<FlightState>>,
}

// ---------------------------------------------------------------------------
// Flight loop
// ---------------------------------------------------------------------------

/// Step from release until x first exceeds `target_distance` or the step
/// budget runs out. Inputs are assumed validated.
pub(crate) fn fly(
    theta: f64,
    body: &BallisticBody,
    target_distance: f64,
    config: &SimConfig,
    physics: &PhysicsConstants,
    recording: Recording,
) -> Run {
    let max_steps = config.max_steps();
    let mut state = FlightState::launch(theta, body.muzzle_speed_ms);
    let mut trajectory = match recording {
        Recording::Full => Some(Vec::with_capacity(max_steps.min(100_000))),
        Recording::Endpoint => None,
    };

    let mut steps = 0;
    while state.pos.x <= target_distance {
        if steps >= max_steps {
            return Run { last: state, steps, crossed: false, trajectory };
        }
        state = euler_step(&state, body, physics, config.dt);
        steps += 1;
        if let Some(traj) = trajectory.as_mut() {
            traj.push(state);
        }
    }

    Run { last: state, steps, crossed: true, trajectory }
}

pub(crate) fn validate_target_distance(target_distance: f64) -> Result<(), FlightError> {
    if !target_distance.is_finite() || target_distance <= 0.0 {
        return Err(FlightError::invalid(format!(
            "target distance must be positive, got {target_distance}"
        )));
    }
    Ok(())
}

/// Fly `profile` at launch angle `theta` (rad) until it passes
/// `target_distance`.
///
/// The height at that moment is unconstrained: there is no ground. Runs that
/// exhaust the step budget of `config` fail with
/// [`FlightError::NonConvergence`].
pub fn simulate(
    theta: f64,
    profile: &Profile,
    target_distance: f64,
    config: &SimConfig,
    physics: &PhysicsConstants,
    recording: Recording,
) -> Result<SimulationResult, FlightError> {
    if !theta.is_finite() {
        return Err(FlightError::invalid(format!("launch angle must be finite, got {theta}")));
    }
    validate_target_distance(target_distance)?;
    config.validate()?;
    physics.validate()?;
    let body = profile.body()?;

    let run = fly(theta, &body, target_distance, config, physics, recording);
    if !run.crossed {
        return Err(FlightError::NonConvergence {
            steps: run.steps,
            reached_x: run.last.pos.x,
            target_distance,
        });
    }

    Ok(SimulationResult {
        terminal: run.last,
        steps: run.steps,
        trajectory: run.trajectory,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projectile::{presets, ProfileBuilder};

    fn fly_default(
        theta: f64,
        p: &Profile,
        distance: f64,
        recording: Recording,
    ) -> SimulationResult {
        let (sim, physics) = (SimConfig::default(), PhysicsConstants::default());
        simulate(theta, p, distance, &sim, &physics, recording).unwrap()
    }

    #[test]
    fn level_shot_passes_target_and_drops() {
        let p = presets::default_profile();
        let r = fly_default(0.0, &p, 70.0, Recording::Endpoint);
        assert!(r.x() > 70.0);
        assert!(r.x() < 70.0 + p.muzzle_speed_ms() * 0.001 * 1.01);
        assert!(r.y() < 0.0, "level shot must fall below the line of release");
        assert!(r.speed() < p.muzzle_speed_ms());
        assert!(r.impact_angle_deg() < 0.0);
        assert!(r.trajectory.is_none());
    }

    #[test]
    fn recording_keeps_every_step_in_order() {
        let p = presets::default_profile();
        let r = fly_default(0.05, &p, 30.0, Recording::Full);
        let traj = r.trajectory.as_ref().unwrap();
        assert_eq!(traj.len(), r.steps);
        assert_eq!(traj.last(), Some(&r.terminal));
        assert!(traj.windows(2).all(|w| w[1].time > w[0].time));
        assert!(traj[..traj.len() - 1].iter().all(|s| s.pos.x <= 30.0));
    }

    #[test]
    fn recording_does_not_change_endpoint() {
        let p = presets::default_profile();
        let cfg = SimConfig::default();
        let phys = PhysicsConstants::default();
        let a = simulate(0.07, &p, 50.0, &cfg, &phys, Recording::Endpoint).unwrap();
        let b = simulate(0.07, &p, 50.0, &cfg, &phys, Recording::Full).unwrap();
        assert_eq!(a.terminal, b.terminal);
    }

    #[test]
    fn vertical_shot_hits_step_budget() {
        let p = presets::default_profile();
        let cfg = SimConfig { dt: 0.001, max_time: 5.0 };
        let err = simulate(
            std::f64::consts::FRAC_PI_2,
            &p,
            70.0,
            &cfg,
            &PhysicsConstants::default(),
            Recording::Endpoint,
        )
        .unwrap_err();
        match err {
            FlightError::NonConvergence { steps, reached_x, .. } => {
                assert_eq!(steps, cfg.max_steps());
                assert!(reached_x < 70.0);
            }
            other => panic!("expected NonConvergence, got {other:?}"),
        }
    }

    #[test]
    fn short_budget_fails_long_shot() {
        let p = presets::default_profile();
        let cfg = SimConfig { dt: 0.001, max_time: 0.5 };
        let err = simulate(0.0, &p, 70.0, &cfg, &PhysicsConstants::default(), Recording::Endpoint);
        assert!(matches!(err, Err(FlightError::NonConvergence { .. })));
    }

    #[test]
    fn rejects_bad_inputs() {
        let p = presets::default_profile();
        let phys = PhysicsConstants::default();
        let ok = SimConfig::default();
        let bad_dt = SimConfig { dt: 0.0, ..ok };
        assert!(matches!(
            simulate(0.0, &p, 70.0, &bad_dt, &phys, Recording::Endpoint),
            Err(FlightError::InvalidInput(_))
        ));
        assert!(matches!(
            simulate(0.0, &p, 0.0, &ok, &phys, Recording::Endpoint),
            Err(FlightError::InvalidInput(_))
        ));
        assert!(matches!(
            simulate(0.0, &p, -5.0, &ok, &phys, Recording::Endpoint),
            Err(FlightError::InvalidInput(_))
        ));
        let limp = ProfileBuilder::new("limp").v0_fps(0.0).build();
        assert!(matches!(
            simulate(0.0, &limp, 70.0, &ok, &phys, Recording::Endpoint),
            Err(FlightError::InvalidInput(_))
        ));
    }

    #[test]
    fn max_steps_rounds_up() {
        let cfg = SimConfig { dt: 0.003, max_time: 1.0 };
        assert_eq!(cfg.max_steps(), 334);
        assert_eq!(SimConfig::default().max_steps(), 60_000);
    }

    #[test]
    fn zero_drag_matches_closed_form_time_of_flight() {
        // Horizontal distance under no drag is v0*cos(theta)*t exactly.
        let p = ProfileBuilder::new("vacuum").cw(0.0).build();
        let theta = 0.2_f64;
        let r = fly_default(theta, &p, 60.0, Recording::Endpoint);
        let vx = p.muzzle_speed_ms() * theta.cos();
        assert!((r.x() - vx * r.time()).abs() < 1e-9);
    }
}
