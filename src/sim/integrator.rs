use nalgebra::Vector2;

use crate::dynamics;
use crate::dynamics::state::FlightState;
use crate::physics::PhysicsConstants;
use crate::projectile::BallisticBody;

// ---------------------------------------------------------------------------
// Fixed-step semi-implicit Euler
// ---------------------------------------------------------------------------

/// Result of one integration step: the new velocity and the position change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepIncrement {
    pub vel: Vector2<f64>,
    pub dpos: Vector2<f64>,
}

/// Advance a velocity by `dt` and return the displacement it produces.
///
/// Velocity is updated first and the *updated* velocity moves the position.
/// Results depend on this order.
pub fn euler_increment(
    vel: &Vector2<f64>,
    dt: f64,
    body: &BallisticBody,
    physics: &PhysicsConstants,
) -> StepIncrement {
    let accel = dynamics::acceleration(vel, body, physics);
    let vel_next = Vector2::new(vel.x + accel.x * dt, vel.y + accel.y * dt);
    StepIncrement {
        vel: vel_next,
        dpos: Vector2::new(vel_next.x * dt, vel_next.y * dt),
    }
}

/// Single step: advance the full state by dt.
pub fn euler_step(
    state: &FlightState,
    body: &BallisticBody,
    physics: &PhysicsConstants,
    dt: f64,
) -> FlightState {
    let inc = euler_increment(&state.vel, dt, body, physics);
    FlightState {
        time: state.time + dt,
        pos: state.pos + inc.dpos,
        vel: inc.vel,
    }
}
