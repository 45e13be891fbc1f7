pub mod state;

use nalgebra::Vector2;

use crate::physics::aerodynamics;
use crate::physics::PhysicsConstants;
use crate::projectile::BallisticBody;

// ---------------------------------------------------------------------------
// Equations of motion (2D point mass)
// ---------------------------------------------------------------------------

/// Acceleration of the arrow for a given velocity.
///
/// Forces modeled:
///   1. Gravity - uniform, along -y
///   2. Drag    - quadratic, opposing velocity
pub fn acceleration(
    vel: &Vector2<f64>,
    body: &BallisticBody,
    physics: &PhysicsConstants,
) -> Vector2<f64> {
    let drag = aerodynamics::drag_accel(vel, body, physics);
    Vector2::new(drag.x, -physics.gravity + drag.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projectile::presets;

    #[test]
    fn pure_gravity_at_rest() {
        let body = presets::default_profile().body().unwrap();
        let a = acceleration(&Vector2::zeros(), &body, &PhysicsConstants::default());
        assert_eq!(a.x, 0.0);
        assert_eq!(a.y, -9.81);
    }

    #[test]
    fn rising_arrow_decelerates_faster_than_g() {
        let body = presets::default_profile().body().unwrap();
        let a = acceleration(&Vector2::new(50.0, 40.0), &body, &PhysicsConstants::default());
        assert!(a.y < -9.81);
        assert!(a.x < 0.0);
    }

    #[test]
    fn falling_arrow_decelerates_slower_than_g() {
        let body = presets::default_profile().body().unwrap();
        let a = acceleration(&Vector2::new(20.0, -40.0), &body, &PhysicsConstants::default());
        assert!(a.y > -9.81);
    }
}
