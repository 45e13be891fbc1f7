use nalgebra::Vector2;

use crate::physics::constants::PhysicsConstants;
use crate::projectile::BallisticBody;

/// Quadratic drag magnitude: 0.5 * rho * cw * A * v^2 (N).
pub fn drag_force(speed: f64, air_density: f64, cw: f64, area: f64) -> f64 {
    0.5 * air_density * cw * area * (speed * speed)
}

/// Drag deceleration opposing the velocity vector.
///
/// Returns zero at rest; the direction term divides by the speed and is
/// never evaluated there.
pub fn drag_accel(
    vel: &Vector2<f64>,
    body: &BallisticBody,
    physics: &PhysicsConstants,
) -> Vector2<f64> {
    let speed = (vel.x * vel.x + vel.y * vel.y).sqrt();
    if speed == 0.0 {
        return Vector2::zeros();
    }
    let fd = drag_force(speed, physics.air_density, body.cw, body.area_m2);
    let denom = body.mass_kg * speed;
    Vector2::new(-fd * vel.x / denom, -fd * vel.y / denom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projectile::presets;

    #[test]
    fn drag_opposes_velocity() {
        let body = presets::default_profile().body().unwrap();
        let a = drag_accel(&Vector2::new(60.0, 10.0), &body, &PhysicsConstants::default());
        assert!(a.x < 0.0);
        assert!(a.y < 0.0);
    }

    #[test]
    fn no_drag_at_rest() {
        let body = presets::default_profile().body().unwrap();
        let a = drag_accel(&Vector2::zeros(), &body, &PhysicsConstants::default());
        assert_eq!(a, Vector2::zeros());
    }

    #[test]
    fn drag_scales_with_speed_squared() {
        let f1 = drag_force(30.0, 1.2, 0.25, 2.3e-5);
        let f2 = drag_force(60.0, 1.2, 0.25, 2.3e-5);
        assert!((f2 / f1 - 4.0).abs() < 1e-12);
    }

    #[test]
    fn vacuum_has_no_drag() {
        let body = presets::default_profile().body().unwrap();
        let vacuum = PhysicsConstants::default().with_air_density(0.0);
        let a = drag_accel(&Vector2::new(70.0, 0.0), &body, &vacuum);
        assert_eq!(a.norm(), 0.0);
    }
}
