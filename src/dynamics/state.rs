use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Planar flight state
// ---------------------------------------------------------------------------

/// Arrow state at a single point in time.
/// Frame: x downrange, y up, origin at the bow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    pub time: f64,          // s
    pub pos: Vector2<f64>,  // m   [downrange, up]
    pub vel: Vector2<f64>,  // m/s
}

impl FlightState {
    /// State at release: origin, t = 0, muzzle speed along the launch angle.
    pub fn launch(theta: f64, muzzle_speed: f64) -> Self {
        Self {
            time: 0.0,
            pos: Vector2::zeros(),
            vel: Vector2::new(muzzle_speed * theta.cos(), muzzle_speed * theta.sin()),
        }
    }

    pub fn x(&self) -> f64 {
        self.pos.x
    }

    pub fn y(&self) -> f64 {
        self.pos.y
    }

    pub fn speed(&self) -> f64 {
        (self.vel.x * self.vel.x + self.vel.y * self.vel.y).sqrt()
    }

    /// Flight-path angle below/above horizontal, degrees. Negative = descending.
    pub fn path_angle_deg(&self) -> f64 {
        self.vel.y.atan2(self.vel.x).to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_starts_at_origin() {
        let s = FlightState::launch(0.1, 70.0);
        assert_eq!(s.time, 0.0);
        assert_eq!(s.pos, Vector2::zeros());
        assert!((s.speed() - 70.0).abs() < 1e-12);
        assert!((s.path_angle_deg() - 0.1_f64.to_degrees()).abs() < 1e-9);
    }

    #[test]
    fn descending_path_angle_is_negative() {
        let s = FlightState {
            time: 1.0,
            pos: Vector2::new(70.0, 0.0),
            vel: Vector2::new(68.0, -5.0),
        };
        assert!(s.path_angle_deg() < 0.0);
    }
}
