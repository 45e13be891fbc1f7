use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::sim::Solution;

/// Summary statistics for one solved shot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightSummary {
    pub profile: String,
    pub target_distance_m: f64,
    pub target_height_m: f64,
    pub launch_angle_deg: f64,
    pub aim_angle_deg: f64,
    pub holdover_m: f64,
    pub apex_height_m: f64,
    pub apex_distance_m: f64,
    pub flight_time_s: f64,
    pub final_speed_ms: f64,
    pub impact_angle_deg: f64,
    pub steps: usize,
}

impl FlightSummary {
    pub fn from_solution(solution: &Solution) -> Self {
        let terminal = solution.flight.terminal;
        let (apex_distance_m, apex_height_m) = solution
            .flight
            .trajectory
            .as_deref()
            .unwrap_or(std::slice::from_ref(&terminal))
            .iter()
            .map(|s| (s.pos.x, s.pos.y))
            .fold((0.0, 0.0), |best, p| if p.1 > best.1 { p } else { best });

        FlightSummary {
            profile: solution.profile_name.clone(),
            target_distance_m: solution.target.distance,
            target_height_m: solution.target.height,
            launch_angle_deg: solution.launch_angle_deg(),
            aim_angle_deg: solution.aim_angle_deg(),
            holdover_m: solution.holdover,
            apex_height_m,
            apex_distance_m,
            flight_time_s: solution.flight.time(),
            final_speed_ms: solution.flight.speed(),
            impact_angle_deg: solution.flight.impact_angle_deg(),
            steps: solution.flight.steps,
        }
    }
}

/// Write summaries as a pretty-printed JSON array.
pub fn write_summaries<W: Write>(writer: W, summaries: &[FlightSummary]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, summaries)
}

pub fn write_summaries_file<P: AsRef<Path>>(
    path: P,
    summaries: &[FlightSummary],
) -> std::io::Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_summaries(&mut file, summaries).map_err(std::io::Error::from)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PhysicsConstants;
    use crate::projectile::presets;
    use crate::sim::{solve, SimConfig, SolverConfig, Target};

    fn solved(distance: f64, height: f64) -> Solution {
        solve(
            &presets::default_profile(),
            &Target::new(distance, height),
            &SimConfig::default(),
            &SolverConfig::default(),
            &PhysicsConstants::default(),
        )
        .unwrap()
    }

    #[test]
    fn apex_lies_inside_the_flight() {
        let s = solved(70.0, 0.0);
        let summary = FlightSummary::from_solution(&s);
        assert!(summary.apex_height_m > 0.0);
        assert!(summary.apex_distance_m > 20.0 && summary.apex_distance_m < 50.0);
        assert_eq!(summary.steps, s.flight.steps);
    }

    #[test]
    fn json_output_is_valid() {
        let summary = FlightSummary::from_solution(&solved(30.0, 0.0));
        let mut buf = Vec::new();
        write_summaries(&mut buf, &[summary.clone()]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["profile"], "default");
        assert_eq!(value[0]["steps"], summary.steps);
        assert!(value[0]["holdover_m"].is_number());
    }
}
