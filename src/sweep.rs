//! Batch solving over a grid of target distances and heights.
//!
//! Every cell is an independent solve sharing only the read-only profile and
//! constants, so cells run in parallel on the rayon pool that is current
//! when [`run_sweep`] is called. A failing cell is logged and recorded; it
//! never aborts the remaining grid.

use std::collections::HashMap;
use std::io::Write;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::FlightError;
use crate::io::ResultRecord;
use crate::physics::PhysicsConstants;
use crate::projectile::Profile;
use crate::sim::{solve, SimConfig, SolverConfig, Target};

// ---------------------------------------------------------------------------
// Grid definition
// ---------------------------------------------------------------------------

/// Upper bound on the number of cells in a grid, and so on either axis.
pub const MAX_GRID_CELLS: usize = 1_000_000;

/// Inclusive arithmetic range `start, start + step, ..., <= end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub start: f64,
    pub step: f64,
    pub end: f64,
}

impl AxisRange {
    pub fn new(start: f64, step: f64, end: f64) -> Self {
        Self { start, step, end }
    }

    /// Grid values, rounded to 10 decimals. A negative step counts down.
    ///
    /// Ranges that would expand past [`MAX_GRID_CELLS`] are rejected.
    pub fn values(&self) -> Result<Vec<f64>, FlightError> {
        if !(self.start.is_finite() && self.step.is_finite() && self.end.is_finite()) {
            return Err(FlightError::invalid("grid bounds and step must be finite"));
        }
        if self.step == 0.0 {
            return Err(FlightError::invalid("grid step must be non-zero"));
        }
        let span = (self.end - self.start) / self.step;
        if span < -1e-9 {
            return Ok(Vec::new());
        }
        let whole = (span + 1e-9).floor();
        if !whole.is_finite() || whole >= MAX_GRID_CELLS as f64 {
            return Err(FlightError::invalid(format!(
                "grid [{}, {}] with step {} exceeds {MAX_GRID_CELLS} values",
                self.start, self.end, self.step
            )));
        }
        let count = (whole as usize)
            .checked_add(1)
            .ok_or_else(|| FlightError::invalid("grid value count overflows"))?;
        Ok((0..count)
            .map(|i| round10(self.start + i as f64 * self.step))
            .collect())
    }
}

fn round10(v: f64) -> f64 {
    (v * 1e10).round() / 1e10
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepGrid {
    pub distances: AxisRange,
    pub heights: AxisRange,
}

impl Default for SweepGrid {
    fn default() -> Self {
        Self {
            distances: AxisRange::new(10.0, 2.0, 100.0),
            heights: AxisRange::new(-10.0, 1.0, 10.0),
        }
    }
}

impl SweepGrid {
    /// Targets in distance-major, height-minor order.
    pub fn targets(&self) -> Result<Vec<Target>, FlightError> {
        let heights = self.heights.values()?;
        let distances = self.distances.values()?;
        match distances.len().checked_mul(heights.len()) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => {
                return Err(FlightError::invalid(format!(
                    "grid of {} x {} targets exceeds {MAX_GRID_CELLS} cells",
                    distances.len(),
                    heights.len()
                )))
            }
        }
        Ok(distances
            .into_iter()
            .flat_map(|d| heights.iter().map(move |&h| Target::new(d, h)))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Sweep
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SweepFailure {
    pub target: Target,
    pub error: FlightError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepReport {
    /// Solved cells in grid order.
    pub records: Vec<ResultRecord>,
    pub failures: Vec<SweepFailure>,
}

impl SweepReport {
    pub fn cells(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

pub fn run_sweep(
    profile: &Profile,
    grid: &SweepGrid,
    sim: &SimConfig,
    solver: &SolverConfig,
    physics: &PhysicsConstants,
) -> Result<SweepReport, FlightError> {
    let targets = grid.targets()?;
    // Surface configuration errors once instead of once per cell.
    profile.body()?;
    sim.validate()?;
    solver.validate()?;
    physics.validate()?;

    info!(profile = profile.name(), cells = targets.len(), "starting sweep");

    let outcomes: Vec<(Target, Result<ResultRecord, FlightError>)> = targets
        .par_iter()
        .map(|target| {
            let outcome = solve(profile, target, sim, solver, physics)
                .map(|solution| ResultRecord::from_solution(&solution));
            (*target, outcome)
        })
        .collect();

    let mut report = SweepReport::default();
    for (target, outcome) in outcomes {
        match outcome {
            Ok(record) => report.records.push(record),
            Err(error) => {
                warn!(
                    distance = target.distance,
                    height = target.height,
                    %error,
                    "sweep cell failed"
                );
                report.failures.push(SweepFailure { target, error });
            }
        }
    }

    info!(
        solved = report.records.len(),
        failed = report.failures.len(),
        "sweep finished"
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Aim surface
// ---------------------------------------------------------------------------

/// Sight correction for one grid cell, with differences against the level
/// (height 0) cell at the same distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AimPoint {
    pub distance_m: f64,
    pub height_m: f64,
    pub launch_angle_deg: f64,
    pub sight_angle_deg: f64,
    pub aim_angle_deg: f64,
    pub holdover_m: f64,
    pub holdover_vs_level_m: f64,
    pub aim_angle_vs_level_deg: f64,
}

/// Derive aim points from sweep records. Distances without a level cell use
/// a zero baseline.
pub fn aim_surface(records: &[ResultRecord]) -> Vec<AimPoint> {
    let aim = |r: &ResultRecord| {
        let sight = Target::new(r.target_distance, r.target_height).sight_angle_deg();
        (sight, r.launch_angle_deg - sight)
    };

    let mut level: HashMap<u64, (f64, f64)> = HashMap::new();
    for r in records.iter().filter(|r| r.target_height.abs() < 1e-12) {
        level
            .entry(r.target_distance.to_bits())
            .or_insert((r.holdover, aim(r).1));
    }

    records
        .iter()
        .map(|r| {
            let (sight, aim_angle) = aim(r);
            let (level_holdover, level_aim) = level
                .get(&r.target_distance.to_bits())
                .copied()
                .unwrap_or((0.0, 0.0));
            AimPoint {
                distance_m: r.target_distance,
                height_m: r.target_height,
                launch_angle_deg: r.launch_angle_deg,
                sight_angle_deg: sight,
                aim_angle_deg: aim_angle,
                holdover_m: r.holdover,
                holdover_vs_level_m: r.holdover - level_holdover,
                aim_angle_vs_level_deg: aim_angle - level_aim,
            }
        })
        .collect()
}

pub fn write_aim_surface<W: Write>(writer: W, points: &[AimPoint]) -> csv::Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    for p in points {
        out.serialize(p)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projectile::presets;

    #[test]
    fn axis_range_is_inclusive() {
        let v = AxisRange::new(10.0, 2.0, 16.0).values().unwrap();
        assert_eq!(v, vec![10.0, 12.0, 14.0, 16.0]);
        let v = AxisRange::new(-1.0, 0.1, 0.0).values().unwrap();
        assert_eq!(v.len(), 11);
        assert_eq!(v[3], -0.7);
        assert_eq!(*v.last().unwrap(), 0.0);
    }

    #[test]
    fn axis_range_counts_down() {
        let v = AxisRange::new(5.0, -2.5, 0.0).values().unwrap();
        assert_eq!(v, vec![5.0, 2.5, 0.0]);
    }

    #[test]
    fn axis_range_rejects_zero_step() {
        assert!(AxisRange::new(0.0, 0.0, 1.0).values().is_err());
    }

    #[test]
    fn axis_range_rejects_tiny_step() {
        let r = AxisRange::new(0.0, 1e-300, 1.0).values();
        assert!(matches!(r, Err(FlightError::InvalidInput(_))), "got {r:?}");
        let r = AxisRange::new(0.0, 1e-9, 1.0).values();
        assert!(matches!(r, Err(FlightError::InvalidInput(_))), "got {r:?}");
    }

    #[test]
    fn axis_range_allows_exactly_the_cap() {
        let last = (MAX_GRID_CELLS - 1) as f64;
        let v = AxisRange::new(0.0, 1.0, last).values().unwrap();
        assert_eq!(v.len(), MAX_GRID_CELLS);
        assert!(AxisRange::new(0.0, 1.0, last + 1.0).values().is_err());
    }

    #[test]
    fn grid_rejects_oversized_product() {
        let grid = SweepGrid {
            distances: AxisRange::new(1.0, 1.0, 2000.0),
            heights: AxisRange::new(0.0, 1.0, 999.0),
        };
        assert!(matches!(grid.targets(), Err(FlightError::InvalidInput(_))));
    }

    #[test]
    fn empty_when_step_points_away() {
        assert!(AxisRange::new(10.0, 1.0, 5.0).values().unwrap().is_empty());
    }

    #[test]
    fn targets_are_distance_major() {
        let grid = SweepGrid {
            distances: AxisRange::new(10.0, 10.0, 20.0),
            heights: AxisRange::new(-1.0, 1.0, 1.0),
        };
        let t = grid.targets().unwrap();
        assert_eq!(t.len(), 6);
        assert_eq!(t[0], Target::new(10.0, -1.0));
        assert_eq!(t[2], Target::new(10.0, 1.0));
        assert_eq!(t[3], Target::new(20.0, -1.0));
    }

    #[test]
    fn sweep_keeps_grid_order_and_isolates_failures() {
        let grid = SweepGrid {
            distances: AxisRange::new(20.0, 290.0, 600.0),
            heights: AxisRange::new(0.0, 2.0, 2.0),
        };
        let report = run_sweep(
            &presets::default_profile(),
            &grid,
            &SimConfig::default(),
            &SolverConfig::default(),
            &PhysicsConstants::default(),
        )
        .unwrap();

        assert_eq!(report.cells(), 6);
        // 600 m is beyond reach at 45°; 20 m and 310 m are not
        assert_eq!(report.failures.len(), 2);
        assert!(report.failures.iter().all(|f| f.target.distance == 600.0));
        assert!(report
            .failures
            .iter()
            .all(|f| matches!(f.error, FlightError::UnreachableTarget { .. })));
        let order: Vec<(f64, f64)> = report
            .records
            .iter()
            .map(|r| (r.target_distance, r.target_height))
            .collect();
        assert_eq!(order, vec![(20.0, 0.0), (20.0, 2.0), (310.0, 0.0), (310.0, 2.0)]);
    }

    #[test]
    fn sweep_rejects_bad_profile_up_front() {
        let limp = crate::projectile::ProfileBuilder::new("limp").v0_fps(0.0).build();
        let r = run_sweep(
            &limp,
            &SweepGrid::default(),
            &SimConfig::default(),
            &SolverConfig::default(),
            &PhysicsConstants::default(),
        );
        assert!(matches!(r, Err(FlightError::InvalidInput(_))));
    }

    fn rec(d: f64, h: f64, angle: f64, holdover: f64) -> ResultRecord {
        ResultRecord {
            profile: "default".into(),
            target_distance: d,
            target_height: h,
            holdover,
            launch_angle_deg: angle,
            achieved_x: d,
            achieved_y: h,
            flight_time: 0.0,
            final_speed: 0.0,
            impact_angle_deg: 0.0,
        }
    }

    #[test]
    fn aim_surface_diffs_against_level_cell() {
        let records = vec![
            rec(50.0, 0.0, 2.8, 2.4),
            rec(50.0, 5.0, 8.6, 2.6),
            rec(70.0, 5.0, 8.0, 4.8),
        ];
        let points = aim_surface(&records);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].holdover_vs_level_m, 0.0);
        assert!((points[1].holdover_vs_level_m - 0.2).abs() < 1e-12);
        let expected_aim = 8.6 - Target::new(50.0, 5.0).sight_angle_deg();
        assert!((points[1].aim_angle_deg - expected_aim).abs() < 1e-12);
        assert!((points[1].aim_angle_vs_level_deg - (expected_aim - 2.8)).abs() < 1e-12);
        // no level cell at 70 m: zero baseline
        assert_eq!(points[2].holdover_vs_level_m, 4.8);
    }

    #[test]
    fn aim_surface_csv_has_named_columns() {
        let points = aim_surface(&[rec(30.0, 0.0, 1.7, -1.7)]);
        let mut buf = Vec::new();
        write_aim_surface(&mut buf, &points).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with(
            "distance_m,height_m,launch_angle_deg,sight_angle_deg,aim_angle_deg"
        ));
        assert_eq!(out.lines().count(), 2);
    }
}
