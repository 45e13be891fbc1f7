use std::io::{self, Write};

use crate::sim::Solution;

/// Column headers of the result record, in interface order.
pub const HEADERS: [&str; 10] = [
    "Profile",
    "Target distance [m]",
    "Target height [m]",
    "Optimal holdover",
    "Optimal launch angle [°]",
    "best_x_hit [m]",
    "best_y_hit [m]",
    "Flight time [s]",
    "Final speed [m/s]",
    "Impact angle [°]",
];

/// One solved (profile, distance, height) cell.
///
/// Field order is a contract with downstream CSV tooling; do not reorder.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub profile: String,
    pub target_distance: f64,
    pub target_height: f64,
    pub holdover: f64,
    pub launch_angle_deg: f64,
    pub achieved_x: f64,
    pub achieved_y: f64,
    pub flight_time: f64,
    pub final_speed: f64,
    pub impact_angle_deg: f64,
}

impl ResultRecord {
    pub fn from_solution(solution: &Solution) -> Self {
        Self {
            profile: solution.profile_name.clone(),
            target_distance: solution.target.distance,
            target_height: solution.target.height,
            holdover: solution.holdover,
            launch_angle_deg: solution.launch_angle_deg(),
            achieved_x: solution.search.achieved_x,
            achieved_y: solution.search.achieved_y,
            flight_time: solution.flight.time(),
            final_speed: solution.flight.speed(),
            impact_angle_deg: solution.flight.impact_angle_deg(),
        }
    }

    /// Formatted values, aligned with [`HEADERS`].
    pub fn fields(&self) -> [String; 10] {
        [
            self.profile.clone(),
            format!("{:.2}", self.target_distance),
            format!("{:.2}", self.target_height),
            format!("{:.3}", self.holdover),
            format!("{:.3}", self.launch_angle_deg),
            format!("{:.2}", self.achieved_x),
            format!("{:.2}", self.achieved_y),
            format!("{:.2}", self.flight_time),
            format!("{:.2}", self.final_speed),
            format!("{:.2}", self.impact_angle_deg),
        ]
    }
}

/// Console table: headers centred, values right-aligned, two-space gutters.
pub fn write_table<W: Write>(
    writer: &mut W,
    records: &[ResultRecord],
    header: bool,
) -> io::Result<()> {
    let rows: Vec<[String; 10]> = records.iter().map(ResultRecord::fields).collect();
    let widths: Vec<usize> = HEADERS
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .fold(h.chars().count(), usize::max)
        })
        .collect();

    if header {
        let line: Vec<String> = HEADERS
            .iter()
            .zip(&widths)
            .map(|(h, &w)| center(h, w))
            .collect();
        writeln!(writer, "{}", line.join("  "))?;
    }

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(v, &w)| format!("{v:>w$}"))
            .collect();
        writeln!(writer, "{}", line.join("  "))?;
    }
    Ok(())
}

/// Centre `text` in `width` columns. Odd padding goes left when `width` is
/// odd, right otherwise.
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let pad = width - len;
    let left = pad / 2 + (pad & width & 1);
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}
