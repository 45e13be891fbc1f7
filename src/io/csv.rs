use std::io::{self, Write};
use std::path::Path;

use crate::dynamics::state::FlightState;
use super::table::{ResultRecord, HEADERS};

/// Write trajectory data to CSV format.
///
/// Columns: t, x, y, vx, vy, speed
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[FlightState]) -> io::Result<()> {
    writeln!(writer, "t,x,y,vx,vy,speed")?;

    for s in trajectory {
        writeln!(
            writer,
            "{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
            s.time,
            s.pos.x, s.pos.y,
            s.vel.x, s.vel.y,
            s.speed(),
        )?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file<P: AsRef<Path>>(
    path: P,
    trajectory: &[FlightState],
) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, trajectory)?;
    file.flush()
}

/// Write result records as CSV with the standard header.
pub fn write_results<W: Write>(writer: W, records: &[ResultRecord]) -> ::csv::Result<()> {
    let mut out = ::csv::Writer::from_writer(writer);
    out.write_record(HEADERS)?;
    for record in records {
        out.write_record(record.fields())?;
    }
    out.flush()?;
    Ok(())
}
