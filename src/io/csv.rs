use std::io::{self, Write};

use crate::dynamics::state::Sample;

/// Write trajectory data to CSV format.
///
/// Columns: step, time, x, y, vx, vy
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[Sample]) -> io::Result<()> {
    writeln!(writer, "step,time,x,y,vx,vy")?;
    for s in trajectory {
        write_row(writer, s)?;
    }
    Ok(())
}

/// Write a single data row (no header).
pub fn write_row<W: Write>(writer: &mut W, s: &Sample) -> io::Result<()> {
    writeln!(
        writer,
        "{},{:.4},{:.6},{:.6},{:.6},{:.6}",
        s.step, s.time, s.pos.x, s.pos.y, s.vel.x, s.vel.y,
    )
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: &str, trajectory: &[Sample]) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, trajectory)?;
    file.flush()
}
