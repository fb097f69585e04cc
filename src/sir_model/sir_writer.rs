use std::fmt::Display;

use serde_json::Value;

use{
    std::{
        fs::File,
        io::{Write, BufWriter},
        path::Path
    },
    super::*
};

pub type CurveWriter = BufWriter<File>;

pub fn create_writer<P: AsRef<Path>>(path: P) -> std::io::Result<CurveWriter>
{
    log::info!("creating: {}", path.as_ref().display());
    File::create(path).map(BufWriter::new)
}

/// Writes one finished run for the external plotting/rendering.
///
/// * `<name>_i.curves`: the infection count after each step
/// * `<name>.states`: one line per snapshot, `time S I R states`
pub struct TrajectoryWriter
{
    pub writer_curve: CurveWriter,
    pub writer_states: CurveWriter,
}

impl TrajectoryWriter
{
    pub fn new(name: &str) -> std::io::Result<Self>
    {
        Ok(
            Self{
                writer_curve: create_writer(format!("{name}_i.curves"))?,
                writer_states: create_writer(format!("{name}.states"))?
            }
        )
    }

    pub fn write_header(&mut self, jsons: &[Value]) -> std::io::Result<()>
    {
        write_jsons(jsons, &mut self.writer_curve)?;
        writeln!(self.writer_curve, "#time infected")?;
        write_jsons(jsons, &mut self.writer_states)?;
        writeln!(self.writer_states, "#time S I R node_states")
    }

    pub fn write_trajectory(&mut self, trajectory: &Trajectory) -> std::io::Result<()>
    {
        for (time, count) in trajectory.infection_counts().iter().enumerate()
        {
            write_pair(&mut self.writer_curve, time + 1, count)?;
        }
        for (time, snapshot) in trajectory.snapshots().iter().enumerate()
        {
            let (s, i, r) = snapshot.sir_counts();
            writeln!(self.writer_states, "{time} {s} {i} {r} {}", snapshot.symbols())?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> std::io::Result<()>
    {
        self.writer_curve.flush()?;
        self.writer_states.flush()
    }
}

pub fn write_pair<W, A, B>(mut writer: W, a: A, b: B) -> std::io::Result<()>
where W: Write,
    A: Display,
    B: Display
{
    writeln!(writer, "{a} {b}")
}

pub fn write_jsons<W: Write>(jsons: &[Value], mut writer: W) -> std::io::Result<()>
{
    for j in jsons{
        write!(writer, "#")?;
        serde_json::to_writer(&mut writer, j)?;
        writeln!(writer)?;
    }
    Ok(())
}
