//! Long-format trajectory CSV: one row per element per output frame.

use std::io::Write;

use serde::Serialize;

use bluebottle_engine::Trajectory;

use crate::ExportError;

#[derive(Debug, Serialize)]
struct Row<'a> {
    time: String,
    time_s: f64,
    element_id: u64,
    origin_marker: f64,
    status: &'a str,
    lon: f64,
    lat: f64,
}

/// Write every frame of `trajectory` as CSV with a header row.
pub fn write_csv<W: Write>(writer: W, trajectory: &Trajectory) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for frame in &trajectory.frames {
        let time = frame.time.format("%Y-%m-%dT%H:%M:%S").to_string();
        for i in 0..frame.lon.len() {
            csv.serialize(Row {
                time: time.clone(),
                time_s: frame.time_s,
                element_id: trajectory.element_ids[i],
                origin_marker: trajectory.origin_marker[i],
                status: frame.status[i].label(),
                lon: frame.lon[i],
                lat: frame.lat[i],
            })?;
        }
    }
    csv.flush()?;
    Ok(())
}
