//! Per-cohort run summary and its JSON sidecar.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::Serialize;
use serde_json::to_writer_pretty;

use bluebottle_core::geo::displacement_m;
use bluebottle_core::vector;
use bluebottle_engine::Trajectory;

use crate::ExportError;

/// Net displacement statistics for one cohort between the first and last frame.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CohortSummary {
    pub origin_marker: f64,
    pub label: String,
    pub elements: usize,
    /// Elements whose final position is finite; only these enter the means.
    pub finite_elements: usize,
    pub mean_displacement_m: f64,
    pub mean_east_m: f64,
    pub mean_north_m: f64,
    /// Direction of the mean displacement, degrees counter-clockwise from east.
    pub mean_heading_deg: f64,
}

/// Summary of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub scenario: String,
    pub model: String,
    pub start_time: String,
    pub end_time: String,
    pub steps: usize,
    pub elements: usize,
    pub non_finite_positions: usize,
    pub cohorts: Vec<CohortSummary>,
}

impl RunSummary {
    /// Summarise `trajectory`; `labels` names cohorts by origin marker index.
    pub fn from_trajectory(scenario: &str, trajectory: &Trajectory, labels: &[String]) -> Self {
        let (start_time, end_time) = match (trajectory.first_frame(), trajectory.last_frame()) {
            (Some(first), Some(last)) => (
                first.time.format("%Y-%m-%dT%H:%M:%S").to_string(),
                last.time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ),
            _ => (String::new(), String::new()),
        };

        Self {
            scenario: scenario.to_string(),
            model: trajectory.model.clone(),
            start_time,
            end_time,
            steps: trajectory.statistics.steps,
            elements: trajectory.statistics.elements,
            non_finite_positions: trajectory.statistics.non_finite_positions,
            cohorts: cohort_summaries(trajectory, labels),
        }
    }

    /// Write the summary as pretty-printed JSON, creating parent directories.
    pub fn write_json(&self, path: &Path) -> Result<(), ExportError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(path)?, self)?;
        Ok(())
    }
}

#[derive(Default)]
struct Accumulator {
    elements: usize,
    finite: usize,
    distance: f64,
    east: f64,
    north: f64,
}

fn cohort_summaries(trajectory: &Trajectory, labels: &[String]) -> Vec<CohortSummary> {
    let (Some(first), Some(last)) = (trajectory.first_frame(), trajectory.last_frame()) else {
        return Vec::new();
    };

    // Markers are small non-negative integers stored as f64; key on their bit pattern.
    let mut groups: BTreeMap<u64, (f64, Accumulator)> = BTreeMap::new();
    for (i, marker) in trajectory.origin_marker.iter().enumerate() {
        let entry = groups
            .entry(marker.to_bits())
            .or_insert_with(|| (*marker, Accumulator::default()));
        let acc = &mut entry.1;
        acc.elements += 1;
        let (dx, dy) = displacement_m(first.lon[i], first.lat[i], last.lon[i], last.lat[i]);
        if dx.is_finite() && dy.is_finite() {
            acc.finite += 1;
            acc.distance += vector::norm(&[dx, dy]);
            acc.east += dx;
            acc.north += dy;
        }
    }

    let mut summaries: Vec<CohortSummary> = groups
        .into_values()
        .map(|(marker, acc)| {
            let n = acc.finite.max(1) as f64;
            let mean = [acc.east / n, acc.north / n];
            let index = marker.max(0.0) as usize;
            CohortSummary {
                origin_marker: marker,
                label: labels
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| format!("cohort {}", index)),
                elements: acc.elements,
                finite_elements: acc.finite,
                mean_displacement_m: acc.distance / n,
                mean_east_m: mean[0],
                mean_north_m: mean[1],
                mean_heading_deg: vector::angle(&mean).to_degrees(),
            }
        })
        .collect();
    summaries.sort_by(|a, b| a.origin_marker.total_cmp(&b.origin_marker));
    summaries
}
