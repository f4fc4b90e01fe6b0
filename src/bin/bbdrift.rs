use std::path::PathBuf;

use clap::Parser;

use bluebottle_drift::base::time::seconds_to_days;
use bluebottle_drift::base::units::m_to_km;
use bluebottle_drift::config::load_scenarios;
use bluebottle_drift::export::summary::RunSummary;
use bluebottle_drift::export::{trajectory, writer_for_path};
use bluebottle_drift::scenario::{self, Scenario};

#[derive(Parser)]
#[command(author, version, about = "Bluebottle drift simulator")]
struct Cli {
    /// Scenario manifest: TOML file, YAML list, or directory of TOML files
    #[arg(long)]
    scenario: PathBuf,

    /// Scenario name (case-insensitive); defaults to the first scenario
    #[arg(long)]
    name: Option<String>,

    /// Trajectory CSV output path (`-` for stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON summary output path
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let configs = load_scenarios(&cli.scenario)?;
    let config = scenario::select(&configs, cli.name.as_deref())?;
    let runtime = Scenario::try_from(config)?;
    let runtime_duration_s = runtime.settings.duration_s;
    let (trajectory, labels) = runtime.run()?;

    if let Some(path) = &cli.output {
        let writer = writer_for_path(path)?;
        trajectory::write_csv(writer, &trajectory)?;
    }

    let summary = RunSummary::from_trajectory(&config.name, &trajectory, &labels);
    if let Some(path) = &cli.summary {
        summary.write_json(path)?;
    }

    // Keep stdout clean for CSV piped to `-`.
    if cli.output.as_deref() == Some(std::path::Path::new("-")) {
        return Ok(());
    }

    println!("=== Bluebottle Drift ===");
    println!("Scenario   : {}", summary.scenario);
    println!(
        "Period     : {} -> {} ({:.2} days)",
        summary.start_time,
        summary.end_time,
        seconds_to_days(runtime_duration_s)
    );
    println!(
        "Steps      : {} ({} elements, {} non-finite)",
        summary.steps, summary.elements, summary.non_finite_positions
    );
    for cohort in &summary.cohorts {
        println!(
            "{:<24} : {} elements, mean displacement {:.2} km, heading {:.1} deg",
            cohort.label,
            cohort.elements,
            m_to_km(cohort.mean_displacement_m),
            cohort.mean_heading_deg
        );
    }

    Ok(())
}
