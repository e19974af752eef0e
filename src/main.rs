use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use ecosim::scenario::ScenarioLoader;

#[derive(Debug, Parser)]
#[command(author, version, about = "Monte Carlo species survival simulator")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/outback.yaml")]
    scenario: PathBuf,

    /// Override the iteration count (uses the scenario value when omitted)
    #[arg(long)]
    iterations: Option<u32>,

    /// Override the simulated years per iteration
    #[arg(long)]
    years: Option<u32>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Also write the report as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let mut scenario = loader.load(&cli.scenario)?;
    if let Some(iterations) = cli.iterations {
        scenario.iterations = iterations;
    }
    if let Some(years) = cli.years {
        scenario.years = years;
    }
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }
    scenario.validate()?;

    let simulator = scenario.build_simulator();
    let report = simulator.run()?;
    print!("{report}");

    if let Some(path) = &cli.output {
        report.write_json(path)?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}
