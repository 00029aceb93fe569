use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use gridcity::{Engine, ScenarioLoader};

#[derive(Debug, Parser)]
#[command(author, version, about = "Headless city simulation runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/riverside.yaml")]
    scenario: PathBuf,

    /// Override period count (uses scenario default when omitted)
    #[arg(long)]
    periods: Option<u64>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Emit each period summary as a JSON line
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gridcity=info")),
        )
        .init();

    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;
    let city = scenario.build_city(cli.seed)?;
    let periods = scenario.periods(cli.periods);

    let mut engine = Engine::new(city);
    let mut last = None;
    for _ in 0..periods {
        let summary = engine.simulate_period()?;
        if cli.json {
            println!("{}", serde_json::to_string(&summary)?);
        }
        last = Some(summary);
    }

    if let Some(summary) = last {
        println!(
            "Scenario '{}' completed for {} periods. Population: {} ({:?}), funds: {}",
            scenario.name, periods, summary.total_pop, summary.city_class, summary.total_funds
        );
    }
    Ok(())
}
