use clap::Parser;
use env_logger::Builder;
use eyre::{eyre, Result};
use log::{info, LevelFilter};
use serde_json::{json, Map, Value};

use billing_sim::cfg::config::{load_config, HarnessConfig};
use billing_sim::script::{load_script, run_script};
use billing_sim::seed::load_seed;
use billing_sim::{BillingSim, EntityType};

mod cli;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = Builder::new();
    builder.parse_default_env();
    if cli.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.try_init().ok();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => HarnessConfig::default(),
    };
    let seed = load_seed(&cli.seed)?;

    let sim = BillingSim::with_clock(config, billing_sim::RealClock);
    sim.configure(&seed)?;

    let errors = match &cli.script {
        Some(path) => {
            let steps = load_script(path)?;
            info!("replaying {} steps from {}", steps.len(), path.display());
            run_script(&sim, &steps).await?
        }
        None => Vec::new(),
    };

    let state = if cli.full {
        let mut full = Map::new();
        for entity in EntityType::ALL {
            if let Some(resident) = sim.resident(entity) {
                full.insert(entity.to_string(), resident);
            }
        }
        Value::Object(full)
    } else {
        serde_json::to_value(sim.snapshot()?)?
    };

    let output = json!({
        "state": state,
        "errors": errors,
    });
    let rendered = serde_json::to_string_pretty(&output)
        .map_err(|e| eyre!("Failed to render output: {}", e))?;
    println!("{}", rendered);
    Ok(())
}
