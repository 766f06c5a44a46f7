//! Runs a scenario and prints its events.
//!
//! Usage: `transit-sim [INPUT] [--follow-delay-ms N]`

use clap::Parser;
use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
    process,
    time::Duration,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};
use transit::{Scenario, Simulator, TransitConfig, WriterSink};

#[derive(Parser, Debug)]
#[command(name = "transit-sim")]
#[command(about = "Simulate cars passing narrow bridges, ferries and crossroads")]
struct Args {
    /// Scenario file. Reads the standard input when omitted.
    input: Option<PathBuf>,

    /// Gap between two cars entering a lane in the same direction.
    #[arg(long, value_name = "MS")]
    follow_delay_ms: Option<u64>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> transit::Result<()> {
    let scenario = match &args.input {
        Some(path) => {
            info!("Loading scenario from: {}", path.display());
            Scenario::read(File::open(path)?)?
        }
        None => Scenario::read(io::stdin().lock())?,
    };

    let mut config = TransitConfig::builder();
    if let Some(ms) = args.follow_delay_ms {
        config = config.follow_delay(Duration::from_millis(ms));
    }
    let simulator = Simulator::new(scenario, &config.build());

    let sink = WriterSink::new(BufWriter::new(io::stdout()));
    simulator.run(&sink)?;
    sink.into_inner()?;
    Ok(())
}

fn main() {
    init_logging();

    if let Err(e) = run(Args::parse()) {
        error!("{e}");
        process::exit(1);
    }
}
