//! Pulsenet - module network pulse simulator
//!
//! Reads a module list and answers two independent queries, each from a
//! freshly built network:
//! - the product of low and high pulses over a number of presses
//! - the first press at which a sink receives a low pulse, predicted from
//!   the periods of the terminal conjunction's inputs
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=info pulsenet modules.txt --presses 1000 --sink rx
//! ```

use std::path::PathBuf;

use clap::Parser;
use pulsenet_core::{
    dsl,
    error::Result,
    network::{validate_network, Network},
    sim::{pulse_product, DetectorConfig, PeriodDetector, DEFAULT_MAX_PRESSES},
    DEFAULT_PRESSES, DEFAULT_SINK,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Module network pulse simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the module list
    #[arg(value_name = "MODULES_FILE")]
    modules_file: PathBuf,

    /// Presses used for the pulse product
    #[arg(short, long, default_value_t = DEFAULT_PRESSES)]
    presses: u64,

    /// Sink whose first low pulse is predicted
    #[arg(short, long, default_value = DEFAULT_SINK)]
    sink: String,

    /// Give up period detection after this many presses
    #[arg(long, default_value_t = DEFAULT_MAX_PRESSES)]
    max_presses: u64,

    /// Trust first emissions without waiting for a second one
    #[arg(long)]
    no_verify: bool,

    /// Fail when a period cannot be verified
    #[arg(long, conflicts_with = "no_verify")]
    strict: bool,

    /// Log detector progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Parse the module list
    let ast = dsl::parse_file(&args.modules_file)?;

    // Build the network
    let network = Network::from_ast(ast)?;

    // Validate
    validate_network(&network)?;

    println!("Part 1: {}", pulse_product(network.clone(), args.presses));

    if network.find_node(&args.sink).is_none() {
        warn!(sink = %args.sink, "sink not in network, skipping press prediction");
        return Ok(());
    }

    let terminal = network.resolve_terminal(&args.sink)?;
    let terminal = network.node_name(terminal).to_string();

    let config = DetectorConfig::new()
        .with_max_presses(args.max_presses)
        .with_verify(!args.no_verify)
        .with_strict(args.strict);
    let report = PeriodDetector::new(config).detect(network, &terminal)?;

    if !args.no_verify && !report.is_verified() {
        warn!(
            unverified = report.unverified().count(),
            "prediction relies on unverified periods"
        );
    }

    println!("Part 2: {}", report.presses);

    Ok(())
}
