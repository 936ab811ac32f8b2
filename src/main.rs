//! Order book performance lab.
//!
//! Times market orders, modifies and cancels against a deep book, writes the
//! raw samples for plotting, then runs a sustained mixed-workload throughput
//! test.

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};


use latency_test::LatencyConfig;

#[derive(Parser)]
#[command(name = "lob-lab")]
#[command(about = "Latency and throughput lab for the order book")]
struct Args {
    /// Price levels in the latency book
    #[arg(long, default_value_t = 1000)]
    levels: u32,
    #[arg(long, default_value_t = 100)]
    orders_per_level: u32,
    #[arg(long, default_value_t = 5000)]
    market_orders: u32,
    #[arg(long, default_value_t = 500)]
    modifies: u32,
    #[arg(long, default_value_t = 500)]
    cancels: u32,
    /// Directory receiving the *_times.txt sample files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Length of the throughput phase, 0 skips it
    #[arg(long, default_value_t = 10)]
    throughput_secs: u64,
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    println!("=== Order Book Performance Lab ===");

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(seed = ?args.seed, out_dir = %args.out_dir.display(), "starting");

    let cfg = LatencyConfig {
        levels: args.levels,
        orders_per_level: args.orders_per_level,
        market_orders: args.market_orders,
        modifies: args.modifies,
        cancels: args.cancels,
    };
    latency_test::run_latency_tests(&cfg, &args.out_dir, &mut rng)?;

    if args.throughput_secs > 0 {
        latency_test::run_throughput_test(Duration::from_secs(args.throughput_secs))?;
    }

    Ok(())
}
