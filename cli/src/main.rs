use clap::{Parser, Subcommand};
use orderbook::OrderBook;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

mod console;
mod demo;
mod render;
mod seed;

use console::Console;

#[derive(Parser)]
#[command(name = "lob")]
#[command(about = "Limit order book console - submit, modify and cancel orders against a local book")]
struct Cli {
    /// Start from an empty book instead of seeded dummy orders
    #[arg(long)]
    no_dummies: bool,
    /// Seed for the dummy orders
    #[arg(long, default_value_t = seed::DEFAULT_SEED)]
    seed: u64,
    /// Banner printed when the interactive console starts
    #[arg(long, default_value = "assets/ascii.txt")]
    banner: PathBuf,
    #[arg(long, default_value = "warn")]
    log_level: Level,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Menu-driven session on stdin/stdout (default)
    Interactive,
    /// Run the canned scenarios on fresh books
    Demo,
    /// Print the starting book once and exit
    Snapshot {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .init();

    let mut book = OrderBook::new();
    if !cli.no_dummies {
        let ids = seed::seed_dummies(&mut book, cli.seed)?;
        info!(seed = cli.seed, orders = ids.len(), "book seeded");
    }

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            print_banner(&cli.banner);
            let stdin = io::stdin();
            let mut console = Console::new(book, stdin.lock(), io::stdout().lock());
            console.run()?;
        }
        Commands::Demo => demo::run(&mut io::stdout().lock())?,
        Commands::Snapshot { json } => {
            let snapshot = book.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", render::render_book(&snapshot));
            }
        }
    }

    Ok(())
}

fn print_banner(path: &Path) {
    match std::fs::read_to_string(path) {
        Ok(banner) => println!("{banner}"),
        Err(e) => warn!(path = %path.display(), error = %e, "banner not printed"),
    }
}
