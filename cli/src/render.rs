//! Colorized ladder and fill printing for the console.

use orderbook::{BookSnapshot, Fill, LevelSnapshot};
use std::fmt::{self, Write};

const RED: &str = "\x1b[1;31m";
const GREEN: &str = "\x1b[1;32m";
const YELLOW: &str = "\x1b[1;33m";
const RESET: &str = "\x1b[0m";

/// One bar cell per this many units resting at a level.
const UNITS_PER_CELL: i64 = 10;
/// Widest bar drawn; larger levels are clipped to this.
const MAX_BAR_CELLS: usize = 60;

/// Asks from worst down to best, the spread, then bids from best down to
/// worst, so prices read top to bottom in descending order.
pub fn render_book(snap: &BookSnapshot) -> String {
    let mut out = String::new();
    let _ = write_book(&mut out, snap);
    out
}

fn write_book<W: Write>(out: &mut W, snap: &BookSnapshot) -> fmt::Result {
    writeln!(out, "========== Orderbook =========")?;
    for level in snap.asks.iter().rev() {
        write_level(out, RED, level)?;
    }

    match snap.spread_bps() {
        Some(bps) => writeln!(out, "\n{YELLOW}======  {bps:.2}bps  ======{RESET}\n")?,
        None => writeln!(out, "\n{YELLOW}======  —  ======{RESET}\n")?,
    }

    for level in &snap.bids {
        write_level(out, GREEN, level)?;
    }
    writeln!(out, "==============================")
}

fn write_level<W: Write>(out: &mut W, color: &str, level: &LevelSnapshot) -> fmt::Result {
    let size = level.total_quantity();
    let cells = usize::try_from(size / UNITS_PER_CELL)
        .unwrap_or(0)
        .min(MAX_BAR_CELLS);
    writeln!(
        out,
        "\t{color}${:>6.2}{:>5}{RESET} {}",
        level.price,
        size,
        "█".repeat(cells)
    )
}

/// Summary line for a submit: units filled out of requested, average
/// price and call latency.
pub fn render_fill(fill: &Fill, requested: i64, elapsed_ns: u128) -> String {
    match fill.average_price() {
        Some(avg) => format!(
            "{YELLOW}Filled {}/{} units @ ${:.2} average price. Time taken: {} nano seconds{RESET}",
            fill.units_transacted, requested, avg, elapsed_ns
        ),
        None => format!(
            "{YELLOW}Filled 0/{requested} units, no liquidity at an acceptable price. Time taken: {elapsed_ns} nano seconds{RESET}"
        ),
    }
}
