//! Canned walkthrough: each scenario runs on a fresh book and prints what the
//! engine returned.

use crate::render::render_book;
use orderbook::{Direction, OrderBook, OrderType, Side};
use std::error::Error;
use std::io::Write;

pub fn run<W: Write>(out: &mut W) -> Result<(), Box<dyn Error>> {
    writeln!(out, "=== Scenario 1: resting orders set the quotes ===")?;
    let mut ob = OrderBook::new();
    ob.add_order(100, 100.50, Side::Bid)?;
    ob.add_order(200, 101.00, Side::Ask)?;
    writeln!(
        out,
        "best bid ${:.2}, best ask ${:.2}",
        ob.best_quote(Side::Bid)?,
        ob.best_quote(Side::Ask)?
    )?;

    writeln!(out, "\n=== Scenario 2: market sell walks the bid queue ===")?;
    let mut ob = OrderBook::new();
    ob.add_order(100, 100.50, Side::Bid)?;
    ob.add_order(150, 100.50, Side::Bid)?;
    let fill = ob.submit_order(OrderType::Market, 200, Direction::Sell, None)?;
    writeln!(out, "filled {} for {:.2}", fill.units_transacted, fill.notional)?;
    write!(out, "{}", render_book(&ob.snapshot()))?;

    writeln!(out, "\n=== Scenario 3: limit buy at the ask ===")?;
    let mut ob = OrderBook::new();
    ob.add_order(200, 101.00, Side::Ask)?;
    ob.add_order(250, 101.00, Side::Ask)?;
    let fill = ob.submit_order(OrderType::Limit, 300, Direction::Buy, Some(101.00))?;
    writeln!(out, "filled {} for {:.2}", fill.units_transacted, fill.notional)?;
    write!(out, "{}", render_book(&ob.snapshot()))?;

    writeln!(out, "\n=== Scenario 4: small market buy only touches the best ask ===")?;
    let mut ob = OrderBook::new();
    ob.add_order(1000, 101.0, Side::Ask)?;
    ob.add_order(1500, 102.0, Side::Ask)?;
    ob.add_order(2000, 103.0, Side::Ask)?;
    let fill = ob.submit_order(OrderType::Market, 100, Direction::Buy, None)?;
    writeln!(out, "filled {} for {:.2}", fill.units_transacted, fill.notional)?;
    for level in ob.side_snapshot(Side::Ask) {
        writeln!(out, "  ask ${:.2}: {}", level.price, level.total_quantity())?;
    }

    writeln!(out, "\n=== Scenario 5: modify, cancel, then quote an empty side ===")?;
    let mut ob = OrderBook::new();
    let id = ob.add_order(100, 100.50, Side::Bid)?;
    let modified = ob.modify_order(id, 999);
    let resting = ob.order(id).map_or(0, |o| o.quantity);
    writeln!(out, "modify order {id} -> {modified} (resting {resting})")?;
    writeln!(out, "cancel order {id} -> {}", ob.cancel_order(id))?;
    match ob.best_quote(Side::Bid) {
        Ok(px) => writeln!(out, "best bid ${px:.2}")?,
        Err(e) => writeln!(out, "best bid query failed: {e}")?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_prints_expected_results() {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("best bid $100.50, best ask $101.00"));
        assert!(text.contains("filled 200 for 20100.00"));
        assert!(text.contains("filled 300 for 30300.00"));
        assert!(text.contains("filled 100 for 10100.00"));
        assert!(text.contains("  ask $101.00: 900"));
        assert!(text.contains("  ask $102.00: 1500"));
        assert!(text.contains("modify order 1 -> true (resting 999)"));
        assert!(text.contains("cancel order 1 -> true"));
        assert!(text.contains("best bid query failed: no resting orders on the bid side"));
    }
}
