//! Menu-driven console over a single `OrderBook`.
//!
//! Generic over its input and output so sessions can be scripted in tests.
//! Bad input is reported and re-prompted; only I/O errors end the loop early.

use crate::render::{render_book, render_fill};
use orderbook::{BookError, Direction, ModifyOutcome, OrderBook, OrderId, OrderType, Side};
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::{info, warn};

const MENU: &str = "Options
————————————————————————————
| 1. Print orderbook       |
| 2. Submit order          |
| 3. Modify order          |
| 4. Cancel order          |
| 5. Best quotes           |
| 6. Add resting order     |
| 0. Quit                  |
————————————————————————————
Choice: ";

pub struct Console<R, W> {
    book: OrderBook,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(book: OrderBook, input: R, out: W) -> Self {
        Self { book, input, out }
    }

    pub fn into_book(self) -> OrderBook {
        self.book
    }

    /// Runs until the user quits or input reaches EOF.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(choice) = self.read_line(MENU)? else {
                return Ok(());
            };
            writeln!(self.out)?;

            let keep_going = match choice.trim() {
                "1" => self.print_book(),
                "2" => self.submit(),
                "3" => self.modify(),
                "4" => self.cancel(),
                "5" => self.quotes(),
                "6" => self.add(),
                "0" | "q" | "quit" | "exit" => return Ok(()),
                other => {
                    writeln!(self.out, "Unknown option: {other:?}")?;
                    Ok(true)
                }
            }?;
            if !keep_going {
                return Ok(());
            }
            writeln!(self.out)?;
        }
    }

    fn print_book(&mut self) -> io::Result<bool> {
        write!(self.out, "{}", render_book(&self.book.snapshot()))?;
        Ok(true)
    }

    fn submit(&mut self) -> io::Result<bool> {
        let Some(order_type) = self.ask(
            "Enter order type:\n0. Market order\n1. Limit order\nSelection: ",
            |s| s.parse::<OrderType>().map_err(|e| e.to_string()),
        )?
        else {
            return Ok(false);
        };
        let Some(direction) = self.ask("\nEnter side:\n0. Buy\n1. Sell\nSelection: ", parse_direction)? else {
            return Ok(false);
        };
        let Some(quantity) = self.ask("\nEnter order quantity: ", parse_number::<i64>)? else {
            return Ok(false);
        };

        let price = match order_type {
            OrderType::Market => {
                writeln!(self.out, "\nSubmitting market {direction} order for {quantity} units..")?;
                None
            }
            OrderType::Limit => {
                let Some(px) = self.ask("\nEnter limit price: ", parse_number::<f64>)? else {
                    return Ok(false);
                };
                writeln!(
                    self.out,
                    "\nSubmitting limit {direction} order for {quantity} units @ ${px}.."
                )?;
                Some(px)
            }
        };

        let start = Instant::now();
        let result = self.book.submit_order(order_type, quantity, direction, price);
        let elapsed = start.elapsed().as_nanos();

        match result {
            Ok(fill) => {
                info!(%order_type, %direction, quantity, filled = fill.units_transacted, elapsed_ns = elapsed as u64, "submit");
                writeln!(self.out, "{}", render_fill(&fill, quantity, elapsed))?;
                if order_type == OrderType::Limit && fill.units_transacted < quantity {
                    writeln!(
                        self.out,
                        "Rested {} units on the book.",
                        quantity - fill.units_transacted
                    )?;
                }
            }
            Err(e) => self.reject(&e)?,
        }
        Ok(true)
    }

    fn modify(&mut self) -> io::Result<bool> {
        let Some(id) = self.ask("Enter order id: ", parse_order_id)? else {
            return Ok(false);
        };
        let Some(quantity) = self.ask("Enter new quantity: ", parse_number::<i64>)? else {
            return Ok(false);
        };

        let start = Instant::now();
        let result = self.book.try_modify_order(id, quantity);
        let elapsed = start.elapsed().as_nanos();

        match result {
            Ok(ModifyOutcome::Resized { previous }) => writeln!(
                self.out,
                "Order {id} modified: {previous} -> {quantity} units. Time taken: {elapsed} nano seconds"
            )?,
            Ok(ModifyOutcome::Cancelled) => writeln!(
                self.out,
                "Order {id} removed (quantity {quantity}). Time taken: {elapsed} nano seconds"
            )?,
            Err(e) => self.reject(&e)?,
        }
        Ok(true)
    }

    fn cancel(&mut self) -> io::Result<bool> {
        let Some(id) = self.ask("Enter order id: ", parse_order_id)? else {
            return Ok(false);
        };

        let start = Instant::now();
        let result = self.book.try_cancel_order(id);
        let elapsed = start.elapsed().as_nanos();

        match result {
            Ok(order) => writeln!(
                self.out,
                "Order {id} cancelled: {} {} @ ${:.2}. Time taken: {elapsed} nano seconds",
                order.side, order.quantity, order.price
            )?,
            Err(e) => self.reject(&e)?,
        }
        Ok(true)
    }

    fn quotes(&mut self) -> io::Result<bool> {
        for side in [Side::Bid, Side::Ask] {
            match self.book.best_quote(side) {
                Ok(px) => writeln!(self.out, "Best {side}: ${px:.2}")?,
                Err(e) => writeln!(self.out, "Best {side}: {e}")?,
            }
        }
        match self.book.spread_bps() {
            Some(bps) => writeln!(self.out, "Spread: {bps:.2}bps")?,
            None => writeln!(self.out, "Spread: —")?,
        }
        Ok(true)
    }

    fn add(&mut self) -> io::Result<bool> {
        let Some(side) = self.ask("Enter book side:\n0. Bid\n1. Ask\nSelection: ", parse_side)? else {
            return Ok(false);
        };
        let Some(quantity) = self.ask("\nEnter order quantity: ", parse_number::<i64>)? else {
            return Ok(false);
        };
        let Some(price) = self.ask("\nEnter price: ", parse_number::<f64>)? else {
            return Ok(false);
        };

        match self.book.add_order(quantity, price, side) {
            Ok(id) => writeln!(self.out, "\nAdded order {id}: {side} {quantity} @ ${price:.2}")?,
            Err(e) => self.reject(&e)?,
        }
        Ok(true)
    }

    fn reject(&mut self, e: &BookError) -> io::Result<()> {
        warn!(error = %e, "request rejected");
        writeln!(self.out, "Rejected: {e}")
    }

    /// Prompts until `parse` accepts the line. `None` on EOF.
    fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match parse(line.trim()) {
                Ok(value) => return Ok(Some(value)),
                Err(msg) => writeln!(self.out, "Invalid input: {msg}")?,
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

pub fn parse_direction(s: &str) -> Result<Direction, String> {
    match s.to_lowercase().as_str() {
        "0" | "b" | "buy" => Ok(Direction::Buy),
        "1" | "s" | "sell" => Ok(Direction::Sell),
        _ => Err(format!("Invalid side: {s}. Use 0/buy or 1/sell")),
    }
}

pub fn parse_side(s: &str) -> Result<Side, String> {
    match s.to_lowercase().as_str() {
        "0" | "bid" => Ok(Side::Bid),
        "1" | "ask" => Ok(Side::Ask),
        _ => Err(format!("Invalid side: {s}. Use 0/bid or 1/ask")),
    }
}

fn parse_order_id(s: &str) -> Result<OrderId, String> {
    s.parse::<u64>()
        .map(OrderId)
        .map_err(|e| format!("{s:?}: {e}"))
}

fn parse_number<T>(s: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    s.parse::<T>().map_err(|e| format!("{s:?}: {e}"))
}
