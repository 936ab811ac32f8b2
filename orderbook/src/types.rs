use crate::error::BookError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Side of the book an order rests on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
        }
    }
}

/// Direction of an incoming order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    /// Side a limit remainder rests on.
    pub fn resting_side(self) -> Side {
        match self {
            Direction::Buy => Side::Bid,
            Direction::Sell => Side::Ask,
        }
    }

    /// Side this order consumes liquidity from.
    pub fn contra_side(self) -> Side {
        self.resting_side().opposite()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Buy => write!(f, "buy"),
            Direction::Sell => write!(f, "sell"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    Limit,
}

impl TryFrom<u8> for OrderType {
    type Error = BookError;

    /// Console codes: 0 = market, 1 = limit.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(OrderType::Market),
            1 => Ok(OrderType::Limit),
            other => Err(BookError::InvalidOrderType(other.to_string())),
        }
    }
}

impl FromStr for OrderType {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "0" | "market" | "mkt" => Ok(OrderType::Market),
            "1" | "limit" | "lmt" => Ok(OrderType::Limit),
            _ => Err(BookError::InvalidOrderType(s.to_string())),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Market => write!(f, "market"),
            OrderType::Limit => write!(f, "limit"),
        }
    }
}

/// Engine-assigned order identifier, unique per book instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resting order. Only `quantity` changes after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub price: f64,
    pub quantity: i64,
    pub ts_ns: u64, // creation time, tie-break only
}

/// Result of a submit: units filled and their notional value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub units_transacted: i64,
    pub notional: f64,
}

impl Fill {
    /// Average execution price, `None` when nothing traded.
    pub fn average_price(&self) -> Option<f64> {
        if self.units_transacted == 0 {
            None
        } else {
            Some(self.notional / self.units_transacted as f64)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.units_transacted == 0
    }

    pub(crate) fn record(&mut self, qty: i64, price: f64) {
        self.units_transacted += qty;
        self.notional += qty as f64 * price;
    }
}

/// Wall-clock nanoseconds since the unix epoch, 0 if the clock is before it.
pub fn unix_time_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_maps_to_sides() {
        assert_eq!(Direction::Buy.resting_side(), Side::Bid);
        assert_eq!(Direction::Buy.contra_side(), Side::Ask);
        assert_eq!(Direction::Sell.resting_side(), Side::Ask);
        assert_eq!(Direction::Sell.contra_side(), Side::Bid);
    }

    #[test]
    fn order_type_parses_codes_and_names() {
        assert_eq!(OrderType::try_from(0u8), Ok(OrderType::Market));
        assert_eq!(OrderType::try_from(1u8), Ok(OrderType::Limit));
        assert_eq!("LIMIT".parse::<OrderType>(), Ok(OrderType::Limit));
        assert_eq!(" market ".parse::<OrderType>(), Ok(OrderType::Market));
        assert_eq!(
            OrderType::try_from(7u8),
            Err(BookError::InvalidOrderType("7".into()))
        );
        assert!(matches!(
            "stop".parse::<OrderType>(),
            Err(BookError::InvalidOrderType(_))
        ));
    }

    #[test]
    fn average_price_guards_zero_units() {
        let empty = Fill::default();
        assert!(empty.is_empty());
        assert_eq!(empty.average_price(), None);

        let mut fill = Fill::default();
        fill.record(100, 101.0);
        fill.record(100, 102.0);
        assert_eq!(fill.units_transacted, 200);
        assert_eq!(fill.average_price(), Some(101.5));
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Side::Bid.to_string(), "bid");
        assert_eq!(Direction::Sell.to_string(), "sell");
        assert_eq!(OrderType::Limit.to_string(), "limit");
        assert_eq!(OrderId(42).to_string(), "42");
    }
}
