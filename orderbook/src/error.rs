//! Error surface of the order book.

use crate::types::{OrderId, Side};
use thiserror::Error;

/// Recoverable failures returned by book operations. A failed call leaves the
/// book untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookError {
    #[error("invalid order type: {0:?} (expected market/limit or 0/1)")]
    InvalidOrderType(String),

    #[error("invalid quantity: {0} (must be positive)")]
    InvalidQuantity(i64),

    #[error("invalid price: {0} (must be finite and positive)")]
    InvalidPrice(f64),

    #[error("limit order requires a price")]
    MissingLimitPrice,

    #[error("unknown order id: {0}")]
    UnknownOrderId(OrderId),

    #[error("no resting orders on the {0} side")]
    EmptyBookQuery(Side),
}

pub type BookResult<T> = Result<T, BookError>;
