//! Aggregation of decoded order records into displayable price levels.
//!
//! Aggregation is a pure function over a borrowed set of orders: the input
//! records are never merged or mutated, and every call recomputes the levels
//! from scratch. Only live orders (active with a non-zero remaining
//! quantity) contribute.
use std::collections::BTreeMap;

use crate::state::{OrderState, Side};

/// One aggregated row of the book: all live orders at one exact price on one
/// side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceLevel {
    /// Quote units per base unit, fixed-point with 6 implied decimals
    pub price: u64,
    /// Sum of the remaining quantities of all orders at this price
    pub total_quantity: u64,
    /// Number of orders contributing to this level
    pub order_count: u32,
    /// Running sum of `total_quantity` from the best price outward
    pub cumulative_total: u64,
}

/// Aggregates one side of the book.
///
/// Levels are sorted best-price first: descending for [`Side::Buy`],
/// ascending for [`Side::Sell`]. Orders on the other side, and orders that
/// are not live, are ignored. An empty result is an empty book, not an
/// error.
pub fn aggregate(orders: &[OrderState], side: Side) -> Vec<PriceLevel> {
    let mut grouped: BTreeMap<u64, (u64, u32)> = BTreeMap::new();
    for order in orders.iter().filter(|o| o.side == side && o.is_live()) {
        let entry = grouped.entry(order.price).or_insert((0, 0));
        entry.0 += order.remaining();
        entry.1 += 1;
    }

    let iter: Box<dyn Iterator<Item = (&u64, &(u64, u32))>> = match side {
        Side::Buy => Box::new(grouped.iter().rev()),
        Side::Sell => Box::new(grouped.iter()),
    };

    let mut levels = Vec::with_capacity(grouped.len());
    let mut cumulative_total = 0u64;
    for (&price, &(total_quantity, order_count)) in iter {
        cumulative_total += total_quantity;
        levels.push(PriceLevel {
            price,
            total_quantity,
            order_count,
            cumulative_total,
        });
    }
    levels
}

/// Both sides of one market's book, plus the derived statistics the
/// presentation layer renders.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    /// Buy levels, best (highest) price first
    pub bids: Vec<PriceLevel>,
    /// Sell levels, best (lowest) price first
    pub asks: Vec<PriceLevel>,
}

impl OrderBook {
    /// Builds both sides from one market's decoded orders.
    pub fn from_orders(orders: &[OrderState]) -> Self {
        Self {
            bids: aggregate(orders, Side::Buy),
            asks: aggregate(orders, Side::Sell),
        }
    }

    /// The highest live buy price, if any.
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.first().map(|level| level.price)
    }

    /// The lowest live sell price, if any.
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.first().map(|level| level.price)
    }

    /// The midpoint between best bid and best ask, when both sides are
    /// populated.
    pub fn mid_price(&self) -> Option<u64> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        Some(((bid as u128 + ask as u128) / 2) as u64)
    }

    /// Best ask minus best bid, when both sides are populated.
    ///
    /// A crossed book yields a negative spread, reported as-is.
    pub fn spread(&self) -> Option<i64> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        Some((ask as i128 - bid as i128) as i64)
    }
}
