//! The order state struct tracks one resting or historical order.
use solana_program::pubkey::Pubkey;

use super::{
    check_record, read_pubkey, read_side, read_status, read_u64, OrderStatus, Side,
    DISCRIMINATOR_LEN,
};
use crate::error::{ClobError, ClobResult};

/// One order account.
///
/// Prices are quote-asset units per base-asset unit and quantities are
/// base-asset units, both fixed-point with 6 implied decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderState {
    /// Caller-chosen identifier, unique per program deployment, also the
    /// derivation seed of the account address
    pub order_id: u64,
    /// The wallet that placed the order
    pub owner: Pubkey,
    /// Address of the market account this order belongs to
    pub market: Pubkey,
    #[allow(missing_docs)]
    pub side: Side,
    #[allow(missing_docs)]
    pub price: u64,
    #[allow(missing_docs)]
    pub quantity: u64,
    /// Invariant: `filled_quantity <= quantity`
    pub filled_quantity: u64,
    /// Ledger timestamp at placement
    pub timestamp: u64,
    #[allow(missing_docs)]
    pub status: OrderStatus,
    /// Derivation salt recorded for address verification
    pub bump: u8,
}

/// Byte offset of the `market` field inside an encoded order account, used
/// for server-side memcmp filtering.
pub const ORDER_MARKET_OFFSET: usize = 48;

impl OrderState {
    /// The discriminator tagging order accounts.
    pub const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = [134, 173, 223, 185, 77, 86, 28, 51];
    /// Expected size in bytes of an encoded order account.
    pub const LEN: usize = DISCRIMINATOR_LEN + 8 + 32 + 32 + 1 + 8 + 8 + 8 + 8 + 1 + 1;

    /// Decodes an order record from raw account data.
    ///
    /// A record whose filled quantity exceeds its total quantity is corrupt
    /// and rejected here, so that `remaining` stays well-defined for every
    /// decoded order.
    pub fn from_buffer(data: &[u8]) -> ClobResult<Self> {
        check_record(data, &Self::DISCRIMINATOR, Self::LEN)?;
        let order = Self {
            order_id: read_u64(data, 8),
            owner: read_pubkey(data, 16),
            market: read_pubkey(data, ORDER_MARKET_OFFSET),
            side: read_side(data, 80)?,
            price: read_u64(data, 81),
            quantity: read_u64(data, 89),
            filled_quantity: read_u64(data, 97),
            timestamp: read_u64(data, 105),
            status: read_status(data, 113)?,
            bump: data[114],
        };
        if order.filled_quantity > order.quantity {
            return Err(ClobError::InvalidFillQuantity {
                quantity: order.quantity,
                filled: order.filled_quantity,
            });
        }
        Ok(order)
    }

    /// Encodes the record into its fixed account layout, discriminator included.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::LEN);
        data.extend_from_slice(&Self::DISCRIMINATOR);
        data.extend_from_slice(&self.order_id.to_le_bytes());
        data.extend_from_slice(self.owner.as_ref());
        data.extend_from_slice(self.market.as_ref());
        data.push(self.side as u8);
        data.extend_from_slice(&self.price.to_le_bytes());
        data.extend_from_slice(&self.quantity.to_le_bytes());
        data.extend_from_slice(&self.filled_quantity.to_le_bytes());
        data.extend_from_slice(&self.timestamp.to_le_bytes());
        data.push(self.status as u8);
        data.push(self.bump);
        data
    }

    /// The unfilled portion of the order.
    pub fn remaining(&self) -> u64 {
        self.quantity - self.filled_quantity
    }

    /// Whether the order is eligible for orderbook display.
    pub fn is_live(&self) -> bool {
        self.status == OrderStatus::Active && self.remaining() > 0
    }
}
