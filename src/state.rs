//! Typed views over the program's account data.
//!
//! Every program account begins with an 8-byte discriminator identifying its
//! record kind, followed by a fixed little-endian field layout. The records
//! decoded here are plain owned values: decoding never performs I/O and never
//! keeps a reference into the source buffer.
use borsh::{BorshDeserialize, BorshSerialize};
use num_enum::TryFromPrimitive;
use solana_program::pubkey::Pubkey;
use std::convert::TryFrom;

use crate::error::{ClobError, ClobResult};

pub mod market;
pub mod order;

pub use market::MarketState;
pub use order::OrderState;

/// Length of the leading record discriminator.
pub const DISCRIMINATOR_LEN: usize = 8;

/// The side of the book an order rests on.
///
/// Encoded on the wire as a single byte, `0` for buy and `1` for sell.
#[derive(
    BorshDeserialize, BorshSerialize, TryFromPrimitive, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[repr(u8)]
pub enum Side {
    #[allow(missing_docs)]
    Buy,
    #[allow(missing_docs)]
    Sell,
}

/// The lifecycle state of an order account.
///
/// Encoded on the wire as a single byte in variant order.
#[derive(BorshDeserialize, BorshSerialize, TryFromPrimitive, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum OrderStatus {
    /// The order is resting and eligible for matching
    Active,
    /// The order has been completely filled
    Filled,
    /// The order was cancelled by its owner
    Cancelled,
}

/// Verifies a candidate buffer's discriminator and fixed length.
///
/// A buffer too short to even hold a discriminator is reported as truncated;
/// otherwise the discriminator is checked before the record length, so that a
/// full-length buffer of the wrong kind is always a mismatch.
pub(crate) fn check_record(
    data: &[u8],
    discriminator: &[u8; DISCRIMINATOR_LEN],
    record_len: usize,
) -> ClobResult {
    if data.len() < DISCRIMINATOR_LEN {
        return Err(ClobError::BufferTooShort {
            expected: record_len,
            actual: data.len(),
        });
    }
    if data[..DISCRIMINATOR_LEN] != discriminator[..] {
        return Err(ClobError::DiscriminatorMismatch);
    }
    if data.len() < record_len {
        return Err(ClobError::BufferTooShort {
            expected: record_len,
            actual: data.len(),
        });
    }
    Ok(())
}

pub(crate) fn read_u64(data: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}

pub(crate) fn read_pubkey(data: &[u8], offset: usize) -> Pubkey {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&data[offset..offset + 32]);
    Pubkey::new_from_array(bytes)
}

pub(crate) fn read_side(data: &[u8], offset: usize) -> ClobResult<Side> {
    Side::try_from(data[offset]).map_err(|_| ClobError::InvalidEnumTag("side", data[offset]))
}

pub(crate) fn read_status(data: &[u8], offset: usize) -> ClobResult<OrderStatus> {
    OrderStatus::try_from(data[offset])
        .map_err(|_| ClobError::InvalidEnumTag("order status", data[offset]))
}
