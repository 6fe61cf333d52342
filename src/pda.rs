//! Deterministic derivation of the program's account addresses.
//!
//! Market and order accounts live at program-derived addresses computed from
//! a seed prefix, the record's little-endian identifier, and the program id.
//! Derivation is a pure function: identical inputs always yield the identical
//! `(address, bump)` pair.
use solana_program::pubkey::Pubkey;

use crate::error::{ClobError, ClobResult};

/// Seed prefix of market accounts.
pub const MARKET_SEED: &[u8] = b"market";
/// Seed prefix of order accounts.
pub const ORDER_SEED: &[u8] = b"order";

/// Computes the address of the market account for `market_id`.
///
/// The returned bump is the largest salt for which the candidate address is
/// off-curve; the search is supplied by the ledger's addressing scheme. An
/// exhausted search space is a fatal configuration error.
pub fn derive_market_address(market_id: u64, program_id: &Pubkey) -> ClobResult<(Pubkey, u8)> {
    Pubkey::try_find_program_address(&[MARKET_SEED, &market_id.to_le_bytes()], program_id)
        .ok_or(ClobError::NoValidBumpFound)
}

/// Computes the address of the order account for `order_id`.
pub fn derive_order_address(order_id: u64, program_id: &Pubkey) -> ClobResult<(Pubkey, u8)> {
    Pubkey::try_find_program_address(&[ORDER_SEED, &order_id.to_le_bytes()], program_id)
        .ok_or(ClobError::NoValidBumpFound)
}
