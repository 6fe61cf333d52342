//! The market state struct identifies one trading pair instance and its
//! administering authority.
use solana_program::pubkey::Pubkey;

use super::{check_record, read_pubkey, read_u64, DISCRIMINATOR_LEN};
use crate::error::ClobResult;

/// One trading pair instance.
///
/// The account lives at the address derived from
/// [`derive_market_address`][`crate::pda::derive_market_address`] with the
/// record's own `market_id`; a decoded market is only trusted once those two
/// ids agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketState {
    /// External market identifier, also the derivation seed of the account address
    pub market_id: u64,
    /// The entity permitted to administer the market
    pub authority: Pubkey,
    /// Mint of the traded (base) asset
    pub base_mint: Pubkey,
    /// Mint of the settlement (quote) asset
    pub quote_mint: Pubkey,
    /// Derivation salt recorded for address verification
    pub bump: u8,
}

impl MarketState {
    /// The discriminator tagging market accounts.
    pub const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = [219, 190, 213, 55, 0, 227, 198, 154];
    /// Expected size in bytes of an encoded market account.
    pub const LEN: usize = DISCRIMINATOR_LEN + 8 + 32 + 32 + 32 + 1;

    /// Decodes a market record from raw account data.
    pub fn from_buffer(data: &[u8]) -> ClobResult<Self> {
        check_record(data, &Self::DISCRIMINATOR, Self::LEN)?;
        Ok(Self {
            market_id: read_u64(data, 8),
            authority: read_pubkey(data, 16),
            base_mint: read_pubkey(data, 48),
            quote_mint: read_pubkey(data, 80),
            bump: data[112],
        })
    }

    /// Encodes the record into its fixed account layout, discriminator included.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::LEN);
        data.extend_from_slice(&Self::DISCRIMINATOR);
        data.extend_from_slice(&self.market_id.to_le_bytes());
        data.extend_from_slice(self.authority.as_ref());
        data.extend_from_slice(self.base_mint.as_ref());
        data.extend_from_slice(self.quote_mint.as_ref());
        data.push(self.bump);
        data
    }
}
