//! Builders for the program's instructions.
//!
//! Each instruction's data is its 8-byte discriminator followed by the
//! borsh-serialized arguments in declared order. The account list per
//! instruction is position-sensitive and part of the program's fixed calling
//! convention; it is reproduced here byte-for-byte and never validated.
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::state::Side;

/// Describes all possible instructions and their required accounts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClobInstruction {
    /// Create and initialize a new market
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description                |
    /// |-------|----------|--------|----------------------------|
    /// | 0     | ✅       | ❌     | The market account         |
    /// | 1     | ❌       | ❌     | The base asset mint        |
    /// | 2     | ❌       | ❌     | The quote asset mint       |
    /// | 3     | ✅       | ✅     | The market authority       |
    /// | 4     | ❌       | ❌     | The system program         |
    InitializeMarket,
    /// Place a new order on a market
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description                |
    /// |-------|----------|--------|----------------------------|
    /// | 0     | ✅       | ❌     | The order account          |
    /// | 1     | ✅       | ✅     | The order owner            |
    /// | 2     | ❌       | ❌     | The market account         |
    /// | 3     | ❌       | ❌     | The token program          |
    /// | 4     | ❌       | ❌     | The system program         |
    PlaceOrder,
    /// Cancel an existing active order
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description                |
    /// |-------|----------|--------|----------------------------|
    /// | 0     | ✅       | ❌     | The order account          |
    /// | 1     | ✅       | ✅     | The order owner            |
    CancelOrder,
    /// Fill an active order, settling token transfers between the parties
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description                |
    /// |-------|----------|--------|----------------------------|
    /// | 0     | ✅       | ❌     | The order account          |
    /// | 1     | ❌       | ✅     | The buyer                  |
    /// | 2     | ❌       | ✅     | The seller                 |
    /// | 3     | ✅       | ❌     | The buyer base token account  |
    /// | 4     | ✅       | ❌     | The buyer quote token account |
    /// | 5     | ✅       | ❌     | The seller base token account |
    /// | 6     | ✅       | ❌     | The seller quote token account|
    /// | 7     | ❌       | ❌     | The token program          |
    FillOrder,
    /// Log a market's orderbook summary (read-only)
    ///
    /// Required accounts
    ///
    /// | index | writable | signer | description                |
    /// |-------|----------|--------|----------------------------|
    /// | 0     | ❌       | ❌     | The market account         |
    GetOrderbook,
}

impl ClobInstruction {
    /// The 8-byte constant tagging this instruction on the wire.
    pub const fn discriminator(self) -> [u8; 8] {
        match self {
            ClobInstruction::InitializeMarket => [35, 35, 189, 193, 155, 48, 170, 203],
            ClobInstruction::PlaceOrder => [51, 194, 155, 175, 109, 130, 96, 106],
            ClobInstruction::CancelOrder => [95, 129, 237, 240, 8, 49, 223, 132],
            ClobInstruction::FillOrder => [232, 122, 115, 25, 199, 143, 136, 162],
            ClobInstruction::GetOrderbook => [190, 188, 5, 239, 206, 181, 224, 12],
        }
    }
}

fn pack<P: BorshSerialize>(instruction: ClobInstruction, params: &P) -> Vec<u8> {
    let mut data = instruction.discriminator().to_vec();
    params.serialize(&mut data).unwrap();
    data
}

#[allow(missing_docs)]
pub mod initialize_market {
    use super::*;

    #[derive(BorshDeserialize, BorshSerialize)]
    /// The required arguments for an initialize_market instruction.
    pub struct Params {
        pub market_id: u64,
        pub base_mint: Pubkey,
        pub quote_mint: Pubkey,
    }

    /// The required accounts for an initialize_market instruction.
    pub struct Accounts<'a> {
        /// The market account, at its derived address
        pub market: &'a Pubkey,
        pub base_mint: &'a Pubkey,
        pub quote_mint: &'a Pubkey,
        /// Pays for the account creation and becomes the market authority
        pub authority: &'a Pubkey,
    }
}

#[allow(missing_docs)]
pub mod place_order {
    use super::*;

    #[derive(BorshDeserialize, BorshSerialize)]
    /// The required arguments for a place_order instruction.
    pub struct Params {
        /// Must be unique per program deployment to avoid address collision
        pub order_id: u64,
        pub side: Side,
        /// Quote units per base unit, fixed-point with 6 implied decimals
        pub price: u64,
        /// Base units, fixed-point with 6 implied decimals
        pub quantity: u64,
    }

    /// The required accounts for a place_order instruction.
    pub struct Accounts<'a> {
        /// The order account, at its derived address
        pub order: &'a Pubkey,
        /// Pays for the account creation and owns the order
        pub user: &'a Pubkey,
        pub market: &'a Pubkey,
    }
}

#[allow(missing_docs)]
pub mod cancel_order {
    use super::*;

    /// The required accounts for a cancel_order instruction.
    ///
    /// The order to cancel is identified by its account; the instruction
    /// carries no arguments.
    pub struct Accounts<'a> {
        pub order: &'a Pubkey,
        /// Must match the order's recorded owner
        pub user: &'a Pubkey,
    }
}

#[allow(missing_docs)]
pub mod fill_order {
    use super::*;

    #[derive(BorshDeserialize, BorshSerialize)]
    /// The required arguments for a fill_order instruction.
    pub struct Params {
        /// Base units to fill, at most the order's remaining quantity
        pub fill_quantity: u64,
    }

    /// The required accounts for a fill_order instruction.
    pub struct Accounts<'a> {
        pub order: &'a Pubkey,
        pub buyer: &'a Pubkey,
        pub seller: &'a Pubkey,
        pub buyer_base_token: &'a Pubkey,
        pub buyer_quote_token: &'a Pubkey,
        pub seller_base_token: &'a Pubkey,
        pub seller_quote_token: &'a Pubkey,
    }
}

#[allow(missing_docs)]
pub mod get_orderbook {
    use super::*;

    /// The required accounts for a get_orderbook instruction.
    pub struct Accounts<'a> {
        pub market: &'a Pubkey,
    }
}

/// Create and initialize a new market.
///
/// The market account must not exist yet; the program creates it at the
/// address derived from `params.market_id`.
pub fn initialize_market(
    program_id: Pubkey,
    accounts: initialize_market::Accounts,
    params: initialize_market::Params,
) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(*accounts.market, false),
            AccountMeta::new_readonly(*accounts.base_mint, false),
            AccountMeta::new_readonly(*accounts.quote_mint, false),
            AccountMeta::new(*accounts.authority, true),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: pack(ClobInstruction::InitializeMarket, &params),
    }
}

/// Place a new order on a market.
pub fn place_order(
    program_id: Pubkey,
    accounts: place_order::Accounts,
    params: place_order::Params,
) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(*accounts.order, false),
            AccountMeta::new(*accounts.user, true),
            AccountMeta::new_readonly(*accounts.market, false),
            AccountMeta::new_readonly(spl_token::ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: pack(ClobInstruction::PlaceOrder, &params),
    }
}

/// Cancel an existing active order.
pub fn cancel_order(program_id: Pubkey, accounts: cancel_order::Accounts) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(*accounts.order, false),
            AccountMeta::new(*accounts.user, true),
        ],
        data: ClobInstruction::CancelOrder.discriminator().to_vec(),
    }
}

/// Fill an active order, settling token transfers between buyer and seller.
pub fn fill_order(
    program_id: Pubkey,
    accounts: fill_order::Accounts,
    params: fill_order::Params,
) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(*accounts.order, false),
            AccountMeta::new_readonly(*accounts.buyer, true),
            AccountMeta::new_readonly(*accounts.seller, true),
            AccountMeta::new(*accounts.buyer_base_token, false),
            AccountMeta::new(*accounts.buyer_quote_token, false),
            AccountMeta::new(*accounts.seller_base_token, false),
            AccountMeta::new(*accounts.seller_quote_token, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ],
        data: pack(ClobInstruction::FillOrder, &params),
    }
}

/// Log a market's orderbook summary on-chain (read-only).
pub fn get_orderbook(program_id: Pubkey, accounts: get_orderbook::Accounts) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![AccountMeta::new_readonly(*accounts.market, false)],
        data: ClobInstruction::GetOrderbook.discriminator().to_vec(),
    }
}
