//! Ledger access and the market/order query facade.
//!
//! All I/O in the crate goes through the [`LedgerClient`] trait, so the
//! facade can be driven by the real RPC transport in production and by an
//! in-memory ledger in tests. The facade holds no mutable state and caches
//! nothing: every call re-fetches and re-decodes, and an abandoned call
//! simply discards its pending result.
use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, RpcFilterType},
};
use solana_program::{instruction::Instruction, pubkey::Pubkey};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use tracing::{debug, warn};

use crate::{
    error::{ClobError, ClobResult},
    instruction,
    orderbook::OrderBook,
    pda::{derive_market_address, derive_order_address},
    state::{order::ORDER_MARKET_OFFSET, MarketState, OrderState, Side},
};

/// A single memcmp predicate applied server-side when listing program
/// accounts: the account's bytes at `offset` must equal `bytes` exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFilter {
    #[allow(missing_docs)]
    pub offset: usize,
    #[allow(missing_docs)]
    pub bytes: Vec<u8>,
}

/// The external ledger collaborator.
///
/// Reads return raw account bytes; [`submit`][`LedgerClient::submit`] signs
/// and lands a single instruction and reports the outcome verbatim. No
/// implementation is expected to retry, and none of the facade's callers
/// will either.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fetches one account's data, or `None` if the account does not exist.
    async fn fetch_account(&self, address: &Pubkey) -> ClobResult<Option<Vec<u8>>>;

    /// Lists the accounts owned by `program_id` matching every filter.
    async fn fetch_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<AccountFilter>,
    ) -> ClobResult<Vec<(Pubkey, Vec<u8>)>>;

    /// Signs and submits one instruction, returning its confirmation id.
    async fn submit(&self, instruction: Instruction) -> ClobResult<Signature>;

    /// The public key that [`submit`][`LedgerClient::submit`] signs with.
    fn signer_pubkey(&self) -> Pubkey;
}

// The connection is a read-mostly shared resource; concurrent queries over
// one clone are safe since nothing here mutates shared state.
#[async_trait]
impl<L: LedgerClient + ?Sized> LedgerClient for std::sync::Arc<L> {
    async fn fetch_account(&self, address: &Pubkey) -> ClobResult<Option<Vec<u8>>> {
        (**self).fetch_account(address).await
    }

    async fn fetch_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<AccountFilter>,
    ) -> ClobResult<Vec<(Pubkey, Vec<u8>)>> {
        (**self).fetch_program_accounts(program_id, filters).await
    }

    async fn submit(&self, instruction: Instruction) -> ClobResult<Signature> {
        (**self).submit(instruction).await
    }

    fn signer_pubkey(&self) -> Pubkey {
        (**self).signer_pubkey()
    }
}

/// [`LedgerClient`] over a JSON-RPC connection, signing submissions with a
/// held payer keypair.
pub struct RpcLedgerClient {
    rpc: RpcClient,
    payer: Keypair,
}

impl RpcLedgerClient {
    /// Connects at confirmed commitment.
    pub fn new(rpc_url: String, payer: Keypair) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed()),
            payer,
        }
    }
}

#[async_trait]
impl LedgerClient for RpcLedgerClient {
    async fn fetch_account(&self, address: &Pubkey) -> ClobResult<Option<Vec<u8>>> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await?;
        Ok(response.value.map(|account| account.data))
    }

    async fn fetch_program_accounts(
        &self,
        program_id: &Pubkey,
        filters: Vec<AccountFilter>,
    ) -> ClobResult<Vec<(Pubkey, Vec<u8>)>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(
                filters
                    .into_iter()
                    .map(|f| RpcFilterType::Memcmp(Memcmp::new_raw_bytes(f.offset, f.bytes)))
                    .collect(),
            ),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };
        let accounts = self
            .rpc
            .get_program_accounts_with_config(program_id, config)
            .await?;
        Ok(accounts
            .into_iter()
            .map(|(address, account)| (address, account.data))
            .collect())
    }

    async fn submit(&self, instruction: Instruction) -> ClobResult<Signature> {
        let blockhash = self.rpc.get_latest_blockhash().await?;
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&self.payer.pubkey()),
            &[&self.payer],
            blockhash,
        );
        Ok(self.rpc.send_and_confirm_transaction(&transaction).await?)
    }

    fn signer_pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }
}

/// Query and submission facade for one deployment of the program.
pub struct ClobClient<L> {
    ledger: L,
    program_id: Pubkey,
}

impl<L: LedgerClient> ClobClient<L> {
    /// Wraps a ledger connection for the program deployed at `program_id`.
    pub fn new(ledger: L, program_id: Pubkey) -> Self {
        Self { ledger, program_id }
    }

    /// Whether the market account for `market_id` exists on the ledger.
    pub async fn is_market_initialized(&self, market_id: u64) -> ClobResult<bool> {
        let (address, _) = derive_market_address(market_id, &self.program_id)?;
        Ok(self.ledger.fetch_account(&address).await?.is_some())
    }

    /// Fetches and decodes the market record for `market_id`.
    ///
    /// A missing account is `None`. A market account whose recorded id does
    /// not match the derivation seed is reported as an error rather than
    /// trusted.
    pub async fn fetch_market(&self, market_id: u64) -> ClobResult<Option<MarketState>> {
        let (address, _) = derive_market_address(market_id, &self.program_id)?;
        let data = match self.ledger.fetch_account(&address).await? {
            Some(data) => data,
            None => return Ok(None),
        };
        let market = MarketState::from_buffer(&data)?;
        if market.market_id != market_id {
            return Err(ClobError::MarketIdMismatch {
                expected: market_id,
                actual: market.market_id,
            });
        }
        Ok(Some(market))
    }

    /// Fetches and decodes the order record for `order_id`.
    pub async fn fetch_order(&self, order_id: u64) -> ClobResult<Option<OrderState>> {
        let (address, _) = derive_order_address(order_id, &self.program_id)?;
        match self.ledger.fetch_account(&address).await? {
            Some(data) => Ok(Some(OrderState::from_buffer(&data)?)),
            None => Ok(None),
        }
    }

    /// Fetches every order account belonging to one market.
    ///
    /// Candidates are filtered server-side on the order discriminator and
    /// the market address at its fixed field offset. Accounts that pass the
    /// filters but fail to decode are logged and skipped; one corrupt
    /// account never aborts the batch.
    pub async fn fetch_orders_for_market(&self, market_id: u64) -> ClobResult<Vec<OrderState>> {
        let (market_address, _) = derive_market_address(market_id, &self.program_id)?;
        let filters = vec![
            AccountFilter {
                offset: 0,
                bytes: OrderState::DISCRIMINATOR.to_vec(),
            },
            AccountFilter {
                offset: ORDER_MARKET_OFFSET,
                bytes: market_address.to_bytes().to_vec(),
            },
        ];
        let candidates = self
            .ledger
            .fetch_program_accounts(&self.program_id, filters)
            .await?;
        debug!(
            market = %market_address,
            candidates = candidates.len(),
            "fetched order account candidates"
        );

        let mut orders = Vec::with_capacity(candidates.len());
        for (address, data) in candidates {
            match OrderState::from_buffer(&data) {
                Ok(order) => orders.push(order),
                Err(error) => {
                    warn!(account = %address, %error, "skipping undecodable order account")
                }
            }
        }
        Ok(orders)
    }

    /// Fetches a market's orders and aggregates them into a book.
    ///
    /// A market with no live orders yields an empty book, not an error.
    pub async fn load_orderbook(&self, market_id: u64) -> ClobResult<OrderBook> {
        let orders = self.fetch_orders_for_market(market_id).await?;
        Ok(OrderBook::from_orders(&orders))
    }

    /// Builds and submits an initialize_market instruction, with the ledger
    /// client's signer as the market authority.
    pub async fn initialize_market(
        &self,
        market_id: u64,
        base_mint: Pubkey,
        quote_mint: Pubkey,
    ) -> ClobResult<Signature> {
        let (market, _) = derive_market_address(market_id, &self.program_id)?;
        let authority = self.ledger.signer_pubkey();
        let instruction = instruction::initialize_market(
            self.program_id,
            instruction::initialize_market::Accounts {
                market: &market,
                base_mint: &base_mint,
                quote_mint: &quote_mint,
                authority: &authority,
            },
            instruction::initialize_market::Params {
                market_id,
                base_mint,
                quote_mint,
            },
        );
        self.ledger.submit(instruction).await
    }

    /// Builds and submits a place_order instruction, with the ledger
    /// client's signer as the order owner.
    pub async fn place_order(
        &self,
        market_id: u64,
        order_id: u64,
        side: Side,
        price: u64,
        quantity: u64,
    ) -> ClobResult<Signature> {
        let (market, _) = derive_market_address(market_id, &self.program_id)?;
        let (order, _) = derive_order_address(order_id, &self.program_id)?;
        let user = self.ledger.signer_pubkey();
        let instruction = instruction::place_order(
            self.program_id,
            instruction::place_order::Accounts {
                order: &order,
                user: &user,
                market: &market,
            },
            instruction::place_order::Params {
                order_id,
                side,
                price,
                quantity,
            },
        );
        self.ledger.submit(instruction).await
    }

    /// Builds and submits a cancel_order instruction.
    pub async fn cancel_order(&self, order_id: u64) -> ClobResult<Signature> {
        let (order, _) = derive_order_address(order_id, &self.program_id)?;
        let user = self.ledger.signer_pubkey();
        let instruction = instruction::cancel_order(
            self.program_id,
            instruction::cancel_order::Accounts {
                order: &order,
                user: &user,
            },
        );
        self.ledger.submit(instruction).await
    }
}
