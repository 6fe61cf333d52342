use std::sync::Arc;

use clob_client::client::{ClobClient, LedgerClient};
use clob_client::error::ClobError;
use clob_client::instruction::ClobInstruction;
use clob_client::pda::{derive_market_address, derive_order_address};
use clob_client::state::{MarketState, OrderState, OrderStatus, Side};
use solana_program::pubkey::Pubkey;

pub mod common;
use crate::common::MockLedger;

fn market_account(market_id: u64, bump: u8) -> MarketState {
    MarketState {
        market_id,
        authority: Pubkey::new_unique(),
        base_mint: Pubkey::new_unique(),
        quote_mint: Pubkey::new_unique(),
        bump,
    }
}

fn order_account(
    order_id: u64,
    market: Pubkey,
    side: Side,
    price: u64,
    quantity: u64,
) -> OrderState {
    OrderState {
        order_id,
        owner: Pubkey::new_unique(),
        market,
        side,
        price,
        quantity,
        filled_quantity: 0,
        timestamp: 1_700_000_000,
        status: OrderStatus::Active,
        bump: 255,
    }
}

#[tokio::test]
async fn market_queries() {
    let ledger = Arc::new(MockLedger::new());
    let client = ClobClient::new(Arc::clone(&ledger), clob_client::ID);

    assert!(!client.is_market_initialized(1).await.unwrap());
    assert!(client.fetch_market(1).await.unwrap().is_none());

    let (market_address, bump) = derive_market_address(1, &clob_client::ID).unwrap();
    let market = market_account(1, bump);
    ledger.insert_account(market_address, market.to_bytes());

    assert!(client.is_market_initialized(1).await.unwrap());
    assert_eq!(client.fetch_market(1).await.unwrap(), Some(market));
}

#[tokio::test]
async fn market_id_mismatch_is_rejected() {
    let ledger = Arc::new(MockLedger::new());
    let client = ClobClient::new(Arc::clone(&ledger), clob_client::ID);

    // A market record claiming id 9 stored at the address derived for id 2.
    let (market_address, bump) = derive_market_address(2, &clob_client::ID).unwrap();
    ledger.insert_account(market_address, market_account(9, bump).to_bytes());

    assert!(matches!(
        client.fetch_market(2).await,
        Err(ClobError::MarketIdMismatch {
            expected: 2,
            actual: 9
        })
    ));
}

#[tokio::test]
async fn orderbook_over_a_mixed_address_space() {
    let ledger = Arc::new(MockLedger::new());
    let client = ClobClient::new(Arc::clone(&ledger), clob_client::ID);

    let (market_address, bump) = derive_market_address(1, &clob_client::ID).unwrap();
    ledger.insert_account(market_address, market_account(1, bump).to_bytes());

    // Live orders on both sides of market 1.
    for (order_id, side, price, quantity) in [
        (1, Side::Buy, 14_000_000, 1_000_000),
        (2, Side::Buy, 15_000_000, 1_000_000),
        (3, Side::Buy, 15_000_000, 500_000),
        (4, Side::Sell, 16_000_000, 2_000_000),
    ] {
        let (address, _) = derive_order_address(order_id, &clob_client::ID).unwrap();
        ledger.insert_account(
            address,
            order_account(order_id, market_address, side, price, quantity).to_bytes(),
        );
    }

    // An order on an unrelated market, filtered out server-side.
    let other_market = Pubkey::new_unique();
    let (address, _) = derive_order_address(50, &clob_client::ID).unwrap();
    ledger.insert_account(
        address,
        order_account(50, other_market, Side::Buy, 1, 1).to_bytes(),
    );

    // A corrupt candidate: passes both filters but carries a bad side tag.
    let mut poisoned = order_account(51, market_address, Side::Buy, 1, 1).to_bytes();
    poisoned[80] = 7;
    ledger.insert_account(Pubkey::new_unique(), poisoned);

    // Another corrupt candidate: filled quantity exceeds total quantity.
    let mut overfilled = order_account(52, market_address, Side::Buy, 1, 10);
    overfilled.filled_quantity = 11;
    ledger.insert_account(Pubkey::new_unique(), overfilled.to_bytes());

    // An account of a different kind entirely.
    ledger.insert_account(Pubkey::new_unique(), vec![0u8; 64]);

    let mut orders = client.fetch_orders_for_market(1).await.unwrap();
    orders.sort_by_key(|o| o.order_id);
    assert_eq!(
        orders.iter().map(|o| o.order_id).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );

    let book = client.load_orderbook(1).await.unwrap();
    assert_eq!(book.best_bid(), Some(15_000_000));
    assert_eq!(book.best_ask(), Some(16_000_000));
    assert_eq!(book.bids[0].total_quantity, 1_500_000);
    assert_eq!(book.bids[0].order_count, 2);
    assert_eq!(book.bids[1].cumulative_total, 2_500_000);
    assert_eq!(book.spread(), Some(1_000_000));
}

#[tokio::test]
async fn empty_market_yields_an_empty_book() {
    let ledger = Arc::new(MockLedger::new());
    let client = ClobClient::new(Arc::clone(&ledger), clob_client::ID);

    let book = client.load_orderbook(3).await.unwrap();
    assert!(book.bids.is_empty());
    assert!(book.asks.is_empty());
    assert_eq!(book.mid_price(), None);
    assert_eq!(book.spread(), None);
}

#[tokio::test]
async fn place_order_submission() {
    let ledger = Arc::new(MockLedger::new());
    let client = ClobClient::new(Arc::clone(&ledger), clob_client::ID);

    client
        .place_order(1, 42, Side::Buy, 15_000_000, 1_000_000)
        .await
        .unwrap();

    let submitted = ledger.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    let instruction = &submitted[0];
    assert_eq!(instruction.program_id, clob_client::ID);
    assert_eq!(
        instruction.data[..8],
        ClobInstruction::PlaceOrder.discriminator()
    );

    let (order_address, _) = derive_order_address(42, &clob_client::ID).unwrap();
    let (market_address, _) = derive_market_address(1, &clob_client::ID).unwrap();
    assert_eq!(instruction.accounts[0].pubkey, order_address);
    assert_eq!(instruction.accounts[1].pubkey, ledger.signer_pubkey());
    assert!(instruction.accounts[1].is_signer);
    assert_eq!(instruction.accounts[2].pubkey, market_address);
}

#[tokio::test]
async fn initialize_and_cancel_submissions() {
    let ledger = Arc::new(MockLedger::new());
    let client = ClobClient::new(Arc::clone(&ledger), clob_client::ID);

    let base_mint = Pubkey::new_unique();
    let quote_mint = Pubkey::new_unique();
    client
        .initialize_market(7, base_mint, quote_mint)
        .await
        .unwrap();
    client.cancel_order(42).await.unwrap();

    let submitted = ledger.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 2);
    assert_eq!(
        submitted[0].data[..8],
        ClobInstruction::InitializeMarket.discriminator()
    );
    assert_eq!(submitted[0].accounts[1].pubkey, base_mint);
    assert_eq!(submitted[0].accounts[2].pubkey, quote_mint);
    assert_eq!(
        submitted[1].data,
        ClobInstruction::CancelOrder.discriminator().to_vec()
    );
}
