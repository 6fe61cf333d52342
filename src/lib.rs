#![warn(missing_docs)]
/*!
Off-chain client library for the CLOB on-chain orderbook program.

## Overview

This crate is the typed boundary between a user interface and the on-chain
central limit orderbook program. The program itself runs on the ledger and is
only reachable through account reads and signed instruction submissions; this
library handles everything on the client's side of that boundary:

- deriving the deterministic addresses of market and order accounts from
  their numeric identifiers ([`pda`])
- decoding raw account bytes into typed [`MarketState`][`state::market::MarketState`]
  and [`OrderState`][`state::order::OrderState`] records, and rejecting
  buffers that do not carry the expected discriminator ([`state`])
- building discriminator-prefixed instructions with the exact account
  ordering the program expects ([`instruction`])
- aggregating the resting orders of one market into sorted, cumulative
  bid and ask price levels ([`orderbook`])
- orchestrating the fetch/decode/aggregate cycle over an abstract ledger
  connection ([`client`])

## Purity

Address derivation, the account codec, and orderbook aggregation are pure
functions with no I/O. All network access is confined to the
[`client`] module behind the [`LedgerClient`][`client::LedgerClient`] trait,
so the rest of the crate can be exercised without a live ledger.

## Submitting instructions

Instruction builders only produce payloads. Submission goes through the
ledger client, is never retried here, and any rejection is surfaced to the
caller verbatim. The account ordering per instruction is part of the
program's calling convention and is reproduced byte-for-byte; see the tables
in [`instruction`].
*/

pub mod client;
pub mod error;
/// Instruction builders and their wire-format constants
pub mod instruction;
/// Orderbook aggregation over decoded order records
pub mod orderbook;
/// Deterministic program-derived account addresses
pub mod pda;
/// Describes the different account layouts that the program uses to encode state
pub mod state;

use solana_program::declare_id;

declare_id!("FhxmHdczQUm3unCvVN6EWpbv5s3ivf5jJZ5U6fyc1gwn");
