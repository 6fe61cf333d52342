//! In-memory stand-in for the external ledger, good enough to drive the
//! query facade end to end without a validator.
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use clob_client::client::{AccountFilter, LedgerClient};
use clob_client::error::ClobResult;
use solana_program::{instruction::Instruction, pubkey::Pubkey};
use solana_sdk::signature::Signature;

pub struct MockLedger {
    accounts: Mutex<HashMap<Pubkey, Vec<u8>>>,
    pub submitted: Mutex<Vec<Instruction>>,
    signer: Pubkey,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            submitted: Mutex::new(Vec::new()),
            signer: Pubkey::new_unique(),
        }
    }

    pub fn insert_account(&self, address: Pubkey, data: Vec<u8>) {
        self.accounts.lock().unwrap().insert(address, data);
    }
}

fn matches(data: &[u8], filter: &AccountFilter) -> bool {
    data.len() >= filter.offset + filter.bytes.len()
        && data[filter.offset..filter.offset + filter.bytes.len()] == filter.bytes[..]
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn fetch_account(&self, address: &Pubkey) -> ClobResult<Option<Vec<u8>>> {
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }

    async fn fetch_program_accounts(
        &self,
        _program_id: &Pubkey,
        filters: Vec<AccountFilter>,
    ) -> ClobResult<Vec<(Pubkey, Vec<u8>)>> {
        // Every stored account is treated as owned by the program under test.
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, data)| filters.iter().all(|f| matches(data, f)))
            .map(|(address, data)| (*address, data.clone()))
            .collect())
    }

    async fn submit(&self, instruction: Instruction) -> ClobResult<Signature> {
        self.submitted.lock().unwrap().push(instruction);
        Ok(Signature::new_unique())
    }

    fn signer_pubkey(&self) -> Pubkey {
        self.signer
    }
}
