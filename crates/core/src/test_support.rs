// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use holderscan_chain::{is_valid_address, ChainError, ChainReader, TokenMeta};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub fn addr(n: u8) -> Address {
    Address::repeat_byte(n)
}

/// In-memory chain that records how it was called
#[derive(Default)]
pub struct MockReader {
    balances: HashMap<Address, U256>,
    failing: HashSet<Address>,
    delay: Option<Duration>,
    reject_all: bool,
    calls: AtomicUsize,
    completed: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockReader {
    pub fn with_balance(mut self, address: Address, raw: u64) -> Self {
        self.balances.insert(address, U256::from(raw));
        self
    }

    pub fn with_failure(mut self, address: Address) -> Self {
        self.failing.insert(address);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Report every input as malformed, whatever its format
    pub fn rejecting_all(mut self) -> Self {
        self.reject_all = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Lookups that ran to the end, as opposed to being cancelled mid-flight
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl ChainReader for MockReader {
    fn is_valid_address(&self, text: &str) -> bool {
        !self.reject_all && is_valid_address(text)
    }

    async fn token_balance(&self, holder: Address) -> Result<U256, ChainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(&holder) {
            return Err(ChainError::transport("balanceOf", "connection reset"));
        }
        Ok(self.balances.get(&holder).copied().unwrap_or_default())
    }

    async fn token_meta(&self) -> Result<TokenMeta, ChainError> {
        Ok(TokenMeta {
            name: "Mock".into(),
            symbol: "MCK".into(),
            decimals: 0,
            total_supply: self
                .balances
                .values()
                .fold(U256::ZERO, |total, raw| total + *raw),
        })
    }
}
