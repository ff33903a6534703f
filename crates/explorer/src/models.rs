// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{Address, U256};
use serde::Serialize;

/// A token movement as reported by the explorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub hash: String,
    pub from: Address,
    pub to: Address,
    /// Raw token units
    pub value: U256,
    /// Unix seconds
    pub timestamp: u64,
}

impl Transfer {
    pub fn new(from: Address, to: Address, timestamp: u64) -> Self {
        Self {
            hash: String::new(),
            from,
            to,
            value: U256::ZERO,
            timestamp,
        }
    }
}

/// A normal (native currency) transaction of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountTx {
    pub hash: String,
    pub from: Address,
    /// Empty for contract creation
    pub to: Option<Address>,
    /// Wei
    pub value: U256,
    pub timestamp: u64,
}
