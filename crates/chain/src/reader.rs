// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{address, TokenAmount};
use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The node could not be reached or answered with an rpc error
    #[error("{call} failed: {message}")]
    Transport { call: &'static str, message: String },
}

impl ChainError {
    pub fn transport(call: &'static str, err: impl ToString) -> Self {
        ChainError::Transport {
            call,
            message: err.to_string(),
        }
    }
}

/// Static facts about the token read once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenMeta {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
}

impl TokenMeta {
    /// Scale a raw balance of this token
    pub fn amount(&self, raw: U256) -> TokenAmount {
        TokenAmount::new(raw, self.decimals)
    }

    /// Six fractional digits followed by the symbol
    pub fn format(&self, amount: &TokenAmount) -> String {
        format!("{} {}", amount.format_fixed(6), self.symbol)
    }
}

/// Read only view of a single ERC-20 token
#[async_trait]
pub trait ChainReader: Send + Sync + 'static {
    /// Pure format check, never touches the network
    fn is_valid_address(&self, text: &str) -> bool {
        address::is_valid_address(text)
    }

    /// Raw `balanceOf` for the holder
    async fn token_balance(&self, holder: Address) -> Result<U256, ChainError>;

    async fn token_meta(&self) -> Result<TokenMeta, ChainError>;
}
