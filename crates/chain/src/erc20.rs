// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{ChainError, ChainReader, EthProvider, TokenMeta};
use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    sol,
};
use async_trait::async_trait;
use tracing::{debug, trace};

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    interface IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address owner) external view returns (uint256);
    }
}

/// `ChainReader` backed by `eth_call` against a deployed ERC-20 contract
#[derive(Clone)]
pub struct Erc20Reader<P> {
    provider: EthProvider<P>,
    token: Address,
}

impl<P: Provider + Clone + 'static> Erc20Reader<P> {
    pub fn new(provider: EthProvider<P>, token: Address) -> Self {
        Self { provider, token }
    }
}

#[async_trait]
impl<P: Provider + Clone + 'static> ChainReader for Erc20Reader<P> {
    async fn token_balance(&self, holder: Address) -> Result<U256, ChainError> {
        let contract = IERC20::new(self.token, self.provider.provider());
        let balance = contract
            .balanceOf(holder)
            .call()
            .await
            .map_err(|e| ChainError::transport("balanceOf", e))?;
        trace!(%holder, %balance, "balanceOf");
        Ok(balance)
    }

    async fn token_meta(&self) -> Result<TokenMeta, ChainError> {
        let contract = IERC20::new(self.token, self.provider.provider());
        let name = contract
            .name()
            .call()
            .await
            .map_err(|e| ChainError::transport("name", e))?;
        let symbol = contract
            .symbol()
            .call()
            .await
            .map_err(|e| ChainError::transport("symbol", e))?;
        let decimals = contract
            .decimals()
            .call()
            .await
            .map_err(|e| ChainError::transport("decimals", e))?;
        let total_supply = contract
            .totalSupply()
            .call()
            .await
            .map_err(|e| ChainError::transport("totalSupply", e))?;

        debug!(token = %self.token, %symbol, decimals, "Loaded token metadata");
        Ok(TokenMeta {
            name,
            symbol,
            decimals,
            total_supply,
        })
    }
}
