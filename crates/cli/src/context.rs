// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::Address;
use anyhow::{Context, Result};
use holderscan_chain::{parse_address, ChainReader, Erc20Reader, ProviderConfig, TokenMeta};
use holderscan_config::AppConfig;
use holderscan_core::BalanceFetcher;
use holderscan_explorer::EtherscanClient;
use std::sync::Arc;
use tracing::info;

/// Everything a command needs to talk to the chain, built once per invocation
pub struct ChainContext {
    pub token: Address,
    pub chain_id: u64,
    pub meta: TokenMeta,
    pub fetcher: BalanceFetcher<dyn ChainReader>,
}

impl ChainContext {
    /// Connect to the configured node and read the token metadata
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let token = parse_address(&config.token().address).with_context(|| {
            format!(
                "Token address '{}' failed checksum validation",
                config.token().address
            )
        })?;

        let provider = ProviderConfig::new(config.chain().rpc()?, config.chain().rpc_auth.clone())
            .create_readonly_provider()
            .await?;
        let chain_id = provider.chain_id();
        info!(chain = %config.chain().name, chain_id, %token, "Reading token");

        let reader: Arc<dyn ChainReader> = Arc::new(Erc20Reader::new(provider, token));
        let meta = reader
            .token_meta()
            .await
            .with_context(|| format!("Could not read metadata of token {}", token))?;
        info!(symbol = %meta.symbol, decimals = meta.decimals, "Loaded token metadata");

        let fetcher = BalanceFetcher::new(reader, meta.decimals, config.fetcher());

        Ok(Self {
            token,
            chain_id,
            meta,
            fetcher,
        })
    }
}

pub fn explorer(config: &AppConfig) -> Result<EtherscanClient> {
    EtherscanClient::from_config(config.explorer()).context("Could not create explorer client")
}
