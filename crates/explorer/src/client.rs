// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{parse_transactions, parse_transfers, AccountTx, ExplorerError, Transfer};
use alloy::primitives::Address;
use async_trait::async_trait;
use holderscan_config::ExplorerConfig;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Transaction history source
#[async_trait]
pub trait ExplorerClient: Send + Sync + 'static {
    /// Most recent token transfers of `contract`, newest first
    async fn recent_transfers(&self, contract: Address) -> Result<Vec<Transfer>, ExplorerError>;

    /// Normal transactions sent or received by `address`
    async fn transactions(&self, address: Address) -> Result<Vec<AccountTx>, ExplorerError>;
}

/// Client for polygonscan, etherscan and their clones
pub struct EtherscanClient {
    url: Url,
    api_key: String,
    chain_id: Option<u64>,
    http: reqwest::Client,
}

impl EtherscanClient {
    pub fn new(url: Url, api_key: String, chain_id: Option<u64>) -> Result<Self, ExplorerError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            url,
            api_key,
            chain_id,
            http,
        })
    }

    pub fn from_config(config: &ExplorerConfig) -> Result<Self, ExplorerError> {
        let url = Url::parse(&config.url)?;
        Self::new(url, config.api_key.clone(), config.chain_id)
    }

    fn params(
        &self,
        action: &'static str,
        target: (&'static str, Address),
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("module", "account".to_string()),
            ("action", action.to_string()),
            (target.0, target.1.to_checksum(None)),
            ("sort", "desc".to_string()),
            ("apikey", self.api_key.clone()),
        ];
        if let Some(chain_id) = self.chain_id {
            params.insert(0, ("chainid", chain_id.to_string()));
        }
        params
    }

    async fn get(&self, params: &[(&'static str, String)]) -> Result<(u16, String), ExplorerError> {
        let response = self
            .http
            .get(self.url.clone())
            .query(params)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "Explorer responded");
        Ok((status, body))
    }
}

#[async_trait]
impl ExplorerClient for EtherscanClient {
    async fn recent_transfers(&self, contract: Address) -> Result<Vec<Transfer>, ExplorerError> {
        let params = self.params("tokentx", ("contractaddress", contract));
        let (status, body) = self.get(&params).await?;
        let transfers = parse_transfers(status, &body)?;
        info!(%contract, count = transfers.len(), "Fetched recent transfers");
        Ok(transfers)
    }

    async fn transactions(&self, address: Address) -> Result<Vec<AccountTx>, ExplorerError> {
        let params = self.params("txlist", ("address", address));
        let (status, body) = self.get(&params).await?;
        let txs = parse_transactions(status, &body)?;
        info!(%address, count = txs.len(), "Fetched account transactions");
        Ok(txs)
    }
}
