// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    providers::{DynProvider, Provider, ProviderBuilder},
    transports::{
        http::{
            reqwest::{
                header::{HeaderMap, HeaderValue, AUTHORIZATION},
                Client,
            },
            Http,
        },
        ws::{WebSocketConfig, WsConnect},
        Authorization,
    },
};
use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use holderscan_config::{RpcAuth, RpcEndpoint};
use std::sync::Arc;
use tracing::info;

pub trait AuthConversions {
    fn to_header_value(&self) -> Option<HeaderValue>;
    fn to_ws_auth(&self) -> Option<Authorization>;
}

impl AuthConversions for RpcAuth {
    fn to_header_value(&self) -> Option<HeaderValue> {
        match self {
            RpcAuth::None => None,
            RpcAuth::Basic { username, password } => {
                let credentials = STANDARD.encode(format!("{}:{}", username, password));
                HeaderValue::from_str(&format!("Basic {}", credentials)).ok()
            }
            RpcAuth::Bearer(token) => HeaderValue::from_str(&format!("Bearer {}", token)).ok(),
        }
    }

    fn to_ws_auth(&self) -> Option<Authorization> {
        match self {
            RpcAuth::None => None,
            RpcAuth::Basic { username, password } => Some(Authorization::basic(username, password)),
            RpcAuth::Bearer(token) => Some(Authorization::bearer(token)),
        }
    }
}

/// A provider that has proven it can reach the node
#[derive(Clone)]
pub struct EthProvider<P> {
    provider: Arc<P>,
    chain_id: u64,
}

impl<P: Provider + Clone> EthProvider<P> {
    /// Asking for the chain id doubles as the connectivity check
    pub async fn new(provider: P) -> Result<Self> {
        let chain_id = provider
            .get_chain_id()
            .await
            .context("Could not connect to the network")?;
        info!(chain_id, "Connected to node");
        Ok(Self {
            provider: Arc::new(provider),
            chain_id,
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

pub struct ProviderConfig {
    rpc: RpcEndpoint,
    auth: RpcAuth,
}

impl ProviderConfig {
    pub fn new(rpc: RpcEndpoint, auth: RpcAuth) -> Self {
        Self { rpc, auth }
    }

    /// Type erased so readers built on it can be shared as trait objects
    pub async fn create_readonly_provider(&self) -> Result<EthProvider<DynProvider>> {
        let provider = if self.rpc.is_websocket() {
            ProviderBuilder::new()
                .connect_ws(self.create_ws_connect()?)
                .await
                .context("Failed to connect to WebSocket RPC. Check if the node is running and URL is correct.")?
                .erased()
        } else {
            ProviderBuilder::new()
                .connect_client(self.create_http_client()?)
                .erased()
        };

        EthProvider::new(provider).await
    }

    fn create_ws_connect(&self) -> Result<WsConnect> {
        let config = WebSocketConfig::default()
            .max_frame_size(Some(16 * 1024 * 1024))
            .max_message_size(Some(16 * 1024 * 1024));

        let mut ws_connect = WsConnect::new(self.rpc.as_ws_url()?).with_config(config);
        if let Some(auth) = self.auth.to_ws_auth() {
            ws_connect = ws_connect.with_auth(auth);
        }
        Ok(ws_connect)
    }

    fn create_http_client(&self) -> Result<alloy::rpc::client::RpcClient> {
        let mut headers = HeaderMap::new();
        if let Some(auth_header) = self.auth.to_header_value() {
            headers.insert(AUTHORIZATION, auth_header);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        let http = Http::with_client(client, self.rpc.as_http_url()?.parse()?);
        Ok(alloy::rpc::client::RpcClient::new(http, self.rpc.is_local()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header() {
        assert!(RpcAuth::None.to_header_value().is_none());

        let basic = RpcAuth::Basic {
            username: "user".into(),
            password: "pass".into(),
        };
        assert_eq!(
            basic.to_header_value().unwrap(),
            HeaderValue::from_static("Basic dXNlcjpwYXNz")
        );

        let bearer = RpcAuth::Bearer("token".into());
        assert_eq!(
            bearer.to_header_value().unwrap(),
            HeaderValue::from_static("Bearer token")
        );
        assert!(bearer.to_ws_auth().is_some());
    }
}
