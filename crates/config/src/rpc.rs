// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RpcProtocol {
    Http,
    Https,
    Ws,
    Wss,
}

impl RpcProtocol {
    fn from_scheme(scheme: &str) -> Result<Self> {
        Ok(match scheme {
            "http" => RpcProtocol::Http,
            "https" => RpcProtocol::Https,
            "ws" => RpcProtocol::Ws,
            "wss" => RpcProtocol::Wss,
            _ => bail!("Invalid protocol. Expected: http://, https://, ws://, wss://"),
        })
    }

    pub fn is_websocket(&self) -> bool {
        matches!(self, RpcProtocol::Ws | RpcProtocol::Wss)
    }

    pub fn is_secure(&self) -> bool {
        matches!(self, RpcProtocol::Https | RpcProtocol::Wss)
    }
}

/// A node endpoint. Either transport can be derived from the other.
#[derive(Clone, Debug)]
pub struct RpcEndpoint {
    protocol: RpcProtocol,
    url: Url,
}

impl RpcEndpoint {
    pub fn from_url(url: &str) -> Result<Self> {
        let url = Url::parse(url).context("Invalid URL format")?;
        let protocol = RpcProtocol::from_scheme(url.scheme())?;
        if url.host_str().is_none() {
            bail!("URL must contain a host");
        }
        Ok(Self { protocol, url })
    }

    pub fn is_websocket(&self) -> bool {
        self.protocol.is_websocket()
    }

    pub fn is_secure(&self) -> bool {
        self.protocol.is_secure()
    }

    pub fn as_http_url(&self) -> Result<String> {
        let scheme = if self.is_secure() { "https" } else { "http" };
        self.with_scheme(scheme)
    }

    pub fn as_ws_url(&self) -> Result<String> {
        let scheme = if self.is_secure() { "wss" } else { "ws" };
        self.with_scheme(scheme)
    }

    fn with_scheme(&self, scheme: &str) -> Result<String> {
        if self.url.scheme() == scheme {
            return Ok(self.url.to_string());
        }
        let mut url = self.url.clone();
        url.set_scheme(scheme)
            .map_err(|_| anyhow!("Cannot switch {} to {}", self.url, scheme))?;
        Ok(url.to_string())
    }

    pub fn is_local(&self) -> bool {
        match self.url.host_str() {
            Some("localhost" | "127.0.0.1" | "::1" | "[::1]") => true,
            Some(host) => host.starts_with("127."),
            None => false,
        }
    }
}

#[derive(Debug, Default, Hash, Eq, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "type", content = "credentials")]
pub enum RpcAuth {
    #[default]
    None,
    Basic {
        username: String,
        password: String,
    },
    Bearer(String),
}
