// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::load_config::{find_in_parent, resolve_config_path};
use crate::rpc::{RpcAuth, RpcEndpoint};
use crate::validation::looks_like_address;
use crate::yaml::load_yaml_with_env;
use anyhow::{bail, Context, Result};
use figment::{
    providers::{Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, time::Duration};
use tracing::debug;
use url::Url;

pub const DEFAULT_RPC_URL: &str = "https://polygon-rpc.com";
pub const DEFAULT_EXPLORER_URL: &str = "https://api.polygonscan.com/api";

/// The node we read balances from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChainConfig {
    /// Human readable network name used in logs
    pub name: String,
    pub rpc_url: String,
    #[serde(default)]
    pub rpc_auth: RpcAuth,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            name: "polygon".to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            rpc_auth: RpcAuth::None,
        }
    }
}

impl ChainConfig {
    pub fn rpc(&self) -> Result<RpcEndpoint> {
        RpcEndpoint::from_url(&self.rpc_url)
            .with_context(|| format!("Failed to parse RPC URL for chain {}", self.name))
    }
}

/// The ERC-20 contract under inspection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenConfig {
    pub address: String,
}

/// An Etherscan compatible transaction history api
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub url: String,
    pub api_key: String,
    /// Only sent for multichain (v2 style) endpoints
    pub chain_id: Option<u64>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_EXPLORER_URL.to_string(),
            api_key: String::new(),
            chain_id: None,
        }
    }
}

/// Tuning for the parallel balance lookups
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Maximum number of balance reads in flight at once
    pub pool_size: usize,
    /// A lookup that takes longer than this resolves to an error
    pub lookup_timeout_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            pool_size: 16,
            lookup_timeout_ms: 10_000,
        }
    }
}

impl FetcherConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

fn default_top_n() -> usize {
    10
}

/// The config actually used throughout the app
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    chain: ChainConfig,
    token: TokenConfig,
    #[serde(default)]
    explorer: ExplorerConfig,
    #[serde(default)]
    fetcher: FetcherConfig,
    #[serde(default = "default_top_n")]
    top_n: usize,
    /// Open Telemetry collector grpc endpoint. Eg. http://127.0.0.1:4317
    #[serde(default)]
    otel: Option<String>,
    #[serde(skip)]
    config_file: PathBuf,
}

impl AppConfig {
    pub fn chain(&self) -> &ChainConfig {
        &self.chain
    }

    pub fn token(&self) -> &TokenConfig {
        &self.token
    }

    pub fn explorer(&self) -> &ExplorerConfig {
        &self.explorer
    }

    pub fn fetcher(&self) -> &FetcherConfig {
        &self.fetcher
    }

    /// Default size of the top holders list
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn otel(&self) -> Option<String> {
        self.otel.clone()
    }

    /// The file this configuration was read from
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Reject configuration that would only fail later at the first network call
    pub fn validate(&self) -> Result<()> {
        self.chain.rpc()?;
        if !looks_like_address(&self.token.address) {
            bail!(
                "Token address '{}' is not a 20 byte hex address",
                self.token.address
            );
        }
        Url::parse(&self.explorer.url)
            .with_context(|| format!("Invalid explorer url '{}'", self.explorer.url))?;
        if self.fetcher.pool_size == 0 {
            bail!("fetcher.pool_size must be greater than zero");
        }
        if self.fetcher.lookup_timeout_ms == 0 {
            bail!("fetcher.lookup_timeout_ms must be greater than zero");
        }
        Ok(())
    }

    /// Parse yaml that has already had its environment references substituted
    pub fn from_yaml(yaml: &str, otel: Option<String>) -> Result<Self> {
        let mut figment = Figment::new().merge(Yaml::string(yaml));
        if let Some(otel) = otel {
            figment = figment.merge(Serialized::default("otel", otel));
        }
        let config: AppConfig = figment
            .extract()
            .context("Could not parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

pub struct OsDirs;
impl OsDirs {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("holderscan")
    }
}

/// Load the config at `cli_file` or the first one found from the working directory
pub fn load_config(cli_file: Option<String>, otel: Option<String>) -> Result<AppConfig> {
    let cli_file = cli_file.map(PathBuf::from);
    let resolved = resolve_config_path(
        find_in_parent,
        &env::current_dir()?,
        &OsDirs::config_dir(),
        cli_file.as_deref(),
    );
    debug!("Resolved configuration file {:?}", resolved);

    let loaded_yaml = load_yaml_with_env(&resolved).context("Configuration file not found")?;
    let mut config = AppConfig::from_yaml(&loaded_yaml, otel)?;
    config.config_file = resolved;
    Ok(config)
}
