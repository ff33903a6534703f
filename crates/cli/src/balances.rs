// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::context::ChainContext;
use crate::helpers::split_addresses;
use crate::render::{balances_table, print_json, OutputFormat};
use anyhow::{bail, Result};
use holderscan_config::AppConfig;
use holderscan_core::timed;
use tracing::info;

pub async fn execute(config: &AppConfig, addresses: Vec<String>, output: OutputFormat) -> Result<()> {
    let addresses = split_addresses(&addresses);
    if addresses.is_empty() {
        bail!("No addresses given");
    }

    let ctx = ChainContext::connect(config).await?;
    let balances = timed("check_balances", ctx.fetcher.fetch_all(&addresses)).await;
    let failed = balances.iter().filter(|r| r.error().is_some()).count();
    info!(count = balances.len(), failed, "Checked balances");

    match output {
        OutputFormat::Table => print!("{}", balances_table(&balances, &ctx.meta)),
        OutputFormat::Json => print_json(&balances.into_vec())?,
    }

    Ok(())
}
