// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::context::ChainContext;
use crate::render::{balance_cell, print_json, OutputFormat};
use alloy::primitives::Address;
use anyhow::Result;
use holderscan_chain::canonical;
use holderscan_config::AppConfig;

pub async fn execute(config: &AppConfig, address: Address, output: OutputFormat) -> Result<()> {
    let ctx = ChainContext::connect(config).await?;
    let result = ctx.fetcher.lookup(&canonical(&address)).await;

    match output {
        OutputFormat::Table => println!("{}  {}", result.address, balance_cell(&result, &ctx.meta)),
        OutputFormat::Json => print_json(&result)?,
    }

    Ok(())
}
