// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::context::explorer;
use crate::render::{history_table, print_json, OutputFormat};
use alloy::primitives::Address;
use anyhow::{Context, Result};
use holderscan_config::AppConfig;
use holderscan_core::timed;
use holderscan_explorer::ExplorerClient;

pub async fn execute(config: &AppConfig, address: Address, output: OutputFormat) -> Result<()> {
    let explorer = explorer(config)?;
    let txs = timed("address_history", explorer.transactions(address))
        .await
        .with_context(|| format!("Could not load history of {}", address))?;

    match output {
        OutputFormat::Table if txs.is_empty() => println!("No transactions found"),
        OutputFormat::Table => print!("{}", history_table(&txs)),
        OutputFormat::Json => print_json(&txs)?,
    }

    Ok(())
}
