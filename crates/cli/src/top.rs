// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::context::{explorer, ChainContext};
use crate::render::{holders_table, print_json, OutputFormat};
use anyhow::Result;
use holderscan_config::AppConfig;
use holderscan_core::{timed, HolderAggregator};
use tracing::error;

pub async fn execute(config: &AppConfig, n: Option<usize>, output: OutputFormat) -> Result<()> {
    let n = n.unwrap_or(config.top_n());
    let ctx = ChainContext::connect(config).await?;
    let explorer = explorer(config)?;

    let aggregator = HolderAggregator::new(ctx.fetcher.clone());
    let holders = match timed(
        "top_holders",
        aggregator.top_holders_from_explorer(&explorer, ctx.token, n),
    )
    .await
    {
        Ok(holders) => holders,
        Err(e) => {
            error!(kind = %e.kind(), "Could not rank holders");
            return Err(e.into());
        }
    };

    match output {
        OutputFormat::Table => {
            if holders.is_empty() {
                println!("No holders with a known balance");
            } else {
                print!("{}", holders_table(&holders, &ctx.meta));
            }
        }
        OutputFormat::Json => print_json(&holders)?,
    }

    Ok(())
}
