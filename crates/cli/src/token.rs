// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::context::ChainContext;
use crate::render::{print_json, OutputFormat, Table};
use anyhow::Result;
use holderscan_chain::canonical;
use holderscan_config::AppConfig;
use serde::Serialize;

#[derive(Serialize)]
struct TokenInfo<'a> {
    address: String,
    chain_id: u64,
    name: &'a str,
    symbol: &'a str,
    decimals: u8,
    total_supply: String,
}

pub async fn execute(config: &AppConfig, output: OutputFormat) -> Result<()> {
    let ctx = ChainContext::connect(config).await?;
    let meta = &ctx.meta;
    let info = TokenInfo {
        address: canonical(&ctx.token),
        chain_id: ctx.chain_id,
        name: &meta.name,
        symbol: &meta.symbol,
        decimals: meta.decimals,
        total_supply: meta.amount(meta.total_supply).to_string(),
    };

    match output {
        OutputFormat::Table => {
            let mut table = Table::new(vec!["FIELD", "VALUE"]);
            table.row(vec!["address".to_string(), info.address]);
            table.row(vec!["chain id".to_string(), info.chain_id.to_string()]);
            table.row(vec!["name".to_string(), info.name.to_string()]);
            table.row(vec!["symbol".to_string(), info.symbol.to_string()]);
            table.row(vec!["decimals".to_string(), info.decimals.to_string()]);
            table.row(vec!["total supply".to_string(), info.total_supply]);
            print!("{}", table);
        }
        OutputFormat::Json => print_json(&info)?,
    }

    Ok(())
}
