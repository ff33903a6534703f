// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::render::OutputFormat;
use crate::{address_balance, address_history};
use anyhow::{Context, Result};
use clap::Subcommand;
use holderscan_chain::parse_address;
use holderscan_config::AppConfig;

#[derive(Subcommand, Debug)]
pub enum AddressCommands {
    /// List the normal transactions of the address
    History,
    /// Print the token balance of the address
    Balance,
}

pub async fn execute(
    command: AddressCommands,
    config: &AppConfig,
    address: &str,
    output: OutputFormat,
) -> Result<()> {
    // checked before any connection is opened
    let address = parse_address(address)
        .with_context(|| format!("'{}' is not a valid address", address.trim()))?;

    match command {
        AddressCommands::History => address_history::execute(config, address, output).await?,
        AddressCommands::Balance => address_balance::execute(config, address, output).await?,
    };

    Ok(())
}
