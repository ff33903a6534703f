// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use clap::Parser;
use cli::Cli;

mod address;
mod address_balance;
mod address_history;
mod balances;
mod cli;
mod context;
pub mod helpers;
mod render;
mod token;
mod top;

#[tokio::main]
pub async fn main() {
    if let Err(err) = Cli::parse().execute().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
