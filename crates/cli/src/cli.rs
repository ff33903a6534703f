// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::address::{self, AddressCommands};
use crate::helpers::telemetry::setup_tracing;
use crate::render::OutputFormat;
use crate::{balances, token, top};
use anyhow::Result;
use clap::{command, ArgAction, Parser, Subcommand};
use holderscan_config::validation::ValidUrl;
use holderscan_config::{load_config, AppConfig};
use tracing::{info, instrument, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "holderscan")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_SHA"), ")"))]
#[command(about = "Inspect ERC-20 token balances and the largest recent holders of a token", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,

    /// Indicate error levels by adding additional `-v` arguments. Eg. `holderscan -vvv` will give
    /// you trace level output
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Silence all output. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,

    /// How results are printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub output: OutputFormat,

    /// Set the Open Telemetry collector grpc endpoint. Eg. http://localhost:4317
    #[arg(long = "otel", global = true)]
    pub otel: Option<ValidUrl>,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,  //
                1 => Level::INFO,  // -v
                2 => Level::DEBUG, // -vv
                _ => Level::TRACE, // -vvv
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn execute(self) -> Result<()> {
        let config = self.load_config()?;
        let tracer = setup_tracing(config.otel(), self.log_level())?;
        info!("Config loaded from: {:?}", config.config_file());

        let output = self.output;
        let result = match self.command {
            Commands::Balances { addresses } => balances::execute(&config, addresses, output).await,
            Commands::Top { n } => top::execute(&config, n, output).await,
            Commands::Address { address, command } => {
                address::execute(command, &config, &address, output).await
            }
            Commands::Token => token::execute(&config, output).await,
        };

        if let Some(tracer) = tracer {
            if let Err(e) = tracer.shutdown() {
                warn!(error = %e, "Failed to flush telemetry");
            }
        }

        result
    }

    pub fn load_config(&self) -> Result<AppConfig> {
        load_config(self.config.clone(), self.otel.clone().map(Into::into))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the token balance of each address
    Balances {
        /// Addresses to check. Accepts a comma separated list and can be repeated
        #[arg(required = true, value_name = "ADDRESS")]
        addresses: Vec<String>,
    },

    /// Rank the largest holders among recent transfer participants
    Top {
        /// Number of holders to show. Defaults to `top_n` from the config
        #[arg(short)]
        n: Option<usize>,
    },

    /// Inspect a single address
    Address {
        /// The address to inspect
        address: String,

        #[command(subcommand)]
        command: AddressCommands,
    },

    /// Print metadata of the configured token
    Token,
}
