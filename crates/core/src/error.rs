// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use holderscan_chain::ChainError;
use holderscan_explorer::ExplorerError;
use std::{fmt, time::Duration};
use thiserror::Error;

/// Coarse classification shared by per-address and whole-request failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally, never reached the network
    InvalidAddress,
    /// The chain or the explorer could not be reached or answered with an error
    Transport,
    /// The explorer answered but the payload was unusable
    UpstreamData,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::InvalidAddress => "invalid address",
            ErrorKind::Transport => "transport",
            ErrorKind::UpstreamData => "upstream data",
        })
    }
}

/// Stands in for a balance when a single lookup fails
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),
    #[error(transparent)]
    Chain(#[from] ChainError),
    #[error("Balance lookup timed out after {0:?}")]
    Timeout(Duration),
    #[error("Balance lookup task failed: {0}")]
    TaskFailed(String),
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::InvalidAddress(_) => ErrorKind::InvalidAddress,
            LookupError::Chain(_) | LookupError::Timeout(_) | LookupError::TaskFailed(_) => {
                ErrorKind::Transport
            }
        }
    }
}

/// A failure that prevents ranking altogether
#[derive(Error, Debug)]
pub enum HolderError {
    #[error("No transfers available: {0}")]
    Explorer(#[from] ExplorerError),
}

impl HolderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HolderError::Explorer(ExplorerError::Transport(_) | ExplorerError::Status(_)) => {
                ErrorKind::Transport
            }
            HolderError::Explorer(_) => ErrorKind::UpstreamData,
        }
    }
}
