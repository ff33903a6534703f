// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Invalid explorer url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Explorer unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Explorer returned status {0}")]
    Status(u16),
    #[error("Explorer returned an empty body")]
    EmptyBody,
    #[error("Explorer returned malformed json: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error("Invalid explorer API key")]
    InvalidApiKey,
    #[error("Explorer reported no data: {0}")]
    NoData(String),
    #[error("Explorer record {index} is unusable: {reason}")]
    InvalidRecord { index: usize, reason: String },
}
