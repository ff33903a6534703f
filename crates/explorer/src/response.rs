// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{AccountTx, ExplorerError, Transfer};
use alloy::primitives::{Address, U256};
use holderscan_chain::parse_address;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

/// Envelope shared by every Etherscan style endpoint
#[derive(Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransfer {
    #[serde(default)]
    hash: String,
    from: String,
    to: String,
    #[serde(default)]
    value: String,
    time_stamp: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTx {
    hash: String,
    from: String,
    #[serde(default)]
    to: String,
    #[serde(default)]
    value: String,
    time_stamp: String,
}

/// Turn an http status and body into the list held in `result`
fn decode_records<T: DeserializeOwned>(status: u16, body: &str) -> Result<Vec<T>, ExplorerError> {
    if !(200..300).contains(&status) {
        return Err(ExplorerError::Status(status));
    }
    if body.trim().is_empty() {
        return Err(ExplorerError::EmptyBody);
    }

    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.status != "1" {
        let result = envelope.result.as_str().unwrap_or_default();
        if envelope.message.contains("No transactions found") {
            debug!("Explorer has no transactions for the query");
            return Ok(vec![]);
        }
        if result.contains("Invalid API Key") {
            return Err(ExplorerError::InvalidApiKey);
        }
        return Err(ExplorerError::NoData(
            format!("{} {}", envelope.message, result).trim().to_string(),
        ));
    }

    Ok(serde_json::from_value(envelope.result)?)
}

fn address_field(index: usize, field: &str, value: &str) -> Result<Address, ExplorerError> {
    parse_address(value).ok_or_else(|| ExplorerError::InvalidRecord {
        index,
        reason: format!("{field} '{value}' is not an address"),
    })
}

fn timestamp_field(index: usize, value: &str) -> Result<u64, ExplorerError> {
    value.parse().map_err(|_| ExplorerError::InvalidRecord {
        index,
        reason: format!("timeStamp '{value}' is not a unix time"),
    })
}

fn amount_field(index: usize, value: &str) -> Result<U256, ExplorerError> {
    if value.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str(value).map_err(|_| ExplorerError::InvalidRecord {
        index,
        reason: format!("value '{value}' is not an integer"),
    })
}

/// Parse a `tokentx` response
pub fn parse_transfers(status: u16, body: &str) -> Result<Vec<Transfer>, ExplorerError> {
    decode_records::<RawTransfer>(status, body)?
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            Ok(Transfer {
                from: address_field(index, "from", &raw.from)?,
                to: address_field(index, "to", &raw.to)?,
                value: amount_field(index, &raw.value)?,
                timestamp: timestamp_field(index, &raw.time_stamp)?,
                hash: raw.hash,
            })
        })
        .collect()
}

/// Parse a `txlist` response
pub fn parse_transactions(status: u16, body: &str) -> Result<Vec<AccountTx>, ExplorerError> {
    decode_records::<RawTx>(status, body)?
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let to = match raw.to.as_str() {
                "" => None,
                to => Some(address_field(index, "to", to)?),
            };
            Ok(AccountTx {
                from: address_field(index, "from", &raw.from)?,
                to,
                value: amount_field(index, &raw.value)?,
                timestamp: timestamp_field(index, &raw.time_stamp)?,
                hash: raw.hash,
            })
        })
        .collect()
}
