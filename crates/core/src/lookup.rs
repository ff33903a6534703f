// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::LookupError;
use holderscan_chain::{canonical, parse_address, ChainReader, TokenAmount};
use serde::{Serialize, Serializer};
use std::time::Duration;
use tracing::{debug, warn};

/// One row of a balance query. `address` is checksummed when the input was valid and
/// the trimmed input text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceResult {
    pub address: String,
    #[serde(serialize_with = "serialize_balance")]
    pub balance: Result<TokenAmount, LookupError>,
}

impl BalanceResult {
    pub fn amount(&self) -> Option<&TokenAmount> {
        self.balance.as_ref().ok()
    }

    pub fn error(&self) -> Option<&LookupError> {
        self.balance.as_ref().err()
    }
}

fn serialize_balance<S: Serializer>(
    balance: &Result<TokenAmount, LookupError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    #[serde(rename_all = "lowercase")]
    enum Tagged<'a> {
        Amount(&'a TokenAmount),
        Error(String),
    }
    match balance {
        Ok(amount) => Tagged::Amount(amount).serialize(serializer),
        Err(e) => Tagged::Error(e.to_string()).serialize(serializer),
    }
}

/// Key used to identify an input: checksummed when valid, trimmed text otherwise
pub fn address_key(text: &str) -> String {
    parse_address(text)
        .map(|address| canonical(&address))
        .unwrap_or_else(|| text.trim().to_string())
}

/// Look up and scale the balance of a single address.
///
/// Never fails: malformed input, rpc errors and timeouts are all reported in the result.
/// Input the reader does not accept as an address is rejected before the chain is queried.
pub async fn lookup_balance<R: ChainReader + ?Sized>(
    reader: &R,
    decimals: u8,
    text: &str,
    timeout: Duration,
) -> BalanceResult {
    let address = reader
        .is_valid_address(text)
        .then(|| parse_address(text))
        .flatten();
    let Some(address) = address else {
        warn!(input = %text.trim(), "Rejected malformed address");
        return BalanceResult {
            address: text.trim().to_string(),
            balance: Err(LookupError::InvalidAddress(text.trim().to_string())),
        };
    };

    let balance = match tokio::time::timeout(timeout, reader.token_balance(address)).await {
        Ok(Ok(raw)) => Ok(TokenAmount::new(raw, decimals)),
        Ok(Err(e)) => {
            warn!(%address, error = %e, "Balance lookup failed");
            Err(LookupError::from(e))
        }
        Err(_) => {
            warn!(%address, ?timeout, "Balance lookup timed out");
            Err(LookupError::Timeout(timeout))
        }
    };
    debug!(%address, ok = balance.is_ok(), "Balance lookup finished");

    BalanceResult {
        address: canonical(&address),
        balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{addr, MockReader};
    use alloy::primitives::U256;
    use holderscan_chain::ChainError;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_scales_by_decimals() {
        let a = addr(1);
        let reader = MockReader::default().with_balance(a, 1_500_000);
        let result = lookup_balance(&reader, 6, &a.to_string().to_lowercase(), TIMEOUT).await;
        assert_eq!(result.address, canonical(&a));
        assert_eq!(result.amount().unwrap().to_string(), "1.5");
        assert_eq!(
            result.amount(),
            Some(&TokenAmount::new(U256::from(1_500_000u64), 6))
        );
    }

    #[tokio::test]
    async fn test_malformed_address_never_reaches_chain() {
        let reader = MockReader::default();
        let result = lookup_balance(&reader, 6, " 0xnope ", TIMEOUT).await;
        assert_eq!(result.address, "0xnope");
        assert_eq!(
            result.balance,
            Err(LookupError::InvalidAddress("0xnope".into()))
        );
        assert_eq!(reader.calls(), 0);
    }

    #[tokio::test]
    async fn test_reader_decides_validity() {
        let a = addr(4);
        let reader = MockReader::default().with_balance(a, 9).rejecting_all();
        let result = lookup_balance(&reader, 0, &a.to_string(), TIMEOUT).await;
        assert_eq!(
            result.balance,
            Err(LookupError::InvalidAddress(a.to_string()))
        );
        assert_eq!(reader.calls(), 0);
    }

    #[tokio::test]
    async fn test_rpc_error_is_captured() {
        let a = addr(2);
        let reader = MockReader::default().with_failure(a);
        let result = lookup_balance(&reader, 18, &a.to_string(), TIMEOUT).await;
        assert_eq!(
            result.balance,
            Err(LookupError::Chain(ChainError::Transport {
                call: "balanceOf",
                message: "connection reset".into()
            }))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_resolves_to_error() {
        let a = addr(3);
        let reader = MockReader::default()
            .with_balance(a, 1)
            .with_delay(Duration::from_secs(60));
        let result = lookup_balance(&reader, 0, &a.to_string(), TIMEOUT).await;
        assert_eq!(result.balance, Err(LookupError::Timeout(TIMEOUT)));
    }

    #[test]
    fn test_serialize() {
        let ok = BalanceResult {
            address: "0xabc".into(),
            balance: Ok(TokenAmount::new(U256::from(15u64), 1)),
        };
        assert_eq!(
            serde_json::to_string(&ok).unwrap(),
            r#"{"address":"0xabc","balance":{"amount":"1.5"}}"#
        );
        let err = BalanceResult {
            address: "x".into(),
            balance: Err(LookupError::InvalidAddress("x".into())),
        };
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"address":"x","balance":{"error":"Invalid address 'x'"}}"#
        );
    }
}
