// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::Address;
use std::str::FromStr;

/// Parse an account the way wallets accept it.
///
/// Hex with or without the `0x`/`0X` prefix is accepted when it is all lower case or all upper
/// case. Mixed case input is treated as an EIP-55 checksum and must match exactly.
pub fn parse_address(text: &str) -> Option<Address> {
    let text = text.trim();
    let hex = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let address = Address::from_str(hex).ok()?;
    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && address.to_checksum(None)[2..] != *hex {
        return None;
    }
    Some(address)
}

/// Pure format check, never touches the network
pub fn is_valid_address(text: &str) -> bool {
    parse_address(text).is_some()
}

/// Checksummed form used as the key for an account everywhere in the app
pub fn canonical(address: &Address) -> String {
    address.to_checksum(None)
}
