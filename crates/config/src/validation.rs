// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::str::FromStr;

use url::Url;

/// A url accepted on the command line, checked at parse time so clap can report it.
#[derive(Clone, Debug)]
pub struct ValidUrl(Url);

impl FromStr for ValidUrl {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ValidUrl(Url::parse(s)?))
    }
}

impl From<ValidUrl> for String {
    fn from(value: ValidUrl) -> Self {
        value.0.to_string()
    }
}

/// Loose shape check for a 20 byte hex account. Checksum validation happens in the chain crate.
pub fn looks_like_address(s: &str) -> bool {
    let hex = s.strip_prefix("0x").unwrap_or(s);
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_address() {
        assert!(looks_like_address(
            "0x1a9b54a3075119f1546c52ca0940551a6ce5d2d0"
        ));
        assert!(looks_like_address("1a9b54a3075119f1546c52ca0940551a6ce5d2d0"));
        assert!(!looks_like_address("0x1a9b54"));
        assert!(!looks_like_address(
            "0xzz9b54a3075119f1546c52ca0940551a6ce5d2d0"
        ));
    }

    #[test]
    fn test_valid_url() {
        assert!("http://localhost:4317".parse::<ValidUrl>().is_ok());
        assert!("not a url".parse::<ValidUrl>().is_err());
    }
}
