// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod address;
mod amount;
mod erc20;
pub mod provider;
mod reader;

pub use address::*;
pub use amount::*;
pub use erc20::*;
pub use provider::{EthProvider, ProviderConfig};
pub use reader::*;
