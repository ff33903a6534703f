// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod client;
mod error;
mod models;
mod response;

pub use client::*;
pub use error::*;
pub use models::*;
pub use response::{parse_transactions, parse_transfers};
