// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod aggregator;
mod error;
mod fetcher;
pub mod format;
mod instrument;
mod lookup;
#[cfg(test)]
mod test_support;

pub use aggregator::*;
pub use error::*;
pub use fetcher::*;
pub use instrument::*;
pub use lookup::*;
