// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::U256;
use anyhow::Result;
use clap::ValueEnum;
use holderscan_chain::{canonical, TokenAmount, TokenMeta};
use holderscan_core::format::format_timestamp;
use holderscan_core::{BalanceResult, Balances, RankedHolder};
use holderscan_explorer::AccountTx;
use serde::Serialize;
use std::fmt;

/// Native currency amounts are always 18 decimals
const NATIVE_DECIMALS: u8 = 18;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Left aligned plain text table
#[derive(Debug)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: vec![],
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }
        widths
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let headers = self.headers.iter().map(|h| h.to_string()).collect::<Vec<_>>();
        for cells in std::iter::once(&headers).chain(self.rows.iter()) {
            let line = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The formatted balance, or the reason there is none
pub fn balance_cell(result: &BalanceResult, meta: &TokenMeta) -> String {
    match &result.balance {
        Ok(amount) => meta.format(amount),
        Err(e) => format!("{} error: {}", e.kind(), e),
    }
}

pub fn balances_table(balances: &Balances, meta: &TokenMeta) -> Table {
    let mut table = Table::new(vec!["ADDRESS", "BALANCE"]);
    for result in balances.iter() {
        table.row(vec![result.address.clone(), balance_cell(result, meta)]);
    }
    table
}

pub fn holders_table(holders: &[RankedHolder], meta: &TokenMeta) -> Table {
    let mut table = Table::new(vec!["#", "ADDRESS", "BALANCE", "LAST TX (UTC)"]);
    for (rank, holder) in holders.iter().enumerate() {
        table.row(vec![
            (rank + 1).to_string(),
            canonical(&holder.address),
            meta.format(&holder.balance),
            format_timestamp(holder.last_seen),
        ]);
    }
    table
}

pub fn native_value(wei: U256) -> String {
    TokenAmount::new(wei, NATIVE_DECIMALS).to_string()
}

pub fn history_table(txs: &[AccountTx]) -> Table {
    let mut table = Table::new(vec!["HASH", "FROM", "TO", "VALUE", "TIME (UTC)"]);
    for tx in txs {
        table.row(vec![
            tx.hash.clone(),
            canonical(&tx.from),
            tx.to
                .as_ref()
                .map(canonical)
                .unwrap_or_else(|| "(contract creation)".to_string()),
            native_value(tx.value),
            format_timestamp(tx.timestamp),
        ]);
    }
    table
}
