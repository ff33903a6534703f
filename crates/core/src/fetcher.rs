// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{address_key, lookup_balance, BalanceResult, LookupError};
use alloy::primitives::Address;
use holderscan_chain::{canonical, ChainReader};
use holderscan_config::FetcherConfig;
use std::collections::{HashMap, HashSet};
use std::{sync::Arc, time::Duration};
use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{error, info};

/// The results of a batch lookup in submission order, indexable by address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Balances {
    results: Vec<BalanceResult>,
    index: HashMap<String, usize>,
}

impl Balances {
    /// Find the result for any textual form of an address
    pub fn get(&self, address: &str) -> Option<&BalanceResult> {
        self.index
            .get(&address_key(address))
            .map(|&i| &self.results[i])
    }

    pub fn get_address(&self, address: &Address) -> Option<&BalanceResult> {
        self.get(&canonical(address))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BalanceResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_vec(self) -> Vec<BalanceResult> {
        self.results
    }
}

impl FromIterator<BalanceResult> for Balances {
    fn from_iter<T: IntoIterator<Item = BalanceResult>>(iter: T) -> Self {
        let mut balances = Balances::default();
        for result in iter {
            if balances.index.contains_key(&result.address) {
                continue;
            }
            balances
                .index
                .insert(result.address.clone(), balances.results.len());
            balances.results.push(result);
        }
        balances
    }
}

impl IntoIterator for Balances {
    type Item = BalanceResult;
    type IntoIter = std::vec::IntoIter<BalanceResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// Queries many balances in parallel with at most `pool_size` reads in flight
pub struct BalanceFetcher<R: ?Sized> {
    reader: Arc<R>,
    decimals: u8,
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl<R: ?Sized> Clone for BalanceFetcher<R> {
    fn clone(&self) -> Self {
        Self {
            reader: Arc::clone(&self.reader),
            decimals: self.decimals,
            permits: Arc::clone(&self.permits),
            timeout: self.timeout,
        }
    }
}

impl<R: ChainReader + ?Sized> BalanceFetcher<R> {
    pub fn new(reader: Arc<R>, decimals: u8, config: &FetcherConfig) -> Self {
        Self::with_limits(reader, decimals, config.pool_size, config.lookup_timeout())
    }

    pub fn with_limits(reader: Arc<R>, decimals: u8, pool_size: usize, timeout: Duration) -> Self {
        Self {
            reader,
            decimals,
            permits: Arc::new(Semaphore::new(pool_size.max(1))),
            timeout,
        }
    }

    /// Single address lookup sharing the pool's timeout
    pub async fn lookup(&self, address: &str) -> BalanceResult {
        lookup_balance(self.reader.as_ref(), self.decimals, address, self.timeout).await
    }

    /// Look up every distinct input, returning one result per input in submission order.
    ///
    /// Inputs naming the same account in different casing collapse into the first one.
    /// All lookups have finished, successfully or not, when this returns. Dropping the
    /// future cancels the lookups still running.
    pub async fn fetch_all<I, S>(&self, addresses: I) -> Balances
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let inputs: Vec<String> = addresses
            .into_iter()
            .map(|a| a.as_ref().trim().to_string())
            .filter(|a| seen.insert(address_key(a)))
            .collect();

        info!(count = inputs.len(), "Fetching balances");
        let keys: Vec<String> = inputs.iter().map(|input| address_key(input)).collect();

        let mut tasks = JoinSet::new();
        for (index, input) in inputs.into_iter().enumerate() {
            let fetcher = self.clone();
            tasks.spawn(async move {
                let Ok(_permit) = fetcher.permits.acquire().await else {
                    let result = BalanceResult {
                        address: address_key(&input),
                        balance: Err(LookupError::TaskFailed("worker pool closed".into())),
                    };
                    return (index, result);
                };
                (index, fetcher.lookup(&input).await)
            });
        }

        let mut slots: Vec<Option<BalanceResult>> = keys.iter().map(|_| None).collect();
        let mut failure = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => {
                    error!("Balance lookup task failed: {}", e);
                    failure = Some(e.to_string());
                }
            }
        }

        slots
            .into_iter()
            .zip(keys)
            .map(|(slot, key)| {
                slot.unwrap_or_else(|| BalanceResult {
                    address: key,
                    balance: Err(LookupError::TaskFailed(
                        failure.clone().unwrap_or_else(|| "task did not finish".into()),
                    )),
                })
            })
            .collect()
    }
}
