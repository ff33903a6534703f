// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{timed, BalanceFetcher, Balances, HolderError};
use alloy::primitives::Address;
use holderscan_chain::{canonical, ChainReader, TokenAmount};
use holderscan_explorer::{ExplorerClient, Transfer};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// An account seen in the transfer history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolderRecord {
    pub address: Address,
    /// Latest timestamp of any transfer touching the address
    pub last_seen: u64,
}

/// A holder with a known balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedHolder {
    pub address: Address,
    pub balance: TokenAmount,
    pub last_seen: u64,
}

/// Fold transfers into one record per address, in order of first appearance.
pub fn collect_holders<'a, I>(transfers: I) -> Vec<HolderRecord>
where
    I: IntoIterator<Item = &'a Transfer>,
{
    let mut holders: Vec<HolderRecord> = Vec::new();
    let mut index: HashMap<Address, usize> = HashMap::new();

    for transfer in transfers {
        for address in [transfer.from, transfer.to] {
            match index.get(&address) {
                Some(&i) => {
                    let record = &mut holders[i];
                    record.last_seen = record.last_seen.max(transfer.timestamp);
                }
                None => {
                    index.insert(address, holders.len());
                    holders.push(HolderRecord {
                        address,
                        last_seen: transfer.timestamp,
                    });
                }
            }
        }
    }
    holders
}

/// Join holders with their balances, drop failed lookups, sort by balance descending and
/// keep the first `n`. Equal balances keep the order of `holders`.
pub fn rank(holders: &[HolderRecord], balances: &Balances, n: usize) -> Vec<RankedHolder> {
    let mut ranked: Vec<RankedHolder> = holders
        .iter()
        .filter_map(|holder| {
            let Some(result) = balances.get_address(&holder.address) else {
                warn!(address = %holder.address, "No balance result for holder");
                return None;
            };
            match &result.balance {
                Ok(balance) => Some(RankedHolder {
                    address: holder.address,
                    balance: *balance,
                    last_seen: holder.last_seen,
                }),
                Err(e) => {
                    debug!(address = %holder.address, error = %e, "Excluding holder from ranking");
                    None
                }
            }
        })
        .collect();

    // stable: ties stay in first-seen order
    ranked.sort_by(|a, b| b.balance.cmp(&a.balance));
    ranked.truncate(n);
    ranked
}

/// Builds top holder lists from transfer activity
pub struct HolderAggregator<R: ?Sized> {
    fetcher: BalanceFetcher<R>,
}

impl<R: ChainReader + ?Sized> HolderAggregator<R> {
    pub fn new(fetcher: BalanceFetcher<R>) -> Self {
        Self { fetcher }
    }

    /// Rank the `n` largest holders among every address touched by `transfers`
    pub async fn top_holders(&self, transfers: &[Transfer], n: usize) -> Vec<RankedHolder> {
        if n == 0 || transfers.is_empty() {
            return vec![];
        }

        let holders = collect_holders(transfers);
        info!(
            transfers = transfers.len(),
            holders = holders.len(),
            "Collected holders"
        );

        let addresses: Vec<String> = holders.iter().map(|h| canonical(&h.address)).collect();
        let balances = timed("fetch_balances", self.fetcher.fetch_all(&addresses)).await;

        rank(&holders, &balances, n)
    }

    /// Fetch recent transfers of `contract` and rank them. An unusable transfer list
    /// fails the whole request.
    pub async fn top_holders_from_explorer<E: ExplorerClient + ?Sized>(
        &self,
        explorer: &E,
        contract: Address,
        n: usize,
    ) -> Result<Vec<RankedHolder>, HolderError> {
        let transfers = timed("recent_transfers", explorer.recent_transfers(contract)).await?;
        Ok(self.top_holders(&transfers, n).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{addr, MockReader};
    use crate::{BalanceResult, LookupError};
    use async_trait::async_trait;
    use holderscan_explorer::{AccountTx, ExplorerError};
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn aggregator(reader: MockReader) -> HolderAggregator<MockReader> {
        HolderAggregator::new(BalanceFetcher::with_limits(
            Arc::new(reader),
            1,
            4,
            Duration::from_secs(5),
        ))
    }

    fn tx(from: u8, to: u8, timestamp: u64) -> Transfer {
        Transfer::new(addr(from), addr(to), timestamp)
    }

    #[test]
    fn test_collect_holders_takes_latest_timestamp() {
        let holders = collect_holders(&[tx(1, 2, 100), tx(2, 3, 200), tx(3, 1, 50)]);
        assert_eq!(
            holders,
            vec![
                HolderRecord { address: addr(1), last_seen: 100 },
                HolderRecord { address: addr(2), last_seen: 200 },
                HolderRecord { address: addr(3), last_seen: 200 },
            ]
        );
    }

    #[test]
    fn test_duplicate_transfers_do_not_duplicate_holders() {
        let holders = collect_holders(&[tx(1, 2, 100), tx(1, 2, 100)]);
        assert_eq!(holders.len(), 2);
    }

    #[tokio::test]
    async fn test_ranks_by_balance_and_truncates() {
        // A=1.0 B=3.0 C=2.0 with one decimal
        let reader = MockReader::default()
            .with_balance(addr(0xa), 10)
            .with_balance(addr(0xb), 30)
            .with_balance(addr(0xc), 20);
        let top = aggregator(reader)
            .top_holders(&[tx(0xa, 0xb, 100), tx(0xb, 0xc, 200)], 2)
            .await;

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].address, addr(0xb));
        assert_eq!(top[0].balance.to_string(), "3");
        assert_eq!(top[0].last_seen, 200);
        assert_eq!(top[1].address, addr(0xc));
        assert_eq!(top[1].balance.to_string(), "2");
        assert_eq!(top[1].last_seen, 200);
    }

    #[tokio::test]
    async fn test_failed_lookups_are_excluded_not_zeroed() {
        let reader = MockReader::default()
            .with_balance(addr(0xa), 50)
            .with_failure(addr(0xb));
        let top = aggregator(reader)
            .top_holders(&[tx(0xa, 0xb, 1)], 10)
            .await;
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].address, addr(0xa));
        assert_eq!(top[0].balance.to_string(), "5");
    }

    #[tokio::test]
    async fn test_fewer_than_n_returns_all() {
        let reader = MockReader::default()
            .with_balance(addr(1), 1)
            .with_balance(addr(2), 2);
        let top = aggregator(reader).top_holders(&[tx(1, 2, 1)], 10).await;
        assert_eq!(top.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_and_zero_n() {
        let reader = MockReader::default().with_balance(addr(1), 1).shared();
        let agg = HolderAggregator::new(BalanceFetcher::with_limits(
            reader.clone(),
            0,
            1,
            Duration::from_secs(1),
        ));
        assert!(agg.top_holders(&[], 10).await.is_empty());
        assert!(agg.top_holders(&[tx(1, 2, 1)], 0).await.is_empty());
        assert_eq!(reader.calls(), 0);
    }

    #[tokio::test]
    async fn test_ties_keep_first_seen_order() {
        let reader = MockReader::default()
            .with_balance(addr(5), 7)
            .with_balance(addr(3), 7)
            .with_balance(addr(9), 7)
            .with_balance(addr(1), 9);
        let top = aggregator(reader)
            .top_holders(&[tx(5, 3, 1), tx(9, 1, 2)], 10)
            .await;
        let order: Vec<_> = top.iter().map(|h| h.address).collect();
        assert_eq!(order, vec![addr(1), addr(5), addr(3), addr(9)]);
    }

    struct StaticExplorer(Result<Vec<Transfer>, fn() -> ExplorerError>);

    #[async_trait]
    impl ExplorerClient for StaticExplorer {
        async fn recent_transfers(&self, _: Address) -> Result<Vec<Transfer>, ExplorerError> {
            match &self.0 {
                Ok(transfers) => Ok(transfers.clone()),
                Err(make) => Err(make()),
            }
        }

        async fn transactions(&self, _: Address) -> Result<Vec<AccountTx>, ExplorerError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_from_explorer() {
        let reader = MockReader::default()
            .with_balance(addr(1), 10)
            .with_balance(addr(2), 20);
        let agg = aggregator(reader);

        let explorer = StaticExplorer(Ok(vec![tx(1, 2, 1)]));
        let top = agg
            .top_holders_from_explorer(&explorer, addr(0xee), 1)
            .await
            .unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].address, addr(2));

        let broken = StaticExplorer(Err(|| ExplorerError::EmptyBody));
        let err = agg
            .top_holders_from_explorer(&broken, addr(0xee), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, HolderError::Explorer(ExplorerError::EmptyBody)));

        let empty = StaticExplorer(Ok(vec![]));
        assert!(agg
            .top_holders_from_explorer(&empty, addr(0xee), 5)
            .await
            .unwrap()
            .is_empty());
    }

    fn arb_transfers() -> impl Strategy<Value = Vec<Transfer>> {
        prop::collection::vec((0u8..8, 0u8..8, 0u64..1_000), 0..40)
            .prop_map(|rows| rows.into_iter().map(|(f, t, ts)| tx(f, t, ts)).collect())
    }

    proptest! {
        #[test]
        fn every_address_once_with_max_timestamp(transfers in arb_transfers()) {
            let holders = collect_holders(&transfers);

            let mut expected: HashMap<Address, u64> = HashMap::new();
            for t in &transfers {
                for a in [t.from, t.to] {
                    let seen = expected.entry(a).or_insert(t.timestamp);
                    *seen = (*seen).max(t.timestamp);
                }
            }

            prop_assert_eq!(holders.len(), expected.len());
            for holder in &holders {
                prop_assert_eq!(Some(&holder.last_seen), expected.get(&holder.address));
            }
        }

        #[test]
        fn rank_never_exceeds_n(
            transfers in arb_transfers(),
            n in 0usize..12,
            failing in prop::collection::hash_set(0u8..8, 0..4),
        ) {
            let holders = collect_holders(&transfers);
            let balances: Balances = holders
                .iter()
                .map(|h| BalanceResult {
                    address: canonical(&h.address),
                    balance: if failing.contains(&h.address.0[0]) {
                        Err(LookupError::TaskFailed("down".into()))
                    } else {
                        Ok(TokenAmount::new(alloy::primitives::U256::from(h.address.0[0]), 0))
                    },
                })
                .collect();
            let qualifying = holders
                .iter()
                .filter(|h| !failing.contains(&h.address.0[0]))
                .count();

            let ranked = rank(&holders, &balances, n);

            prop_assert_eq!(ranked.len(), qualifying.min(n));
            prop_assert!(ranked.windows(2).all(|w| w[0].balance >= w[1].balance));
            prop_assert!(ranked.iter().all(|h| !failing.contains(&h.address.0[0])));
        }
    }
}
