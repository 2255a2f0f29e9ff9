//! Bucketing and candidate-pair generation.
//!
//! The indexer bounds the candidate search space by grouping transactions
//! by currency, and additionally by amount when the tolerance is exactly
//! zero: zero tolerance makes bucketing by amount lossless and shrinks
//! candidate pairs dramatically, while a nonzero tolerance defers the
//! amount comparison to the scorer since near-matches may land in
//! different amount buckets.

use beanlint_core::{is_cash_account, Amount, Posting, Transaction};
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::config::DedupConfig;

/// Key of one index bucket: comparison currency, plus the absolute
/// comparison amount on the exact-match fast path.
pub(crate) type BucketKey = (String, Option<Decimal>);

/// Iterate over the postings considered in scope for amount and currency
/// derivation: postings with an explicit amount, restricted to cash
/// accounts when `cash_only` is set.
pub(crate) fn in_scope_postings(
    txn: &Transaction,
    cash_only: bool,
) -> impl Iterator<Item = (&Posting, &Amount)> {
    txn.priced_postings()
        .filter(move |(posting, _)| !cash_only || is_cash_account(&posting.account))
}

/// Net signed amount over the in-scope postings, or `None` if there are
/// none. The sign matters here, unlike for the bucket key.
pub(crate) fn net_amount(txn: &Transaction, cash_only: bool) -> Option<Decimal> {
    let mut total = Decimal::ZERO;
    let mut any = false;
    for (_, units) in in_scope_postings(txn, cash_only) {
        total += units.number;
        any = true;
    }
    any.then_some(total)
}

/// Currency of the first in-scope posting, or `None` if there are none.
pub(crate) fn first_currency(txn: &Transaction, cash_only: bool) -> Option<&str> {
    in_scope_postings(txn, cash_only)
        .next()
        .map(|(_, units)| units.currency.as_str())
}

/// Bucket transactions by comparison key, preserving input order within
/// each bucket.
///
/// Transactions with no in-scope postings are dropped entirely: they
/// never enter a bucket and are never compared.
pub(crate) fn index_transactions<'a>(
    transactions: &'a [Transaction],
    cfg: &DedupConfig,
) -> HashMap<BucketKey, Vec<&'a Transaction>> {
    let mut index: HashMap<BucketKey, Vec<&Transaction>> = HashMap::new();
    for txn in transactions {
        let Some(currency) = first_currency(txn, cfg.cash_accounts_only) else {
            continue;
        };
        let Some(amount) = net_amount(txn, cfg.cash_accounts_only) else {
            continue;
        };
        let key = if cfg.amount_tolerance.is_zero() {
            (currency.to_string(), Some(amount.abs()))
        } else {
            (currency.to_string(), None)
        };
        index.entry(key).or_default().push(txn);
    }
    index
}

/// Lazy iterator over (earlier, later) transaction pairs within a date
/// window.
///
/// Transactions are sorted ascending by date (stable, ties keep input
/// order). For each anchor, the forward scan stops at the first candidate
/// past the window: later transactions are later still, so no further
/// pair from this anchor can qualify.
pub(crate) struct CandidatePairs<'a> {
    txns: Vec<&'a Transaction>,
    window: i64,
    anchor: usize,
    probe: usize,
}

impl<'a> Iterator for CandidatePairs<'a> {
    type Item = (&'a Transaction, &'a Transaction);

    fn next(&mut self) -> Option<Self::Item> {
        while self.anchor < self.txns.len() {
            if self.probe < self.txns.len() {
                let a = self.txns[self.anchor];
                let b = self.txns[self.probe];
                if (b.date - a.date).num_days() <= self.window {
                    self.probe += 1;
                    return Some((a, b));
                }
            }
            self.anchor += 1;
            self.probe = self.anchor + 1;
        }
        None
    }
}

/// Yield all pairs within `window` days inside one bucket.
pub(crate) fn candidate_pairs<'a>(
    bucket: &[&'a Transaction],
    window: i64,
) -> CandidatePairs<'a> {
    let mut txns = bucket.to_vec();
    txns.sort_by_key(|txn| txn.date);
    CandidatePairs {
        txns,
        window,
        anchor: 0,
        probe: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beanlint_core::{NaiveDate, Posting};
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn txn(day: u32, amount: Decimal, currency: &str) -> Transaction {
        Transaction::new(date(day), format!("txn-{day}"))
            .with_posting(Posting::new(
                "Assets:Cash:Checking",
                Amount::new(amount, currency),
            ))
            .with_posting(Posting::auto("Income:Rent"))
    }

    fn expense_txn(day: u32, amount: Decimal) -> Transaction {
        Transaction::new(date(day), format!("exp-{day}"))
            .with_posting(Posting::new(
                "Expenses:Repairs",
                Amount::new(amount, "USD"),
            ))
            .with_posting(Posting::new(
                "Liabilities:Card",
                Amount::new(-amount, "USD"),
            ))
    }

    #[test]
    fn test_net_amount_sums_signed() {
        let t = Transaction::new(date(1), "mixed")
            .with_posting(Posting::new(
                "Assets:Cash",
                Amount::new(dec!(100.00), "USD"),
            ))
            .with_posting(Posting::new(
                "Assets:Savings",
                Amount::new(dec!(-30.00), "USD"),
            ));
        assert_eq!(net_amount(&t, false), Some(dec!(70.00)));
        assert_eq!(net_amount(&t, true), Some(dec!(70.00)));
    }

    #[test]
    fn test_cash_only_excludes_non_asset_postings() {
        let t = expense_txn(1, dec!(50.00));
        assert_eq!(net_amount(&t, false), Some(dec!(0.00)));
        assert_eq!(net_amount(&t, true), None);
        assert_eq!(first_currency(&t, true), None);
    }

    #[test]
    fn test_currency_isolation() {
        let txns = vec![txn(1, dec!(100.00), "USD"), txn(1, dec!(100.00), "EUR")];
        let cfg = DedupConfig::default();
        let index = index_transactions(&txns, &cfg);
        assert_eq!(index.len(), 2);
        assert!(index.values().all(|bucket| bucket.len() == 1));
    }

    #[test]
    fn test_zero_tolerance_buckets_by_amount() {
        let txns = vec![
            txn(1, dec!(100.00), "USD"),
            txn(1, dec!(100.00), "USD"),
            txn(1, dec!(100.05), "USD"),
        ];
        let cfg = DedupConfig {
            amount_tolerance: Decimal::ZERO,
            ..DedupConfig::default()
        };
        let index = index_transactions(&txns, &cfg);
        assert_eq!(index.len(), 2);
        assert_eq!(
            index[&("USD".to_string(), Some(dec!(100.00)))].len(),
            2
        );
    }

    #[test]
    fn test_nonzero_tolerance_buckets_by_currency_only() {
        let txns = vec![txn(1, dec!(100.00), "USD"), txn(1, dec!(100.05), "USD")];
        let index = index_transactions(&txns, &DedupConfig::default());
        assert_eq!(index.len(), 1);
        assert_eq!(index[&("USD".to_string(), None)].len(), 2);
    }

    #[test]
    fn test_bucket_key_uses_absolute_amount() {
        let txns = vec![txn(1, dec!(100.00), "USD"), txn(2, dec!(-100.00), "USD")];
        let cfg = DedupConfig {
            amount_tolerance: Decimal::ZERO,
            ..DedupConfig::default()
        };
        let index = index_transactions(&txns, &cfg);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_indexing_is_idempotent() {
        let txns = vec![
            txn(1, dec!(100.00), "USD"),
            txn(2, dec!(100.00), "EUR"),
            expense_txn(3, dec!(50.00)),
        ];
        let cfg = DedupConfig::default();
        assert_eq!(
            index_transactions(&txns, &cfg),
            index_transactions(&txns, &cfg)
        );
    }

    #[test]
    fn test_candidate_pairs_window() {
        let t1 = txn(1, dec!(10.00), "USD");
        let t5 = txn(5, dec!(10.00), "USD");
        let t6 = txn(6, dec!(10.00), "USD");
        let bucket = vec![&t1, &t5, &t6];

        let pairs: Vec<_> = candidate_pairs(&bucket, 3)
            .map(|(a, b)| (a.date, b.date))
            .collect();
        // 1 and 5 are four days apart: only (5, 6) qualifies.
        assert_eq!(pairs, vec![(date(5), date(6))]);
    }

    #[test]
    fn test_candidate_pairs_ordered_earlier_first() {
        let t2 = txn(2, dec!(10.00), "USD");
        let t1 = txn(1, dec!(10.00), "USD");
        let bucket = vec![&t2, &t1];

        let pairs: Vec<_> = candidate_pairs(&bucket, 3).collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0.date, date(1));
        assert_eq!(pairs[0].1.date, date(2));
    }

    #[test]
    fn test_candidate_pairs_zero_window_same_day_only() {
        let t1a = txn(1, dec!(10.00), "USD");
        let t1b = txn(1, dec!(10.00), "USD");
        let t2 = txn(2, dec!(10.00), "USD");
        let bucket = vec![&t1a, &t1b, &t2];

        let pairs: Vec<_> = candidate_pairs(&bucket, 0).collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0.date, date(1));
        assert_eq!(pairs[0].1.date, date(1));
    }

    #[test]
    fn test_candidate_pairs_all_within_window() {
        let t1 = txn(1, dec!(10.00), "USD");
        let t2 = txn(2, dec!(10.00), "USD");
        let t3 = txn(3, dec!(10.00), "USD");
        let bucket = vec![&t1, &t2, &t3];

        let pairs: Vec<_> = candidate_pairs(&bucket, 3).collect();
        assert_eq!(pairs.len(), 3);
    }
}
