//! Confidence scoring for candidate pairs.
//!
//! Each pair gets a weighted combination of four component scores:
//! amount (binary, within tolerance), date (linear decay over the
//! window), account (shared cash account), and optionally property
//! (shared property token). Two fixed weight tables keep the combined
//! score in [0, 1] whichever optional components are active.

use beanlint_core::{is_cash_account, segments, Transaction};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::config::DedupConfig;
use super::index::net_amount;

/// Property token pattern: 3-4 digits, a hyphen, then a letter
/// (e.g. "206-Hoover", "2943-Butterfly").
static PROPERTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,4}-[A-Za-z]").expect("valid pattern"));

/// Component sub-scores for one candidate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreParts {
    /// Binary amount agreement within tolerance.
    pub amount: f64,
    /// Linear date proximity within the window.
    pub date: f64,
    /// Shared cash-account overlap.
    pub account: f64,
    /// Property-token agreement; present only when property matching is
    /// enabled.
    pub property: Option<f64>,
}

impl ScoreParts {
    /// All-zero breakdown emitted when the property gate vetoes a pair.
    const fn vetoed() -> Self {
        Self {
            amount: 0.0,
            date: 0.0,
            account: 0.0,
            property: Some(0.0),
        }
    }
}

/// Fixed component weights.
struct Weights {
    amount: f64,
    date: f64,
    account: f64,
    property: f64,
    /// Precomputed sum of the active weights; the combined score divides
    /// by this so it stays in [0, 1] either way.
    total: f64,
}

const BASE_WEIGHTS: Weights = Weights {
    amount: 0.5,
    date: 0.3,
    account: 0.2,
    property: 0.0,
    total: 1.0,
};

const PROPERTY_WEIGHTS: Weights = Weights {
    amount: 0.5,
    date: 0.3,
    account: 0.2,
    property: 0.2,
    total: 1.2,
};

/// Compute the confidence score for a candidate pair.
///
/// Returns the combined score in [0.0, 1.0] and the component breakdown.
pub(crate) fn confidence_score(
    a: &Transaction,
    b: &Transaction,
    cfg: &DedupConfig,
) -> (f64, ScoreParts) {
    let mut property_val = None;
    if cfg.require_property_match {
        let tokens_a = property_tokens(a);
        let tokens_b = property_tokens(b);
        if !tokens_a.is_empty() && !tokens_b.is_empty() && tokens_a.is_disjoint(&tokens_b) {
            // Hard veto: cross-property matches are never true duplicates,
            // regardless of amount/date/account similarity.
            return (0.0, ScoreParts::vetoed());
        }
        let matched = !tokens_a.is_empty() && !tokens_b.is_empty();
        property_val = Some(if matched { 1.0 } else { 0.0 });
    }

    let parts = ScoreParts {
        amount: amount_score(a, b, cfg),
        date: date_score(a, b, cfg.date_window_days),
        account: account_score(a, b),
        property: property_val,
    };

    let weights = if cfg.require_property_match {
        &PROPERTY_WEIGHTS
    } else {
        &BASE_WEIGHTS
    };
    let mut score = weights.amount * parts.amount
        + weights.date * parts.date
        + weights.account * parts.account
        + weights.property * parts.property.unwrap_or(0.0);
    score /= weights.total;

    (score.min(1.0), parts)
}

/// 1.0 if the signed net amounts match within tolerance, else 0.0.
///
/// Binary by design; small tolerance differences are exact-match-or-not.
fn amount_score(a: &Transaction, b: &Transaction, cfg: &DedupConfig) -> f64 {
    let (Some(amount_a), Some(amount_b)) = (
        net_amount(a, cfg.cash_accounts_only),
        net_amount(b, cfg.cash_accounts_only),
    ) else {
        return 0.0;
    };
    if (amount_a - amount_b).abs() <= cfg.amount_tolerance {
        1.0
    } else {
        0.0
    }
}

/// Linear decay from 1.0 at zero days apart to 0.0 at the window
/// boundary. A non-positive window disables date discrimination
/// entirely.
fn date_score(a: &Transaction, b: &Transaction, window: i64) -> f64 {
    if window <= 0 {
        return 0.0;
    }
    let delta = (a.date - b.date).num_days().abs();
    (1.0 - delta as f64 / window as f64).max(0.0)
}

/// 1.0 if the two transactions post to any shared cash account.
fn account_score(a: &Transaction, b: &Transaction) -> f64 {
    let cash_a = cash_accounts(a);
    if cash_accounts(b).intersection(&cash_a).next().is_some() {
        1.0
    } else {
        0.0
    }
}

fn cash_accounts(txn: &Transaction) -> HashSet<String> {
    txn.postings
        .iter()
        .filter(|p| is_cash_account(&p.account))
        .map(|p| p.account.clone())
        .collect()
}

/// Case-folded property tokens of a transaction: any tag or account-path
/// segment matching [`PROPERTY_RE`].
pub(crate) fn property_tokens(txn: &Transaction) -> HashSet<String> {
    let mut tokens = HashSet::new();
    for tag in &txn.tags {
        if PROPERTY_RE.is_match(tag) {
            tokens.insert(tag.to_lowercase());
        }
    }
    for posting in &txn.postings {
        for segment in segments(&posting.account) {
            if PROPERTY_RE.is_match(segment) {
                tokens.insert(segment.to_lowercase());
            }
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use beanlint_core::{Amount, NaiveDate, Posting};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn rent_txn(day: u32, amount: Decimal) -> Transaction {
        Transaction::new(date(day), "Rent")
            .with_posting(Posting::new(
                "Assets:Cash:Checking",
                Amount::new(amount, "USD"),
            ))
            .with_posting(Posting::auto("Income:Rent:206-Hoover-Ave"))
    }

    fn property_txn(day: u32, amount: Decimal, property: &str) -> Transaction {
        Transaction::new(date(day), "Repair")
            .with_posting(Posting::new(
                "Assets:Cash:Checking",
                Amount::new(amount, "USD"),
            ))
            .with_posting(Posting::new(
                format!("Expenses:Repairs:{property}"),
                Amount::new(-amount, "USD"),
            ))
    }

    #[test]
    fn test_one_day_apart_scores_090() {
        let a = rent_txn(12, dec!(100.00));
        let b = rent_txn(13, dec!(100.00));
        let (score, parts) = confidence_score(&a, &b, &DedupConfig::default());

        assert!((parts.amount - 1.0).abs() < f64::EPSILON);
        assert!((parts.date - (1.0 - 1.0 / 3.0)).abs() < 1e-12);
        assert!((parts.account - 1.0).abs() < f64::EPSILON);
        assert!(parts.property.is_none());
        assert!((score - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_same_day_scores_one() {
        let a = rent_txn(12, dec!(100.00));
        let b = rent_txn(12, dec!(100.00));
        let (score, _) = confidence_score(&a, &b, &DedupConfig::default());
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_amount_outside_tolerance_is_binary_zero() {
        let a = rent_txn(12, dec!(100.00));
        let b = rent_txn(12, dec!(100.05));
        let (score, parts) = confidence_score(&a, &b, &DedupConfig::default());
        assert!((parts.amount).abs() < f64::EPSILON);
        // Date and account still contribute, capped at 0.5 of the total.
        assert!(score < 0.80);
    }

    #[test]
    fn test_amount_sign_matters() {
        let a = rent_txn(12, dec!(100.00));
        let b = rent_txn(12, dec!(-100.00));
        let (_, parts) = confidence_score(&a, &b, &DedupConfig::default());
        assert!((parts.amount).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_window_kills_date_component() {
        let cfg = DedupConfig {
            date_window_days: 0,
            ..DedupConfig::default()
        };
        let a = rent_txn(12, dec!(100.00));
        let b = rent_txn(12, dec!(100.00));
        let (score, parts) = confidence_score(&a, &b, &cfg);
        assert!((parts.date).abs() < f64::EPSILON);
        assert!((score - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_no_shared_cash_account() {
        let a = rent_txn(12, dec!(100.00));
        let b = Transaction::new(date(12), "Rent")
            .with_posting(Posting::new(
                "Assets:Cash:Savings",
                Amount::new(dec!(100.00), "USD"),
            ))
            .with_posting(Posting::auto("Income:Rent"));
        let (_, parts) = confidence_score(&a, &b, &DedupConfig::default());
        assert!((parts.account).abs() < f64::EPSILON);
    }

    #[test]
    fn test_property_veto_is_absolute() {
        let cfg = DedupConfig {
            require_property_match: true,
            ..DedupConfig::default()
        };
        let a = property_txn(12, dec!(117.00), "206-Hoover-Ave");
        let b = property_txn(12, dec!(117.00), "2943-Butterfly-Palm");
        let (score, parts) = confidence_score(&a, &b, &cfg);
        assert!(score.abs() < f64::EPSILON);
        assert_eq!(parts, ScoreParts::vetoed());
    }

    #[test]
    fn test_property_match_renormalizes() {
        let cfg = DedupConfig {
            require_property_match: true,
            ..DedupConfig::default()
        };
        let a = property_txn(12, dec!(117.00), "206-Hoover-Ave");
        let b = property_txn(12, dec!(117.00), "206-Hoover-Ave");
        let (score, parts) = confidence_score(&a, &b, &cfg);
        assert_eq!(parts.property, Some(1.0));
        // (0.5 + 0.3 + 0.2 + 0.2) / 1.2 = 1.0
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_tokens_fall_through_gate() {
        let cfg = DedupConfig {
            require_property_match: true,
            ..DedupConfig::default()
        };
        // No property segment anywhere: gate does not apply, property
        // component is 0 and merely dilutes the score.
        let a = Transaction::new(date(12), "Rent")
            .with_posting(Posting::new(
                "Assets:Cash:Checking",
                Amount::new(dec!(100.00), "USD"),
            ))
            .with_posting(Posting::auto("Income:Rent"));
        let b = a.clone();
        let (score, parts) = confidence_score(&a, &b, &cfg);
        assert_eq!(parts.property, Some(0.0));
        assert!((score - 1.0 / 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_property_tokens_from_tags_and_segments() {
        let txn = Transaction::new(date(12), "Rent")
            .with_tag("206-hoover-ave")
            .with_posting(Posting::new(
                "Assets:Cash:Checking",
                Amount::new(dec!(100.00), "USD"),
            ))
            .with_posting(Posting::auto("Income:Rent:2943-Butterfly-Palm"));

        let tokens = property_tokens(&txn);
        assert!(tokens.contains("206-hoover-ave"));
        assert!(tokens.contains("2943-butterfly-palm"));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_property_pattern_shape() {
        let matches = |s: &str| PROPERTY_RE.is_match(s);
        assert!(matches("206-Hoover"));
        assert!(matches("2943-Butterfly"));
        assert!(!matches("20-Hoover")); // too few digits
        assert!(!matches("20600-Hoover")); // too many digits
        assert!(!matches("206-7th")); // digit after hyphen
        assert!(!matches("Hoover-206"));
    }
}
