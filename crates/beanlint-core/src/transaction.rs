//! Transaction and posting types.
//!
//! A [`Transaction`] records a transfer between accounts on a calendar date.
//! Each leg of the transfer is a [`Posting`]; a posting whose `units` is
//! `None` has an elided amount to be inferred by the booking layer, and is
//! excluded from any amount or currency computation here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::Amount;

/// Metadata value types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetaValue {
    /// String value
    String(String),
    /// Date value
    Date(NaiveDate),
    /// Numeric value
    Number(Decimal),
    /// Boolean value
    Bool(bool),
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Date(d) => write!(f, "{d}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Metadata is a key-value map attached to transactions and postings.
pub type Metadata = HashMap<String, MetaValue>;

/// A posting within a transaction.
///
/// Postings represent the individual legs of a transaction. Each posting
/// specifies a colon-delimited hierarchical account and optionally an
/// amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// The account for this posting (e.g., "Assets:Cash:Checking")
    pub account: String,
    /// The units (None for elided amounts filled in by interpolation)
    pub units: Option<Amount>,
    /// Posting metadata
    pub meta: Metadata,
}

impl Posting {
    /// Create a new posting with the given account and amount.
    #[must_use]
    pub fn new(account: impl Into<String>, units: Amount) -> Self {
        Self {
            account: account.into(),
            units: Some(units),
            meta: Metadata::new(),
        }
    }

    /// Create a posting without any amount (to be inferred).
    #[must_use]
    pub fn auto(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            units: None,
            meta: Metadata::new(),
        }
    }

    /// Check if this posting has an explicit amount.
    #[must_use]
    pub const fn has_units(&self) -> bool {
        self.units.is_some()
    }
}

impl fmt::Display for Posting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}", self.account)?;
        if let Some(units) = &self.units {
            write!(f, "  {units}")?;
        }
        Ok(())
    }
}

/// A ledger transaction.
///
/// Transactions record transfers between accounts. Tags carry free-form
/// labels; metadata carries key-value annotations including diagnostic
/// provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date
    pub date: NaiveDate,
    /// Transaction flag (* or !)
    pub flag: char,
    /// Payee (optional)
    pub payee: Option<String>,
    /// Narration (description)
    pub narration: String,
    /// Tags attached to this transaction
    pub tags: Vec<String>,
    /// Transaction metadata
    pub meta: Metadata,
    /// Postings (account entries)
    pub postings: Vec<Posting>,
}

impl Transaction {
    /// Create a new transaction.
    #[must_use]
    pub fn new(date: NaiveDate, narration: impl Into<String>) -> Self {
        Self {
            date,
            flag: '*',
            payee: None,
            narration: narration.into(),
            tags: Vec::new(),
            meta: Metadata::new(),
            postings: Vec::new(),
        }
    }

    /// Set the flag.
    #[must_use]
    pub const fn with_flag(mut self, flag: char) -> Self {
        self.flag = flag;
        self
    }

    /// Set the payee.
    #[must_use]
    pub fn with_payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = Some(payee.into());
        self
    }

    /// Add a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add a metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: MetaValue) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    /// Add a posting.
    #[must_use]
    pub fn with_posting(mut self, posting: Posting) -> Self {
        self.postings.push(posting);
        self
    }

    /// Iterate over postings that carry an explicit amount.
    pub fn priced_postings(&self) -> impl Iterator<Item = (&Posting, &Amount)> {
        self.postings
            .iter()
            .filter_map(|p| p.units.as_ref().map(|units| (p, units)))
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.date, self.flag)?;
        if let Some(payee) = &self.payee {
            write!(f, "\"{payee}\" ")?;
        }
        write!(f, "\"{}\"", self.narration)?;
        for tag in &self.tags {
            write!(f, " #{tag}")?;
        }
        for posting in &self.postings {
            write!(f, "\n{posting}")?;
        }
        Ok(())
    }
}

/// Sort transactions ascending by date.
///
/// This is a stable sort that preserves the original order of
/// transactions sharing a date.
pub fn sort_by_date(transactions: &mut [Transaction]) {
    transactions.sort_by_key(|txn| txn.date);
}
